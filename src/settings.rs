//! 应用设置模块
//!
//! # 设计思路
//!
//! 所有可调项集中到 `AppSettings`，以 camelCase JSON 持久化在
//! `<app_data_dir>/settings.json`。文件缺失或字段缺失时使用默认值，
//! 文件损坏时记录日志并回退默认值，保证应用总能启动。
//!
//! # 实现思路
//!
//! - 读写函数以路径为参数，Tauri 命令只负责解析应用数据目录，便于测试。
//! - 保存前先做数值钳制、快捷键与接口地址校验，非法设置不会落盘。
//! - 提交顺序：校验并构建新客户端 → 注册新快捷键 → 写盘 → 替换运行时状态。
//!   注册或写盘失败时恢复旧快捷键，磁盘、托管状态与运行中的服务始终一致。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager, State};

use crate::dictionary::{DEFAULT_API_BASE_URL, DictionaryClient};
use crate::error::AppError;
use crate::hotkey;
use crate::lookup::LookupService;
use crate::selection::CaptureOptions;
use crate::tray;

const SETTINGS_FILE_NAME: &str = "settings.json";

/// 应用设置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// 全局快捷键
    pub hotkey: String,
    /// 词典接口地址，查询词作为最后一个路径段追加
    pub api_base_url: String,
    /// HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 模拟复制与读取剪贴板之间的等待时间（毫秒）
    pub copy_settle_ms: u64,
    /// 读取剪贴板前是否模拟复制快捷键
    pub simulate_copy: bool,
    /// 查询前是否弹出确认框
    pub confirm_before_lookup: bool,
    /// 查询结果缓存容量，0 表示关闭
    pub cache_capacity: usize,
    /// 历史记录保留条数，0 表示不记录
    pub history_limit: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            hotkey: hotkey::DEFAULT_HOTKEY.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 6,
            copy_settle_ms: 120,
            simulate_copy: true,
            confirm_before_lookup: true,
            cache_capacity: 64,
            history_limit: 200,
        }
    }
}

impl AppSettings {
    /// 钳制数值范围，空字符串回退默认值。
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.hotkey = self.hotkey.trim().to_string();
        if self.hotkey.is_empty() {
            self.hotkey = defaults.hotkey;
        }
        self.api_base_url = self.api_base_url.trim().to_string();
        if self.api_base_url.is_empty() {
            self.api_base_url = defaults.api_base_url;
        }
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 60);
        self.copy_settle_ms = self.copy_settle_ms.min(2_000);
        self.cache_capacity = self.cache_capacity.min(10_000);
        self.history_limit = self.history_limit.min(100_000);
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn capture_options(&self) -> CaptureOptions {
        CaptureOptions {
            simulate_copy: self.simulate_copy,
            copy_settle: Duration::from_millis(self.copy_settle_ms),
        }
    }
}

/// 运行时设置（Tauri Managed State）
pub struct SettingsState(pub Mutex<AppSettings>);

impl SettingsState {
    pub fn new(settings: AppSettings) -> Self {
        Self(Mutex::new(settings))
    }

    /// 读取当前设置的快照；锁中毒时回退默认值。
    pub fn snapshot(&self) -> AppSettings {
        match self.0.lock() {
            Ok(guard) => guard.clone(),
            Err(err) => {
                log::error!("读取设置失败（锁中毒），使用默认设置: {}", err);
                AppSettings::default()
            }
        }
    }

    fn replace(&self, settings: AppSettings) {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = settings;
    }
}

fn settings_file_path(app: &AppHandle) -> Result<PathBuf, AppError> {
    let app_data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| AppError::Storage(format!("获取应用数据目录失败: {}", e)))?;

    fs::create_dir_all(&app_data_dir)
        .map_err(|e| AppError::Storage(format!("创建应用数据目录失败: {}", e)))?;

    Ok(app_data_dir.join(SETTINGS_FILE_NAME))
}

/// 从指定路径读取设置。
pub fn load_settings_from_path(path: &Path) -> AppSettings {
    if !path.exists() {
        return AppSettings::default();
    }

    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            serde_json::from_str::<AppSettings>(&content).map_err(|e| e.to_string())
        });

    match parsed {
        Ok(settings) => settings.normalized(),
        Err(err) => {
            log::warn!("⚠️ 设置文件 {} 无法解析，使用默认设置: {}", path.display(), err);
            AppSettings::default()
        }
    }
}

/// 将设置写入指定路径。
pub fn save_settings_to_path(path: &Path, settings: &AppSettings) -> Result<(), AppError> {
    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Storage(format!("序列化设置失败: {}", e)))?;
    fs::write(path, content)?;
    Ok(())
}

/// 启动时加载设置；数据目录不可用时使用默认设置。
pub fn load_settings(app: &AppHandle) -> AppSettings {
    match settings_file_path(app) {
        Ok(path) => load_settings_from_path(&path),
        Err(err) => {
            log::error!("设置目录不可用，使用默认设置: {}", err);
            AppSettings::default()
        }
    }
}

/// 校验设置并构建对应的词典客户端，不产生任何副作用。
pub fn prepare_settings(settings: AppSettings) -> Result<(AppSettings, DictionaryClient), AppError> {
    let settings = settings.normalized();
    hotkey::parse_hotkey(&settings.hotkey)?;
    let client = DictionaryClient::new(&settings.api_base_url, settings.request_timeout())?;
    Ok((settings, client))
}

fn restore_hotkey(app: &AppHandle, accelerator: &str) {
    if let Err(err) = hotkey::register_hotkey(app, accelerator) {
        log::error!("恢复旧快捷键失败: {}", err);
    }
}

#[tauri::command]
pub fn get_app_settings(state: State<'_, SettingsState>) -> Result<AppSettings, AppError> {
    Ok(state.snapshot())
}

#[tauri::command]
pub fn set_app_settings(
    app: AppHandle,
    state: State<'_, SettingsState>,
    settings: AppSettings,
) -> Result<AppSettings, AppError> {
    let (settings, client) = prepare_settings(settings)?;
    let previous = state.snapshot();
    let settings_path = settings_file_path(&app)?;

    if let Err(err) = hotkey::register_hotkey(&app, &settings.hotkey) {
        restore_hotkey(&app, &previous.hotkey);
        return Err(err);
    }
    if let Err(err) = save_settings_to_path(&settings_path, &settings) {
        restore_hotkey(&app, &previous.hotkey);
        return Err(err);
    }

    if let Some(service) = app.try_state::<LookupService>() {
        service.install(client, settings.cache_capacity);
    }
    tray::refresh_tooltip(&app, &settings.hotkey);
    state.replace(settings.clone());
    log::info!("设置已保存并生效");

    Ok(settings)
}
