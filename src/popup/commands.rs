//! 结果窗口与历史窗口调用的 Tauri 命令

use tauri::{AppHandle, State, WebviewWindow};
use tauri_plugin_shell::ShellExt;

use super::{PopupPayload, PopupState};
use crate::error::AppError;
use crate::hotkey;
use crate::pipeline;

/// 读取调用方窗口当前的内容。
#[tauri::command]
pub fn get_popup_payload(
    window: WebviewWindow,
    state: State<'_, PopupState>,
) -> Result<Option<PopupPayload>, AppError> {
    Ok(state.get(window.label()))
}

/// "Continue reading"：只关闭当前窗口，应用继续在后台运行。
#[tauri::command]
pub fn continue_reading(window: WebviewWindow) -> Result<(), AppError> {
    window
        .close()
        .map_err(|e| AppError::Window(format!("关闭结果窗口失败: {}", e)))
}

/// "Close app"：退出整个应用。
#[tauri::command]
pub fn quit_app(app: AppHandle) {
    log::info!("用户从结果窗口退出应用");
    hotkey::unregister_all(&app);
    app.exit(0);
}

/// 在默认浏览器中打开词条来源链接（仅允许 http / https）。
#[tauri::command]
pub fn open_source_url(app: AppHandle, url: String) -> Result<(), AppError> {
    let parsed = reqwest::Url::parse(url.trim())
        .map_err(|e| AppError::Input(format!("链接格式错误: {}", e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Input(format!("不支持的链接协议: {}", parsed.scheme())));
    }

    #[allow(deprecated)]
    let opened = app.shell().open(parsed.as_str(), None);
    opened.map_err(|e| AppError::Input(format!("打开链接失败: {}", e)))
}

/// 从历史窗口重新查询某个词（跳过捕获与确认）。
#[tauri::command]
pub async fn lookup_from_history(app: AppHandle, term: String) -> Result<(), AppError> {
    pipeline::lookup_term(app, term).await
}
