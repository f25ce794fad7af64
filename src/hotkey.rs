//! 全局快捷键模块
//!
//! # 设计思路
//!
//! 快捷键只负责"触发一次查词流程"，具体流程交给 `pipeline`。
//! 在按键**松开**时触发，此时用户手指基本已离开修饰键，
//! 模拟的复制快捷键不会与仍被按住的 Shift 组合。
//!
//! # 实现思路
//!
//! - 插件以 `with_handler` 注册统一回调，快捷键本身在 `register_hotkey` 中注册，
//!   便于设置变更时先 `unregister_all` 再重新注册。
//! - `CommandOrControl` 在 macOS 上解析为 `Cmd`，其它平台为 `Ctrl`。

use tauri::plugin::TauriPlugin;
use tauri::{AppHandle, Wry};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use crate::error::AppError;
use crate::pipeline;

/// 默认快捷键：Windows / Linux 为 `Ctrl+Shift+D`，macOS 为 `Cmd+Shift+D`
pub const DEFAULT_HOTKEY: &str = "CommandOrControl+Shift+D";

fn parse_accelerator(accelerator: &str) -> Result<Shortcut, String> {
    accelerator
        .trim()
        .parse::<Shortcut>()
        .map_err(|e| e.to_string())
}

/// 校验快捷键字符串。
pub fn parse_hotkey(accelerator: &str) -> Result<Shortcut, AppError> {
    parse_accelerator(accelerator)
        .map_err(|e| AppError::Hotkey(format!("Invalid hotkey ({accelerator}): {e}")))
}

/// 构建全局快捷键插件，回调中按键松开时触发查词流程。
pub fn plugin() -> TauriPlugin<Wry> {
    tauri_plugin_global_shortcut::Builder::new()
        .with_handler(|app, shortcut, event| {
            if event.state() == ShortcutState::Released {
                log::debug!("⌨️ 全局快捷键触发: {:?}", shortcut);
                pipeline::trigger(app.clone());
            }
        })
        .build()
}

/// 注册（或替换）全局快捷键。
pub fn register_hotkey(app: &AppHandle, accelerator: &str) -> Result<(), AppError> {
    let failed = |reason: String| {
        AppError::Hotkey(format!(
            "Failed to register global hotkey ({accelerator}): {reason}"
        ))
    };

    let shortcut = parse_accelerator(accelerator).map_err(failed)?;

    let manager = app.global_shortcut();
    if let Err(err) = manager.unregister_all() {
        log::warn!("清理旧的全局快捷键失败: {}", err);
    }
    manager
        .register(shortcut)
        .map_err(|e| failed(e.to_string()))?;

    log::info!("全局快捷键已注册: {}", accelerator);
    Ok(())
}

/// 退出前注销全部快捷键。
pub fn unregister_all(app: &AppHandle) {
    if let Err(err) = app.global_shortcut().unregister_all() {
        log::warn!("退出前清理全局快捷键失败: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_hotkey_parses() {
        assert!(parse_hotkey(DEFAULT_HOTKEY).is_ok());
        assert!(parse_hotkey("CmdOrCtrl+Shift+D").is_ok());
        assert!(parse_hotkey(" Alt+Shift+L ").is_ok());
    }

    #[test]
    fn default_hotkey_matches_platform_modifier() {
        let expected = if cfg!(target_os = "macos") {
            "Cmd+Shift+D"
        } else {
            "Ctrl+Shift+D"
        };
        assert_eq!(parse_hotkey(DEFAULT_HOTKEY).unwrap(), parse_hotkey(expected).unwrap());
    }

    #[test]
    fn invalid_hotkey_is_rejected_with_context() {
        let err = parse_hotkey("Ctrl+Shift+NotAKey").unwrap_err();
        assert!(err.to_string().starts_with("Invalid hotkey (Ctrl+Shift+NotAKey)"));
        assert!(parse_hotkey("").is_err());
    }
}
