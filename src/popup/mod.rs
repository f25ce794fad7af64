//! 弹窗模块（popup）
//!
//! ## 设计思路
//!
//! 弹窗分两类：
//! - 原生消息框（`dialog`）：确认查询、无选中内容、查无此词、查询失败
//! - 网页窗口：结果窗口（`result.html`）与历史窗口（`history.html`）
//!
//! 结果窗口在用户确认后立即以"加载中"状态打开，查询结束后：
//! 查到则原地更新为释义；查不到或失败则关闭窗口并改用消息框提示。
//!
//! ## 子模块
//!
//! - `state`：按窗口标签保存内容
//! - `dialog`：原生消息框封装
//! - `commands`：结果窗口 / 历史窗口调用的 Tauri 命令

pub mod commands;
pub mod dialog;
mod state;

pub use state::{PopupPayload, PopupState, RESULT_WINDOW_PREFIX};

use tauri::{AppHandle, Emitter, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::dictionary::Definition;
use crate::error::AppError;

/// 结果窗口内容更新事件
pub const POPUP_UPDATED_EVENT: &str = "popup-updated";
/// 查词历史变化事件（历史窗口据此刷新）
pub const HISTORY_CHANGED_EVENT: &str = "history-changed";

pub const HISTORY_WINDOW_LABEL: &str = "history";

pub const NO_SELECTION_TITLE: &str = "No selection";
pub const NO_SELECTION_MESSAGE: &str =
    "No text was selected (or nothing copied). Select text and press the hotkey again.";

pub fn confirm_message(selection: &str) -> String {
    format!("Look up meaning of:\n\n\"{selection}\"")
}

pub fn not_found_message(selection: &str) -> String {
    format!("No such word exists: \"{selection}\"")
}

pub fn lookup_error_message(selection: &str, error: &str) -> String {
    format!("Error while looking up \"{selection}\":\n{error}")
}

/// 打开"加载中"的结果窗口，返回窗口标签。
pub fn open_loading_window(app: &AppHandle, selection: &str) -> Result<String, AppError> {
    let state = app.state::<PopupState>();
    let label = state.next_label();
    let payload = PopupPayload::Loading {
        selection: selection.to_string(),
    };

    // 先写内容再建窗口，页面加载时一定能拉取到
    state.set(&label, payload.clone());

    let built = WebviewWindowBuilder::new(app, &label, WebviewUrl::App("result.html".into()))
        .title(payload.title())
        .inner_size(520.0, 420.0)
        .always_on_top(true)
        .center()
        .focused(true)
        .build();
    if let Err(err) = built {
        state.remove(&label);
        return Err(AppError::Window(format!("创建结果窗口失败: {}", err)));
    }

    log::debug!("🪟 结果窗口已打开: {}", label);
    Ok(label)
}

/// 把释义写入结果窗口；窗口已被用户关闭时直接丢弃。
pub fn show_definition(
    app: &AppHandle,
    label: &str,
    selection: &str,
    definition: Definition,
) -> Result<(), AppError> {
    let Some(window) = app.get_webview_window(label) else {
        log::debug!("结果窗口 {} 已关闭，丢弃查询结果", label);
        return Ok(());
    };

    let payload = PopupPayload::Definition {
        selection: selection.to_string(),
        definition,
    };
    app.state::<PopupState>().set(label, payload.clone());

    if let Err(err) = window.set_title(&payload.title()) {
        log::warn!("更新结果窗口标题失败: {}", err);
    }
    app.emit_to(label, POPUP_UPDATED_EVENT, &payload)
        .map_err(|e| AppError::Window(format!("推送结果窗口内容失败: {}", e)))?;
    if let Err(err) = window.set_focus() {
        log::warn!("结果窗口获取焦点失败: {}", err);
    }
    Ok(())
}

/// 关闭窗口（尽力而为）。
pub fn close_window(app: &AppHandle, label: &str) {
    if let Some(window) = app.get_webview_window(label) {
        if let Err(err) = window.close() {
            log::warn!("关闭窗口 {} 失败: {}", label, err);
        }
    }
}

/// 窗口销毁后清理其内容。
pub fn forget_window(app: &AppHandle, label: &str) {
    if !label.starts_with(RESULT_WINDOW_PREFIX) {
        return;
    }
    if let Some(state) = app.try_state::<PopupState>() {
        if state.remove(label).is_some() {
            log::debug!("🧹 已清理结果窗口内容: {}", label);
        }
    }
}

/// 打开（或聚焦）查词历史窗口。
pub fn open_history_window(app: &AppHandle) -> Result<(), AppError> {
    if let Some(window) = app.get_webview_window(HISTORY_WINDOW_LABEL) {
        if let Err(err) = window.unminimize() {
            log::warn!("历史窗口显示失败（unminimize）: {}", err);
        }
        window
            .show()
            .map_err(|e| AppError::Window(format!("Failed to show window: {}", e)))?;
        return window
            .set_focus()
            .map_err(|e| AppError::Window(format!("Failed to set window focus: {}", e)));
    }

    WebviewWindowBuilder::new(
        app,
        HISTORY_WINDOW_LABEL,
        WebviewUrl::App("history.html".into()),
    )
    .title("WordPeek - Lookup history")
    .inner_size(440.0, 520.0)
    .center()
    .build()
    .map_err(|e| AppError::Window(format!("创建历史窗口失败: {}", e)))?;
    Ok(())
}

/// 通知历史窗口刷新（窗口未打开时无事发生）。
pub fn notify_history_changed(app: &AppHandle) {
    if app.get_webview_window(HISTORY_WINDOW_LABEL).is_some() {
        if let Err(err) = app.emit_to(HISTORY_WINDOW_LABEL, HISTORY_CHANGED_EVENT, ()) {
            log::warn!("通知历史窗口刷新失败: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_quote_the_selection() {
        assert_eq!(confirm_message("word"), "Look up meaning of:\n\n\"word\"");
        assert_eq!(not_found_message("qwzx"), "No such word exists: \"qwzx\"");
        assert_eq!(
            lookup_error_message("word", "Unexpected API response: 500"),
            "Error while looking up \"word\":\nUnexpected API response: 500"
        );
    }
}
