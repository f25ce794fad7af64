//! 原生消息框
//!
//! 提示类消息框使用非阻塞 `show`；确认框需要等待用户选择，
//! 放到阻塞线程池中调用 `blocking_show`，避免占用异步运行时线程。

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

/// 弹出 Yes/No 确认框，返回用户是否选择 Yes。
pub async fn ask_yes_no(app: &AppHandle, title: &str, message: &str) -> bool {
    let app = app.clone();
    let title = title.to_string();
    let message = message.to_string();

    let answer = tauri::async_runtime::spawn_blocking(move || {
        app.dialog()
            .message(message)
            .title(title)
            .kind(MessageDialogKind::Info)
            .buttons(MessageDialogButtons::YesNo)
            .blocking_show()
    })
    .await;

    match answer {
        Ok(answer) => answer,
        Err(err) => {
            log::error!("确认框任务异常，按取消处理: {}", err);
            false
        }
    }
}

pub fn show_info(app: &AppHandle, title: &str, message: &str) {
    show(app, title, message, MessageDialogKind::Info);
}

pub fn show_error(app: &AppHandle, title: &str, message: &str) {
    show(app, title, message, MessageDialogKind::Error);
}

fn show(app: &AppHandle, title: &str, message: &str, kind: MessageDialogKind) {
    app.dialog()
        .message(message)
        .title(title)
        .kind(kind)
        .show(|_| {});
}
