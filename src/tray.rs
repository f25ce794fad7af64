//! 托盘图标与菜单
//!
//! 应用没有主窗口，托盘是唯一常驻入口：
//! - "Lookup history"：打开查词历史窗口
//! - "Quit"：注销快捷键并退出

use tauri::image::Image;
use tauri::menu::{Menu, MenuItem};
use tauri::tray::TrayIconBuilder;
use tauri::{App, AppHandle};

use crate::hotkey;
use crate::popup;

const TRAY_ID: &str = "main";
const MENU_HISTORY: &str = "history";
const MENU_QUIT: &str = "quit";

pub fn tray_tooltip(hotkey: &str) -> String {
    format!("WordPeek - press {hotkey} to lookup selection")
}

pub fn build_tray(app: &App, icon: Image<'static>, hotkey: &str) -> tauri::Result<()> {
    let history_i = MenuItem::with_id(app, MENU_HISTORY, "Lookup history", true, None::<&str>)?;
    let quit_i = MenuItem::with_id(app, MENU_QUIT, "Quit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&history_i, &quit_i])?;

    TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip(tray_tooltip(hotkey))
        .menu(&menu)
        .on_menu_event(|app, event| handle_menu_event(app, event.id.as_ref()))
        .build(app)?;
    Ok(())
}

/// 快捷键变更后同步托盘提示文字。
pub fn refresh_tooltip(app: &AppHandle, hotkey: &str) {
    let Some(tray) = app.tray_by_id(TRAY_ID) else {
        return;
    };
    if let Err(err) = tray.set_tooltip(Some(tray_tooltip(hotkey))) {
        log::warn!("更新托盘提示失败: {}", err);
    }
}

fn handle_menu_event(app: &AppHandle, id: &str) {
    match id {
        MENU_HISTORY => {
            let app = app.clone();
            // Windows 上同步回调中创建窗口会死锁，放到异步任务中
            tauri::async_runtime::spawn(async move {
                if let Err(err) = popup::open_history_window(&app) {
                    log::warn!("打开历史窗口失败: {}", err);
                }
            });
        }
        MENU_QUIT => {
            log::info!("用户从托盘菜单退出");
            hotkey::unregister_all(app);
            app.exit(0);
        }
        _ => {}
    }
}
