// 防止在 Windows 发布版本中显示额外的控制台窗口，不要删除！
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! # WordPeek — 应用入口
//!
//! 本文件仅负责应用初始化与插件/命令注册。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use tauri::image::Image;
use tauri::{Manager, RunEvent, WindowEvent};
use wordpeek::popup::dialog;
use wordpeek::{db, hotkey, lookup, popup, settings, tray};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = tauri::Builder::default()
        // 插件初始化
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(hotkey::plugin())
        // 应用设置
        .setup(|app| {
            log::info!("setup: begin");
            let handle = app.handle().clone();

            let app_settings = settings::load_settings(&handle);
            log::info!("setup: settings loaded");

            let service = lookup::LookupService::new(&app_settings).or_else(|err| {
                log::error!("setup: 词典接口配置无效，回退默认配置: {err}");
                lookup::LookupService::new(&settings::AppSettings::default())
            })?;
            app.manage(service);
            app.manage(popup::PopupState::new());

            match db::init_db(&handle) {
                Ok(db_state) => {
                    app.manage(db_state);
                    log::info!("setup: db state managed");
                }
                Err(err) => {
                    log::error!("setup: 数据库初始化失败，将不记录查词历史: {err}");
                }
            }

            let hotkey_text = app_settings.hotkey.clone();
            app.manage(settings::SettingsState::new(app_settings));

            let app_icon = Image::from_bytes(include_bytes!("../icons/icon.png"))?;
            if let Err(err) = tray::build_tray(app, app_icon, &hotkey_text) {
                log::warn!("托盘图标创建失败，只能通过结果窗口退出: {err}");
            }
            log::info!("setup: tray ready");

            // 注册失败不影响托盘等其它功能
            if let Err(err) = hotkey::register_hotkey(&handle, &hotkey_text) {
                log::error!("setup: {err}");
                dialog::show_error(&handle, "Hotkey Error", &err.to_string());
            }

            log::info!(
                "WordPeek is now running. Press {} to lookup selected text.",
                hotkey_text
            );
            Ok(())
        })
        // 窗口销毁时清理弹窗内容
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                popup::forget_window(window.app_handle(), window.label());
            }
        })
        // 注册所有 Tauri 命令
        .invoke_handler(tauri::generate_handler![
            // 结果窗口
            popup::commands::get_popup_payload,
            popup::commands::continue_reading,
            popup::commands::quit_app,
            popup::commands::open_source_url,
            popup::commands::lookup_from_history,
            // 查词历史
            db::get_lookup_history,
            db::clear_lookup_history,
            // 应用设置
            settings::get_app_settings,
            settings::set_app_settings,
        ])
        .build(tauri::generate_context!())
        .expect("构建 Tauri 应用时出错");

    app.run(|_app, event| {
        // 没有窗口时继续在后台运行，只有显式退出（带退出码）才真正结束
        if let RunEvent::ExitRequested { api, code, .. } = event {
            if code.is_none() {
                api.prevent_exit();
            }
        }
    });
}
