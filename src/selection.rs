//! 选中文本捕获模块
//!
//! # 设计思路
//!
//! 全局快捷键触发时，当前焦点仍在用户正在阅读的应用中。
//! 通过模拟系统复制快捷键让该应用把选中内容写入剪贴板，再读取剪贴板文本。
//!
//! # 实现思路
//!
//! 1. 释放快捷键中可能仍被按住的 Shift / Alt，避免组合成 `Ctrl+Shift+C`
//! 2. 使用 `enigo` 发送 `Ctrl+C`（macOS 为 `Cmd+C`）；失败只记录日志
//! 3. 等待 `copy_settle` 让目标应用完成写入
//! 4. 使用 `arboard` 读取文本，读取失败按空内容处理
//! 5. 交给 `normalize` 规范化

mod normalize;

pub use normalize::{Selection, normalize_selection};

use std::time::Duration;

use enigo::{
    Direction::{Click, Press, Release},
    Enigo, Key, Keyboard, Settings,
};

use crate::error::AppError;

/// 捕获参数（来自应用设置）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureOptions {
    pub simulate_copy: bool,
    pub copy_settle: Duration,
}

/// 捕获当前选中的文本；没有可用内容时返回 `None`。
pub async fn capture_selection(options: CaptureOptions) -> Option<Selection> {
    if options.simulate_copy {
        if let Err(err) = simulate_copy() {
            log::warn!("⚠️ 模拟复制失败，继续读取剪贴板: {}", err);
        }
    }

    tokio::time::sleep(options.copy_settle).await;

    let raw = match read_clipboard_text() {
        Ok(text) => text,
        Err(err) => {
            log::warn!("⚠️ 读取剪贴板失败，按空内容处理: {}", err);
            String::new()
        }
    };

    let selection = normalize_selection(&raw);
    log::debug!(
        "📋 剪贴板文本 {} 字符，规范化结果: {:?}",
        raw.chars().count(),
        selection.as_ref().map(|s| s.term.as_str())
    );
    selection
}

fn simulate_copy() -> Result<(), AppError> {
    let mut enigo = Enigo::new(&Settings::default())
        .map_err(|e| AppError::Input(format!("初始化输入模拟失败: {}", e)))?;

    for held in [Key::Shift, Key::Alt] {
        if let Err(err) = enigo.key(held, Release) {
            log::debug!("释放修饰键 {:?} 失败: {}", held, err);
        }
    }

    #[cfg(target_os = "macos")]
    let modifier = Key::Meta;
    #[cfg(not(target_os = "macos"))]
    let modifier = Key::Control;

    enigo
        .key(modifier, Press)
        .and_then(|_| enigo.key(Key::Unicode('c'), Click))
        .and_then(|_| enigo.key(modifier, Release))
        .map_err(|e| AppError::Input(format!("模拟复制按键失败: {}", e)))?;

    log::debug!("已模拟复制快捷键");
    Ok(())
}

fn read_clipboard_text() -> Result<String, AppError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
    clipboard
        .get_text()
        .map_err(|e| AppError::Clipboard(e.to_string()))
}
