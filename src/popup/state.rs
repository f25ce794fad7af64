//! 弹窗负载状态
//!
//! 每个结果窗口有独立标签 `result-<n>`，窗口内容（加载中 / 释义）按标签保存。
//! 前端加载完成后主动拉取一次，之后通过事件接收更新，两条路径读到的是同一份数据，
//! 因此事件早于页面加载到达也不会丢失。

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::dictionary::Definition;

pub const RESULT_WINDOW_PREFIX: &str = "result-";

/// 结果窗口展示的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PopupPayload {
    #[serde(rename_all = "camelCase")]
    Loading { selection: String },
    #[serde(rename_all = "camelCase")]
    Definition {
        selection: String,
        definition: Definition,
    },
}

impl PopupPayload {
    pub fn title(&self) -> String {
        match self {
            Self::Loading { selection } | Self::Definition { selection, .. } => {
                format!("Meaning: {selection}")
            }
        }
    }
}

/// 所有打开中的结果窗口内容（Tauri Managed State）
#[derive(Default)]
pub struct PopupState {
    next_id: AtomicU64,
    payloads: Mutex<HashMap<String, PopupPayload>>,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配新的窗口标签。
    pub fn next_label(&self) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{RESULT_WINDOW_PREFIX}{id}")
    }

    pub fn set(&self, label: &str, payload: PopupPayload) {
        match self.payloads.lock() {
            Ok(mut guard) => {
                guard.insert(label.to_string(), payload);
            }
            Err(err) => log::error!("写入弹窗内容失败（锁中毒）: {}", err),
        }
    }

    pub fn get(&self, label: &str) -> Option<PopupPayload> {
        self.payloads.lock().ok()?.get(label).cloned()
    }

    pub fn remove(&self, label: &str) -> Option<PopupPayload> {
        self.payloads.lock().ok()?.remove(label)
    }

    pub fn len(&self) -> usize {
        self.payloads.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
