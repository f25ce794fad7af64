//! # WordPeek — 库入口
//!
//! 选中任意应用中的文字，按下全局快捷键即可查词。
//!
//! ## 架构总览
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │   前端 (dist/: result.html · history.html, 纯 HTML + JS)   │
//! └───────┬────────────────────────────────────────────────────┘
//!         ↕ Tauri IPC (Result<T, AppError>) + 事件 popup-updated
//! ┌───────┴────────────────────────────────────────────────────┐
//! │                        后端 (Rust)                          │
//! │                                                            │
//! │  hotkey ──▶ pipeline ──▶ selection   (enigo 模拟复制 +     │
//! │   (松开触发)   │                       arboard 读剪贴板)    │
//! │               ├──▶ popup::dialog     (原生确认/提示框)     │
//! │               ├──▶ lookup ──▶ cache  (LRU)                 │
//! │               │          └──▶ dictionary (reqwest + serde) │
//! │               ├──▶ db                (SQLite 查词历史)     │
//! │               └──▶ popup             (结果窗口)            │
//! │                                                            │
//! │  tray · settings · error                                   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`settings`] | 设置持久化与运行时生效 |
//! | [`hotkey`] | 全局快捷键解析、注册、回调 |
//! | [`selection`] | 模拟复制、读取剪贴板、规范化选中文本 |
//! | [`dictionary`] | 词典接口请求、响应判定、释义渲染 |
//! | [`cache`] | 查询结果 LRU 缓存 |
//! | [`lookup`] | 客户端 + 缓存组合成的可注入服务 |
//! | [`db`] | 查词历史（SQLite） |
//! | [`popup`] | 消息框、结果窗口、历史窗口 |
//! | [`pipeline`] | 一次查词流程的编排与互斥 |
//! | [`tray`] | 托盘图标与菜单 |

pub mod cache;
pub mod db;
pub mod dictionary;
pub mod error;
pub mod hotkey;
pub mod lookup;
pub mod pipeline;
pub mod popup;
pub mod selection;
pub mod settings;
pub mod tray;
