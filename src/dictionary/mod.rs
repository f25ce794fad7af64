//! # 词典查询模块（dictionary）
//!
//! ## 设计思路
//!
//! 将"发请求 → 判定状态码 → 解析 JSON → 渲染文本"按职责拆分，
//! 网络部分与纯函数部分分离，纯函数部分可以脱离网络直接测试。
//!
//! - `client`：`reqwest` 客户端、URL 拼接、网络错误映射
//! - `model`：词典 API 返回的数据模型（字段全部可缺省）
//! - `render`：把词条渲染成弹窗展示的纯文本
//! - `error`：`LookupError` 错误枚举
//!
//! ## 调用链
//!
//! ```text
//! DictionaryClient::lookup(term)
//!    ├─ endpoint_for(term)          拼接 <base>/<term>
//!    ├─ GET                         网络错误 → LookupError
//!    └─ interpret_response(status, body)
//!         ├─ 200 → render_entries → Found / NotFound（渲染结果为空）
//!         ├─ 404 → NotFound
//!         └─ 其它 → UnexpectedStatus
//! ```

mod client;
mod error;
mod model;
mod render;

pub use client::{DEFAULT_API_BASE_URL, DictionaryClient, interpret_response};
pub use error::LookupError;
pub use model::{Entry, Meaning, Phonetic, Sense};
pub use render::{render_entries, summarize};

use serde::Serialize;

/// 查到的释义
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// 实际查询的词
    pub term: String,
    /// 渲染后的释义全文
    pub text: String,
    /// 词条来源链接（已去重）
    pub source_urls: Vec<String>,
    /// 第一条释义的摘要，用于历史记录列表
    pub summary: Option<String>,
}

/// 一次查询的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Definition),
    NotFound,
    Failed(LookupError),
}

impl LookupOutcome {
    /// 只有确定性的结果才允许缓存，失败可能是暂时的。
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
