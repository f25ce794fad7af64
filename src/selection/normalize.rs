//! 选中文本规范化
//!
//! - `text`：去掉首尾空白后的原文，用于展示给用户
//! - `term`：内部连续空白折叠为单个空格，并剥掉首尾的标点、引号，用于查询
//!
//! 词内的撇号、连字符保留（`don't`、`well-known`）。

use serde::Serialize;

/// 一次捕获到的选中内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// 展示给用户的原文（已去掉首尾空白）
    pub text: String,
    /// 实际查询的词
    pub term: String,
}

impl Selection {
    /// 直接以查询词构造（历史记录重新查询时使用）。
    pub fn from_term(term: &str) -> Option<Self> {
        normalize_selection(term)
    }
}

/// 规范化剪贴板文本；空白或纯标点返回 `None`。
pub fn normalize_selection(raw: &str) -> Option<Selection> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let term = collapsed.trim_matches(|c: char| !c.is_alphanumeric());
    if term.is_empty() {
        return None;
    }

    Some(Selection {
        text: text.to_string(),
        term: term.to_string(),
    })
}
