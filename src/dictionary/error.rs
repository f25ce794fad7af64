//! # 错误模型模块
//!
//! 查询链路的所有失败都归到 `LookupError`，消息文本直接展示给用户，
//! 因此保持英文并与弹窗措辞一致。

/// 词典查询错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Error contacting dictionary API: {0}")]
    Network(String),

    #[error("Error contacting dictionary API: no response within {0}s")]
    Timeout(u64),

    #[error("Unexpected API response: {0}")]
    UnexpectedStatus(u16),

    #[error("Error parsing API response: {0}")]
    Parse(String),

    #[error("Invalid dictionary endpoint: {0}")]
    InvalidEndpoint(String),
}
