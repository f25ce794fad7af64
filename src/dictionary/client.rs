//! # 网络客户端模块
//!
//! ## 实现思路
//!
//! - 基础地址在构造时解析一次，查询词作为单独的路径段追加，由 `url` 负责百分号编码。
//! - 只有 200 才读取响应体；404 视为"查无此词"，其它状态码原样报告。
//! - 超时与连接失败分开映射，便于日志与提示区分。

use std::time::Duration;

use reqwest::Url;

use super::{Definition, Entry, LookupError, LookupOutcome, render_entries, summarize};

/// 免费词典接口（英文）
pub const DEFAULT_API_BASE_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

/// 词典 HTTP 客户端
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl DictionaryClient {
    /// 使用指定接口地址与超时创建客户端。
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wordpeek/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::Network(format!("初始化 HTTP 客户端失败：{e}")))?;
        Self::with_http(base_url, timeout, http)
    }

    /// 使用外部构造好的 `reqwest::Client`（测试中用于关闭代理）。
    pub fn with_http(
        base_url: &str,
        timeout: Duration,
        http: reqwest::Client,
    ) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| LookupError::InvalidEndpoint(format!("{base_url} ({e})")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(LookupError::InvalidEndpoint(base_url.to_string()));
        }
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// 拼接查询地址：`<base>/<term>`。
    pub fn endpoint_for(&self, term: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| LookupError::InvalidEndpoint(self.base_url.to_string()))?;
            segments.pop_if_empty().push(term);
        }
        Ok(url)
    }

    /// 查询单个词。
    ///
    /// 所有失败都折叠进 `LookupOutcome::Failed`，调用方无需区分 `Result` 与结果分支。
    pub async fn lookup(&self, term: &str) -> LookupOutcome {
        let url = match self.endpoint_for(term) {
            Ok(url) => url,
            Err(err) => return LookupOutcome::Failed(err),
        };
        log::debug!("🌐 查询词典 - URL: {}", url);

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => return LookupOutcome::Failed(self.map_reqwest_error(err)),
        };

        let status = response.status().as_u16();
        if status != 200 {
            return interpret_response(term, status, "");
        }

        match response.text().await {
            Ok(body) => interpret_response(term, status, &body),
            Err(err) => LookupOutcome::Failed(self.map_reqwest_error(err)),
        }
    }

    fn map_reqwest_error(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout(self.timeout.as_secs().max(1))
        } else if err.is_connect() {
            LookupError::Network(format!("无法连接：{err}"))
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

/// 根据状态码与响应体判定查询结果（纯函数）。
pub fn interpret_response(term: &str, status: u16, body: &str) -> LookupOutcome {
    match status {
        200 => {
            let entries: Vec<Entry> = match serde_json::from_str(body) {
                Ok(entries) => entries,
                Err(err) => return LookupOutcome::Failed(LookupError::Parse(err.to_string())),
            };
            let text = render_entries(&entries);
            if text.is_empty() {
                return LookupOutcome::NotFound;
            }

            let mut source_urls: Vec<String> = Vec::new();
            for url in entries.iter().flat_map(|e| e.source_urls.iter()) {
                if !source_urls.contains(url) {
                    source_urls.push(url.clone());
                }
            }

            LookupOutcome::Found(Definition {
                term: term.to_string(),
                text,
                source_urls,
                summary: summarize(&entries),
            })
        }
        404 => LookupOutcome::NotFound,
        other => LookupOutcome::Failed(LookupError::UnexpectedStatus(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DictionaryClient {
        DictionaryClient::new(DEFAULT_API_BASE_URL, Duration::from_secs(6)).unwrap()
    }

    #[test]
    fn endpoint_appends_encoded_term() {
        let c = client();
        assert_eq!(
            c.endpoint_for("hello").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/hello"
        );
        assert_eq!(
            c.endpoint_for("ice cream").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream"
        );
        assert_eq!(
            c.endpoint_for("a/b?c").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/a%2Fb%3Fc"
        );
    }

    #[test]
    fn endpoint_without_trailing_slash() {
        let c = DictionaryClient::new("http://localhost:9000/define", Duration::from_secs(1)).unwrap();
        assert_eq!(c.endpoint_for("x").unwrap().as_str(), "http://localhost:9000/define/x");
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let err = DictionaryClient::new("mailto:someone@example.com", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, LookupError::InvalidEndpoint(_)));
        let err = DictionaryClient::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, LookupError::InvalidEndpoint(_)));
    }

    #[test]
    fn status_404_is_not_found() {
        assert_eq!(interpret_response("zzz", 404, "{}"), LookupOutcome::NotFound);
    }

    #[test]
    fn other_status_is_reported() {
        let outcome = interpret_response("x", 500, "");
        assert_eq!(outcome, LookupOutcome::Failed(LookupError::UnexpectedStatus(500)));
        if let LookupOutcome::Failed(err) = outcome {
            assert_eq!(err.to_string(), "Unexpected API response: 500");
        }
    }

    #[test]
    fn malformed_body_is_parse_error() {
        match interpret_response("x", 200, "<html>") {
            LookupOutcome::Failed(LookupError::Parse(msg)) => assert!(!msg.is_empty()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn empty_render_is_not_found() {
        assert_eq!(interpret_response("x", 200, "[]"), LookupOutcome::NotFound);
    }

    #[test]
    fn found_collects_unique_source_urls() {
        let body = r#"[{"word":"a","sourceUrls":["https://w/a"],"meanings":[{"partOfSpeech":"noun","definitions":[{"definition":"first"}]}]},
                       {"word":"a","sourceUrls":["https://w/a","https://w/b"]}]"#;
        match interpret_response("a", 200, body) {
            LookupOutcome::Found(def) => {
                assert_eq!(def.term, "a");
                assert_eq!(def.source_urls, vec!["https://w/a", "https://w/b"]);
                assert_eq!(def.summary.as_deref(), Some("first"));
                assert!(def.text.starts_with("Word: a"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
