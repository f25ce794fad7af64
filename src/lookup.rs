//! 查询服务（可注入状态）
//!
//! 组合词典客户端与结果缓存，作为 Tauri 托管状态注入。
//! 设置变更时通过 `install` 原地替换客户端并调整缓存容量，
//! 正在进行中的查询继续使用旧客户端完成。

use std::sync::{Arc, PoisonError, RwLock};

use crate::cache::LookupCache;
use crate::dictionary::{DictionaryClient, LookupOutcome};
use crate::error::AppError;
use crate::settings::AppSettings;

pub struct LookupService {
    client: RwLock<Arc<DictionaryClient>>,
    cache: LookupCache,
}

impl LookupService {
    pub fn new(settings: &AppSettings) -> Result<Self, AppError> {
        let client = DictionaryClient::new(&settings.api_base_url, settings.request_timeout())?;
        Ok(Self::with_client(client, settings.cache_capacity))
    }

    pub fn with_client(client: DictionaryClient, cache_capacity: usize) -> Self {
        Self {
            client: RwLock::new(Arc::new(client)),
            cache: LookupCache::new(cache_capacity),
        }
    }

    /// 替换为已校验的新客户端，并调整缓存容量。
    pub fn install(&self, client: DictionaryClient, cache_capacity: usize) {
        let mut guard = self.client.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(client);
        drop(guard);

        self.cache.resize(cache_capacity);
    }

    fn current_client(&self) -> Arc<DictionaryClient> {
        match self.client.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// 查询一个词：先查缓存，未命中再请求接口。
    pub async fn lookup(&self, term: &str) -> LookupOutcome {
        if let Some(cached) = self.cache.get(term) {
            log::debug!("♻️ 命中查询缓存: {}", term);
            return match cached {
                LookupOutcome::Found(mut definition) => {
                    definition.term = term.to_string();
                    LookupOutcome::Found(definition)
                }
                other => other,
            };
        }

        let client = self.current_client();
        let outcome = client.lookup(term).await;
        self.cache.put(term, &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::dictionary::LookupError;

    /// 本地 HTTP 服务：对每个连接返回同一个响应，并统计请求次数。
    fn serve(status_line: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                counter.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (format!("http://{addr}/api/v2/entries/en/"), hits)
    }

    fn service(base: &str, cache_capacity: usize) -> LookupService {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = DictionaryClient::with_http(base, Duration::from_secs(5), http).unwrap();
        LookupService::with_client(client, cache_capacity)
    }

    #[tokio::test]
    async fn repeated_lookups_hit_the_cache() {
        let (base, hits) = serve(
            "200 OK",
            r#"[{"word":"hello","meanings":[{"partOfSpeech":"noun","definitions":[{"definition":"A greeting."}]}]}]"#,
        );
        let service = service(&base, 8);

        let first = service.lookup("hello").await;
        let second = service.lookup("Hello").await;

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        match (first, second) {
            (LookupOutcome::Found(first), LookupOutcome::Found(second)) => {
                assert_eq!(first.text, second.text);
                assert_eq!(first.term, "hello");
                assert_eq!(second.term, "Hello");
            }
            other => panic!("unexpected outcomes: {other:?}"),
        }
    }

    #[tokio::test]
    async fn not_found_is_reported() {
        let (base, _) = serve("404 Not Found", r#"{"title":"No Definitions Found"}"#);
        assert_eq!(service(&base, 8).lookup("qwzx").await, LookupOutcome::NotFound);
    }

    #[tokio::test]
    async fn server_errors_are_not_cached() {
        let (base, hits) = serve("500 Internal Server Error", "");
        let service = service(&base, 8);

        for _ in 0..2 {
            let outcome = service.lookup("word").await;
            assert!(matches!(outcome, LookupOutcome::Failed(_)));
        }
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            // 持有连接但从不响应
            let mut held = Vec::new();
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                held.push(stream);
            }
        });

        let timeout = Duration::from_secs(1);
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .unwrap();
        let client =
            DictionaryClient::with_http(&format!("http://{addr}/"), timeout, http).unwrap();
        let service = LookupService::with_client(client, 8);

        let outcome = service.lookup("word").await;
        assert_eq!(outcome, LookupOutcome::Failed(LookupError::Timeout(1)));
        assert!(service.cache.is_empty());
    }

    #[tokio::test]
    async fn install_replaces_the_endpoint() {
        let (missing, _) = serve("404 Not Found", "{}");
        let (found, _) = serve(
            "200 OK",
            r#"[{"word":"cat","meanings":[{"partOfSpeech":"noun","definitions":[{"definition":"A small feline."}]}]}]"#,
        );
        let service = service(&missing, 0);
        assert_eq!(service.lookup("cat").await, LookupOutcome::NotFound);

        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = DictionaryClient::with_http(&found, Duration::from_secs(5), http).unwrap();
        service.install(client, 4);
        assert!(service.lookup("cat").await.is_found());
        assert_eq!(service.cache.len(), 1);
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let outcome = service(&format!("http://{addr}/"), 8).lookup("word").await;
        match outcome {
            LookupOutcome::Failed(err) => {
                assert!(err.to_string().starts_with("Error contacting dictionary API"))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
