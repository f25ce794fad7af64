//! 查询结果缓存模块
//!
//! # 设计思路
//!
//! 同一个词在阅读时经常被反复查询，使用 LRU 缓存最近的确定性结果
//! （查到 / 查无此词），避免重复请求词典接口。网络失败等暂时性结果不缓存。
//!
//! # 实现思路
//!
//! - 键为小写化后的查询词，`Hello` 与 `hello` 共用一条缓存。
//! - 容量为 0 时整个缓存关闭，`get` 恒为未命中，`put` 为空操作。
//! - 锁中毒时按未命中处理，不影响查询主流程。

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use crate::dictionary::LookupOutcome;

fn cache_key(term: &str) -> String {
    term.trim().to_lowercase()
}

/// 线程安全的查询结果 LRU 缓存
pub struct LookupCache {
    inner: Mutex<Option<LruCache<String, LookupOutcome>>>,
}

impl LookupCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(NonZeroUsize::new(capacity).map(LruCache::new)),
        }
    }

    pub fn get(&self, term: &str) -> Option<LookupOutcome> {
        let Ok(mut guard) = self.inner.lock() else {
            return None;
        };
        guard.as_mut()?.get(&cache_key(term)).cloned()
    }

    pub fn put(&self, term: &str, outcome: &LookupOutcome) {
        if !outcome.is_cacheable() {
            return;
        }
        let Ok(mut guard) = self.inner.lock() else {
            return;
        };
        if let Some(cache) = guard.as_mut() {
            cache.put(cache_key(term), outcome.clone());
        }
    }

    /// 调整容量；缩容时淘汰最久未使用的条目。
    pub fn resize(&self, capacity: usize) {
        let Ok(mut guard) = self.inner.lock() else {
            return;
        };
        match NonZeroUsize::new(capacity) {
            Some(cap) => match guard.as_mut() {
                Some(cache) => cache.resize(cap),
                None => *guard = Some(LruCache::new(cap)),
            },
            None => *guard = None,
        }
        log::debug!("🗂️ 查询缓存容量已更新: {}", capacity);
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .ok()
            .and_then(|guard| guard.as_ref().map(LruCache::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
