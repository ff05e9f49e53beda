//! 翻译结果缓存
//!
//! 以操作的确定性键缓存链产出的结果。命中时直接返回缓存的译文和
//! 当初产出它的提供商标签，不触网。容量满时按最久未访问驱逐。

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

use crate::translation::provider::Translated;

/// 缓存条目
#[derive(Debug, Clone)]
struct CacheEntry {
    result: Translated,
    created_at: Instant,
    access_count: u64,
    last_accessed: Instant,
}

impl CacheEntry {
    fn new(result: Translated) -> Self {
        let now = Instant::now();
        Self {
            result,
            created_at: now,
            access_count: 0,
            last_accessed: now,
        }
    }

    fn access(&mut self) {
        self.access_count += 1;
        self.last_accessed = Instant::now();
    }
}

/// 缓存统计信息
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub total_entries: usize,
    pub evictions: u64,
}

impl CacheStats {
    /// 计算缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_requests as f64
        }
    }
}

/// 容量受限的结果缓存
pub struct ProviderCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    capacity: usize,
    stats: RwLock<CacheStats>,
}

impl ProviderCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// 查询缓存
    ///
    /// 两把锁从不嵌套持有：先结算条目表，释放后再更新统计，
    /// 杜绝与 `insert` 之间的锁序倒置。
    pub fn get(&self, key: &str) -> Option<Translated> {
        let hit = {
            let mut entries = self.entries.write().unwrap();
            entries.get_mut(key).map(|entry| {
                entry.access();
                entry.result.clone()
            })
        };

        let mut stats = self.stats.write().unwrap();
        stats.total_requests += 1;
        if hit.is_some() {
            stats.cache_hits += 1;
        } else {
            stats.cache_misses += 1;
        }

        hit
    }

    /// 写入缓存，容量满时先驱逐最久未访问的条目
    pub fn insert(&self, key: String, result: Translated) {
        if self.capacity == 0 {
            return;
        }

        let (evicted, total_entries) = {
            let mut entries = self.entries.write().unwrap();
            let mut evicted = false;
            if entries.len() >= self.capacity && !entries.contains_key(&key) {
                evicted = Self::evict_lru(&mut entries);
            }
            entries.insert(key, CacheEntry::new(result));
            (evicted, entries.len())
        };

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = total_entries;
        if evicted {
            stats.evictions += 1;
        }
    }

    /// 清空缓存
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = 0;
    }

    /// 缓存条目数
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 统计快照
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.entries.read().unwrap().len();

        let mut result = self.stats.read().unwrap().clone();
        result.total_entries = total_entries;
        result
    }

    /// LRU驱逐，在调用方已持有条目表锁的前提下进行
    fn evict_lru(entries: &mut HashMap<String, CacheEntry>) -> bool {
        let oldest_key = entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed)
            .map(|(key, _)| key.clone());

        match oldest_key {
            Some(key) => {
                entries.remove(&key);
                true
            }
            None => false,
        }
    }

    /// 最老条目的年龄，仅用于日志
    pub fn oldest_entry_age(&self) -> Option<std::time::Duration> {
        let entries = self.entries.read().unwrap();
        entries
            .values()
            .map(|entry| entry.created_at.elapsed())
            .max()
    }
}
