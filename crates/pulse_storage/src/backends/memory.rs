use chrono::{DateTime, Utc};
use pulse_core::{ArticleSnapshot, ExtractedContent};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

fn is_fresh(at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    match (now - at).to_std() {
        Ok(age) => age < ttl,
        // Timestamps from the future count as brand new.
        Err(_) => true,
    }
}

/// Holds the latest aggregated article list. The snapshot is swapped as a
/// whole, so readers see either the old list or the new one.
pub struct ArticleListCache {
    ttl: Duration,
    snapshot: RwLock<Option<Arc<ArticleSnapshot>>>,
}

impl ArticleListCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached snapshot if it is non-empty and younger than the TTL.
    pub async fn fresh(&self) -> Option<Arc<ArticleSnapshot>> {
        self.fresh_at(Utc::now()).await
    }

    pub async fn fresh_at(&self, now: DateTime<Utc>) -> Option<Arc<ArticleSnapshot>> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .as_ref()
            .filter(|s| !s.items.is_empty() && is_fresh(s.fetched_at, now, self.ttl))
            .cloned()
    }

    /// The cached snapshot regardless of age.
    pub async fn latest(&self) -> Option<Arc<ArticleSnapshot>> {
        self.snapshot.read().await.clone()
    }

    pub async fn replace(&self, snapshot: ArticleSnapshot) -> Arc<ArticleSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.snapshot.write().await = Some(snapshot.clone());
        snapshot
    }

    pub async fn len(&self) -> usize {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map_or(0, |s| s.items.len())
    }

    pub async fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.as_ref().map(|s| s.fetched_at)
    }
}

#[derive(Debug, Clone)]
pub struct CachedExtraction {
    pub data: ExtractedContent,
    pub cached_at: DateTime<Utc>,
}

struct ExtractionStore {
    entries: HashMap<String, CachedExtraction>,
    order: VecDeque<String>,
    capacity: usize,
}

impl ExtractionStore {
    fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    fn insert(&mut self, url: String, entry: CachedExtraction) {
        if self.entries.insert(url.clone(), entry).is_some() {
            self.order.retain(|u| u != &url);
        }
        self.order.push_back(url);

        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    tracing::debug!("Evicted extraction cache entry: {}", oldest);
                }
                None => break,
            }
        }
    }
}

/// URL-keyed extraction results with a TTL and a hard size bound.
/// Overflow evicts the earliest inserted entry; reads do not affect order.
pub struct ExtractionCache {
    ttl: Duration,
    store: RwLock<ExtractionStore>,
}

impl ExtractionCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            store: RwLock::new(ExtractionStore::new(capacity)),
        }
    }

    pub async fn get_fresh(&self, url: &str) -> Option<ExtractedContent> {
        self.get_fresh_at(url, Utc::now()).await
    }

    pub async fn get_fresh_at(&self, url: &str, now: DateTime<Utc>) -> Option<ExtractedContent> {
        let store = self.store.read().await;
        store
            .entries
            .get(url)
            .filter(|e| is_fresh(e.cached_at, now, self.ttl))
            .map(|e| e.data.clone())
    }

    pub async fn insert(&self, url: &str, data: ExtractedContent) {
        self.insert_at(url, data, Utc::now()).await
    }

    pub async fn insert_at(&self, url: &str, data: ExtractedContent, cached_at: DateTime<Utc>) {
        let mut store = self.store.write().await;
        store.insert(url.to_string(), CachedExtraction { data, cached_at });
    }

    pub async fn contains(&self, url: &str) -> bool {
        self.store.read().await.entries.contains_key(url)
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.entries.len()
    }
}
