use analysis_core::CompetitorIntelligence;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// A cached analysis with its creation timestamp
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: CompetitorIntelligence,
    pub created_at: DateTime<Utc>,
}

/// Process-lifetime analysis cache with lazy staleness checks.
///
/// Stale entries are ignored by readers and overwritten by the next
/// successful generation for their key; nothing is ever purged and the map
/// is unbounded (see DESIGN.md). Concurrent misses on one key may both
/// write; last writer wins.
pub struct AnalysisCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl AnalysisCache {
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::seconds(ttl_seconds as i64),
        }
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Store `data` under `key` with the current timestamp, replacing any
    /// existing entry.
    pub fn put(&self, key: String, data: CompetitorIntelligence) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                created_at: Utc::now(),
            },
        );
    }

    /// True iff the entry is younger than the TTL as of `now`.
    pub fn is_valid(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now - entry.created_at < self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, key: &str, by: Duration) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.created_at = entry.created_at - by;
        }
    }
}

/// Deterministic cache key for one logical request.
///
/// Focus-area order is significant: the same areas in a different order
/// produce a different key and therefore a fresh generation.
pub fn cache_key(company: &str, market: Option<&str>, focus_areas: Option<&[String]>) -> String {
    let focus = focus_areas.map(|areas| areas.join("-")).unwrap_or_default();
    format!("{}_{}_{}", company, market.unwrap_or(""), focus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis_core::DATA_SOURCE_TAGS;

    fn analysis(company: &str, summary: &str) -> CompetitorIntelligence {
        CompetitorIntelligence {
            company: company.to_string(),
            analysis_summary: summary.to_string(),
            strengths: vec![],
            weaknesses: vec![],
            opportunities: vec![],
            threats: vec![],
            market_position: String::new(),
            recommendations: vec![],
            confidence_score: 70,
            data_sources: DATA_SOURCE_TAGS.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn fresh_entry_is_valid() {
        let cache = AnalysisCache::new(3600);
        cache.put("k".to_string(), analysis("Apple", "a"));

        let entry = cache.get("k").unwrap();
        assert!(cache.is_valid(&entry, Utc::now()));
    }

    #[test]
    fn entry_at_exactly_ttl_is_stale() {
        let cache = AnalysisCache::new(3600);
        cache.put("k".to_string(), analysis("Apple", "a"));

        let entry = cache.get("k").unwrap();
        let later = entry.created_at + Duration::seconds(3600);
        assert!(!cache.is_valid(&entry, later));

        let just_before = entry.created_at + Duration::seconds(3599);
        assert!(cache.is_valid(&entry, just_before));
    }

    #[test]
    fn put_overwrites_existing_entry() {
        let cache = AnalysisCache::new(3600);
        cache.put("k".to_string(), analysis("Apple", "first"));
        cache.put("k".to_string(), analysis("Apple", "second"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap().data.analysis_summary, "second");
    }

    #[test]
    fn missing_key_is_absent() {
        let cache = AnalysisCache::new(3600);
        assert!(cache.get("nope").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn key_is_deterministic() {
        let areas = vec!["a".to_string(), "b".to_string()];
        let first = cache_key("Apple", Some("tech"), Some(&areas));
        let second = cache_key("Apple", Some("tech"), Some(&areas));
        assert_eq!(first, second);
        assert_eq!(first, "Apple_tech_a-b");
    }

    #[test]
    fn key_is_order_sensitive_in_focus_areas() {
        let forward = vec!["a".to_string(), "b".to_string()];
        let reversed = vec!["b".to_string(), "a".to_string()];
        assert_ne!(
            cache_key("Apple", Some("tech"), Some(&forward)),
            cache_key("Apple", Some("tech"), Some(&reversed)),
        );
    }

    #[test]
    fn key_without_optionals() {
        assert_eq!(cache_key("Apple", None, None), "Apple__");
    }
}
