use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Deduplicated discovery storage shared by every in-flight probe of a
/// batch. Check-and-insert happens under a single lock so two probes
/// racing on the same value cannot both observe it as new.
#[derive(Clone, Default)]
pub struct DiscoverySet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl DiscoverySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` if absent, returning whether it was newly added.
    pub async fn insert(&self, value: &str) -> bool {
        self.inner.lock().await.insert(value.to_string())
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Sorted copy of the current contents, for end-of-run reporting
    /// and persistence.
    pub async fn snapshot(&self) -> Vec<String> {
        let mut values: Vec<String> = self.inner.lock().await.iter().cloned().collect();
        values.sort();
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_reports_newness_once() {
        let set = DiscoverySet::new();
        assert!(set.insert("http://a.example.com").await);
        assert!(!set.insert("http://a.example.com").await);
        assert_eq!(set.len().await, 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_of_one_value_count_once() {
        let set = DiscoverySet::new();
        let mut handles = Vec::new();
        for _ in 0..32 {
            let set = set.clone();
            handles.push(tokio::spawn(
                async move { set.insert("http://a.example.com").await },
            ));
        }

        let mut newly_added = 0;
        for handle in handles {
            if handle.await.unwrap() {
                newly_added += 1;
            }
        }
        assert_eq!(newly_added, 1);
        assert_eq!(set.len().await, 1);
    }

    #[tokio::test]
    async fn snapshot_is_sorted() {
        let set = DiscoverySet::new();
        set.insert("b").await;
        set.insert("a").await;
        set.insert("c").await;
        assert_eq!(set.snapshot().await, vec!["a", "b", "c"]);
    }
}
