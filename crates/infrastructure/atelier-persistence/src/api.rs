use std::sync::Arc;

/// Callback handed to [`KeyValueStore::watch`]. Receives the key that
/// changed, including changes made through the same handle.
pub type ChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

/// String-keyed persistence surface the session stores run on.
///
/// The contract is deliberately infallible: a substrate that cannot read
/// reports the key as absent, one that cannot write logs the failure and
/// drops the write. In-memory state stays authoritative either way, so
/// callers never branch on storage health.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Subscribe to key changes. Returns false when the substrate has no
    /// change signal; callers then degrade to same-handle notification.
    fn watch(&self, _listener: ChangeListener) -> bool {
        false
    }
}
