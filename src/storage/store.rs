use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A generic keyed mapping with point-in-time snapshots. The sandbox built
/// on top of snapshot/restore is the store's only transactional primitive:
/// callers that need all-or-nothing mutation across several records opt
/// into it explicitly.
pub trait KeyedStore<K, V> {
    /// Opaque point-in-time copy of the store's contents.
    type Snapshot;

    fn get(&self, key: &K) -> Option<V>;
    fn set(&mut self, key: K, value: V);
    fn contains(&self, key: &K) -> bool;
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Enumeration; no ordering is guaranteed unless the implementation
    /// says otherwise.
    fn keys(&self) -> Vec<K>;
    fn values(&self) -> Vec<V>;
    fn entries(&self) -> Vec<(K, V)>;

    fn snapshot(&self) -> Self::Snapshot;

    /// Replace all current contents with the snapshot's.
    fn restore(&mut self, snapshot: Self::Snapshot);

    /// Run `op` against the store. If `op` fails, the pre-call snapshot is
    /// restored before the error is propagated; if it succeeds, the new
    /// state is kept and its result returned.
    fn with_sandbox<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, E>,
    {
        let snapshot = self.snapshot();
        match op(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.restore(snapshot);
                Err(err)
            }
        }
    }
}

/// Hash-backed store; the default backend for repositories.
#[derive(Debug, Clone)]
pub struct MemoryStore<K, V> {
    map: HashMap<K, V>,
}

impl<K, V> MemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> Default for MemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedStore<K, V> for MemoryStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Snapshot = HashMap<K, V>;

    fn get(&self, key: &K) -> Option<V> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    fn keys(&self) -> Vec<K> {
        self.map.keys().cloned().collect()
    }

    fn values(&self) -> Vec<V> {
        self.map.values().cloned().collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.map.clone()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.map = snapshot;
    }
}

/// BTree-backed store: same contract as [`MemoryStore`], but enumeration
/// comes back in key order. Useful when deterministic iteration matters
/// (reporting, fixtures).
#[derive(Debug, Clone)]
pub struct OrderedStore<K, V> {
    map: BTreeMap<K, V>,
}

impl<K, V> OrderedStore<K, V> {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<K, V> Default for OrderedStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedStore<K, V> for OrderedStore<K, V>
where
    K: Ord + Clone,
    V: Clone,
{
    type Snapshot = BTreeMap<K, V>;

    fn get(&self, key: &K) -> Option<V> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.map.remove(key)
    }

    fn keys(&self) -> Vec<K> {
        self.map.keys().cloned().collect()
    }

    fn values(&self) -> Vec<V> {
        self.map.values().cloned().collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn snapshot(&self) -> Self::Snapshot {
        self.map.clone()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.map = snapshot;
    }
}
