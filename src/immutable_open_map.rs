//! Read-only map over open-addressed storage, and the builder that fills it

use std::{borrow::Borrow, fmt, hash::Hash};

use crate::open_table::{Iter, OpenTable, DEFAULT_CAPACITY};

/// An immutable hash map backed by an open-addressed table.
///
/// Maps are assembled with an [`ImmutableOpenMapBuilder`] (or collected from an
/// iterator) and cannot change afterwards.
///
/// ```rust
/// use open_map_matchers::ImmutableOpenMap;
///
/// let map = ImmutableOpenMap::builder().put("a", 1).put("b", 2).build();
///
/// assert_eq!(map.get("a"), Some(&1));
/// assert!(!map.contains_key("z"));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Clone)]
pub struct ImmutableOpenMap<K, V> {
    /// Entry storage
    table: OpenTable<K, V>,
}

impl<K, V> ImmutableOpenMap<K, V> {
    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the map has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Returns the number of slots in the underlying table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns an iterator over the entries, in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.table.iter()
    }

    /// Returns an iterator over the keys
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K, V> ImmutableOpenMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates a map without entries
    #[must_use]
    pub fn empty() -> Self {
        ImmutableOpenMapBuilder::new().build()
    }

    /// Starts building a map with the default capacity
    #[must_use]
    pub fn builder() -> ImmutableOpenMapBuilder<K, V> {
        ImmutableOpenMapBuilder::new()
    }

    /// Starts building a map sized for at least `capacity` slots
    #[must_use]
    pub fn builder_with_capacity(capacity: usize) -> ImmutableOpenMapBuilder<K, V> {
        ImmutableOpenMapBuilder::with_capacity(capacity)
    }

    /// Returns a builder seeded with a copy of this map's entries
    #[must_use]
    pub fn to_builder(&self) -> ImmutableOpenMapBuilder<K, V>
    where
        K: Clone,
        V: Clone,
    {
        ImmutableOpenMapBuilder { table: self.table.clone() }
    }

    /// Turns this map back into a builder without copying entries
    #[must_use]
    pub fn into_builder(self) -> ImmutableOpenMapBuilder<K, V> {
        ImmutableOpenMapBuilder { table: self.table }
    }

    /// Returns the value stored for `key`
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// Returns true if the map has an entry for `key`
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }
}

impl<K, V> Default for ImmutableOpenMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::empty()
    }
}

impl<K, V> fmt::Debug for ImmutableOpenMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> PartialEq for ImmutableOpenMap<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() &&
            self.iter().all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K, V> Eq for ImmutableOpenMap<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

impl<K, V> FromIterator<(K, V)> for ImmutableOpenMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut builder = ImmutableOpenMapBuilder::new();
        builder.extend(iter);
        builder.build()
    }
}

impl<'a, K, V> IntoIterator for &'a ImmutableOpenMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mutable staging area for an [`ImmutableOpenMap`].
///
/// The table parameters set here carry over into the built map.
#[derive(Debug, Clone)]
pub struct ImmutableOpenMapBuilder<K, V> {
    /// Entry storage handed over on `build`
    table: OpenTable<K, V>,
}

impl<K, V> Default for ImmutableOpenMapBuilder<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ImmutableOpenMapBuilder<K, V>
where
    K: Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> ImmutableOpenMapBuilder<K, V>
where
    K: Eq + Hash,
{
    /// Creates a builder with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a builder sized for at least `capacity` slots
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { table: OpenTable::with_capacity(capacity) }
    }

    /// Inserts an entry, returning the value it replaced
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(key, value)
    }

    /// Inserts an entry and hands the builder back, for chaining
    #[must_use]
    pub fn put(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    /// Removes the entry for `key`, returning its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.remove(key)
    }

    /// Returns the value staged for `key`
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.get(key)
    }

    /// Returns true if an entry is staged for `key`
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.table.contains_key(key)
    }

    /// Returns the number of staged entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if nothing is staged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Sets the load factor, in percent, past which the table grows (clamped to 1-95)
    pub fn set_load_factor_threshold(&mut self, threshold: usize) {
        self.table.set_load_factor_threshold(threshold);
    }

    /// Sets how many non-empty slots in a row double the probe step (at least 1)
    pub fn set_occupancy_threshold(&mut self, threshold: usize) {
        self.table.set_occupancy_threshold(threshold);
    }

    /// Freezes the staged entries into an [`ImmutableOpenMap`]
    #[must_use]
    pub fn build(self) -> ImmutableOpenMap<K, V> {
        ImmutableOpenMap { table: self.table }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookups() {
        let map = ImmutableOpenMap::builder()
            .put("key1".to_string(), 1)
            .put("key2".to_string(), 2)
            .put("key3".to_string(), 3)
            .build();

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
        assert!(map.contains_key("key1"));
        assert!(!map.contains_key("key4"));
        assert_eq!(map.len(), 3);
        assert!(!map.is_empty());
    }

    #[test]
    fn test_empty() {
        let map = ImmutableOpenMap::<String, u32>::empty();

        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.iter().next(), None);
        assert_eq!(format!("{map:?}"), "{}");
        assert_eq!(map, ImmutableOpenMap::default());
    }

    #[test]
    fn test_builder_remove_and_replace() {
        let mut builder = ImmutableOpenMap::builder();
        assert_eq!(builder.insert("a", 1), None);
        assert_eq!(builder.insert("a", 10), Some(1));
        builder.insert("b", 2);
        assert_eq!(builder.remove("b"), Some(2));
        assert_eq!(builder.remove("b"), None);
        assert!(builder.contains_key("a"));
        assert_eq!(builder.get("a"), Some(&10));
        assert_eq!(builder.len(), 1);

        let map = builder.build();

        assert_eq!(map.get("a"), Some(&10));
        assert!(!map.contains_key("b"));
    }

    #[test]
    fn test_to_builder_copies() {
        let original: ImmutableOpenMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();

        let extended = original.to_builder().put("c", 3).build();

        assert_eq!(original.len(), 2);
        assert!(!original.contains_key("c"));
        assert_eq!(extended.len(), 3);
        assert_eq!(extended.get("a"), Some(&1));
    }

    #[test]
    fn test_into_builder_keeps_entries() {
        let map = ImmutableOpenMap::builder().put(1, "one").build();

        let mut builder = map.into_builder();
        builder.insert(2, "two");
        let map = builder.build();

        assert_eq!(map.get(&1), Some(&"one"));
        assert_eq!(map.get(&2), Some(&"two"));
    }

    #[test]
    fn test_keys_and_values() {
        let map: ImmutableOpenMap<String, i32> =
            (1..=3).map(|i| (format!("key{i}"), i)).collect();

        let mut keys: Vec<_> = map.keys().cloned().collect();
        keys.sort();
        let mut values: Vec<_> = map.values().copied().collect();
        values.sort_unstable();

        assert_eq!(keys, vec!["key1".to_string(), "key2".to_string(), "key3".to_string()]);
        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!((&map).into_iter().count(), 3);
    }

    #[test]
    fn test_equality_ignores_layout() {
        let small: ImmutableOpenMap<i32, i32> = (0..10).map(|i| (i, i * i)).collect();
        let mut builder = ImmutableOpenMap::builder_with_capacity(1024);
        builder.extend((0..10).rev().map(|i| (i, i * i)));
        let large = builder.build();

        assert_ne!(small.capacity(), large.capacity());
        assert_eq!(small, large);

        let different = large.to_builder().put(3, 0).build();
        assert_ne!(small, different);
    }

    #[test]
    fn test_debug_renders_entries() {
        let map = ImmutableOpenMap::builder().put("a", 1).build();

        assert_eq!(format!("{map:?}"), "{\"a\": 1}");
    }

    #[test]
    fn test_builder_thresholds_carry_over() {
        let mut builder = ImmutableOpenMap::builder_with_capacity(4);
        builder.set_load_factor_threshold(50);
        builder.set_occupancy_threshold(1);
        builder.extend((0..3).map(|i| (i, i)));

        let map = builder.build();

        assert_eq!(map.capacity(), 8);
        assert!((0..3).all(|i| map.contains_key(&i)));
    }
}
