//! Open-addressed storage shared by `ImmutableOpenMap` and its builder

use std::{
    borrow::Borrow,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    iter, mem, slice,
};

/// Number of slots allocated when no capacity is requested
pub(crate) const DEFAULT_CAPACITY: usize = 16;
/// Smallest table ever allocated, keeps `capacity / 4` at least one
const MIN_CAPACITY: usize = 4;
/// Step size every probe starts with
const MIN_STEP_SIZE: usize = 1;

/// A single slot of the table
#[derive(Debug, Clone)]
enum Slot<K, V> {
    /// Never written since the last rehash, ends every probe
    Empty,
    /// A live entry
    Occupied(K, V),
    /// A removed entry, still counted as non-empty while probing
    Tombstone,
}

/// Outcome of probing the table for a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The key lives at this index
    Found(usize),
    /// The key is absent, an insert would go to this index
    Vacant(usize),
    /// The key is absent and the probe found no free slot
    Exhausted,
}

/// Hash table with an adaptive probing step.
///
/// The step doubles once a run of non-empty slots grows past the occupancy
/// threshold. Tombstones count as non-empty, so the path a key was inserted
/// along stays the same until the next rehash.
#[derive(Debug, Clone)]
pub(crate) struct OpenTable<K, V> {
    /// Slot storage, its length is always a power of two
    slots: Vec<Slot<K, V>>,
    /// Number of live entries
    len: usize,
    /// Load factor that triggers growth, as a percentage (1-95)
    load_factor_threshold: usize,
    /// Length of a non-empty run after which the step size doubles
    occupancy_threshold: usize,
    /// Upper bound for the step size
    max_step_size: usize,
}

/// Allocates `capacity` empty slots
fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}

/// Largest step allowed for a table of `capacity` slots
fn max_step_for(capacity: usize) -> usize {
    (capacity / 4).max(MIN_STEP_SIZE)
}

impl<K, V> OpenTable<K, V> {
    /// Number of live entries
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Number of slots
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Iterates over live entries in slot order
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter(), remaining: self.len }
    }

    /// Sets the growth trigger, clamped to 1-95 percent
    pub(crate) fn set_load_factor_threshold(&mut self, threshold: usize) {
        self.load_factor_threshold = threshold.clamp(1, 95);
    }

    /// Sets the run length after which probing speeds up, at least 1
    pub(crate) fn set_occupancy_threshold(&mut self, threshold: usize) {
        self.occupancy_threshold = threshold.max(1);
    }
}

impl<K, V> OpenTable<K, V>
where
    K: Eq + Hash,
{
    /// Creates a table with room for at least `capacity` slots
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY).next_power_of_two();

        Self {
            slots: empty_slots(capacity),
            len: 0,
            load_factor_threshold: 75,
            occupancy_threshold: 2,
            max_step_size: max_step_for(capacity),
        }
    }

    /// Slot index where probing for `key` starts
    #[allow(clippy::cast_possible_truncation)]
    fn home<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) & self.slots.len().saturating_sub(1)
    }

    /// Walks the probe path of `key`
    fn probe<Q>(&self, key: &Q) -> Probe
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mask = self.slots.len().saturating_sub(1);
        let mut index = self.home(key);
        let mut step_size = MIN_STEP_SIZE;
        let mut run: usize = 0;
        let mut first_tombstone = None;

        for _ in 0..self.slots.len() {
            match self.slots.get(index) {
                None => break,
                Some(Slot::Empty) => return Probe::Vacant(first_tombstone.unwrap_or(index)),
                Some(Slot::Occupied(existing, _)) if Borrow::<Q>::borrow(existing) == key => {
                    return Probe::Found(index);
                }
                Some(slot) => {
                    if matches!(slot, Slot::Tombstone) {
                        first_tombstone.get_or_insert(index);
                    }
                    run = run.saturating_add(1);
                    if run > self.occupancy_threshold {
                        step_size = step_size.saturating_mul(2).min(self.max_step_size);
                    }
                }
            }

            index = index.saturating_add(step_size) & mask;
        }

        first_tombstone.map_or(Probe::Exhausted, Probe::Vacant)
    }

    /// Returns the value stored for `key`
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.probe(key) {
            Probe::Found(index) => match self.slots.get(index) {
                Some(Slot::Occupied(_, value)) => Some(value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Returns true if `key` has a live entry
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        matches!(self.probe(key), Probe::Found(_))
    }

    /// Returns true if one more entry would cross the load factor threshold
    fn needs_growth(&self) -> bool {
        self.len.saturating_add(1).saturating_mul(100) >
            self.slots.len().saturating_mul(self.load_factor_threshold)
    }

    /// Inserts an entry, returning the value it replaced
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.needs_growth() {
            self.grow();
        }

        let index = loop {
            match self.probe(&key) {
                Probe::Found(index) | Probe::Vacant(index) => break index,
                Probe::Exhausted => self.grow(),
            }
        };

        let slot = self.slots.get_mut(index)?;
        if let Slot::Occupied(_, existing) = slot {
            return Some(mem::replace(existing, value));
        }
        *slot = Slot::Occupied(key, value);
        self.len = self.len.saturating_add(1);
        None
    }

    /// Removes the entry for `key`, leaving a tombstone behind
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Probe::Found(index) = self.probe(key) else {
            return None;
        };
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(_, value) => {
                self.len = self.len.saturating_sub(1);
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Doubles the slot count and rehashes the live entries
    fn grow(&mut self) {
        let capacity = self.slots.len().saturating_mul(2);
        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        self.max_step_size = max_step_for(capacity);
        self.len = 0;

        for slot in old {
            if let Slot::Occupied(key, value) = slot {
                self.insert(key, value);
            }
        }
    }
}

/// Iterator over the live entries of an `ImmutableOpenMap`
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Slots not visited yet
    slots: slice::Iter<'a, Slot<K, V>>,
    /// Live entries not yielded yet
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.find_map(|slot| match slot {
            Slot::Occupied(key, value) => Some((key, value)),
            Slot::Empty | Slot::Tombstone => None,
        })?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
