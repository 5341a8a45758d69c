//! Single-threaded separate-chaining hash table keyed by strings.

use std::fmt;
use std::iter::repeat_with;
use std::mem;

use crate::bucket::{Bucket, Entry};

/// Number of buckets for a table created with [`ChainedHashMap::new`]
const INITIAL_CAPACITY: usize = 16;

/// Multiplier of the polynomial key hash
const HASH_MULTIPLIER: u64 = 11;

/// Default load factor percentage (0-100) at which `put` grows the table
const DEFAULT_GROW_THRESHOLD: usize = 70;

/// Default load factor percentage (0-100) at which `remove` shrinks the table
const DEFAULT_SHRINK_THRESHOLD: usize = 25;

/// Callback the table runs on every value it disposes of
type ValueDestructor<V> = Box<dyn FnMut(V)>;

/// Polynomial accumulation over the key bytes: `h = b + 11*h`, wrapping
fn polynomial_hash(key: &str) -> u64 {
    key.bytes()
        .fold(0_u64, |hash, byte| u64::from(byte).wrapping_add(hash.wrapping_mul(HASH_MULTIPLIER)))
}

/// Reduces the key hash to an index in `[0, capacity)`.
///
/// Capacity is always a power of two, so the modulo reduction is a mask.
#[allow(clippy::cast_possible_truncation)]
fn bucket_index(key: &str, capacity: usize) -> usize {
    (polynomial_hash(key) as usize) & capacity.saturating_sub(1)
}

/// A hash table mapping string keys to values of type `V`, resolving
/// collisions by separate chaining.
///
/// The bucket array doubles when the load factor reaches the grow threshold
/// and halves when removals push it under the shrink threshold, never
/// dropping below the capacity the table was created with. Every resize is
/// a full rehash against the new capacity.
///
/// An optional value destructor can be registered at construction; the
/// table runs it on values it disposes of itself (overwrite in [`put`],
/// [`clear`], drop). Values returned by [`remove`] go back to the caller
/// untouched.
///
/// Note: this type is not thread-safe; callers needing shared access must
/// add their own synchronization.
///
/// [`put`]: ChainedHashMap::put
/// [`clear`]: ChainedHashMap::clear
/// [`remove`]: ChainedHashMap::remove
pub struct ChainedHashMap<V> {
    /// The bucket array; its length is the capacity, a power of two
    buckets: Vec<Bucket<V>>,
    /// Current number of live entries
    size: usize,
    /// Capacity floor; the table never shrinks below this
    min_capacity: usize,
    /// Load factor percentage (0-100) at or above which `put` grows first
    grow_threshold: usize,
    /// Load factor percentage (0-100) at or below which `remove` shrinks first
    shrink_threshold: usize,
    /// Destructor run on disposed values, if one was registered
    value_destructor: Option<ValueDestructor<V>>,
}

impl<V> Default for ChainedHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(String, V)> for ChainedHashMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(&key, value);
        }
    }
}

impl<V> ChainedHashMap<V> {
    /// Creates an empty table with the default initial capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates an empty table with at least the requested capacity.
    ///
    /// The capacity is rounded up to a power of two and becomes the floor
    /// the table never shrinks below.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();

        Self {
            buckets: repeat_with(Bucket::new).take(capacity).collect(),
            size: 0,
            min_capacity: capacity,
            grow_threshold: DEFAULT_GROW_THRESHOLD,
            shrink_threshold: DEFAULT_SHRINK_THRESHOLD,
            value_destructor: None,
        }
    }

    /// Creates an empty table that runs `destructor` on every value it
    /// disposes of: the replaced value on an overwriting [`put`], and every
    /// still-stored value on [`clear`] or drop.
    ///
    /// Values handed back by [`remove`] never go through the destructor;
    /// ownership reverts to the caller.
    ///
    /// [`put`]: ChainedHashMap::put
    /// [`clear`]: ChainedHashMap::clear
    /// [`remove`]: ChainedHashMap::remove
    #[must_use]
    pub fn with_value_destructor<F>(destructor: F) -> Self
    where
        F: FnMut(V) + 'static,
    {
        let mut map = Self::new();
        map.value_destructor = Some(Box::new(destructor));
        map
    }

    /// Stores `value` under `key`.
    ///
    /// If the key is already present, the old value is disposed of (through
    /// the destructor when one is registered) and the new value takes its
    /// place; the stored key copy and the entry count stay as they were.
    /// Otherwise the key text is copied into a fresh entry.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn put(&mut self, key: &str, value: V) {
        // Grow before inserting so the new entry lands at its final index.
        if (self.size as f64) / (self.buckets.len() as f64)
            >= self.grow_threshold as f64 / 100.0
        {
            self.rehash(self.buckets.len().saturating_mul(2));
        }

        let index = bucket_index(key, self.buckets.len());
        let replaced = match self.buckets.get_mut(index) {
            Some(chain) => match chain.find_mut(key) {
                Some(entry) => Some(mem::replace(&mut entry.value, value)),
                None => {
                    chain.push(Entry { key: Box::from(key), value });
                    self.size = self.size.saturating_add(1);
                    None
                }
            },
            None => None,
        };

        if let Some(old) = replaced {
            self.dispose(old);
        }
    }

    /// Returns a reference to the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = bucket_index(key, self.buckets.len());
        self.buckets.get(index)?.find(key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = bucket_index(key, self.buckets.len());
        self.buckets.get_mut(index)?.find_mut(key).map(|entry| &mut entry.value)
    }

    /// Returns `true` if `key` is present; same chain scan as [`get`](Self::get)
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` and returns its value, or `None` if absent.
    ///
    /// The value does not go through the registered destructor; ownership
    /// reverts to the caller. The table shrinks first when the pre-removal
    /// load factor is at or under the shrink threshold and the capacity is
    /// above the floor.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn remove(&mut self, key: &str) -> Option<V> {
        // Shrink is evaluated against the pre-removal size.
        if self.buckets.len() > self.min_capacity
            && (self.size as f64) / (self.buckets.len() as f64)
                <= self.shrink_threshold as f64 / 100.0
        {
            let target = (self.buckets.len() / 2).max(self.min_capacity);
            self.rehash(target);
        }

        let index = bucket_index(key, self.buckets.len());
        let entry = self.buckets.get_mut(index)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(entry.value)
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the table holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Sets the grow threshold percentage, kept above the shrink threshold
    pub fn set_grow_threshold(&mut self, threshold: usize) {
        self.grow_threshold = threshold.clamp(self.shrink_threshold.saturating_add(1), 95);
    }

    /// Sets the shrink threshold percentage, kept below the grow threshold
    pub fn set_shrink_threshold(&mut self, threshold: usize) {
        self.shrink_threshold = threshold.min(self.grow_threshold.saturating_sub(1));
    }

    /// Disposes of every entry, running the registered destructor on each
    /// stored value. The capacity is retained.
    pub fn clear(&mut self) {
        // Take the destructor out so the chains can be drained while it runs.
        let mut destructor = self.value_destructor.take();
        for chain in &mut self.buckets {
            for entry in chain.drain() {
                if let Some(callback) = destructor.as_mut() {
                    callback(entry.value);
                }
            }
        }
        self.value_destructor = destructor;
        self.size = 0;
    }

    /// Returns an iterator over the key-value pairs, in bucket order then
    /// chain order. The order carries no meaning and changes after a resize.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, bucket: 0, offset: 0 }
    }

    /// Returns a [`Cursor`] positioned at the first entry, or already
    /// exhausted if the table is empty.
    ///
    /// The cursor borrows the table, so structural mutation is rejected at
    /// compile time while it is alive.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_, V> {
        let position = self.first_occupied(0);
        let yielded = usize::from(position.is_some());
        Cursor { map: self, position, yielded }
    }

    /// First `(bucket, 0)` position at or after `start` with a non-empty chain
    fn first_occupied(&self, start: usize) -> Option<(usize, usize)> {
        self.buckets
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, chain)| !chain.is_empty())
            .map(|(index, _)| (index, 0))
    }

    /// Runs the registered destructor on a value the table no longer
    /// stores, or drops it when no destructor was registered
    fn dispose(&mut self, value: V) {
        if let Some(destructor) = self.value_destructor.as_mut() {
            destructor(value);
        }
    }

    /// Rebuilds the bucket array at `new_capacity`, re-indexing every entry
    /// against the new length. Entries are moved, never copied or lost, so
    /// the entry count and key copies are preserved exactly.
    fn rehash(&mut self, new_capacity: usize) {
        let old = mem::replace(
            &mut self.buckets,
            repeat_with(Bucket::new).take(new_capacity).collect(),
        );

        for mut chain in old {
            for entry in chain.drain() {
                let index = bucket_index(&entry.key, new_capacity);
                if let Some(target) = self.buckets.get_mut(index) {
                    target.push(entry);
                }
            }
        }
    }
}

impl<V> Drop for ChainedHashMap<V> {
    fn drop(&mut self) {
        // Funnel every still-stored value through the destructor.
        self.clear();
    }
}

impl<V> fmt::Debug for ChainedHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedHashMap")
            .field("size", &self.size)
            .field("capacity", &self.buckets.len())
            .field("has_value_destructor", &self.value_destructor.is_some())
            .finish_non_exhaustive()
    }
}

/// Iterator over the key-value pairs of a table, in bucket order then chain
/// order
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The table's bucket array
    buckets: &'a [Bucket<V>],
    /// Index of the bucket currently being walked
    bucket: usize,
    /// Position within the current bucket's chain
    offset: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(chain) = self.buckets.get(self.bucket) {
            if let Some(entry) = chain.entries().get(self.offset) {
                self.offset = self.offset.saturating_add(1);
                return Some((&*entry.key, &entry.value));
            }
            self.bucket = self.bucket.saturating_add(1);
            self.offset = 0;
        }
        None
    }
}

/// Explicit traversal cursor over a table.
///
/// A cursor is either positioned at an entry or exhausted; a cursor over an
/// empty table starts out exhausted. It borrows the table for its whole
/// lifetime, so any structural mutation (put/remove) while it is alive is a
/// compile error rather than silent invalidation.
#[derive(Debug, Clone)]
pub struct Cursor<'a, V> {
    /// The table being traversed
    map: &'a ChainedHashMap<V>,
    /// Current bucket index and in-chain offset; `None` once exhausted
    position: Option<(usize, usize)>,
    /// Number of entries yielded so far, counting the current one
    yielded: usize,
}

impl<'a, V> Cursor<'a, V> {
    /// Moves to the next entry, stepping within the current chain before
    /// scanning forward for the next non-empty bucket. Returns `false` once
    /// the traversal is done; advancing an exhausted cursor stays a no-op.
    pub fn advance(&mut self) -> bool {
        let Some((bucket, offset)) = self.position else {
            return false;
        };

        // Once every live entry has been yielded there is nothing left to
        // scan for in the trailing buckets.
        if self.yielded >= self.map.len() {
            self.position = None;
            return false;
        }

        let next_offset = offset.saturating_add(1);
        let in_chain = self
            .map
            .buckets
            .get(bucket)
            .is_some_and(|chain| next_offset < chain.len());

        self.position = if in_chain {
            Some((bucket, next_offset))
        } else {
            self.map.first_occupied(bucket.saturating_add(1))
        };

        if self.position.is_some() {
            self.yielded = self.yielded.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Key of the current entry as a read-only view, or `None` once
    /// exhausted
    #[must_use]
    pub fn key(&self) -> Option<&'a str> {
        let (bucket, offset) = self.position?;
        self.map.buckets.get(bucket)?.entries().get(offset).map(|entry| &*entry.key)
    }

    /// Returns `true` once the traversal is exhausted
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.position.is_none()
    }
}
