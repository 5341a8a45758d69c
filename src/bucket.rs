//! Chain storage for the separate-chaining hash table.
//!
//! A [`Bucket`] is one independent chain of the bucket array. It only deals
//! in key equality within its own chain; hashing and duplicate prevention
//! belong to [`ChainedHashMap`](crate::ChainedHashMap).

/// One stored key-value pair and its place in a chain
#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    /// Owned copy of the key text, immutable after construction
    pub(crate) key: Box<str>,
    /// The value associated with the key
    pub(crate) value: V,
}

/// An ordered chain of entries sharing one bucket index
#[derive(Debug, Clone)]
pub(crate) struct Bucket<V> {
    /// Entries in append order; stable at a fixed capacity
    entries: Vec<Entry<V>>,
}

impl<V> Bucket<V> {
    /// Creates an empty chain
    pub(crate) fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Returns the number of entries in the chain
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the chain holds no entries
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the first entry whose key is byte-equal to `key`
    pub(crate) fn find(&self, key: &str) -> Option<&Entry<V>> {
        self.entries.iter().find(|entry| &*entry.key == key)
    }

    /// Mutable variant of [`find`](Self::find)
    pub(crate) fn find_mut(&mut self, key: &str) -> Option<&mut Entry<V>> {
        self.entries.iter_mut().find(|entry| &*entry.key == key)
    }

    /// Appends an entry to the end of the chain.
    ///
    /// No duplicate check happens here; the table rejects duplicate keys
    /// before delegating to the chain.
    pub(crate) fn push(&mut self, entry: Entry<V>) {
        self.entries.push(entry);
    }

    /// Unlinks and returns the first entry matching `key`, keeping the
    /// order of the remaining chain intact. Returns `None` if absent.
    pub(crate) fn remove(&mut self, key: &str) -> Option<Entry<V>> {
        let position = self.entries.iter().position(|entry| &*entry.key == key)?;
        Some(self.entries.remove(position))
    }

    /// Entries of the chain, in chain order
    pub(crate) fn entries(&self) -> &[Entry<V>] {
        &self.entries
    }

    /// Removes every entry from the chain, yielding them in chain order
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, Entry<V>> {
        self.entries.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shorthand for building an entry from a key literal
    fn entry(key: &str, value: u32) -> Entry<u32> {
        Entry { key: Box::from(key), value }
    }

    #[test]
    fn test_find_first_match() {
        let mut chain = Bucket::new();
        chain.push(entry("a", 1));
        chain.push(entry("b", 2));

        assert_eq!(chain.find("a").map(|e| e.value), Some(1));
        assert_eq!(chain.find("b").map(|e| e.value), Some(2));
        assert_eq!(chain.find("c").map(|e| e.value), None);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut chain = Bucket::new();
        chain.push(entry("a", 1));
        chain.push(entry("b", 2));
        chain.push(entry("c", 3));

        let removed = chain.remove("b");
        assert_eq!(removed.map(|e| e.value), Some(2));

        let remaining: Vec<&str> = chain.entries().iter().map(|e| &*e.key).collect();
        assert_eq!(remaining, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_absent() {
        let mut chain: Bucket<u32> = Bucket::new();
        chain.push(entry("a", 1));

        assert!(chain.remove("missing").is_none());
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_drain_empties_chain() {
        let mut chain = Bucket::new();
        chain.push(entry("a", 1));
        chain.push(entry("b", 2));

        let drained: Vec<u32> = chain.drain().map(|e| e.value).collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(chain.is_empty());
    }
}
