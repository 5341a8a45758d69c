//! Utility helpers layered on top of [`ChainedHashMap`]

use crate::ChainedHashMap;

/// Extension trait with convenience views over a map's contents
pub trait MapExtensions<V> {
    /// Returns the keys of the map as a `Vec`, in iteration order
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the map as a `Vec`, in iteration order
    fn values(&self) -> Vec<V>;
}

impl<V> MapExtensions<V> for ChainedHashMap<V>
where
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}

/// Builds a [`ChainedHashMap`] from an iterator of owned key-value pairs
pub fn from_pairs<V, I>(pairs: I) -> ChainedHashMap<V>
where
    I: IntoIterator<Item = (String, V)>,
{
    let mut map = ChainedHashMap::new();
    map.extend(pairs);
    map
}
