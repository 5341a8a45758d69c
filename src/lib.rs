//! # Chained Hash Map
//!
//! A Rust implementation of a string-keyed hash table with separate
//! chaining.
//!
//! Keys are text; values are any type `V`. Collisions are resolved by
//! chaining entries inside each bucket, and the bucket array grows and
//! shrinks automatically as the load factor crosses configurable
//! thresholds, so individual operations stay amortized O(1). The table is
//! single-threaded by design; wrap it in your own lock if you need shared
//! access.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! // Create a new map
//! let mut map = ChainedHashMap::new();
//!
//! // Insert values
//! map.put("apple", 1);
//! map.put("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values; the entry count is unchanged
//! map.put("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.len(), 2);
//!
//! // Remove values; ownership comes back to the caller
//! assert_eq!(map.remove("apple"), Some(10));
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Value Destructors
//!
//! A destructor registered at construction runs on every value the table
//! disposes of itself: the replaced value on an overwriting `put`, and
//! every still-stored value on `clear` or drop. Values returned by
//! `remove` skip it.
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let disposed = Rc::new(Cell::new(0));
//! let sink = Rc::clone(&disposed);
//!
//! let mut map = ChainedHashMap::with_value_destructor(move |_value: String| {
//!     sink.set(sink.get() + 1);
//! });
//!
//! map.put("session", String::from("alpha"));
//! map.put("session", String::from("beta")); // disposes of "alpha"
//! drop(map); // disposes of "beta"
//!
//! assert_eq!(disposed.get(), 2);
//! ```
//!
//! ## Cursor Traversal
//!
//! Besides a standard [`Iterator`], the map offers an explicit cursor that
//! exposes keys one at a time. The cursor borrows the map, so mutating the
//! map while a cursor is alive is a compile error rather than a silently
//! invalidated traversal.
//!
//! ```rust
//! use chainmap::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::new();
//! map.put("uno", 1);
//! map.put("dos", 2);
//!
//! let mut visited = 0;
//! let mut cursor = map.cursor();
//! while !cursor.at_end() {
//!     if let Some(key) = cursor.key() {
//!         assert!(map.contains_key(key));
//!     }
//!     visited += 1;
//!     cursor.advance();
//! }
//!
//! assert_eq!(visited, 2);
//! ```

/// Module implementing chain storage for the bucket array
mod bucket;
/// Module implementing the separate-chaining hash table and its iterators
mod chained_hash_map;
/// Utility functions and traits for the hash table
mod utils;

pub use chained_hash_map::{ChainedHashMap, Cursor, Iter};
pub use utils::{MapExtensions, from_pairs};
