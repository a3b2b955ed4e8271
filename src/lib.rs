//! Double key table
//!
//! **`This crate provides a two-level hash table keyed by a pair of string-like
//! keys, built entirely from open-addressed linear probing tables.`**
//!
//! A [`DoubleKeyTable`] maps a first key `K1` to an inner table, and every
//! inner table maps a second key `K2` to a value `V`. Both levels use the same
//! machinery: a polynomial string hash ([`hash_key`]) computed at the table's
//! current capacity, linear probing with wraparound, backward-shift deletion
//! instead of tombstones, and growth along a fixed ascending sequence of table
//! sizes ([`TABLE_SIZES`] by default) whenever a table would become more than
//! half full.
//!
//! The outer and inner tables are kept consistent: an inner table exists
//! exactly as long as it has at least one entry, and [`DoubleKeyTable::len`] is
//! always the total number of `(K1, K2)` pairs.
//!
//! ```
//! use double_key_table::DoubleKeyTable;
//!
//! let mut table = DoubleKeyTable::with_sizes(&[5, 13], &[5, 13]);
//! for k1 in ["Tim", "Amy", "May"] {
//!     for (value, k2) in ["Jen", "Bob", "Ann"].into_iter().enumerate() {
//!         table.set(k1, k2, value).unwrap();
//!     }
//! }
//!
//! assert_eq!(table.len(), 9);
//! assert_eq!(table.capacity(), 13);
//! assert_eq!(table.inner_capacity("Amy"), Ok(13));
//! assert_eq!(table.get("May", "Ann"), Ok(&2));
//! ```
//!
//! Keys are anything that can be viewed as a sequence of characters, see
//! [`KeyChars`].

#![no_std]
#![allow(clippy::manual_map)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rustdoc::broken_intra_doc_links)]

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg_attr(test, macro_use)]
extern crate alloc;

#[cfg(feature = "raw")]
/// Experimental `RawTable` API: the single-level linear probing table both
/// levels are built from. This module is only available if the `raw` feature
/// is enabled.
pub mod raw {
    // The RawTable API is still experimental and is not properly documented yet.
    #[allow(missing_docs)]
    #[allow(unused_imports)]
    #[allow(dead_code)]
    #[path = "mod.rs"]
    mod inner;
    pub use inner::*;
}
#[allow(unused_imports)]
#[cfg(not(feature = "raw"))]
mod raw;

mod external_trait_impls;
mod hash;

#[allow(missing_docs)]
mod map;

pub mod table {
    //! A two-level hash table implemented with linear probing at both levels.
    #![allow(missing_docs)]
    pub use crate::map::*;
}

pub use crate::hash::{hash_key, KeyChars, HASH_BASE, HASH_SEED};
pub use crate::map::{
    DoubleKeyTable, InsertError, SizesError, TableError, TableLevel, TABLE_SIZES,
};

/// Key equivalence trait.
///
/// This trait defines the function used to compare the input value with the
/// table keys during a lookup operation such as [`DoubleKeyTable::get`]
/// or [`DoubleKeyTable::contains`].
/// It is provided with a blanket implementation based on the
/// [`Borrow`](core::borrow::Borrow) trait.
///
/// # Correctness
///
/// Equivalent values must yield the same characters through [`KeyChars`].
pub trait Equivalent<K: ?Sized> {
    /// Checks if this value is equivalent to the given key.
    ///
    /// Returns `true` if both values are equivalent, and `false` otherwise.
    ///
    /// # Correctness
    ///
    /// When this function returns `true`, both `self` and `key` must hash to
    /// the same value.
    fn equivalent(&self, key: &K) -> bool;
}

impl<Q: ?Sized, K: ?Sized> Equivalent<K> for Q
where
    Q: Eq,
    K: core::borrow::Borrow<Q>,
{
    fn equivalent(&self, key: &K) -> bool {
        self == key.borrow()
    }
}
