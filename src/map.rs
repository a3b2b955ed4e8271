#[cfg(test)]
mod tests_double_key_table;

use crate::hash::KeyChars;
use crate::raw::{Probe, ProbeMode, RawIter, RawIterMut, RawTable};
use crate::Equivalent;
use alloc::borrow::Cow;
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use core::iter::FusedIterator;
use core::ops::Index;

mod error;
mod into_iter;
mod iter;
mod iter_mut;
mod keys;
mod values;

pub use self::error::*;
pub use self::into_iter::*;
pub use self::iter::*;
pub use self::iter_mut::*;
pub use self::keys::*;
pub use self::values::*;

/// The default size sequence, shared by the outer table and every inner table.
///
/// Each size is a prime roughly double the previous one. A table starts at the
/// first size and moves along the sequence as it fills.
pub const TABLE_SIZES: &[usize] = &[
    5, 13, 29, 53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196613,
    393241, 786433, 1572869,
];

/// A two-level hash table keyed by a pair of keys `(K1, K2)`.
///
/// The outer table maps `K1` to an inner table, and each inner table maps `K2`
/// to the value. Both levels are open-addressed tables with linear probing,
/// hashed by [`hash_key`](crate::hash_key) at their current capacity. No level
/// is ever filled above half of its slots: an insert that would cross that
/// threshold moves the table to the next size of its size sequence and
/// reinserts every entry.
///
/// An inner table is created with the first `K2` stored under a new `K1`, and
/// dropped together with its outer slot when its last entry is removed, so
/// [`keys`](DoubleKeyTable::keys) only ever yields `K1` values that still have
/// entries.
///
/// Iteration follows table order: outer slots first, then slots of each inner
/// table. It is therefore neither insertion order nor sorted.
///
/// Keys only need [`KeyChars`] and [`Eq`]. Lookups accept any borrowed form
/// `Q` of the key as long as it yields the same characters and compares equal
/// (see [`Equivalent`]), for example `&str` for `String` keys.
///
/// # Examples
///
/// ```
/// use double_key_table::{DoubleKeyTable, TableError, TableLevel};
///
/// let mut table = DoubleKeyTable::new();
/// table.set("Tim", "Jen", 1).unwrap();
/// table.set("Tim", "Amy", 2).unwrap();
/// table.set("Amy", "Tim", 3).unwrap();
///
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.get("Tim", "Amy"), Ok(&2));
/// assert_eq!(table.get("Jen", "Tim"), Err(TableError::KeyNotFound(TableLevel::Outer)));
///
/// assert_eq!(table.delete("Amy", "Tim"), Ok(3));
/// assert_eq!(table.keys().collect::<Vec<_>>(), [&"Tim"]);
/// ```
#[derive(Clone)]
pub struct DoubleKeyTable<K1, K2, V> {
    table: RawTable<K1, RawTable<K2, V>>,
    sizes: Cow<'static, [usize]>,
    inner_sizes: Cow<'static, [usize]>,
    items: usize,
}

fn validate_sizes(level: TableLevel, sizes: &[usize]) -> Result<(), SizesError> {
    let first = match sizes.first() {
        Some(&first) => first,
        None => return Err(SizesError::Empty(level)),
    };
    if first < 2 {
        return Err(SizesError::TooSmall { level, size: first });
    }
    match sizes.windows(2).position(|pair| pair[1] <= pair[0]) {
        Some(position) => Err(SizesError::NotAscending {
            level,
            index: position + 1,
        }),
        None => Ok(()),
    }
}

impl<K1, K2, V> DoubleKeyTable<K1, K2, V> {
    /// Creates an empty `DoubleKeyTable` using [`TABLE_SIZES`] for both levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let table: DoubleKeyTable<&str, &str, u32> = DoubleKeyTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 5);
    /// ```
    pub fn new() -> Self {
        Self {
            table: RawTable::new(TABLE_SIZES),
            sizes: Cow::Borrowed(TABLE_SIZES),
            inner_sizes: Cow::Borrowed(TABLE_SIZES),
            items: 0,
        }
    }

    /// Creates an empty `DoubleKeyTable` with explicit size sequences for the
    /// outer table and for the inner tables.
    ///
    /// Each sequence must be non-empty, strictly ascending, and contain no size
    /// below 2. Pass [`TABLE_SIZES`] to keep the default for one level.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::{DoubleKeyTable, SizesError, TableLevel, TABLE_SIZES};
    ///
    /// let table: DoubleKeyTable<&str, &str, u32> =
    ///     DoubleKeyTable::try_with_sizes(&[5, 13], TABLE_SIZES).unwrap();
    /// assert_eq!(table.sizes(), &[5, 13]);
    ///
    /// let error = DoubleKeyTable::<&str, &str, u32>::try_with_sizes(vec![13, 5], TABLE_SIZES);
    /// assert_eq!(
    ///     error.err(),
    ///     Some(SizesError::NotAscending { level: TableLevel::Outer, index: 1 })
    /// );
    /// ```
    pub fn try_with_sizes<S1, S2>(sizes: S1, inner_sizes: S2) -> Result<Self, SizesError>
    where
        S1: Into<Cow<'static, [usize]>>,
        S2: Into<Cow<'static, [usize]>>,
    {
        let sizes = sizes.into();
        let inner_sizes = inner_sizes.into();
        validate_sizes(TableLevel::Outer, &sizes)?;
        validate_sizes(TableLevel::Inner, &inner_sizes)?;

        Ok(Self {
            table: RawTable::new(&sizes),
            sizes,
            inner_sizes,
            items: 0,
        })
    }

    /// Creates an empty `DoubleKeyTable` with explicit size sequences.
    ///
    /// # Panics
    ///
    /// Panics if a sequence is rejected by
    /// [`try_with_sizes`](DoubleKeyTable::try_with_sizes).
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::with_sizes(&[5, 13], &[5, 13]);
    /// table.set("a", "x", 1).unwrap();
    /// assert_eq!(table.inner_capacity("a"), Ok(5));
    /// ```
    pub fn with_sizes<S1, S2>(sizes: S1, inner_sizes: S2) -> Self
    where
        S1: Into<Cow<'static, [usize]>>,
        S2: Into<Cow<'static, [usize]>>,
    {
        match Self::try_with_sizes(sizes, inner_sizes) {
            Ok(table) => table,
            Err(error) => panic!("invalid table sizes: {}", error),
        }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn raw_table(&self) -> &RawTable<K1, RawTable<K2, V>> {
        &self.table
    }

    /// Returns the size sequence of the outer table.
    #[inline]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Returns the size sequence of the inner tables.
    #[inline]
    pub fn inner_sizes(&self) -> &[usize] {
        &self.inner_sizes
    }

    /// Returns the number of slots of the outer table.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::with_sizes(&[5, 13], &[5]);
    /// table.set("a", "x", 1).unwrap();
    /// table.set("b", "x", 2).unwrap();
    /// assert_eq!(table.capacity(), 5);
    ///
    /// // Three outer keys in five slots is above the load factor.
    /// table.set("c", "x", 3).unwrap();
    /// assert_eq!(table.capacity(), 13);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the number of `(K1, K2)` entries in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// assert_eq!(table.len(), 0);
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    /// table.set("b", "x", 3).unwrap();
    /// assert_eq!(table.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.items
    }

    /// Returns `true` if the table contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Removes every entry. The outer table keeps its current size.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert!(!table.contains("a", "x"));
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
        self.items = 0;
    }

    /// An iterator visiting all entries in table order. The iterator element
    /// type is `(&'a K1, &'a K2, &'a V)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    /// table.set("b", "x", 3).unwrap();
    ///
    /// let mut entries: Vec<_> = table.iter().collect();
    /// entries.sort_unstable();
    /// assert_eq!(entries, [(&"a", &"x", &1), (&"a", &"y", &2), (&"b", &"x", &3)]);
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn iter(&self) -> Iter<'_, K1, K2, V> {
        Iter {
            outer: self.table.iter(),
            current: None,
            items: self.items,
        }
    }

    /// An iterator visiting all entries in table order with mutable
    /// references to the values.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("b", "y", 2).unwrap();
    ///
    /// for (_, _, value) in table.iter_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(table.get("a", "x"), Ok(&10));
    /// assert_eq!(table.get("b", "y"), Ok(&20));
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn iter_mut(&mut self) -> IterMut<'_, K1, K2, V> {
        IterMut {
            outer: self.table.iter_mut(),
            current: None,
            items: self.items,
        }
    }

    /// Returns every first key in outer table order.
    ///
    /// The keys are collected when this method is called; the returned
    /// iterator can be cloned to walk them again.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    /// table.set("b", "x", 3).unwrap();
    ///
    /// let mut keys: Vec<_> = table.keys().collect();
    /// keys.sort_unstable();
    /// assert_eq!(keys, [&"a", &"b"]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K1> {
        Keys {
            inner: self.table.iter().map(|(key, _)| key).collect::<Vec<_>>().into_iter(),
        }
    }

    /// Returns every value, in outer table order and then inner table order.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    /// table.set("b", "x", 3).unwrap();
    ///
    /// let mut values: Vec<_> = table.values().copied().collect();
    /// values.sort_unstable();
    /// assert_eq!(values, [1, 2, 3]);
    /// ```
    pub fn values(&self) -> Values<'_, V> {
        Values {
            inner: self.iter().map(|(_, _, value)| value).collect::<Vec<_>>().into_iter(),
        }
    }
}

impl<K1, K2, V> DoubleKeyTable<K1, K2, V>
where
    K1: KeyChars + Eq,
    K2: KeyChars + Eq,
{
    /// Finds the outer slot of `k1` and the inner slot of `k2`.
    fn locate<Q1, Q2>(&self, k1: &Q1, k2: &Q2) -> Result<(usize, usize), TableError>
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
        Q2: KeyChars + Equivalent<K2> + ?Sized,
    {
        let outer = match self.table.find(k1, ProbeMode::Lookup) {
            Probe::Found(index) => index,
            _ => return Err(TableError::KeyNotFound(TableLevel::Outer)),
        };
        let inner_table = match self.table.slot(outer) {
            Some((_, inner_table)) => inner_table,
            None => return Err(TableError::KeyNotFound(TableLevel::Outer)),
        };
        match inner_table.find(k2, ProbeMode::Lookup) {
            Probe::Found(inner) => Ok((outer, inner)),
            _ => Err(TableError::KeyNotFound(TableLevel::Inner)),
        }
    }

    fn inner_table<Q1>(&self, k1: &Q1) -> Result<&RawTable<K2, V>, TableError>
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
    {
        match self.table.get(k1) {
            Some((_, inner_table)) => Ok(inner_table),
            None => Err(TableError::KeyNotFound(TableLevel::Outer)),
        }
    }

    /// Returns a reference to the value stored under `(k1, k2)`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] with [`TableLevel::Outer`] if `k1` is absent,
    /// or with [`TableLevel::Inner`] if `k1` is present but `k2` is not.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::{DoubleKeyTable, TableError, TableLevel};
    ///
    /// let mut table: DoubleKeyTable<String, String, i32> = DoubleKeyTable::new();
    /// table.set("a".to_string(), "x".to_string(), 1).unwrap();
    ///
    /// assert_eq!(table.get("a", "x"), Ok(&1));
    /// assert_eq!(table.get("a", "y"), Err(TableError::KeyNotFound(TableLevel::Inner)));
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn get<Q1, Q2>(&self, k1: &Q1, k2: &Q2) -> Result<&V, TableError>
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
        Q2: KeyChars + Equivalent<K2> + ?Sized,
    {
        let (outer, inner) = self.locate(k1, k2)?;
        match self.table.slot(outer).and_then(|(_, table)| table.slot(inner)) {
            Some((_, value)) => Ok(value),
            None => Err(TableError::KeyNotFound(TableLevel::Inner)),
        }
    }

    /// Returns a mutable reference to the value stored under `(k1, k2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// *table.get_mut("a", "x").unwrap() += 41;
    /// assert_eq!(table.get("a", "x"), Ok(&42));
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn get_mut<Q1, Q2>(&mut self, k1: &Q1, k2: &Q2) -> Result<&mut V, TableError>
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
        Q2: KeyChars + Equivalent<K2> + ?Sized,
    {
        let (outer, inner) = self.locate(k1, k2)?;
        match self.table.slot_mut(outer) {
            Some((_, table)) => match table.slot_mut(inner) {
                Some((_, value)) => Ok(value),
                None => Err(TableError::KeyNotFound(TableLevel::Inner)),
            },
            None => Err(TableError::KeyNotFound(TableLevel::Outer)),
        }
    }

    /// Returns `true` if an entry is stored under `(k1, k2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// assert!(table.contains("a", "x"));
    /// assert!(!table.contains("a", "y"));
    /// assert!(!table.contains("b", "x"));
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn contains<Q1, Q2>(&self, k1: &Q1, k2: &Q2) -> bool
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
        Q2: KeyChars + Equivalent<K2> + ?Sized,
    {
        self.locate(k1, k2).is_ok()
    }

    /// Returns `true` if at least one entry is stored under `k1`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn contains_key1<Q1>(&self, k1: &Q1) -> bool
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
    {
        self.table.get(k1).is_some()
    }

    /// Stores `value` under `(k1, k2)`, replacing any previous value.
    ///
    /// Replacing a value never resizes and leaves [`len`](DoubleKeyTable::len)
    /// unchanged. A new entry may grow its inner table, and a new `k1` may grow
    /// the outer table.
    ///
    /// # Errors
    ///
    /// If the entry is new and the inner table (for a known `k1`) or the outer
    /// table (for a new `k1`) is already at its largest size with no room left
    /// under the load factor, nothing is written and an [`InsertError`] with
    /// [`TableError::CapacityExhausted`] hands back the keys and value.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::{DoubleKeyTable, InsertError, TableError, TableLevel};
    ///
    /// let mut table = DoubleKeyTable::with_sizes(&[5], &[5]);
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "x", 2).unwrap();
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.get("a", "x"), Ok(&2));
    ///
    /// table.set("a", "y", 3).unwrap();
    /// let error = table.set("a", "z", 4).unwrap_err();
    /// assert_eq!(
    ///     error,
    ///     InsertError {
    ///         error: TableError::CapacityExhausted(TableLevel::Inner),
    ///         keys: ("a", "z"),
    ///         value: 4,
    ///     }
    /// );
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn set(&mut self, k1: K1, k2: K2, value: V) -> Result<(), InsertError<K1, K2, V>> {
        if let Some((_, inner_table)) = self.table.find_mut(&k1) {
            return match inner_table.insert(&self.inner_sizes, k2, value) {
                Ok(Some(_)) => Ok(()),
                Ok(None) => {
                    self.items += 1;
                    Ok(())
                }
                Err((k2, value)) => Err(InsertError {
                    error: TableError::CapacityExhausted(TableLevel::Inner),
                    keys: (k1, k2),
                    value,
                }),
            };
        }

        let exhausted = |level, k1, k2, value| InsertError {
            error: TableError::CapacityExhausted(level),
            keys: (k1, k2),
            value,
        };

        let index = match self.table.find(&k1, ProbeMode::Insert) {
            Probe::Vacant(index) => index,
            _ => return Err(exhausted(TableLevel::Outer, k1, k2, value)),
        };
        let Some(target) = self.table.grow_index(&self.sizes, 1) else {
            tracing::debug!(
                capacity = self.table.capacity(),
                items = self.table.len(),
                "outer table cannot take a new key1"
            );
            return Err(exhausted(TableLevel::Outer, k1, k2, value));
        };

        let mut inner_table = RawTable::new(&self.inner_sizes);
        if let Err((k2, value)) = inner_table.insert(&self.inner_sizes, k2, value) {
            return Err(exhausted(TableLevel::Inner, k1, k2, value));
        }
        self.table.insert_at(index, k1, inner_table);
        self.table.resize(&self.sizes, target);
        self.items += 1;
        Ok(())
    }

    /// Removes the entry stored under `(k1, k2)` and returns its value.
    ///
    /// When the last entry under `k1` is removed, `k1` itself is removed from
    /// the outer table.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] if there is no such entry. The table is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::{DoubleKeyTable, TableError, TableLevel};
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    ///
    /// assert_eq!(table.delete("a", "x"), Ok(1));
    /// assert!(table.contains_key1("a"));
    /// assert_eq!(table.delete("a", "y"), Ok(2));
    /// assert!(!table.contains_key1("a"));
    /// assert_eq!(table.delete("a", "y"), Err(TableError::KeyNotFound(TableLevel::Outer)));
    /// ```
    pub fn delete<Q1, Q2>(&mut self, k1: &Q1, k2: &Q2) -> Result<V, TableError>
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
        Q2: KeyChars + Equivalent<K2> + ?Sized,
    {
        let (outer, inner) = self.locate(k1, k2)?;
        let (value, emptied) = match self.table.slot_mut(outer) {
            Some((_, table)) => match table.remove_at(inner) {
                Some((_, value)) => (value, table.is_empty()),
                None => return Err(TableError::KeyNotFound(TableLevel::Inner)),
            },
            None => return Err(TableError::KeyNotFound(TableLevel::Outer)),
        };
        self.items -= 1;

        if emptied {
            self.table.remove_at(outer);
            tracing::trace!(slot = outer, "dropped empty inner table");
        }
        Ok(value)
    }

    /// Returns the second keys stored under `k1`, in inner table order.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] with [`TableLevel::Outer`] if `k1` is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    /// table.set("b", "z", 3).unwrap();
    ///
    /// let mut keys: Vec<_> = table.keys_of("a").unwrap().collect();
    /// keys.sort_unstable();
    /// assert_eq!(keys, [&"x", &"y"]);
    /// assert!(table.keys_of("c").is_err());
    /// ```
    pub fn keys_of<Q1>(&self, k1: &Q1) -> Result<Keys<'_, K2>, TableError>
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
    {
        let inner_table = self.inner_table(k1)?;
        Ok(Keys {
            inner: inner_table.iter().map(|(key, _)| key).collect::<Vec<_>>().into_iter(),
        })
    }

    /// Returns the values stored under `k1`, in inner table order.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] with [`TableLevel::Outer`] if `k1` is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    /// table.set("b", "z", 3).unwrap();
    ///
    /// let mut values: Vec<_> = table.values_of("a").unwrap().copied().collect();
    /// values.sort_unstable();
    /// assert_eq!(values, [1, 2]);
    /// ```
    pub fn values_of<Q1>(&self, k1: &Q1) -> Result<Values<'_, V>, TableError>
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
    {
        let inner_table = self.inner_table(k1)?;
        Ok(Values {
            inner: inner_table.iter().map(|(_, value)| value).collect::<Vec<_>>().into_iter(),
        })
    }

    /// Returns the number of slots of the inner table under `k1`.
    ///
    /// # Errors
    ///
    /// [`TableError::KeyNotFound`] with [`TableLevel::Outer`] if `k1` is absent.
    pub fn inner_capacity<Q1>(&self, k1: &Q1) -> Result<usize, TableError>
    where
        Q1: KeyChars + Equivalent<K1> + ?Sized,
    {
        Ok(self.inner_table(k1)?.capacity())
    }
}

impl<K1, K2, V> Default for DoubleKeyTable<K1, K2, V> {
    /// Creates an empty `DoubleKeyTable` with the default size sequences.
    #[cfg_attr(feature = "inline-more", inline)]
    fn default() -> Self {
        Self::new()
    }
}

impl<K1: Debug, K2: Debug, V: Debug> Debug for DoubleKeyTable<K1, K2, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.table.iter()).finish()
    }
}

impl<K1, K2, V> PartialEq for DoubleKeyTable<K1, K2, V>
where
    K1: KeyChars + Eq,
    K2: KeyChars + Eq,
    V: PartialEq,
{
    /// Two tables are equal when they hold the same entries, whatever their
    /// sizes and slot layout.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key1, key2, value)| other.get(key1, key2).is_ok_and(|v| *value == *v))
    }
}

impl<K1, K2, V> Eq for DoubleKeyTable<K1, K2, V>
where
    K1: KeyChars + Eq,
    K2: KeyChars + Eq,
    V: Eq,
{
}

impl<K1, K2, Q1, Q2, V> Index<(&Q1, &Q2)> for DoubleKeyTable<K1, K2, V>
where
    K1: KeyChars + Eq,
    K2: KeyChars + Eq,
    Q1: KeyChars + Equivalent<K1> + ?Sized,
    Q2: KeyChars + Equivalent<K2> + ?Sized,
{
    type Output = V;

    /// Returns a reference to the value stored under the pair of keys.
    ///
    /// # Panics
    ///
    /// Panics if the entry is not present in the table.
    #[cfg_attr(feature = "inline-more", inline)]
    fn index(&self, (k1, k2): (&Q1, &Q2)) -> &V {
        match self.get(k1, k2) {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<'a, K1, K2, V> IntoIterator for &'a DoubleKeyTable<K1, K2, V> {
    type Item = (&'a K1, &'a K2, &'a V);
    type IntoIter = Iter<'a, K1, K2, V>;

    #[cfg_attr(feature = "inline-more", inline)]
    fn into_iter(self) -> Iter<'a, K1, K2, V> {
        self.iter()
    }
}

impl<'a, K1, K2, V> IntoIterator for &'a mut DoubleKeyTable<K1, K2, V> {
    type Item = (&'a K1, &'a K2, &'a mut V);
    type IntoIter = IterMut<'a, K1, K2, V>;

    #[cfg_attr(feature = "inline-more", inline)]
    fn into_iter(self) -> IterMut<'a, K1, K2, V> {
        self.iter_mut()
    }
}

impl<K1: Clone, K2, V> IntoIterator for DoubleKeyTable<K1, K2, V> {
    type Item = (K1, K2, V);
    type IntoIter = IntoIter<K1, K2, V>;

    /// Creates a consuming iterator visiting all entries in table order.
    /// The first key is cloned for every entry but the last under it.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    ///
    /// let mut entries: Vec<_> = table.into_iter().collect();
    /// entries.sort_unstable();
    /// assert_eq!(entries, [("a", "x", 1), ("a", "y", 2)]);
    /// ```
    #[cfg_attr(feature = "inline-more", inline)]
    fn into_iter(self) -> IntoIter<K1, K2, V> {
        IntoIter {
            outer: self.table.into_iter(),
            current: None,
            items: self.items,
        }
    }
}
