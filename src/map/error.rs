use core::fmt::{self, Debug};

/// The level of a [`DoubleKeyTable`](crate::DoubleKeyTable) an error comes from.
///
/// The outer table is keyed by `K1`, every inner table by `K2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableLevel {
    /// The table keyed by the first key.
    Outer,
    /// The per-`K1` table keyed by the second key.
    Inner,
}

impl fmt::Display for TableLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TableLevel::Outer => f.write_str("outer"),
            TableLevel::Inner => f.write_str("inner"),
        }
    }
}

/// The error returned by lookups, removals and inserts of a
/// [`DoubleKeyTable`](crate::DoubleKeyTable).
///
/// Each variant carries the [`TableLevel`] that failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableError {
    /// The first key is absent ([`TableLevel::Outer`]) or the first key is
    /// present but the second is not ([`TableLevel::Inner`]).
    KeyNotFound(TableLevel),
    /// A new key cannot be inserted because the table at this level is
    /// already at the largest configured size and the insert would put it
    /// above the maximum load factor.
    CapacityExhausted(TableLevel),
}

impl TableError {
    /// Returns the level of the table that failed.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::{DoubleKeyTable, TableError, TableLevel};
    ///
    /// let mut table: DoubleKeyTable<String, String, i32> = DoubleKeyTable::new();
    /// table.set("a".into(), "x".into(), 1).unwrap();
    ///
    /// assert_eq!(table.get("b", "x").unwrap_err().level(), TableLevel::Outer);
    /// assert_eq!(table.get("a", "y").unwrap_err(), TableError::KeyNotFound(TableLevel::Inner));
    /// ```
    #[inline]
    pub fn level(&self) -> TableLevel {
        match *self {
            TableError::KeyNotFound(level) | TableError::CapacityExhausted(level) => level,
        }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TableError::KeyNotFound(TableLevel::Outer) => f.write_str("key1 not found"),
            TableError::KeyNotFound(TableLevel::Inner) => {
                f.write_str("key1 exists, but key2 not found")
            }
            TableError::CapacityExhausted(level) => {
                write!(f, "{} table cannot grow beyond its largest size", level)
            }
        }
    }
}

impl core::error::Error for TableError {}

/// The error returned by [`set`](crate::DoubleKeyTable::set) when a new entry
/// cannot be inserted.
///
/// Contains the [`TableError`] and the keys and value that were not inserted,
/// so they can be used for another purpose.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InsertError<K1, K2, V> {
    /// Why the insert failed. Always [`TableError::CapacityExhausted`].
    pub error: TableError,
    /// The keys that were not inserted.
    pub keys: (K1, K2),
    /// The value that was not inserted.
    pub value: V,
}

impl<K1: Debug, K2: Debug, V: Debug> fmt::Display for InsertError<K1, K2, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key1, key2) = &self.keys;
        write!(
            f,
            "failed to insert {:?} with key1 = {:?} and key2 = {:?}: {}",
            self.value, key1, key2, self.error
        )
    }
}

impl<K1: Debug, K2: Debug, V: Debug> core::error::Error for InsertError<K1, K2, V> {}

/// The error returned by [`try_with_sizes`](crate::DoubleKeyTable::try_with_sizes)
/// when a size sequence cannot be used.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SizesError {
    /// The sequence for this level has no sizes at all.
    Empty(TableLevel),
    /// A size below 2. The hash reduces its coefficient modulo `size - 1`.
    TooSmall {
        /// The level the sequence belongs to.
        level: TableLevel,
        /// The offending size.
        size: usize,
    },
    /// `sizes[index]` is not larger than `sizes[index - 1]`.
    NotAscending {
        /// The level the sequence belongs to.
        level: TableLevel,
        /// Position of the first size that breaks the order.
        index: usize,
    },
}

impl fmt::Display for SizesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SizesError::Empty(level) => write!(f, "{} size sequence is empty", level),
            SizesError::TooSmall { level, size } => {
                write!(f, "{} size sequence contains {}, sizes must be at least 2", level, size)
            }
            SizesError::NotAscending { level, index } => write!(
                f,
                "{} size sequence is not strictly ascending at position {}",
                level, index
            ),
        }
    }
}

impl core::error::Error for SizesError {}
