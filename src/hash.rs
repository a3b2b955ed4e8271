//! The polynomial string hash shared by both levels of the table.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Multiplier applied to the running coefficient after every character.
pub const HASH_BASE: u128 = 31;

/// Initial value of the running coefficient.
pub const HASH_SEED: u128 = 31415;

/// Keys that can be viewed as an ordered sequence of characters.
///
/// Both levels of a [`DoubleKeyTable`](crate::DoubleKeyTable) hash their keys
/// through this trait, so a key type only needs to say which characters it is
/// made of.
///
/// # Correctness
///
/// Equivalent keys must yield the same characters, otherwise a lookup with a
/// borrowed form of the key (for example `&str` for a `String` key) will probe
/// from a different start slot and miss the entry.
///
/// # Examples
///
/// ```
/// use double_key_table::KeyChars;
///
/// struct Code([u8; 3]);
///
/// impl KeyChars for Code {
///     fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
///         self.0.iter().map(|&b| b as char)
///     }
/// }
///
/// let code = Code(*b"abc");
/// assert_eq!(code.key_chars().collect::<String>(), "abc");
/// ```
pub trait KeyChars {
    /// Returns the characters of the key, in order.
    fn key_chars(&self) -> impl Iterator<Item = char> + '_;
}

impl KeyChars for str {
    #[cfg_attr(feature = "inline-more", inline)]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }
}

impl KeyChars for String {
    #[cfg_attr(feature = "inline-more", inline)]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }
}

impl KeyChars for Box<str> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }
}

impl KeyChars for Cow<'_, str> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars()
    }
}

impl KeyChars for char {
    #[cfg_attr(feature = "inline-more", inline)]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        core::iter::once(*self)
    }
}

impl KeyChars for [char] {
    #[cfg_attr(feature = "inline-more", inline)]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.iter().copied()
    }
}

impl KeyChars for Vec<char> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.iter().copied()
    }
}

impl<T: KeyChars + ?Sized> KeyChars for &T {
    #[cfg_attr(feature = "inline-more", inline)]
    fn key_chars(&self) -> impl Iterator<Item = char> + '_ {
        (**self).key_chars()
    }
}

/// Hashes `key` into the range `[0, capacity)`.
///
/// Every character updates `value = (code + a * value) mod capacity` and then
/// the coefficient `a = (a * HASH_BASE) mod (capacity - 1)`. The result depends
/// on the capacity, so a table that changes size must reinsert every entry.
///
/// `capacity` must be at least 2.
///
/// # Examples
///
/// ```
/// use double_key_table::hash_key;
///
/// assert_eq!(hash_key("", 5), 0);
/// assert_eq!(hash_key("a", 5), 2);
/// assert_eq!(hash_key("abc", 13), 12);
/// ```
pub fn hash_key<Q: KeyChars + ?Sized>(key: &Q, capacity: usize) -> usize {
    debug_assert!(capacity >= 2, "capacity must be at least 2");

    let capacity = capacity as u128;
    let mut value: u128 = 0;
    let mut a = HASH_SEED % (capacity - 1);
    for ch in key.key_chars() {
        value = (u128::from(u32::from(ch)) + a * value) % capacity;
        a = a * HASH_BASE % (capacity - 1);
    }
    // `value < capacity` and `capacity` came from a `usize`.
    value as usize
}
