use super::*;

/// The keys of one level of a `DoubleKeyTable`, collected in table order.
/// The iterator element type is `&'a K`.
///
/// This `struct` is created by the [`keys`](DoubleKeyTable::keys) and
/// [`keys_of`](DoubleKeyTable::keys_of) methods on [`DoubleKeyTable`]. The keys
/// are gathered when the method is called; clone the iterator to walk them
/// again.
///
/// # Example
///
/// ```
/// use double_key_table::DoubleKeyTable;
///
/// let mut table = DoubleKeyTable::new();
/// table.set("a", "x", 1).unwrap();
/// table.set("b", "y", 2).unwrap();
///
/// let mut keys = table.keys();
/// let again = keys.clone();
/// let mut vec = vec![keys.next(), keys.next()];
/// vec.sort_unstable();
/// assert_eq!(vec, [Some(&"a"), Some(&"b")]);
///
/// // It is fused iterator
/// assert_eq!(keys.next(), None);
/// assert_eq!(keys.next(), None);
/// assert_eq!(again.len(), 2);
/// ```
pub struct Keys<'a, K> {
    pub(super) inner: alloc::vec::IntoIter<&'a K>,
}

impl<K> Clone for Keys<'_, K> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: Debug> fmt::Debug for Keys<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<&'a K> {
        self.inner.next()
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for Keys<'_, K> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for Keys<'_, K> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for Keys<'_, K> {}
