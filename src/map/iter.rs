use super::*;

/// An iterator over the entries of a `DoubleKeyTable` in table order.
/// The iterator element type is `(&'a K1, &'a K2, &'a V)`.
///
/// This `struct` is created by the [`iter`](DoubleKeyTable::iter) method
/// on [`DoubleKeyTable`]. See its documentation for more.
pub struct Iter<'a, K1, K2, V> {
    pub(super) outer: RawIter<'a, K1, RawTable<K2, V>>,
    pub(super) current: Option<(&'a K1, RawIter<'a, K2, V>)>,
    pub(super) items: usize,
}

impl<K1, K2, V> Clone for Iter<'_, K1, K2, V> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn clone(&self) -> Self {
        Iter {
            outer: self.outer.clone(),
            current: self.current.clone(),
            items: self.items,
        }
    }
}

impl<K1: Debug, K2: Debug, V: Debug> fmt::Debug for Iter<'_, K1, K2, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K1, K2, V> Iterator for Iter<'a, K1, K2, V> {
    type Item = (&'a K1, &'a K2, &'a V);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<(&'a K1, &'a K2, &'a V)> {
        loop {
            if let Some((key1, inner)) = &mut self.current {
                if let Some((key2, value)) = inner.next() {
                    self.items -= 1;
                    return Some((*key1, key2, value));
                }
            }
            let (key1, inner_table) = self.outer.next()?;
            self.current = Some((key1, inner_table.iter()));
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<K1, K2, V> ExactSizeIterator for Iter<'_, K1, K2, V> {}
impl<K1, K2, V> FusedIterator for Iter<'_, K1, K2, V> {}
