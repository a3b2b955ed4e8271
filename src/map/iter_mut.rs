use super::*;

/// A mutable iterator over the entries of a `DoubleKeyTable` in table order.
/// The iterator element type is `(&'a K1, &'a K2, &'a mut V)`.
///
/// This `struct` is created by the [`iter_mut`](DoubleKeyTable::iter_mut) method
/// on [`DoubleKeyTable`]. See its documentation for more.
pub struct IterMut<'a, K1, K2, V> {
    pub(super) outer: RawIterMut<'a, K1, RawTable<K2, V>>,
    pub(super) current: Option<(&'a K1, RawIterMut<'a, K2, V>)>,
    pub(super) items: usize,
}

impl<'a, K1, K2, V> Iterator for IterMut<'a, K1, K2, V> {
    type Item = (&'a K1, &'a K2, &'a mut V);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<(&'a K1, &'a K2, &'a mut V)> {
        loop {
            if let Some((key1, inner)) = &mut self.current {
                if let Some((key2, value)) = inner.next() {
                    self.items -= 1;
                    return Some((*key1, key2, value));
                }
            }
            let (key1, inner_table) = self.outer.next()?;
            self.current = Some((key1, inner_table.iter_mut()));
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<K1, K2, V> ExactSizeIterator for IterMut<'_, K1, K2, V> {}
impl<K1, K2, V> FusedIterator for IterMut<'_, K1, K2, V> {}
