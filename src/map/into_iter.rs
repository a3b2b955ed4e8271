use super::*;
use crate::raw::RawIntoIter;

/// An owning iterator over the entries of a `DoubleKeyTable` in table order.
/// The iterator element type is `(K1, K2, V)`.
///
/// This `struct` is created by the [`into_iter`](IntoIterator::into_iter) method
/// on [`DoubleKeyTable`] (provided by the [`IntoIterator`] trait).
pub struct IntoIter<K1, K2, V> {
    pub(super) outer: RawIntoIter<K1, RawTable<K2, V>>,
    pub(super) current: Option<(K1, RawIntoIter<K2, V>)>,
    pub(super) items: usize,
}

impl<K1: Clone, K2, V> Iterator for IntoIter<K1, K2, V> {
    type Item = (K1, K2, V);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<(K1, K2, V)> {
        loop {
            match self.current.take() {
                Some((key1, mut inner)) => {
                    let (key2, value) = match inner.next() {
                        Some(entry) => entry,
                        None => continue,
                    };
                    self.items -= 1;
                    // The last entry under `key1` gets the key itself.
                    if inner.len() == 0 {
                        return Some((key1, key2, value));
                    }
                    let copy = key1.clone();
                    self.current = Some((key1, inner));
                    return Some((copy, key2, value));
                }
                None => {
                    let (key1, inner_table) = self.outer.next()?;
                    self.current = Some((key1, inner_table.into_iter()));
                }
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<K1: Clone, K2, V> ExactSizeIterator for IntoIter<K1, K2, V> {}
impl<K1: Clone, K2, V> FusedIterator for IntoIter<K1, K2, V> {}
