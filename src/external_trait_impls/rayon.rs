use crate::map::DoubleKeyTable;
use alloc::vec::Vec;
use rayon::iter::IntoParallelIterator;

impl<K1: Sync, K2: Sync, V: Sync> DoubleKeyTable<K1, K2, V> {
    /// A parallel iterator over all entries. The entries are gathered in
    /// table order first and then split across the rayon thread pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use double_key_table::DoubleKeyTable;
    /// use rayon::prelude::*;
    ///
    /// let mut table = DoubleKeyTable::new();
    /// table.set("a", "x", 1).unwrap();
    /// table.set("a", "y", 2).unwrap();
    /// table.set("b", "x", 3).unwrap();
    ///
    /// let sum: i32 = table.par_iter().map(|(_, _, value)| *value).sum();
    /// assert_eq!(sum, 6);
    /// ```
    pub fn par_iter(&self) -> rayon::vec::IntoIter<(&K1, &K2, &V)> {
        self.iter().collect::<Vec<_>>().into_par_iter()
    }
}

impl<'a, K1: Sync, K2: Sync, V: Sync> IntoParallelIterator for &'a DoubleKeyTable<K1, K2, V> {
    type Item = (&'a K1, &'a K2, &'a V);
    type Iter = rayon::vec::IntoIter<(&'a K1, &'a K2, &'a V)>;

    #[cfg_attr(feature = "inline-more", inline)]
    fn into_par_iter(self) -> Self::Iter {
        self.par_iter()
    }
}
