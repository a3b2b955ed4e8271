
use crate::hash::{hash_key, KeyChars};
use crate::Equivalent;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use core::iter::FusedIterator;
use core::mem;

mod probe;
pub use self::probe::{probe, Probe, ProbeMode};
use self::probe::{home_in_range, next_index};

/// Numerator of the maximum load factor.
pub const MAX_LOAD_NUMERATOR: usize = 1;

/// Denominator of the maximum load factor.
pub const MAX_LOAD_DENOMINATOR: usize = 2;

/// Returns `true` if `items` entries in `capacity` slots is above the maximum
/// load factor.
#[inline]
pub fn exceeds_load(items: usize, capacity: usize) -> bool {
    items.saturating_mul(MAX_LOAD_DENOMINATOR) > capacity.saturating_mul(MAX_LOAD_NUMERATOR)
}

/// A linear probing hash table with a fixed number of slots.
///
/// The capacity of the table is always `sizes[size_index]` for the size
/// sequence the table was created with. Every method that may change the
/// capacity takes that sequence again as `sizes`; passing a different sequence
/// than the one used at creation is a logic error.
///
/// Each slot is either empty or holds a key with its payload. Removal uses
/// backward-shift cleanup, so there are no tombstones and `len` is always the
/// number of occupied slots.
#[derive(Clone)]
pub struct RawTable<K, P> {
    slots: Box<[Option<(K, P)>]>,
    size_index: usize,
    items: usize,
}

fn empty_slots<K, P>(capacity: usize) -> Box<[Option<(K, P)>]> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots.into_boxed_slice()
}

impl<K, P> RawTable<K, P> {
    /// Creates an empty table with the first size of `sizes`.
    ///
    /// # Panics
    ///
    /// Panics if `sizes` is empty.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn new(sizes: &[usize]) -> Self {
        Self {
            slots: empty_slots(sizes[0]),
            size_index: 0,
            items: 0,
        }
    }

    /// Returns the number of slots in the table.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the position of the current capacity in the size sequence.
    #[cfg_attr(not(feature = "raw"), allow(dead_code))]
    #[inline]
    pub fn size_index(&self) -> usize {
        self.size_index
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Returns the entry stored at `index`, if any.
    #[inline]
    pub fn slot(&self, index: usize) -> Option<&(K, P)> {
        match self.slots.get(index) {
            Some(Some(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Returns the entry stored at `index` with a mutable payload, if any.
    #[inline]
    pub fn slot_mut(&mut self, index: usize) -> Option<(&K, &mut P)> {
        match self.slots.get_mut(index) {
            Some(Some((key, payload))) => Some((&*key, payload)),
            _ => None,
        }
    }

    /// Empties every slot. The capacity is kept.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.items = 0;
    }

    /// Returns the size index the table must move to in order to hold
    /// `additional` more entries within the load factor, or `None` if no size
    /// of `sizes` is large enough.
    ///
    /// Returns the current size index when no resize is needed.
    pub fn grow_index(&self, sizes: &[usize], additional: usize) -> Option<usize> {
        debug_assert_eq!(sizes.get(self.size_index), Some(&self.capacity()));

        let needed = self.items.saturating_add(additional);
        (self.size_index..sizes.len()).find(|&index| !exceeds_load(needed, sizes[index]))
    }

    /// An iterator over the occupied slots in table order.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn iter(&self) -> RawIter<'_, K, P> {
        RawIter {
            inner: self.slots.iter(),
            items: self.items,
        }
    }

    /// An iterator with mutable payloads over the occupied slots in table order.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn iter_mut(&mut self) -> RawIterMut<'_, K, P> {
        RawIterMut {
            inner: self.slots.iter_mut(),
            items: self.items,
        }
    }
}

impl<K: KeyChars, P> RawTable<K, P> {
    /// Probes for `key` starting from its home slot at the current capacity.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn find<Q>(&self, key: &Q, mode: ProbeMode) -> Probe
    where
        Q: KeyChars + Equivalent<K> + ?Sized,
    {
        let start = hash_key(key, self.capacity());
        probe(&self.slots, start, |stored| key.equivalent(stored), mode)
    }

    /// Returns the entry for `key`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn get<Q>(&self, key: &Q) -> Option<&(K, P)>
    where
        Q: KeyChars + Equivalent<K> + ?Sized,
    {
        match self.find(key, ProbeMode::Lookup) {
            Probe::Found(index) => self.slot(index),
            _ => None,
        }
    }

    /// Returns the slot index and a mutable reference to the payload of `key`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<(usize, &mut P)>
    where
        Q: KeyChars + Equivalent<K> + ?Sized,
    {
        match self.find(key, ProbeMode::Lookup) {
            Probe::Found(index) => match &mut self.slots[index] {
                Some((_, payload)) => Some((index, payload)),
                None => None,
            },
            _ => None,
        }
    }

    /// Writes a new entry into the empty slot at `index`.
    ///
    /// The caller must have obtained `index` as [`Probe::Vacant`] from
    /// [`find`](RawTable::find) with this same key and no mutation in between.
    pub fn insert_at(&mut self, index: usize, key: K, payload: P) {
        debug_assert!(self.slots[index].is_none(), "insert into an occupied slot");
        self.slots[index] = Some((key, payload));
        self.items += 1;
    }

    /// Inserts `payload` under `key`, growing along `sizes` if the new entry
    /// puts the table above the load factor.
    ///
    /// Returns the previous payload if the key was present. If the key is new
    /// and the table cannot grow far enough, nothing is written and the key and
    /// payload are handed back.
    pub fn insert(&mut self, sizes: &[usize], key: K, payload: P) -> Result<Option<P>, (K, P)>
    where
        K: Equivalent<K>,
    {
        match self.find(&key, ProbeMode::Insert) {
            Probe::Found(index) => match &mut self.slots[index] {
                Some((_, old)) => Ok(Some(mem::replace(old, payload))),
                None => Err((key, payload)),
            },
            Probe::Vacant(index) => match self.grow_index(sizes, 1) {
                Some(target) => {
                    self.insert_at(index, key, payload);
                    self.resize(sizes, target);
                    Ok(None)
                }
                None => {
                    tracing::debug!(
                        capacity = self.capacity(),
                        items = self.items,
                        "no larger table size available"
                    );
                    Err((key, payload))
                }
            },
            Probe::NotFound | Probe::Full => Err((key, payload)),
        }
    }

    /// Moves the table to `sizes[size_index]` and reinserts every entry by
    /// probing from its home slot at the new capacity.
    ///
    /// Does nothing if the table already has that size index.
    pub fn resize(&mut self, sizes: &[usize], size_index: usize) {
        if size_index == self.size_index {
            return;
        }
        let capacity = sizes[size_index];
        debug_assert!(!exceeds_load(self.items, capacity));

        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        tracing::trace!(
            from = old.len(),
            to = capacity,
            items = self.items,
            "resizing table"
        );
        self.size_index = size_index;

        for (key, payload) in old.into_vec().into_iter().flatten() {
            let start = hash_key(&key, capacity);
            match probe(&self.slots, start, |_| false, ProbeMode::Insert) {
                Probe::Vacant(index) => self.slots[index] = Some((key, payload)),
                // The load factor keeps at least half of the slots empty.
                _ => unreachable!("no vacant slot while resizing"),
            }
        }
    }

    /// Removes the entry at `index` and re-homes the rest of its probe
    /// cluster so every remaining key is still reachable from its home slot.
    pub fn remove_at(&mut self, index: usize) -> Option<(K, P)> {
        let removed = self.slots.get_mut(index)?.take()?;
        self.items -= 1;

        let capacity = self.capacity();
        let mut gap = index;
        let mut next = next_index(index, capacity);
        let mut shifted = 0usize;
        loop {
            let home = match &self.slots[next] {
                Some((key, _)) => hash_key(key, capacity),
                None => break,
            };
            if !home_in_range(home, gap, next) {
                self.slots[gap] = self.slots[next].take();
                gap = next;
                shifted += 1;
            }
            next = next_index(next, capacity);
        }
        if shifted > 0 {
            tracing::trace!(index, shifted, "shifted probe cluster back");
        }
        Some(removed)
    }

    /// Removes `key` from the table, returning its entry.
    #[cfg_attr(not(feature = "raw"), allow(dead_code))]
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, P)>
    where
        Q: KeyChars + Equivalent<K> + ?Sized,
    {
        match self.find(key, ProbeMode::Lookup) {
            Probe::Found(index) => self.remove_at(index),
            _ => None,
        }
    }
}

impl<K: Debug, P: Debug> Debug for RawTable<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, P> IntoIterator for RawTable<K, P> {
    type Item = (K, P);
    type IntoIter = RawIntoIter<K, P>;

    #[cfg_attr(feature = "inline-more", inline)]
    fn into_iter(self) -> RawIntoIter<K, P> {
        RawIntoIter {
            inner: self.slots.into_vec().into_iter(),
            items: self.items,
        }
    }
}

/// Iterator over the occupied slots of a [`RawTable`].
pub struct RawIter<'a, K, P> {
    inner: core::slice::Iter<'a, Option<(K, P)>>,
    items: usize,
}

impl<K, P> Clone for RawIter<'_, K, P> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn clone(&self) -> Self {
        RawIter {
            inner: self.inner.clone(),
            items: self.items,
        }
    }
}

impl<'a, K, P> Iterator for RawIter<'a, K, P> {
    type Item = (&'a K, &'a P);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<(&'a K, &'a P)> {
        if self.items == 0 {
            return None;
        }
        let (key, payload) = self.inner.find_map(|slot| slot.as_ref())?;
        self.items -= 1;
        Some((key, payload))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<K, P> ExactSizeIterator for RawIter<'_, K, P> {}
impl<K, P> FusedIterator for RawIter<'_, K, P> {}

/// Iterator with mutable payloads over the occupied slots of a [`RawTable`].
pub struct RawIterMut<'a, K, P> {
    inner: core::slice::IterMut<'a, Option<(K, P)>>,
    items: usize,
}

impl<'a, K, P> Iterator for RawIterMut<'a, K, P> {
    type Item = (&'a K, &'a mut P);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<(&'a K, &'a mut P)> {
        if self.items == 0 {
            return None;
        }
        let (key, payload) = self.inner.find_map(|slot| slot.as_mut())?;
        self.items -= 1;
        Some((&*key, payload))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<K, P> ExactSizeIterator for RawIterMut<'_, K, P> {}
impl<K, P> FusedIterator for RawIterMut<'_, K, P> {}

/// Owning iterator over the entries of a [`RawTable`].
pub struct RawIntoIter<K, P> {
    inner: alloc::vec::IntoIter<Option<(K, P)>>,
    items: usize,
}

impl<K, P> Iterator for RawIntoIter<K, P> {
    type Item = (K, P);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<(K, P)> {
        if self.items == 0 {
            return None;
        }
        let entry = self.inner.find_map(|slot| slot)?;
        self.items -= 1;
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<K, P> ExactSizeIterator for RawIntoIter<K, P> {}
impl<K, P> FusedIterator for RawIntoIter<K, P> {}
