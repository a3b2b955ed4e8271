/// Whether a probe is looking for an insertion point or only for a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProbeMode {
    Lookup,
    Insert,
}

/// Outcome of a linear probe.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Probe {
    /// The slot at this index holds the key.
    Found(usize),
    /// The key is absent and may be written at this index (insert mode only).
    Vacant(usize),
    /// The key is absent (lookup mode only).
    NotFound,
    /// Every slot was visited without a match or an empty slot (insert mode only).
    Full,
}

/// Scans `slots` linearly from `start`, wrapping at the end, until `eq`
/// accepts a key or an empty slot is reached.
///
/// A lookup that wraps around a table with no empty slot and no match reports
/// [`Probe::NotFound`]; the same scan in insert mode reports [`Probe::Full`].
#[cfg_attr(feature = "inline-more", inline)]
pub fn probe<K, P, F>(slots: &[Option<(K, P)>], start: usize, mut eq: F, mode: ProbeMode) -> Probe
where
    F: FnMut(&K) -> bool,
{
    let capacity = slots.len();
    if capacity == 0 {
        return match mode {
            ProbeMode::Lookup => Probe::NotFound,
            ProbeMode::Insert => Probe::Full,
        };
    }
    debug_assert!(start < capacity);

    let mut index = start;
    loop {
        match &slots[index] {
            None => {
                return match mode {
                    ProbeMode::Lookup => Probe::NotFound,
                    ProbeMode::Insert => Probe::Vacant(index),
                }
            }
            Some((key, _)) if eq(key) => return Probe::Found(index),
            Some(_) => {}
        }

        index = next_index(index, capacity);
        if index == start {
            return match mode {
                ProbeMode::Lookup => Probe::NotFound,
                ProbeMode::Insert => Probe::Full,
            };
        }
    }
}

#[inline]
pub fn next_index(index: usize, capacity: usize) -> usize {
    if index + 1 == capacity {
        0
    } else {
        index + 1
    }
}

/// Returns `true` if `home` lies in the cyclic half-open range `(gap, index]`.
///
/// An entry stored at `index` whose home slot is in that range may not move
/// back to `gap`: it would then sit before its own home slot.
#[inline]
pub fn home_in_range(home: usize, gap: usize, index: usize) -> bool {
    if gap <= index {
        gap < home && home <= index
    } else {
        gap < home || home <= index
    }
}
