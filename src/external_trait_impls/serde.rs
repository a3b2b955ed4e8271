use crate::hash::KeyChars;
use crate::map::DoubleKeyTable;
use crate::raw::RawTable;
use ::serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use ::serde::ser::{Serialize, Serializer};
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

// Sequences claiming more entries than this are filled incrementally.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

impl<K, P> Serialize for RawTable<K, P>
where
    K: Serialize,
    P: Serialize,
{
    #[cfg_attr(feature = "inline-more", inline)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Serialized as a map from every first key to the map of its second keys
/// and values, both in table order.
impl<K1, K2, V> Serialize for DoubleKeyTable<K1, K2, V>
where
    K1: Serialize,
    K2: Serialize,
    V: Serialize,
{
    #[cfg_attr(feature = "inline-more", inline)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw_table().serialize(serializer)
    }
}

struct InnerEntries<K2, V>(Vec<(K2, V)>);

impl<'de, K2, V> Deserialize<'de> for InnerEntries<K2, V>
where
    K2: Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<K2, V> {
            marker: PhantomData<(K2, V)>,
        }

        impl<'de, K2, V> Visitor<'de> for EntriesVisitor<K2, V>
        where
            K2: Deserialize<'de>,
            V: Deserialize<'de>,
        {
            type Value = InnerEntries<K2, V>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of second keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let hint = map.size_hint().unwrap_or(0).min(MAX_PREALLOCATED_ENTRIES);
                let mut entries = Vec::with_capacity(hint);
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(InnerEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor {
            marker: PhantomData,
        })
    }
}

/// Rebuilt with the default size sequences by calling
/// [`set`](DoubleKeyTable::set) for every entry. A table too large for the
/// default sizes is reported as a custom error.
impl<'de, K1, K2, V> Deserialize<'de> for DoubleKeyTable<K1, K2, V>
where
    K1: Deserialize<'de> + KeyChars + Eq + Clone,
    K2: Deserialize<'de> + KeyChars + Eq,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor<K1, K2, V> {
            marker: PhantomData<DoubleKeyTable<K1, K2, V>>,
        }

        impl<'de, K1, K2, V> Visitor<'de> for TableVisitor<K1, K2, V>
        where
            K1: Deserialize<'de> + KeyChars + Eq + Clone,
            K2: Deserialize<'de> + KeyChars + Eq,
            V: Deserialize<'de>,
        {
            type Value = DoubleKeyTable<K1, K2, V>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of first keys to maps of second keys to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut table = DoubleKeyTable::new();
                while let Some((key1, entries)) = map.next_entry::<K1, InnerEntries<K2, V>>()? {
                    for (key2, value) in entries.0 {
                        table
                            .set(key1.clone(), key2, value)
                            .map_err(|error| <A::Error as de::Error>::custom(error.error))?;
                    }
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor {
            marker: PhantomData,
        })
    }
}
