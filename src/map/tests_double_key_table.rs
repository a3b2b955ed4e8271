use super::{DoubleKeyTable, InsertError, SizesError, TableError, TableLevel, TABLE_SIZES};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

// At capacity 13 these three keys share home slot 11.
const HOME_11: [&str; 3] = ["k0", "k10", "k22"];

#[test]
fn test_new_is_empty() {
    let table: DoubleKeyTable<&str, &str, i32> = DoubleKeyTable::new();
    assert_eq!(table.len(), 0);
    assert!(table.is_empty());
    assert_eq!(table.capacity(), TABLE_SIZES[0]);
    assert_eq!(table.sizes(), TABLE_SIZES);
    assert_eq!(table.inner_sizes(), TABLE_SIZES);
    assert_eq!(table.keys().len(), 0);
    assert_eq!(table.values().len(), 0);
    assert_eq!(table.iter().next(), None);

    let table: DoubleKeyTable<&str, &str, i32> = DoubleKeyTable::default();
    assert!(table.is_empty());
}

#[test]
fn test_round_trip() {
    let mut table = DoubleKeyTable::new();
    table.set("Tim", "Jen", 1).unwrap();
    table.set("Amy", "Tim", 2).unwrap();
    table.set("May", "", 3).unwrap();
    table.set("", "Tim", 4).unwrap();

    assert_eq!(table.get("Tim", "Jen"), Ok(&1));
    assert_eq!(table.get("Amy", "Tim"), Ok(&2));
    assert_eq!(table.get("May", ""), Ok(&3));
    assert_eq!(table.get("", "Tim"), Ok(&4));
    assert_eq!(table.len(), 4);
}

#[test]
fn test_owned_keys_borrowed_lookups() {
    let mut table: DoubleKeyTable<String, String, i32> = DoubleKeyTable::new();
    table.set("Tim".to_string(), "Jen".to_string(), 1).unwrap();

    let k1 = String::from("Tim");
    assert_eq!(table.get("Tim", "Jen"), Ok(&1));
    assert_eq!(table.get(&k1, "Jen"), Ok(&1));
    assert!(table.contains(k1.as_str(), &"Jen".to_string()));
}

#[test]
fn test_overwrite() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    table.set("a", "y", 2).unwrap();
    assert_eq!(table.len(), 2);

    table.set("a", "x", 10).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("a", "x"), Ok(&10));
    assert_eq!(table.get("a", "y"), Ok(&2));
}

#[test]
fn test_get_mut() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    *table.get_mut("a", "x").unwrap() = 5;
    assert_eq!(table.get("a", "x"), Ok(&5));
    assert_eq!(
        table.get_mut("a", "y"),
        Err(TableError::KeyNotFound(TableLevel::Inner))
    );
    assert_eq!(
        table.get_mut("b", "x"),
        Err(TableError::KeyNotFound(TableLevel::Outer))
    );
}

#[test]
fn test_lookup_errors_name_the_level() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();

    assert_eq!(
        table.get("b", "x"),
        Err(TableError::KeyNotFound(TableLevel::Outer))
    );
    assert_eq!(
        table.get("a", "y"),
        Err(TableError::KeyNotFound(TableLevel::Inner))
    );
    assert!(!table.contains("b", "x"));
    assert!(!table.contains("a", "y"));
    assert!(table.contains_key1("a"));
    assert!(!table.contains_key1("b"));
}

#[test]
fn test_delete() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    table.set("a", "y", 2).unwrap();
    table.set("b", "x", 3).unwrap();

    assert_eq!(table.delete("a", "x"), Ok(1));
    assert_eq!(table.len(), 2);
    assert!(!table.contains("a", "x"));
    assert_eq!(table.get("a", "y"), Ok(&2));
    assert_eq!(table.get("b", "x"), Ok(&3));
}

#[test]
fn test_delete_missing_leaves_table_unchanged() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();

    assert_eq!(
        table.delete("a", "y"),
        Err(TableError::KeyNotFound(TableLevel::Inner))
    );
    assert_eq!(
        table.delete("b", "x"),
        Err(TableError::KeyNotFound(TableLevel::Outer))
    );
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("a", "x"), Ok(&1));
}

#[test]
fn test_outer_cleanup() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    table.set("a", "y", 2).unwrap();
    table.set("b", "x", 3).unwrap();

    table.delete("a", "x").unwrap();
    assert!(table.keys().any(|k| *k == "a"));

    table.delete("a", "y").unwrap();
    assert_eq!(table.keys().collect::<Vec<_>>(), [&"b"]);
    assert_eq!(
        table.keys_of("a").err(),
        Some(TableError::KeyNotFound(TableLevel::Outer))
    );

    // The first key comes back with a fresh inner table.
    table.set("a", "z", 4).unwrap();
    assert_eq!(table.inner_capacity("a"), Ok(TABLE_SIZES[0]));
    assert_eq!(table.keys_of("a").unwrap().collect::<Vec<_>>(), [&"z"]);
}

#[test]
fn test_outer_cleanup_keeps_cluster_reachable() {
    let mut table = DoubleKeyTable::with_sizes(&[13], TABLE_SIZES);
    for (value, k1) in HOME_11.into_iter().enumerate() {
        table.set(k1, "x", value).unwrap();
    }
    // "k22" wrapped around to slot 0.
    assert_eq!(table.keys().collect::<Vec<_>>(), [&"k22", &"k0", &"k10"]);

    table.delete("k0", "x").unwrap();

    assert_eq!(table.keys().collect::<Vec<_>>(), [&"k10", &"k22"]);
    assert_eq!(table.get("k10", "x"), Ok(&1));
    assert_eq!(table.get("k22", "x"), Ok(&2));
}

#[test]
fn test_inner_delete_keeps_cluster_reachable() {
    let mut table = DoubleKeyTable::with_sizes(TABLE_SIZES, &[13]);
    for (value, k2) in HOME_11.into_iter().enumerate() {
        table.set("a", k2, value).unwrap();
    }

    table.delete("a", "k0").unwrap();
    table.set("a", "k1", 7).unwrap();

    assert_eq!(table.get("a", "k10"), Ok(&1));
    assert_eq!(table.get("a", "k22"), Ok(&2));
    assert_eq!(table.get("a", "k1"), Ok(&7));
    assert_eq!(table.len(), 3);
}

#[test]
fn test_five_thirteen_resizes_both_levels() {
    let mut table = DoubleKeyTable::with_sizes(&[5, 13], &[5, 13]);
    let outer = ["Tim", "Amy", "May"];
    let inner = ["Jen", "Bob", "Ann"];

    for (i, k1) in outer.into_iter().enumerate() {
        for (j, k2) in inner.into_iter().enumerate() {
            table.set(k1, k2, i * 3 + j).unwrap();
        }
    }

    assert_eq!(table.len(), 9);
    assert_eq!(table.capacity(), 13);
    for (i, k1) in outer.into_iter().enumerate() {
        assert_eq!(table.inner_capacity(k1), Ok(13));
        for (j, k2) in inner.into_iter().enumerate() {
            assert_eq!(table.get(k1, k2), Ok(&(i * 3 + j)));
        }
    }
}

#[test]
fn test_resize_preserves_contents() {
    let mut table: DoubleKeyTable<String, String, usize> = DoubleKeyTable::new();
    for i in 0..600 {
        for j in 0..7 {
            table.set(i.to_string(), j.to_string(), i * 7 + j).unwrap();
        }
    }

    assert_eq!(table.len(), 4200);
    assert_eq!(table.capacity(), 1543);
    for i in 0..600 {
        assert_eq!(table.inner_capacity(&i.to_string()), Ok(29));
        for j in 0..7 {
            assert_eq!(table.get(&i.to_string(), &j.to_string()), Ok(&(i * 7 + j)));
        }
    }
}

#[test]
fn test_capacity_exhausted_inner() {
    let mut table = DoubleKeyTable::with_sizes(&[5], &[5]);
    table.set("a", "x", 1).unwrap();
    table.set("a", "y", 2).unwrap();

    let error = table.set("a", "z", 3).unwrap_err();
    assert_eq!(
        error,
        InsertError {
            error: TableError::CapacityExhausted(TableLevel::Inner),
            keys: ("a", "z"),
            value: 3,
        }
    );
    assert_eq!(table.len(), 2);
    assert!(!table.contains("a", "z"));
    assert_eq!(table.inner_capacity("a"), Ok(5));

    // Overwrites and other first keys are still fine.
    table.set("a", "x", 10).unwrap();
    table.set("b", "z", 3).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn test_capacity_exhausted_outer() {
    let mut table = DoubleKeyTable::with_sizes(&[5], TABLE_SIZES);
    table.set("a", "x", 1).unwrap();
    table.set("b", "x", 2).unwrap();

    let error = table.set("c", "x", 3).unwrap_err();
    assert_eq!(error.error, TableError::CapacityExhausted(TableLevel::Outer));
    assert_eq!(error.keys, ("c", "x"));
    assert_eq!(error.value, 3);

    assert_eq!(table.len(), 2);
    assert!(!table.contains_key1("c"));
    assert_eq!(table.keys().len(), 2);
    assert_eq!(table.capacity(), 5);

    // Known first keys can still take new second keys.
    table.set("a", "y", 4).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn test_growth_skips_undersized_steps() {
    let mut table = DoubleKeyTable::with_sizes(&[5, 6, 13], TABLE_SIZES);
    for k1 in ["a", "b", "c", "d"] {
        table.set(k1, "x", 0).unwrap();
    }
    // Three keys fit in 6 slots, four do not.
    assert_eq!(table.capacity(), 13);
}

#[test]
fn test_try_with_sizes_rejects_bad_sequences() {
    type Table = DoubleKeyTable<&'static str, &'static str, i32>;

    assert_eq!(
        Table::try_with_sizes(Vec::<usize>::new(), TABLE_SIZES).err(),
        Some(SizesError::Empty(TableLevel::Outer))
    );
    assert_eq!(
        Table::try_with_sizes(TABLE_SIZES, &[1, 5]).err(),
        Some(SizesError::TooSmall {
            level: TableLevel::Inner,
            size: 1
        })
    );
    assert_eq!(
        Table::try_with_sizes(&[5, 13, 13], TABLE_SIZES).err(),
        Some(SizesError::NotAscending {
            level: TableLevel::Outer,
            index: 2
        })
    );
    assert!(Table::try_with_sizes(&[2], &[2, 3]).is_ok());
}

#[test]
#[should_panic(expected = "invalid table sizes")]
fn test_with_sizes_panics_on_bad_sequence() {
    let _table: DoubleKeyTable<&str, &str, i32> = DoubleKeyTable::with_sizes(&[13, 5], TABLE_SIZES);
}

#[test]
fn test_smallest_sizes() {
    let mut table = DoubleKeyTable::with_sizes(&[2], &[2]);
    table.set("a", "x", 1).unwrap();
    assert_eq!(
        table.set("a", "y", 2).unwrap_err().error,
        TableError::CapacityExhausted(TableLevel::Inner)
    );
    assert_eq!(
        table.set("b", "x", 2).unwrap_err().error,
        TableError::CapacityExhausted(TableLevel::Outer)
    );
    assert_eq!(table.len(), 1);
}

#[test]
fn test_keys_and_values_of() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    table.set("a", "y", 2).unwrap();
    table.set("b", "z", 3).unwrap();

    let mut k2s: Vec<_> = table.keys_of("a").unwrap().copied().collect();
    k2s.sort_unstable();
    assert_eq!(k2s, ["x", "y"]);

    let mut values: Vec<_> = table.values_of("a").unwrap().copied().collect();
    values.sort_unstable();
    assert_eq!(values, [1, 2]);

    assert_eq!(table.values_of("b").unwrap().collect::<Vec<_>>(), [&3]);
    assert_eq!(
        table.values_of("c").err(),
        Some(TableError::KeyNotFound(TableLevel::Outer))
    );
}

#[test]
fn test_values_follow_table_order() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    table.set("a", "y", 2).unwrap();
    table.set("b", "z", 3).unwrap();

    let from_iter: Vec<&i32> = table.iter().map(|(_, _, v)| v).collect();
    assert_eq!(table.values().collect::<Vec<_>>(), from_iter);

    let per_key: Vec<&i32> = table
        .keys()
        .flat_map(|k1| table.values_of(k1).unwrap())
        .collect();
    assert_eq!(per_key, from_iter);
}

#[test]
fn test_enumeration_is_restartable() {
    let mut table = DoubleKeyTable::new();
    for k1 in ["a", "b", "c"] {
        table.set(k1, "x", 0).unwrap();
    }

    let keys = table.keys();
    let first: Vec<_> = keys.clone().collect();
    let second: Vec<_> = keys.clone().collect();
    assert_eq!(first, second);
    assert_eq!(keys.rev().collect::<Vec<_>>().len(), 3);
}

#[test]
fn test_iter_len_and_contents() {
    let mut table = DoubleKeyTable::new();
    let mut expected = Vec::new();
    for i in 0..10u32 {
        for j in 0..3u32 {
            table.set(i.to_string(), j.to_string(), i * 3 + j).unwrap();
            expected.push((i.to_string(), j.to_string(), i * 3 + j));
        }
    }

    let mut iter = table.iter();
    assert_eq!(iter.len(), 30);
    iter.next();
    assert_eq!(iter.len(), 29);

    let mut actual: Vec<_> = table
        .iter()
        .map(|(k1, k2, v)| (k1.clone(), k2.clone(), *v))
        .collect();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected);

    let mut by_ref = 0;
    for _ in &table {
        by_ref += 1;
    }
    assert_eq!(by_ref, 30);
}

#[test]
fn test_iter_mut() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    table.set("a", "y", 2).unwrap();
    table.set("b", "x", 3).unwrap();

    for (_, _, value) in &mut table {
        *value += 100;
    }
    assert_eq!(table.get("a", "x"), Ok(&101));
    assert_eq!(table.get("a", "y"), Ok(&102));
    assert_eq!(table.get("b", "x"), Ok(&103));
    assert_eq!(table.iter_mut().len(), 3);
}

#[test]
fn test_into_iter() {
    let mut table: DoubleKeyTable<String, String, i32> = DoubleKeyTable::new();
    for (k1, k2, v) in [("a", "x", 1), ("a", "y", 2), ("a", "z", 3), ("b", "x", 4)] {
        table.set(k1.to_string(), k2.to_string(), v).unwrap();
    }

    let iter = table.into_iter();
    assert_eq!(iter.len(), 4);
    let mut entries: Vec<(String, String, i32)> = iter.collect();
    entries.sort_unstable();
    assert_eq!(
        entries,
        [
            ("a".to_string(), "x".to_string(), 1),
            ("a".to_string(), "y".to_string(), 2),
            ("a".to_string(), "z".to_string(), 3),
            ("b".to_string(), "x".to_string(), 4),
        ]
    );
}

#[test]
fn test_clear() {
    let mut table = DoubleKeyTable::with_sizes(&[5, 13], TABLE_SIZES);
    for k1 in ["a", "b", "c"] {
        table.set(k1, "x", 0).unwrap();
    }
    table.clear();

    assert!(table.is_empty());
    assert_eq!(table.keys().len(), 0);
    assert!(!table.contains_key1("a"));
    assert_eq!(table.capacity(), 13);

    table.set("a", "x", 1).unwrap();
    assert_eq!(table.get("a", "x"), Ok(&1));
}

#[test]
fn test_index() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    assert_eq!(table[("a", "x")], 1);
}

#[test]
#[should_panic(expected = "key1 exists, but key2 not found")]
fn test_index_missing() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    let _value = table[("a", "y")];
}

#[test]
fn test_eq_ignores_layout() {
    let mut small = DoubleKeyTable::with_sizes(&[5, 13, 29], &[5, 13]);
    let mut large = DoubleKeyTable::with_sizes(&[97], &[29]);
    for (k1, k2, v) in [("a", "x", 1), ("b", "y", 2), ("c", "z", 3), ("a", "w", 4)] {
        small.set(k1, k2, v).unwrap();
        large.set(k1, k2, v).unwrap();
    }
    assert_eq!(small, large);

    large.set("a", "x", 5).unwrap();
    assert_ne!(small, large);

    let copy = small.clone();
    assert_eq!(copy, small);
    small.delete("a", "w").unwrap();
    assert_ne!(copy, small);
    assert_eq!(copy.len(), 4);
}

#[test]
fn test_debug() {
    let mut table = DoubleKeyTable::new();
    table.set("a", "x", 1).unwrap();
    assert_eq!(format!("{:?}", table), r#"{"a": {"x": 1}}"#);
}

#[test]
fn test_unicode_keys() {
    let mut table = DoubleKeyTable::new();
    table.set("é", "日本", 1).unwrap();
    table.set("e", "日本", 2).unwrap();
    table.set("é", "🦀", 3).unwrap();

    assert_eq!(table.get("é", "日本"), Ok(&1));
    assert_eq!(table.get("e", "日本"), Ok(&2));
    assert_eq!(table.get("é", "🦀"), Ok(&3));
    assert_eq!(table.len(), 3);
}

#[test]
fn test_char_slice_keys() {
    let mut table: DoubleKeyTable<Vec<char>, char, i32> = DoubleKeyTable::new();
    table.set("ab".chars().collect(), 'x', 1).unwrap();

    let key: Vec<char> = "ab".chars().collect();
    assert_eq!(table.get(key.as_slice(), &'x'), Ok(&1));
    assert!(!table.contains(key.as_slice(), &'y'));
}

#[test]
fn test_randomized_against_hashmap() {
    let mut rng = SmallRng::seed_from_u64(0x5eed_1234);
    let mut table: DoubleKeyTable<String, String, u32> = DoubleKeyTable::new();
    let mut model: HashMap<(String, String), u32> = HashMap::new();

    for _ in 0..20_000 {
        let k1 = format!("k{}", rng.gen_range(0..60));
        let k2 = format!("s{}", rng.gen_range(0..30));
        if rng.gen_range(0..3) < 2 {
            let value: u32 = rng.gen();
            table.set(k1.clone(), k2.clone(), value).unwrap();
            model.insert((k1, k2), value);
        } else {
            let expected = model.remove(&(k1.clone(), k2.clone()));
            assert_eq!(table.delete(&k1, &k2).ok(), expected);
        }
        assert_eq!(table.len(), model.len());
    }

    for ((k1, k2), value) in &model {
        assert_eq!(table.get(k1, k2), Ok(value));
    }

    let outer: HashSet<&String> = table.keys().collect();
    let expected_outer: HashSet<&String> = model.keys().map(|(k1, _)| k1).collect();
    assert_eq!(outer, expected_outer);

    let total: usize = table.keys().map(|k1| table.keys_of(k1).unwrap().len()).sum();
    assert_eq!(total, table.len());
    assert_eq!(table.values().len(), table.len());

    for k1 in table.keys() {
        let capacity = table.inner_capacity(k1).unwrap();
        let len = table.keys_of(k1).unwrap().len();
        assert!(TABLE_SIZES.contains(&capacity));
        assert!(len * 2 <= capacity);
    }
    assert!(table.keys().len() * 2 <= table.capacity());
}
