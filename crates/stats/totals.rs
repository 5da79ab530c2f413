use crate::error::Result;
use dataset::Record;
use indexmap::IndexMap;
use std::hash::Hash;

/// Key -> running total, iterated in first-encounter order.
pub type Totals<K> = IndexMap<K, i64>;

/// Sum `value` per `key` over every record.
pub fn sum_by<'a, I, K, F, V>(records: I, key: F, value: V) -> Result<Totals<K>>
where
    I: IntoIterator<Item = &'a Record>,
    K: Hash + Eq,
    F: FnMut(&Record) -> Result<K>,
    V: FnMut(&Record) -> Result<i64>,
{
    sum_by_where(records, |_| Ok(true), key, value)
}

/// Sum `value` per `key` over the records `keep` accepts.
///
/// Keys and values are only extracted from kept records, so a field that is
/// malformed on a filtered out row does not fail the aggregation.
pub fn sum_by_where<'a, I, K, P, F, V>(
    records: I,
    mut keep: P,
    mut key: F,
    mut value: V,
) -> Result<Totals<K>>
where
    I: IntoIterator<Item = &'a Record>,
    K: Hash + Eq,
    P: FnMut(&Record) -> Result<bool>,
    F: FnMut(&Record) -> Result<K>,
    V: FnMut(&Record) -> Result<i64>,
{
    let mut totals = Totals::new();
    for record in records {
        if !keep(record)? {
            continue;
        }
        let k = key(record)?;
        let v = value(record)?;
        *totals.entry(k).or_insert(0) += v;
    }
    Ok(totals)
}

/// Reorder totals ascending by key.
pub fn sorted_by_key<K: Hash + Eq + Ord>(mut totals: Totals<K>) -> Totals<K> {
    totals.sort_keys();
    totals
}
