use indexmap::IndexMap;
use std::cmp::Ordering;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first, e.g. most economical bowlers.
    Ascending,
    /// Largest first, e.g. highest run scorers.
    Descending,
}

/// The `n` extremal entries of `map`, in rank order.
///
/// The sort is stable in both directions: equal values keep their insertion
/// order.
pub fn top_n<K, V>(map: &IndexMap<K, V>, n: usize, direction: Direction) -> IndexMap<K, V>
where
    K: Hash + Eq + Clone,
    V: PartialOrd + Copy,
{
    let mut entries: Vec<(&K, &V)> = map.iter().collect();
    entries.sort_by(|a, b| {
        let ord = a.1.partial_cmp(b.1).unwrap_or(Ordering::Equal);
        match direction {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    });
    entries
        .into_iter()
        .take(n)
        .map(|(k, v)| (k.clone(), *v))
        .collect()
}
