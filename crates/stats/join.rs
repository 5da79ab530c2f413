use crate::error::Result;
use dataset::Record;
use log::debug;
use std::collections::HashSet;

/// Identifiers of the matches played in `season`.
pub fn season_match_ids<'a, I>(matches: I, season: &str) -> Result<HashSet<String>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut ids = HashSet::new();
    for m in matches {
        if m.field("season")? == season {
            ids.insert(m.field("id")?.to_string());
        }
    }
    debug!("season {}: {} matches", season, ids.len());
    Ok(ids)
}

/// Deliveries whose match is in `ids`, in their original order.
pub fn deliveries_in<'a, I>(deliveries: I, ids: &HashSet<String>) -> Result<Vec<&'a Record>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut kept = Vec::new();
    for delivery in deliveries {
        if ids.contains(delivery.field("match_id")?) {
            kept.push(delivery);
        }
    }
    Ok(kept)
}

/// Deliveries bowled in `season`, joined through the match identifier.
pub fn season_deliveries<'a, M, D>(matches: M, deliveries: D, season: &str) -> Result<Vec<&'a Record>>
where
    M: IntoIterator<Item = &'a Record>,
    D: IntoIterator<Item = &'a Record>,
{
    let ids = season_match_ids(matches, season)?;
    deliveries_in(deliveries, &ids)
}
