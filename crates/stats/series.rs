use crate::error::Result;
use dataset::Record;
use indexmap::IndexMap;
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Per-team counts aligned to a shared, sorted season axis.
///
/// Every vector in `series` has `categories.len()` slots and slot `i` always
/// refers to `categories[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySeries {
    pub categories: Vec<String>,
    pub series: IndexMap<String, Vec<u32>>,
}

impl CategorySeries {
    /// Season axis plus an all-zero series for every team that appears as
    /// `team1` or `team2`, in first-encounter order.
    pub fn seeded(matches: &[Record]) -> Result<CategorySeries> {
        let categories = season_axis(matches)?;
        let mut series: IndexMap<String, Vec<u32>> = IndexMap::new();
        for m in matches {
            for team in [m.field("team1")?, m.field("team2")?] {
                if !series.contains_key(team) {
                    series.insert(team.to_string(), vec![0; categories.len()]);
                }
            }
        }
        debug!(
            "series seeded: {} seasons, {} teams",
            categories.len(),
            series.len()
        );
        Ok(CategorySeries { categories, series })
    }

    /// Sum over all teams for each category.
    pub fn category_totals(&self) -> Vec<u32> {
        let mut totals = vec![0; self.categories.len()];
        for values in self.series.values() {
            for (total, v) in totals.iter_mut().zip(values) {
                *total += v;
            }
        }
        totals
    }
}

/// Distinct seasons, sorted.
pub fn season_axis(matches: &[Record]) -> Result<Vec<String>> {
    let mut seasons = BTreeSet::new();
    for m in matches {
        seasons.insert(m.field("season")?);
    }
    Ok(seasons.into_iter().map(String::from).collect())
}

fn slot_index(categories: &[String]) -> HashMap<&str, usize> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect()
}

/// Matches played per team per season. Each match counts once for both teams.
pub fn participation(matches: &[Record]) -> Result<CategorySeries> {
    let mut cs = CategorySeries::seeded(matches)?;
    let index = slot_index(&cs.categories);
    for m in matches {
        let Some(&i) = index.get(m.field("season")?) else {
            continue;
        };
        for team in [m.field("team1")?, m.field("team2")?] {
            if let Some(values) = cs.series.get_mut(team) {
                values[i] += 1;
            }
        }
    }
    Ok(cs)
}

/// Matches won per team per season.
///
/// A match without a winner, or won by a team that never played as team1 or
/// team2, is skipped.
pub fn wins(matches: &[Record]) -> Result<CategorySeries> {
    let mut cs = CategorySeries::seeded(matches)?;
    let index = slot_index(&cs.categories);
    let mut skipped = 0;
    for m in matches {
        let Some(&i) = index.get(m.field("season")?) else {
            continue;
        };
        match cs.series.get_mut(m.field("winner")?) {
            Some(values) => values[i] += 1,
            None => skipped += 1,
        }
    }
    debug!("wins: {} matches without a known winner", skipped);
    Ok(cs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::Dataset;

    fn matches(content: &str) -> Dataset {
        Dataset::from_reader("matches", content.as_bytes()).unwrap()
    }

    const SMALL: &str = "id,season,team1,team2,winner
1,2016,A,B,A
2,2015,A,C,C
3,2016,A,B,B
";

    const LEAGUE: &str = "id,season,team1,team2,winner
1,2008,Kolkata Knight Riders,Royal Challengers Bangalore,Kolkata Knight Riders
2,2008,Chennai Super Kings,Kings XI Punjab,Chennai Super Kings
3,2009,Chennai Super Kings,Kolkata Knight Riders,
4,2017,Gujarat Lions,Kolkata Knight Riders,Kolkata Knight Riders
5,2017,Royal Challengers Bangalore,Gujarat Lions,Royal Challengers Bangalore
6,2009,Kings XI Punjab,Royal Challengers Bangalore,Kings XI Punjab
7,2017,Chennai Super Kings,Kings XI Punjab,Kings XI Punjab
";

    #[test]
    fn test_axis_is_sorted_and_distinct() {
        let ds = matches(SMALL);
        assert_eq!(season_axis(ds.records()).unwrap(), ["2015", "2016"]);
    }

    #[test]
    fn test_participation_small() {
        let ds = matches(SMALL);
        let cs = participation(ds.records()).unwrap();
        assert_eq!(cs.categories, ["2015", "2016"]);
        assert_eq!(cs.series["A"], [1, 2]);
        assert_eq!(cs.series["B"], [0, 2]);
        assert_eq!(cs.series["C"], [1, 0]);
        assert_eq!(cs.series.keys().collect::<Vec<_>>(), ["A", "B", "C"]);
    }

    #[test]
    fn test_late_team_has_leading_zeros() {
        let ds = matches(LEAGUE);
        let cs = participation(ds.records()).unwrap();
        assert_eq!(cs.categories, ["2008", "2009", "2017"]);
        assert_eq!(cs.series["Gujarat Lions"], [0, 0, 2]);
    }

    #[test]
    fn test_participation_totals_are_even() {
        let ds = matches(LEAGUE);
        let cs = participation(ds.records()).unwrap();
        for values in cs.series.values() {
            assert_eq!(values.len(), cs.categories.len());
        }
        let totals = cs.category_totals();
        assert_eq!(totals, [4, 4, 6]);
        assert!(totals.iter().all(|t| t % 2 == 0));
    }

    #[test]
    fn test_wins_skip_no_result() {
        let ds = matches(LEAGUE);
        let cs = wins(ds.records()).unwrap();
        assert_eq!(cs.series["Kolkata Knight Riders"], [1, 0, 1]);
        assert_eq!(cs.series["Chennai Super Kings"], [1, 0, 0]);
        assert_eq!(cs.series["Gujarat Lions"], [0, 0, 0]);
        // 2009 has one abandoned match out of two
        assert_eq!(cs.category_totals(), [2, 1, 3]);
    }

    #[test]
    fn test_wins_bounded_by_matches_per_season() {
        let ds = matches(LEAGUE);
        let cs = wins(ds.records()).unwrap();
        let played = crate::reports::matches_per_season(ds.records()).unwrap();
        let totals = cs.category_totals();
        assert_eq!(totals.len(), played.len());
        for (season, won) in cs.categories.iter().zip(totals) {
            let count = played[&season.parse::<i64>().unwrap()];
            assert!(i64::from(won) <= count, "{}: {} wins in {} matches", season, won, count);
        }
        assert_eq!(played.values().copied().collect::<Vec<_>>(), [2, 2, 3]);
    }

    #[test]
    fn test_wins_ignore_unknown_winner() {
        let ds = matches("id,season,team1,team2,winner\n1,2010,A,B,Z\n");
        let cs = wins(ds.records()).unwrap();
        assert!(!cs.series.contains_key("Z"));
        assert_eq!(cs.category_totals(), [0]);
    }

    #[test]
    fn test_no_matches() {
        let ds = matches("id,season,team1,team2,winner\n");
        let cs = participation(ds.records()).unwrap();
        assert!(cs.categories.is_empty());
        assert!(cs.series.is_empty());
    }
}
