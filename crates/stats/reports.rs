//! One function per report. Each takes whole datasets and returns the mapping
//! the report charts.

use crate::economy::economy_rates;
use crate::error::Result;
use crate::join::season_deliveries;
use crate::normalize::normalize_team;
use crate::rank::{top_n, Direction};
use crate::series::{self, CategorySeries};
use crate::totals::{sorted_by_key, sum_by, sum_by_where, Totals};
use dataset::Record;
use indexmap::IndexMap;

/// Total runs scored by each batting team.
pub fn total_runs_by_team(deliveries: &[Record]) -> Result<Totals<String>> {
    sum_by(
        deliveries,
        |d| Ok(normalize_team(d.field("batting_team")?).to_string()),
        |d| Ok(d.int("total_runs")?),
    )
}

/// Highest scoring batsmen of `team`, best first.
///
/// `batsman_runs` is parsed on every delivery, not only on `team`'s.
pub fn top_batsmen(deliveries: &[Record], team: &str, n: usize) -> Result<Totals<String>> {
    let mut runs = Totals::new();
    for d in deliveries {
        let scored = d.int("batsman_runs")?;
        if d.field("batting_team")? == team {
            *runs.entry(d.field("batsman")?.to_string()).or_insert(0) += scored;
        }
    }
    Ok(top_n(&runs, n, Direction::Descending))
}

/// Number of umpires per country, `home` excluded.
pub fn umpires_by_country(umpires: &[Record], home: &str) -> Result<Totals<String>> {
    sum_by_where(
        umpires,
        |u| Ok(u.field("Country")? != home),
        |u| Ok(u.field("Country")?.to_string()),
        |_| Ok(1),
    )
}

/// Matches played per team per season.
pub fn matches_played(matches: &[Record]) -> Result<CategorySeries> {
    series::participation(matches)
}

/// Matches played per season, oldest first.
pub fn matches_per_season(matches: &[Record]) -> Result<Totals<i64>> {
    let counts = sum_by(matches, |m| Ok(m.int("season")?), |_| Ok(1))?;
    Ok(sorted_by_key(counts))
}

/// Matches won per team per season.
pub fn matches_won(matches: &[Record]) -> Result<CategorySeries> {
    series::wins(matches)
}

/// Extra runs conceded by each bowling team in `season`.
pub fn extra_runs_by_team(
    matches: &[Record],
    deliveries: &[Record],
    season: &str,
) -> Result<Totals<String>> {
    let in_season = season_deliveries(matches, deliveries, season)?;
    sum_by(
        in_season,
        |d| Ok(d.field("bowling_team")?.to_string()),
        |d| Ok(d.int("extra_runs")?),
    )
}

/// Most economical bowlers of `season`, lowest rate first.
pub fn economical_bowlers(
    matches: &[Record],
    deliveries: &[Record],
    season: &str,
    n: usize,
) -> Result<IndexMap<String, f64>> {
    let in_season = season_deliveries(matches, deliveries, season)?;
    let rates = economy_rates(in_season)?;
    Ok(top_n(&rates, n, Direction::Ascending))
}
