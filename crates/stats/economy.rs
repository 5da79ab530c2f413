use crate::error::Result;
use dataset::Record;
use indexmap::IndexMap;
use log::debug;

pub const BALLS_PER_OVER: i64 = 6;

/// Bowlers with fewer legal deliveries than this get no economy rate.
pub const MIN_LEGAL_DELIVERIES: i64 = BALLS_PER_OVER;

/// Running counters for one bowler.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BowlerTally {
    /// Total runs minus byes and leg-byes.
    pub runs_conceded: i64,
    /// Deliveries that were neither a wide nor a no-ball.
    pub legal_deliveries: i64,
}

impl BowlerTally {
    pub fn add(&mut self, delivery: &Record) -> Result<()> {
        self.runs_conceded += delivery.int("total_runs")?
            - delivery.int("bye_runs")?
            - delivery.int("legbye_runs")?;
        if delivery.int("wide_runs")? == 0 && delivery.int("noball_runs")? == 0 {
            self.legal_deliveries += 1;
        }
        Ok(())
    }

    /// Runs per over, rounded to 2 decimals. `None` below one over.
    pub fn economy(&self) -> Option<f64> {
        if self.legal_deliveries < MIN_LEGAL_DELIVERIES {
            return None;
        }
        let overs = self.legal_deliveries as f64 / BALLS_PER_OVER as f64;
        Some(round_hundredths(self.runs_conceded as f64 / overs))
    }
}

/// Round to 2 decimals, half to even on the exact binary value of `rate`.
fn round_hundredths(rate: f64) -> f64 {
    format!("{:.2}", rate).parse().unwrap_or(rate)
}

/// Per bowler counters over `deliveries`, in first-encounter order.
pub fn bowler_tallies<'a, I>(deliveries: I) -> Result<IndexMap<String, BowlerTally>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut tallies: IndexMap<String, BowlerTally> = IndexMap::new();
    for delivery in deliveries {
        let bowler = delivery.field("bowler")?.to_string();
        tallies.entry(bowler).or_default().add(delivery)?;
    }
    Ok(tallies)
}

/// Economy rate of every bowler with at least one full over of legal deliveries.
pub fn economy_rates<'a, I>(deliveries: I) -> Result<IndexMap<String, f64>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let tallies = bowler_tallies(deliveries)?;
    let total = tallies.len();
    let rates: IndexMap<String, f64> = tallies
        .into_iter()
        .filter_map(|(bowler, tally)| tally.economy().map(|rate| (bowler, rate)))
        .collect();
    debug!(
        "economy: {} of {} bowlers below {} legal deliveries",
        total - rates.len(),
        total,
        MIN_LEGAL_DELIVERIES
    );
    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset::Dataset;

    const HEADER: &str = "match_id,bowler,total_runs,bye_runs,legbye_runs,wide_runs,noball_runs\n";

    fn deliveries(rows: &[&str]) -> Dataset {
        let content = format!("{}{}\n", HEADER, rows.join("\n"));
        Dataset::from_reader("deliveries", content.as_bytes()).unwrap()
    }

    #[test]
    fn test_one_over_twelve_runs() {
        let ds = deliveries(&[
            "1,X,2,0,0,0,0",
            "1,X,2,0,0,0,0",
            "1,X,2,0,0,0,0",
            "1,X,2,0,0,0,0",
            "1,X,2,0,0,0,0",
            "1,X,2,0,0,0,0",
            "1,Y,6,0,0,0,0",
            "1,Y,6,0,0,0,0",
            "1,Y,6,0,0,0,0",
            "1,Y,6,0,0,0,0",
            "1,Y,6,0,0,0,0",
        ]);
        let rates = economy_rates(&ds).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates["X"], 12.0);
        assert!(!rates.contains_key("Y"));
    }

    #[test]
    fn test_byes_and_extras() {
        // a wide and a no-ball are not legal; byes and leg-byes are not the bowler's runs
        let ds = deliveries(&[
            "1,Z,1,0,0,1,0",
            "1,Z,5,0,0,0,1",
            "1,Z,4,4,0,0,0",
            "1,Z,1,0,1,0,0",
            "1,Z,0,0,0,0,0",
            "1,Z,0,0,0,0,0",
            "1,Z,0,0,0,0,0",
            "1,Z,3,0,0,0,0",
        ]);
        let tallies = bowler_tallies(&ds).unwrap();
        assert_eq!(
            tallies["Z"],
            BowlerTally {
                runs_conceded: 9,
                legal_deliveries: 6
            }
        );
        assert_eq!(economy_rates(&ds).unwrap()["Z"], 9.0);
    }

    #[test]
    fn test_wides_do_not_complete_the_over() {
        let mut rows = vec!["1,W,0,0,0,0,0"; 5];
        rows.push("1,W,1,0,0,1,0");
        rows.push("1,W,1,0,0,1,0");
        let ds = deliveries(&rows);
        assert!(economy_rates(&ds).unwrap().is_empty());
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        // 10 runs off 7 legal balls = 8.571428...
        let mut rows = vec!["1,R,1,0,0,0,0"; 6];
        rows.push("1,R,4,0,0,0,0");
        let ds = deliveries(&rows);
        assert_eq!(economy_rates(&ds).unwrap()["R"], 8.57);
    }

    fn rate(runs_conceded: i64, legal_deliveries: i64) -> Option<f64> {
        BowlerTally {
            runs_conceded,
            legal_deliveries,
        }
        .economy()
    }

    #[test]
    fn test_economy_rounding() {
        // 81 / (80 / 6) lands just below 6.075 as a double
        assert_eq!(rate(81, 80), Some(6.07));
        assert_eq!(rate(7, 80), Some(0.53));
        assert_eq!(rate(147, 112), Some(7.87));
        assert_eq!(rate(247, 208), Some(7.13));
        // exact ties go to the even digit
        assert_eq!(rate(1, 48), Some(0.12));
        assert_eq!(rate(3, 48), Some(0.38));
        assert_eq!(rate(12, 6), Some(12.0));
        assert_eq!(rate(12, 5), None);
    }

    #[test]
    fn test_season_line_through_deliveries() {
        // 80 legal balls, 81 runs
        let mut rows = vec!["1,X,1,0,0,0,0"; 79];
        rows.push("1,X,2,0,0,0,0");
        let ds = deliveries(&rows);
        assert_eq!(economy_rates(&ds).unwrap()["X"], 6.07);
    }

    #[test]
    fn test_first_encounter_order() {
        let mut rows = vec!["1,B,1,0,0,0,0"; 6];
        rows.extend(vec!["1,A,0,0,0,0,0"; 6]);
        rows.push("1,B,0,0,0,0,0");
        let ds = deliveries(&rows);
        let rates = economy_rates(&ds).unwrap();
        assert_eq!(rates.keys().collect::<Vec<_>>(), ["B", "A"]);
    }
}
