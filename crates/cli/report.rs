use clap::Subcommand;
use config::Config;
use dataset::Dataset;
use indexmap::IndexMap;
use stats::{reports, CategorySeries};
use std::error::Error;
use std::fmt::Display;
use std::path::Path;
use ui::data::{Chart, Series};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Report {
    /// Total runs scored by each team
    TotalRuns,
    /// Highest run scorers of one team
    TopBatsmen {
        #[arg(long, help = "batting team, e.g. --team \"Mumbai Indians\"")]
        team: Option<String>,
        #[arg(long, help = "number of batsmen")]
        top: Option<usize>,
    },
    /// Umpires per country, home country excluded
    ForeignUmpires {
        #[arg(long = "home-country")]
        home_country: Option<String>,
    },
    /// Matches played per team per season (stacked)
    MatchesPlayed,
    /// Matches played per season
    MatchesPerSeason,
    /// Matches won per team per season (grouped)
    MatchesWon,
    /// Extra runs conceded per team in one season
    ExtraRuns {
        #[arg(long, help = "season, e.g. --season 2016")]
        season: Option<String>,
    },
    /// Most economical bowlers of one season
    Economy {
        #[arg(long, help = "season, e.g. --season 2015")]
        season: Option<String>,
        #[arg(long, help = "number of bowlers")]
        top: Option<usize>,
    },
}

impl Report {
    pub fn name(&self) -> &'static str {
        match self {
            Report::TotalRuns => "total-runs",
            Report::TopBatsmen { .. } => "top-batsmen",
            Report::ForeignUmpires { .. } => "foreign-umpires",
            Report::MatchesPlayed => "matches-played",
            Report::MatchesPerSeason => "matches-per-season",
            Report::MatchesWon => "matches-won",
            Report::ExtraRuns { .. } => "extra-runs",
            Report::Economy { .. } => "economy",
        }
    }
}

fn load(name: &str, path: &Path) -> Result<Dataset, Box<dyn Error>> {
    Ok(Dataset::open(name, path)?)
}

/// Read the datasets `report` needs and compute its chart.
pub fn build(report: &Report, conf: &Config) -> Result<Chart, Box<dyn Error>> {
    let defaults = &conf.reports;
    let chart = match report {
        Report::TotalRuns => {
            let deliveries = load("deliveries", &conf.deliveries_path())?;
            let totals = reports::total_runs_by_team(deliveries.records())?;
            totals_chart("Total Runs by Each Team", "Teams", "Total Runs", &totals)
        }
        Report::TopBatsmen { team, top } => {
            let team = team.as_deref().unwrap_or(defaults.top_batsmen_team.as_str());
            let top = top.unwrap_or(defaults.top);
            let deliveries = load("deliveries", &conf.deliveries_path())?;
            let best = reports::top_batsmen(deliveries.records(), team, top)?;
            totals_chart(
                &format!("Top {} Batsmen of {}", top, team),
                "Batsmen",
                "Total Runs",
                &best,
            )
        }
        Report::ForeignUmpires { home_country } => {
            let home = home_country
                .as_deref()
                .unwrap_or(defaults.home_country.as_str());
            let umpires = load("umpires", &conf.umpires_path())?;
            let counts = reports::umpires_by_country(umpires.records(), home)?;
            totals_chart(
                &format!("Umpires by Country (excluding {})", home),
                "Country",
                "Umpire Count",
                &counts,
            )
        }
        Report::MatchesPlayed => {
            let matches = load("matches", &conf.matches_path())?;
            let played = reports::matches_played(matches.records())?;
            let (categories, series) = series_data(played);
            Chart::stacked(
                "Number of Games Played per Team per Year",
                "Year",
                "Games Played (Per Team)",
                categories,
                series,
            )
            // every match is counted once for each side
            .with_annotation(2, "matches")
        }
        Report::MatchesPerSeason => {
            let matches = load("matches", &conf.matches_path())?;
            let counts = reports::matches_per_season(matches.records())?;
            totals_chart(
                "Total Matches Played Over The Years",
                "Years",
                "Match Count",
                &counts,
            )
        }
        Report::MatchesWon => {
            let matches = load("matches", &conf.matches_path())?;
            let won = reports::matches_won(matches.records())?;
            let (categories, series) = series_data(won);
            Chart::grouped(
                "Number of Matches Won per Team per Year",
                "Year",
                "Matches Won",
                categories,
                series,
            )
        }
        Report::ExtraRuns { season } => {
            let season = season
                .as_deref()
                .unwrap_or(defaults.extra_runs_season.as_str());
            let matches = load("matches", &conf.matches_path())?;
            let deliveries = load("deliveries", &conf.deliveries_path())?;
            let extras =
                reports::extra_runs_by_team(matches.records(), deliveries.records(), season)?;
            totals_chart(
                &format!("Extra Runs Conceded Per Team In {}", season),
                "Teams",
                "Extra Runs Conceded",
                &extras,
            )
        }
        Report::Economy { season, top } => {
            let season = season
                .as_deref()
                .unwrap_or(defaults.economy_season.as_str());
            let top = top.unwrap_or(defaults.top);
            let matches = load("matches", &conf.matches_path())?;
            let deliveries = load("deliveries", &conf.deliveries_path())?;
            let rates =
                reports::economical_bowlers(matches.records(), deliveries.records(), season, top)?;
            Chart::bars(
                &format!("Top {} Economical Bowlers In {}", top, season),
                "Bowlers",
                "Economy Rate",
                rates.into_iter(),
            )
            .with_precision(2)
        }
    };
    Ok(chart)
}

fn totals_chart<K: Display>(
    title: &str,
    x_label: &str,
    y_label: &str,
    totals: &IndexMap<K, i64>,
) -> Chart {
    Chart::bars(
        title,
        x_label,
        y_label,
        totals.iter().map(|(k, v)| (k.to_string(), *v as f64)),
    )
}

fn series_data(cs: CategorySeries) -> (Vec<String>, Vec<Series>) {
    let series = cs
        .series
        .into_iter()
        .map(|(team, values)| Series::new(team, values.into_iter().map(f64::from).collect()))
        .collect();
    (cs.categories, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use ui::data::ChartKind;

    const MATCHES: &str = "id,season,team1,team2,winner
1,2016,Gujarat Lions,Rising Pune Supergiants,Gujarat Lions
2,2015,Mumbai Indians,Gujarat Lions,Mumbai Indians
3,2016,Mumbai Indians,Rising Pune Supergiants,
";

    const DELIVERIES: &str = "match_id,batting_team,bowling_team,batsman,bowler,wide_runs,bye_runs,legbye_runs,noball_runs,batsman_runs,extra_runs,total_runs
1,Rising Pune Supergiants,Gujarat Lions,AM Rahane,DS Kulkarni,0,0,0,0,4,0,4
1,Rising Pune Supergiants,Gujarat Lions,AM Rahane,DS Kulkarni,1,0,0,0,0,1,1
2,Mumbai Indians,Gujarat Lions,RG Sharma,DS Kulkarni,0,0,0,0,6,0,6
";

    const UMPIRES: &str = "umpire,Country
HDPK Dharmasena,Sri Lanka
S Ravi,India
";

    fn data_dir() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("matches.csv"), MATCHES).unwrap();
        fs::write(dir.path().join("deliveries.csv"), DELIVERIES).unwrap();
        fs::write(dir.path().join("umpires.csv"), UMPIRES).unwrap();
        let conf = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        (dir, conf)
    }

    fn bars(chart: &Chart) -> Vec<(String, f64)> {
        match &chart.kind {
            ChartKind::Bars { bars } => bars.iter().map(|b| (b.label.clone(), b.value)).collect(),
            other => panic!("expected bars, got {:?}", other),
        }
    }

    #[test]
    fn test_total_runs() {
        let (_dir, conf) = data_dir();
        let chart = build(&Report::TotalRuns, &conf).unwrap();
        assert_eq!(
            bars(&chart),
            [
                ("Rising Pune Supergiant".to_string(), 5.0),
                ("Mumbai Indians".to_string(), 6.0)
            ]
        );
        assert_eq!(chart.precision, 0);
    }

    #[test]
    fn test_defaults_come_from_config() {
        let (_dir, mut conf) = data_dir();
        conf.reports.extra_runs_season = "2015".to_string();
        let chart = build(&Report::ExtraRuns { season: None }, &conf).unwrap();
        assert_eq!(chart.title, "Extra Runs Conceded Per Team In 2015");
        assert_eq!(bars(&chart), [("Gujarat Lions".to_string(), 0.0)]);

        let chart = build(
            &Report::ExtraRuns {
                season: Some("2016".to_string()),
            },
            &conf,
        )
        .unwrap();
        assert_eq!(bars(&chart), [("Gujarat Lions".to_string(), 1.0)]);
    }

    #[test]
    fn test_foreign_umpires() {
        let (_dir, conf) = data_dir();
        let chart = build(&Report::ForeignUmpires { home_country: None }, &conf).unwrap();
        assert_eq!(bars(&chart), [("Sri Lanka".to_string(), 1.0)]);
    }

    #[test]
    fn test_matches_played_is_stacked_and_halved() {
        let (_dir, conf) = data_dir();
        let chart = build(&Report::MatchesPlayed, &conf).unwrap();
        match chart.kind {
            ChartKind::Stacked {
                categories,
                series,
                annotation,
            } => {
                assert_eq!(categories, ["2015", "2016"]);
                assert_eq!(series[0].name, "Gujarat Lions");
                assert_eq!(series[0].values, [1.0, 1.0]);
                assert_eq!(annotation.unwrap().divisor, 2);
            }
            other => panic!("expected stacked, got {:?}", other),
        }
    }

    #[test]
    fn test_matches_won_is_grouped() {
        let (_dir, conf) = data_dir();
        let chart = build(&Report::MatchesWon, &conf).unwrap();
        match chart.kind {
            ChartKind::Grouped { series, .. } => {
                let total: f64 = series.iter().flat_map(|s| s.values.iter()).sum();
                assert_eq!(total, 2.0);
            }
            other => panic!("expected grouped, got {:?}", other),
        }
    }

    #[test]
    fn test_economy_precision() {
        let (_dir, conf) = data_dir();
        let chart = build(
            &Report::Economy {
                season: Some("2016".to_string()),
                top: None,
            },
            &conf,
        )
        .unwrap();
        assert_eq!(chart.precision, 2);
        // a single legal ball is not enough for a rate
        assert!(chart.is_empty());
    }

    #[test]
    fn test_missing_dataset_fails() {
        let (dir, conf) = data_dir();
        fs::remove_file(dir.path().join("umpires.csv")).unwrap();
        assert!(build(&Report::ForeignUmpires { home_country: None }, &conf).is_err());
    }

    #[test]
    fn test_matches_per_season_keys() {
        let (_dir, conf) = data_dir();
        let chart = build(&Report::MatchesPerSeason, &conf).unwrap();
        assert_eq!(
            bars(&chart),
            [("2015".to_string(), 1.0), ("2016".to_string(), 2.0)]
        );
    }
}
