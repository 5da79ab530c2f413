use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub datasets: Datasets,
    pub reports: Reports,
}

/// csv file names, relative to `data_dir`
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Datasets {
    pub matches: String,
    pub deliveries: String,
    pub umpires: String,
}

/// Report parameters used when the command line does not set them.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Reports {
    pub top_batsmen_team: String,
    pub home_country: String,
    pub extra_runs_season: String,
    pub economy_season: String,
    pub top: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("required_data"),
            datasets: Datasets::default(),
            reports: Reports::default(),
        }
    }
}

impl Default for Datasets {
    fn default() -> Self {
        Datasets {
            matches: "matches.csv".to_string(),
            deliveries: "deliveries.csv".to_string(),
            umpires: "umpires.csv".to_string(),
        }
    }
}

impl Default for Reports {
    fn default() -> Self {
        Reports {
            top_batsmen_team: "Royal Challengers Bangalore".to_string(),
            home_country: "India".to_string(),
            extra_runs_season: "2016".to_string(),
            economy_season: "2015".to_string(),
            top: 10,
        }
    }
}

impl Config {
    /// Load `filename`, or the defaults when it does not exist.
    pub fn new<P: AsRef<Path>>(filename: P) -> Result<Config, Box<dyn Error>> {
        let path = filename.as_ref();
        if !path.exists() {
            info!("config {:?} not found, using defaults", path);
            return Ok(Config::default());
        }
        let reader = File::open(path)?;
        let config: Config = serde_yaml::from_reader(reader)?;
        info!("config loaded: {:?}", path);
        Ok(config)
    }

    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join(&self.datasets.matches)
    }

    pub fn deliveries_path(&self) -> PathBuf {
        self.data_dir.join(&self.datasets.deliveries)
    }

    pub fn umpires_path(&self) -> PathBuf {
        self.data_dir.join(&self.datasets.umpires)
    }
}
