use log::info;
use polars::prelude::*;
use std::error::Error;
use ui::data::{Chart, ChartKind, Series as ChartSeries};

pub enum OutputType {
    Chart,
    Polar,
    Csv,
    Json,
}

impl OutputType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "chart" => Some(OutputType::Chart),
            "polar" => Some(OutputType::Polar),
            "csv" => Some(OutputType::Csv),
            "json" => Some(OutputType::Json),
            _ => None,
        }
    }
}

pub trait Output {
    fn output(&self) -> Result<(), Box<dyn Error>>;
}

struct ChartOutput {
    chart: Chart,
}

impl Output for ChartOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        ui::tui::run(self.chart.clone())
    }
}

struct PolarOutput {
    df: DataFrame,
}

impl Output for PolarOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        println!("{}", self.df);
        Ok(())
    }
}

struct CsvOutput {
    filename: String,
    df: DataFrame,
}

impl Output for CsvOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        let mut file = std::fs::File::create(&self.filename)?;
        let mut m_df = self.df.clone();
        CsvWriter::new(&mut file).finish(&mut m_df)?;
        info!("CSV file written successfully: {:?}", self.filename);
        Ok(())
    }
}

struct JsonOutput {
    filename: String,
    chart: Chart,
}

impl Output for JsonOutput {
    fn output(&self) -> Result<(), Box<dyn Error>> {
        std::fs::write(&self.filename, self.chart.to_json()?)?;
        info!("JSON file written successfully: {:?}", self.filename);
        Ok(())
    }
}

pub fn get_output(
    output_type: OutputType,
    chart: Chart,
    filename: Option<String>,
) -> Result<Box<dyn Output>, Box<dyn Error>> {
    let output: Box<dyn Output> = match output_type {
        OutputType::Chart => Box::new(ChartOutput { chart }),
        OutputType::Polar => Box::new(PolarOutput {
            df: chart_to_df(&chart)?,
        }),
        OutputType::Csv => Box::new(CsvOutput {
            filename: filename.unwrap_or("report.csv".to_string()),
            df: chart_to_df(&chart)?,
        }),
        OutputType::Json => Box::new(JsonOutput {
            filename: filename.unwrap_or("report.json".to_string()),
            chart,
        }),
    };
    Ok(output)
}

/// One row per bar label or category; stacked and grouped charts get one
/// column per series.
pub fn chart_to_df(chart: &Chart) -> PolarsResult<DataFrame> {
    match &chart.kind {
        ChartKind::Bars { bars } => {
            let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
            let values: Vec<f64> = bars.iter().map(|b| b.value).collect();
            DataFrame::new(vec![
                Series::new(chart.x_label.as_str(), labels),
                value_column(chart, &chart.y_label, values),
            ])
        }
        ChartKind::Stacked {
            categories, series, ..
        }
        | ChartKind::Grouped { categories, series } => {
            let mut columns = vec![Series::new(chart.x_label.as_str(), categories.clone())];
            columns.extend(
                series
                    .iter()
                    .map(|s: &ChartSeries| value_column(chart, &s.name, s.values.clone())),
            );
            DataFrame::new(columns)
        }
    }
}

fn value_column(chart: &Chart, name: &str, values: Vec<f64>) -> Series {
    if chart.precision == 0 {
        let counts: Vec<i64> = values.into_iter().map(|v| v.round() as i64).collect();
        Series::new(name, counts)
    } else {
        Series::new(name, values)
    }
}
