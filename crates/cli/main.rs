mod output;
mod report;

use output::{get_output, OutputType};
use report::Report;

use clap::builder::PossibleValuesParser;
use clap::Parser;
use env_logger::Env;
use std::error::Error;
use std::process;

use log::{debug, error, info};

/// Cricket match statistics drawn as bar charts
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(
        short = 'F',
        long = "format",
        value_parser = PossibleValuesParser::new(["chart", "polar", "csv", "json"]),
        default_value = "chart",
        help = "output format"
    )]
    format: String,

    #[arg(
        long = "output",
        help = "file written by csv and json formats, e.g. --output extras.csv"
    )]
    output: Option<String>,

    #[arg(
        long = "config",
        default_value = ".ipl-stat.yml",
        help = "config file, defaults are used when it does not exist"
    )]
    config: String,

    #[command(subcommand)]
    report: Report,
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let conf = config::Config::new(&args.config)?;
    debug!("config: {:?}", conf);

    let chart = report::build(&args.report, &conf)?;
    info!("report {} computed: {}", args.report.name(), chart.title);

    let out_type = OutputType::from_str(args.format.as_str()).ok_or("unknown output format")?;
    get_output(out_type, chart, args.output)?.output()
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        error!("{}", e);
        process::exit(1);
    }
}
