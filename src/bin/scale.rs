use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fabric_tell::cli::{echo_args, echo_args_to, init_tracing};
use fabric_tell::scale::{ExternalSearch, ScaleOpts, ScaleRow, scale};
use serde::Serialize;

#[derive(Debug, Parser, Serialize)]
#[command(
    name = "scale",
    about = "Find the largest HyperX network per router radix using an external search tool"
)]
struct Args {
    /// HyperX search executable
    hyperxsearch: PathBuf,

    /// Minimum radix to search
    minradix: u64,

    /// Maximum radix to search
    maxradix: u64,

    /// Maximum number of dimensions
    maxdimensions: u64,

    /// Minimum bisection bandwidth
    minbandwidth: f64,

    /// Number of cores to use (defaults to all available)
    #[arg(short, long)]
    cores: Option<usize>,

    /// Minimum concentration forwarded to the search tool
    #[arg(long = "minconcentration")]
    min_concentration: Option<u64>,

    /// Maximum concentration forwarded to the search tool
    #[arg(long = "maxconcentration")]
    max_concentration: Option<u64>,

    /// Print results as JSON instead of CSV
    #[arg(long)]
    json: bool,

    /// Turn on verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> fabric_tell::Result<Vec<ScaleRow>> {
    let search = ExternalSearch {
        exe: args.hyperxsearch.clone(),
        min_bandwidth: args.minbandwidth,
        max_dimensions: args.maxdimensions,
        min_concentration: args.min_concentration,
        max_concentration: args.max_concentration,
    };
    let opts = ScaleOpts {
        min_radix: args.minradix,
        max_radix: args.maxradix,
        max_dimensions: args.maxdimensions,
        cores: args.cores.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        }),
    };
    Ok(scale(&search, &opts)?.into_values().collect())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    if args.verbose {
        if args.json {
            echo_args_to(std::io::stderr().lock(), &args);
        } else {
            echo_args(&args);
        }
    }

    let rows = match run(&args) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", ScaleRow::CSV_HEADER);
        for row in &rows {
            println!("{}", row.csv_line());
        }
    }
    ExitCode::SUCCESS
}
