use std::process::ExitCode;

use clap::Parser;
use fabric_tell::cli::{echo_args, init_tracing, parse_list};
use fabric_tell::topo::HyperxParams;
use serde::Serialize;

#[derive(Debug, Parser, Serialize)]
#[command(name = "tell", about = "Compute HyperX topology metrics")]
struct Args {
    /// Dimension widths, comma separated (e.g. 4,4,8)
    widths: String,

    /// Dimension weights, comma separated (e.g. 1,1,2)
    weights: String,

    /// Terminals per router
    concentration: u64,

    /// Turn on verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> fabric_tell::Result<String> {
    let params = HyperxParams::new(
        parse_list(&args.widths)?,
        parse_list(&args.weights)?,
        args.concentration,
    );
    Ok(params.report()?.render())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    if args.verbose {
        echo_args(&args);
    }

    match run(&args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
