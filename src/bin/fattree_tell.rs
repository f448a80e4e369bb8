use std::process::ExitCode;

use clap::Parser;
use fabric_tell::cli::{echo_args, init_tracing};
use fabric_tell::topo::FatTreeParams;
use serde::Serialize;

#[derive(Debug, Parser, Serialize)]
#[command(name = "fattree_tell", about = "Compute fat-tree topology metrics")]
struct Args {
    /// Down and up ports per level, leaves first (e.g. 8x4-6x3-10)
    down_ups: String,

    /// Turn on verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> fabric_tell::Result<String> {
    let params: FatTreeParams = args.down_ups.parse()?;
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
