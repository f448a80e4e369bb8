use std::process::ExitCode;

use clap::Parser;
use fabric_tell::cli::{echo_args, init_tracing};
use fabric_tell::topo::DragonflyParams;
use serde::Serialize;

#[derive(Debug, Parser, Serialize)]
#[command(name = "df_tell", about = "Compute dragonfly topology metrics")]
struct Args {
    /// Number of groups
    global_width: u64,

    /// Number of links between each pair of groups
    global_weight: u64,

    /// Number of routers per group
    local_width: u64,

    /// Number of links between each pair of routers in a group
    local_weight: u64,

    /// Terminals per router
    concentration: u64,

    /// Turn on verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    if args.verbose {
        echo_args(&args);
    }

    let params = DragonflyParams {
        global_width: args.global_width,
        global_weight: args.global_weight,
        local_width: args.local_width,
        local_weight: args.local_weight,
        concentration: args.concentration,
    };
    match params.report() {
        Ok(report) => {
            print!("{}", report.render());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
