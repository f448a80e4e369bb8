use std::process::ExitCode;

use clap::Parser;
use fabric_tell::cli::{echo_args, init_tracing, parse_list};
use fabric_tell::coord::{CoordinateSpace, DigitOrder, coordinate_to_index, index_to_coordinate};
use serde::Serialize;

#[derive(Debug, Parser, Serialize)]
#[command(
    name = "hyperx_coordinate",
    about = "Translate a terminal index into its HyperX coordinate"
)]
struct Args {
    /// Dimension widths, comma separated (e.g. 4,3)
    widths: String,

    /// Terminals per router
    concentration: u64,

    /// Terminal index
    terminal: u64,

    /// A cyclic offset from the terminal
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    /// Use big endian coordinate format
    #[arg(short, long = "bigendian")]
    bigendian: bool,

    /// Turn on verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> fabric_tell::Result<String> {
    let space = CoordinateSpace::new(args.concentration, parse_list(&args.widths)?)?;
    let order = if args.bigendian {
        DigitOrder::BigEndian
    } else {
        DigitOrder::LittleEndian
    };
    let coord = index_to_coordinate(&space, args.terminal, args.offset, order)?;
    let terminal = coordinate_to_index(&space, &coord)?;
    Ok(format!("terminal {terminal} is {coord}"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    if args.verbose {
        echo_args(&args);
    }

    match run(&args) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
