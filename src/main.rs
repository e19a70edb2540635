//! vwpeaks: summit-centered variable-width peak calling
//!
//! Usage: vwpeaks [OPTIONS] <MIN_WIDTH>

use clap::error::ErrorKind;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

use vwpeaks::commands::FindPeaksCommand;
use vwpeaks::error::{PeakError, EXIT_USAGE};
use vwpeaks::logging;

#[derive(Parser)]
#[command(name = "vwpeaks")]
#[command(version)]
#[command(
    about = "Call summit-centered FWHM peaks from a per-base signal track",
    long_about = "Reads 6-column per-base signal (chrom, pos-1, pos, id, score, summit) grouped \
                  by summit, calls one full-width-at-half-maximum peak per summit and resolves \
                  overlaps between neighboring peaks. Output columns: chrom, start, end, id, \
                  max score, FWHM summit, input summit."
)]
struct Cli {
    /// Minimum peak width in bp
    #[arg(value_name = "MIN_WIDTH", value_parser = clap::value_parser!(u64).range(1..))]
    min_width: u64,

    /// Input signal file (use - for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            process::exit(EXIT_USAGE);
        }
    };

    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), PeakError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let cmd = FindPeaksCommand::new().with_min_width(cli.min_width);

    let result = match cli.input {
        Some(path) if path.to_string_lossy() != "-" => cmd.run(&path, &mut handle)?,
        _ => cmd.run_stdin(&mut handle)?,
    };

    if cli.stats {
        eprintln!("Peak calling stats: {}", result);
    }
    Ok(())
}
