//! vwpeaks-resolve: keep the strongest non-overlapping peaks of each cluster
//!
//! Usage: vwpeaks-resolve [OPTIONS]
//!
//! Input lines look like `<merged interval>|<peak>;<peak>;...`.

use clap::error::ErrorKind;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

use vwpeaks::commands::ResolveClustersCommand;
use vwpeaks::error::{PeakError, EXIT_USAGE};
use vwpeaks::logging;

#[derive(Parser)]
#[command(name = "vwpeaks-resolve")]
#[command(version)]
#[command(about = "Resolve overlaps within peak clusters, strongest score first", long_about = None)]
struct Cli {
    /// Input cluster file (use - for stdin)
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
    let cmd = ResolveClustersCommand::new();

    let result = match cli.input {
        Some(path) if path.to_string_lossy() != "-" => cmd.run(&path, &mut handle)?,
        _ => cmd.run_stdin(&mut handle)?,
    };

    if cli.stats {
        eprintln!("Cluster resolution stats: {}", result);
    }
    Ok(())
}
