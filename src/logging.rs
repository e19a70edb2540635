//! Logger setup shared by the binaries.

use env_logger::Env;

/// Log filter for a `-v` repeat count. `RUST_LOG` takes precedence.
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize stderr logging. Later calls are ignored.
pub fn init(verbose: u8) {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level_for(verbose)))
        .format_timestamp(None)
        .try_init();
}
