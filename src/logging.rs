use log::{LevelFilter, SetLoggerError};

/// Log to stderr with millisecond timestamps. `RUST_LOG` directives, when
/// set, refine the level given on the command line.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()
}

pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}
