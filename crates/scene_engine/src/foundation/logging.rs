//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use log::LevelFilter;

/// Parse a level name such as `"info"` or `"trace"`, falling back to `Info`
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or_else(|_| {
        warn!("Unknown log level '{}', using info", level);
        LevelFilter::Info
    })
}

/// Initialize the logging system
///
/// `RUST_LOG` still takes precedence over `level`. Calling this more than once
/// is harmless; later calls are ignored.
pub fn init(level: &str) {
    let result = env_logger::Builder::new()
        .filter_level(parse_level(level))
        .parse_default_env()
        .try_init();

    if result.is_err() {
        debug!("Logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init("info");
        init("trace");
    }
}
