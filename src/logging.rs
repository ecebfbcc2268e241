use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;

pub const ENV_VAR: &str = "CFETCH_LOG";

// Logs go to stderr; stdout carries the rendered art.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "cfetch [{:<5}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" | "0" => Some(LevelFilter::Off),
        "error" | "1" => Some(LevelFilter::Error),
        "warn" | "2" => Some(LevelFilter::Warn),
        "info" | "3" => Some(LevelFilter::Info),
        "debug" | "4" => Some(LevelFilter::Debug),
        "trace" | "5" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Pick the level from the `-v` count, falling back to `CFETCH_LOG`.
///
/// The variable takes a level name or number: `off`/`0`, `error`/`1`,
/// `warn`/`2` (default), `info`/`3`, `debug`/`4`, `trace`/`5`.
pub fn level_for(verbose: u8, env: Option<&str>) -> LevelFilter {
    match verbose {
        0 => env.and_then(parse_level).unwrap_or(LevelFilter::Warn),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the logger. Later calls only adjust the level.
pub fn init(verbose: u8) {
    let env = std::env::var(ENV_VAR).ok();
    let level = level_for(verbose, env.as_deref());
    if log::set_logger(&LOGGER).is_ok() {
        log::trace!("logger installed");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_win_over_env() {
        assert_eq!(level_for(1, Some("error")), LevelFilter::Info);
        assert_eq!(level_for(2, None), LevelFilter::Debug);
        assert_eq!(level_for(7, None), LevelFilter::Trace);
    }

    #[test]
    fn test_env_names_and_numbers() {
        assert_eq!(level_for(0, Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(level_for(0, Some(" 1 ")), LevelFilter::Error);
        assert_eq!(level_for(0, Some("off")), LevelFilter::Off);
    }

    #[test]
    fn test_default_is_warn() {
        assert_eq!(level_for(0, None), LevelFilter::Warn);
        assert_eq!(level_for(0, Some("loud")), LevelFilter::Warn);
    }
}
