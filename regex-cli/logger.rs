// A logger for the 'log' crate that writes every record to stderr. The engine
// only emits debug and trace messages, so levels and a location are all that
// is needed.

use log::{self, Log};

/// Writes log records to stderr.
///
/// Filtering is left to the global max level set with `log::set_max_level`.
#[derive(Debug)]
pub struct Logger(());

const LOGGER: &Logger = &Logger(());

impl Logger {
    /// Installs this logger as the global logger.
    pub fn init() -> Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        let location = match (record.file(), record.line()) {
            (Some(file), Some(line)) => format!("|{}:{}", file, line),
            (Some(file), None) => format!("|{}", file),
            _ => String::new(),
        };
        eprintln!(
            "{}|{}{}: {}",
            record.level(),
            record.target(),
            location,
            record.args()
        );
    }

    fn flush(&self) {}
}
