//! A minimal logger that writes to stderr, in the same spirit as the
//! teacher workspace's own `core/logger.rs`: no filtering here, since
//! filtering is handled by `log::set_max_level` at startup.

use log::Log;

#[derive(Debug)]
pub(crate) struct Logger(());

const LOGGER: &Logger = &Logger(());

impl Logger {
    pub(crate) fn init() -> Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        eprintln!("{}|{}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}
