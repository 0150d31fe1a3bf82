use crate::console_print;
use firmware_platform::Platform;
use firmware_sync::OnceSlot;
use log::{LevelFilter, Log, Metadata, Record};

static LOGGER: OnceSlot<ConsoleLogger<'static>> = OnceSlot::new();

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggerInitError {
    #[error("the console logger was already installed")]
    AlreadyInstalled,
    #[error("another logger is registered with the log facade")]
    LogFacade,
}

/// `log::Log` backend writing to the board console.
#[derive(Debug, Copy, Clone)]
pub struct ConsoleLogger<'a> {
    max_level: LevelFilter,
    platform: Platform<'a>,
}

impl<'a> ConsoleLogger<'a> {
    #[must_use]
    pub const fn new(max_level: LevelFilter, platform: Platform<'a>) -> Self {
        Self {
            max_level,
            platform,
        }
    }
}

impl ConsoleLogger<'static> {
    /// Installs the logger. Call once on the boot hart after `console_init`.
    ///
    /// # Errors
    /// A console logger or some other logger was installed before.
    pub fn init(self) -> Result<(), LoggerInitError> {
        let max_level = self.max_level;
        let logger = LOGGER
            .set(self)
            .map_err(|_| LoggerInitError::AlreadyInstalled)?;
        log::set_logger(logger).map_err(|_| LoggerInitError::LogFacade)?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for ConsoleLogger<'_> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        console_print!(
            self.platform,
            "[{}] {}: {}\n",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        // unbuffered
    }
}
