//! # Firmware Console Output
//!
//! Formatting and logging on top of the board console reached through
//! [`Platform::console_putc`]. Boards without a console silently swallow
//! the output, so everything here is safe to call before the console is
//! initialized or on a board that has none.
//!
//! * [`ConsoleSink`]: a `core::fmt::Write` over the console, translating
//!   `\n` into `\r\n` for serial terminals.
//! * [`console_print!`]: allocation-free formatted output.
//! * [`ConsoleLogger`]: a `log::Log` backend writing
//!   `"[LEVEL] target: message"` lines.
//!
//! ## `enabled` Feature (default)
//!
//! Without it, the sink and therefore the macro and the logger become no-ops
//! and the console is never touched.
//!
//! ```rust
//! use firmware_console::{console_print, ConsoleLogger};
//! use firmware_platform::{NoOps, Platform, PlatformDescriptor};
//! use log::LevelFilter;
//!
//! static BOARD: PlatformDescriptor<'static> = PlatformDescriptor::new("doc", &NoOps);
//!
//! let platform = Platform::from(&BOARD);
//! console_print!(platform, "booting {} with {} harts\n", "doc", platform.hart_count());
//!
//! ConsoleLogger::new(LevelFilter::Info, platform).init().unwrap();
//! log::info!("console logger ready");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

mod logger;
mod sink;

pub use logger::{ConsoleLogger, LoggerInitError};
pub use sink::{ConsoleSink, console_write};

pub use firmware_platform::Platform;

#[macro_export]
macro_rules! console_print {
    ($platform:expr, $($arg:tt)*) => {{
        $crate::console_write($platform, core::format_args!($($arg)*));
    }};
}
