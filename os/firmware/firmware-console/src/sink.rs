use core::fmt::{self, Write};
use firmware_platform::Platform;

/// `fmt::Write` adapter over the dispatched console.
///
/// Output is unbuffered and best-effort; writing never fails.
#[derive(Debug, Copy, Clone)]
pub struct ConsoleSink<'a> {
    platform: Platform<'a>,
}

impl<'a> ConsoleSink<'a> {
    #[must_use]
    pub const fn new(platform: Platform<'a>) -> Self {
        Self { platform }
    }

    #[cfg(feature = "enabled")]
    #[inline]
    fn putc(self, b: u8) {
        if b == b'\n' {
            self.platform.console_putc(b'\r');
        }
        self.platform.console_putc(b);
    }

    #[cfg(not(feature = "enabled"))]
    #[inline]
    #[allow(clippy::unused_self)]
    const fn putc(self, _b: u8) {}
}

impl Write for ConsoleSink<'_> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.putc(b);
        }
        Ok(())
    }

    #[inline]
    fn write_char(&mut self, c: char) -> fmt::Result {
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        self.write_str(s)
    }
}

#[doc(hidden)]
#[inline]
pub fn console_write(platform: Platform<'_>, args: fmt::Arguments) {
    // Best effort; the sink itself never fails.
    let _ = ConsoleSink::new(platform).write_fmt(args);
}
