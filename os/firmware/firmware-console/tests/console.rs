use core::fmt::Write;
use firmware_console::{ConsoleLogger, ConsoleSink, LoggerInitError, console_print};
use firmware_platform::{NoOps, Platform, PlatformDescriptor, PlatformOps};
use log::{Level, LevelFilter, Log, Record};
use std::sync::Mutex;

#[derive(Default)]
struct Uart {
    tx: Mutex<Vec<u8>>,
}

impl PlatformOps for Uart {
    fn console_putc(&self, ch: u8) {
        self.tx.lock().unwrap().push(ch);
    }
}

impl Uart {
    fn take(&self) -> String {
        String::from_utf8(std::mem::take(&mut *self.tx.lock().unwrap())).unwrap()
    }
}

#[test]
fn sink_translates_newlines() {
    let uart = Uart::default();
    let desc = PlatformDescriptor::new("uart", &uart);
    let mut sink = ConsoleSink::new(Platform::from(&desc));

    write!(sink, "a\nb{}", 'é').unwrap();
    assert_eq!(uart.take(), "a\r\nbé");
}

#[test]
fn print_macro_formats_through_console() {
    let uart = Uart::default();
    let desc = PlatformDescriptor::new("uart", &uart).with_harts(2, 4096);
    let p = Platform::from(&desc);

    console_print!(p, "{} harts on {}\n", p.hart_count(), p.name().unwrap_or("?"));
    assert_eq!(uart.take(), "2 harts on uart\r\n");
}

#[test]
fn output_without_console_is_dropped() {
    let desc = PlatformDescriptor::new("mute", &NoOps);
    console_print!(Platform::from(&desc), "nobody hears this\n");
    console_print!(Platform::none(), "nor this\n");
}

#[test]
fn logger_filters_and_formats() {
    let uart = Uart::default();
    let desc = PlatformDescriptor::new("uart", &uart);
    let logger = ConsoleLogger::new(LevelFilter::Info, Platform::from(&desc));

    logger.log(
        &Record::builder()
            .args(format_args!("hart {} up", 1))
            .level(Level::Info)
            .target("boot")
            .build(),
    );
    logger.log(
        &Record::builder()
            .args(format_args!("too chatty"))
            .level(Level::Debug)
            .target("boot")
            .build(),
    );

    assert_eq!(uart.take(), "[INFO] boot: hart 1 up\r\n");
}

#[test]
fn logger_installs_once() {
    let uart: &'static Uart = Box::leak(Box::default());
    let desc: &'static PlatformDescriptor<'static> =
        Box::leak(Box::new(PlatformDescriptor::new("global", uart)));
    let p = Platform::from(desc);

    assert_eq!(ConsoleLogger::new(LevelFilter::Trace, p).init(), Ok(()));
    assert_eq!(
        ConsoleLogger::new(LevelFilter::Trace, p).init(),
        Err(LoggerInitError::AlreadyInstalled)
    );

    log::warn!(target: "power", "reboot requested");
    assert!(uart.take().contains("[WARN] power: reboot requested\r\n"));
}
