//! `log` backend that prints over a byte sink such as the debug UART.
//!
//! We are `no_std`, so the logger has to be a `'static` value handed to
//! [`log::set_logger`]; it is `const`-constructible for that reason:
//!
//! ```ignore
//! static LOGGER: SerialLogger<UartSink> = SerialLogger::new(LevelFilter::Info, UartSink);
//! logger::init(&LOGGER)?;
//! ```

use core::fmt::Write;

use heapless::String;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

const LINE_CAPACITY: usize = 128;

/// Destination for rendered log lines.
pub trait LogSink: Sync {
    fn write_line(&self, line: &str);
}

pub struct SerialLogger<S> {
    level: LevelFilter,
    sink: S,
}

impl<S: LogSink> SerialLogger<S> {
    pub const fn new(level: LevelFilter, sink: S) -> Self {
        Self { level, sink }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

/// Installs `logger` as the global logger.
pub fn init<S: LogSink + Send>(logger: &'static SerialLogger<S>) -> Result<(), SetLoggerError> {
    log::set_logger(logger)?;
    log::set_max_level(logger.level);
    Ok(())
}

/// Fills a line buffer, keeping room for the trailing CRLF.
struct LineWriter {
    line: String<LINE_CAPACITY>,
}

impl Write for LineWriter {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for c in s.chars() {
            if self.line.len() + c.len_utf8() > LINE_CAPACITY - 2 {
                return Err(core::fmt::Error);
            }
            self.line.push(c).map_err(|_| core::fmt::Error)?;
        }
        Ok(())
    }
}

/// Renders `record` as `LEVEL:target -- message\r\n`, cut short if it does
/// not fit in one line buffer.
fn render(record: &Record<'_>) -> String<LINE_CAPACITY> {
    let mut writer = LineWriter {
        line: String::new(),
    };
    // A full buffer just truncates the message.
    let _ = write!(
        writer,
        "{}:{} -- {}",
        record.level(),
        record.target(),
        record.args()
    );
    let mut line = writer.line;
    let _ = line.push_str("\r\n");
    line
}

impl<S: LogSink + Send> Log for SerialLogger<S> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.sink.write_line(&render(record));
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use std::sync::Mutex;

    struct CaptureSink {
        lines: Mutex<Vec<std::string::String>>,
    }

    impl LogSink for CaptureSink {
        fn write_line(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_owned());
        }
    }

    fn capture(level: LevelFilter) -> SerialLogger<CaptureSink> {
        SerialLogger::new(
            level,
            CaptureSink {
                lines: Mutex::new(Vec::new()),
            },
        )
    }

    #[test]
    fn filters_by_level() {
        let logger = capture(LevelFilter::Warn);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("io1x")
                .args(format_args!("quiet"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("io1x")
                .args(format_args!("ADC timeout after {} us", 10_000))
                .build(),
        );

        let lines = logger.sink.lines.lock().unwrap();
        assert_eq!(lines.as_slice(), ["WARN:io1x -- ADC timeout after 10000 us\r\n"]);
    }

    #[test]
    fn long_records_are_truncated_but_terminated() {
        let logger = capture(LevelFilter::Trace);
        let long = "x".repeat(300);
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("io1x")
                .args(format_args!("{}", long))
                .build(),
        );

        let lines = logger.sink.lines.lock().unwrap();
        assert_eq!(lines[0].len(), LINE_CAPACITY);
        assert!(lines[0].starts_with("INFO:io1x -- xxx"));
        assert!(lines[0].ends_with("x\r\n"));
    }

    #[test]
    fn init_installs_the_global_logger() {
        static LOGGER: SerialLogger<NullSink> = SerialLogger::new(LevelFilter::Debug, NullSink);
        struct NullSink;
        impl LogSink for NullSink {
            fn write_line(&self, _line: &str) {}
        }

        init(&LOGGER).unwrap();
        assert_eq!(log::max_level(), LevelFilter::Debug);
        assert_eq!(LOGGER.level(), LevelFilter::Debug);
        assert!(init(&LOGGER).is_err());
    }
}
