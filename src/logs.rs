//! Colored terminal logger.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{stderr, Write};

#[derive(Debug, Clone, Copy)]
pub struct TermLogger {
    level: LevelFilter,
}

impl TermLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// Installs a logger for `level` as the global one.
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(Self::new(level)))?;
        log::set_max_level(level);
        Ok(())
    }

    fn label(level: Level) -> (&'static str, String) {
        use termion::color::{Fg, LightBlack, LightBlue, LightRed, LightYellow, Magenta};
        match level {
            Level::Error => ("ERROR", Fg(LightRed).to_string()),
            Level::Warn => ("WARN", Fg(LightYellow).to_string()),
            Level::Info => ("INFO", Fg(LightBlue).to_string()),
            Level::Debug => ("DEBUG", Fg(LightBlack).to_string()),
            Level::Trace => ("TRACE", Fg(Magenta).to_string()),
        }
    }
}

impl Log for TermLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let (label, color) = Self::label(record.level());
        let reset = termion::style::Reset;
        let msg = record.args().to_string().replace('\t', "    ");
        let mut tty = stderr().lock();
        let _ = writeln!(tty, "{color}[{label}] {reset}{msg}");
    }

    fn flush(&self) {
        let _ = stderr().flush();
    }
}
