//! Pipeline logging.
//!
//! Log entries go to stderr so that stdout only carries rendered tables.
//! Notices (errors, usage hints) are always shown, warnings unless quiet,
//! info and success entries only when verbose.

use once_cell::sync::Lazy;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    /// User-facing message that no verbosity mutes
    Notice,
}

/// How much gets printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

impl Verbosity {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            _ => Verbosity::Verbose,
        }
    }

    fn shows(self, level: LogLevel) -> bool {
        match level {
            LogLevel::Info | LogLevel::Success => self >= Verbosity::Verbose,
            LogLevel::Warning => self >= Verbosity::Normal,
            LogLevel::Notice => true,
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Optional indentation level (for nested logs)
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Notice, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// The line as printed.
    pub fn format(&self) -> String {
        let indent = "   ".repeat(self.indent as usize);
        let prefix = match self.level {
            LogLevel::Notice => return format!("{}{}", indent, self.message),
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
        };
        format!("{}{} {}", indent, prefix, self.message)
    }
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Writes log entries to stderr, filtered by verbosity.
pub struct Logger {
    verbosity: AtomicU8,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            verbosity: AtomicU8::new(Verbosity::Normal as u8),
        }
    }

    pub fn set_verbosity(&self, verbosity: Verbosity) {
        self.verbosity.store(verbosity as u8, Ordering::Relaxed);
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_u8(self.verbosity.load(Ordering::Relaxed))
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.verbosity().shows(level)
    }

    pub fn log(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        // a closed stderr is not worth failing over
        let _ = writeln!(std::io::stderr().lock(), "{}", entry.format());
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn set_verbosity(verbosity: Verbosity) {
    LOGGER.set_verbosity(verbosity);
}

pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_notice(msg: impl Into<String>) {
    LOGGER.log(LogEntry::notice(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::info(msg).with_indent(indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filter() {
        assert!(!Verbosity::Normal.shows(LogLevel::Info));
        assert!(Verbosity::Normal.shows(LogLevel::Warning));
        assert!(Verbosity::Verbose.shows(LogLevel::Success));
        assert!(!Verbosity::Quiet.shows(LogLevel::Warning));
        assert!(Verbosity::Quiet.shows(LogLevel::Notice));
    }

    #[test]
    fn test_logger_level_switch() {
        let logger = Logger::new();
        assert_eq!(logger.verbosity(), Verbosity::Normal);
        logger.set_verbosity(Verbosity::Verbose);
        assert!(logger.enabled(LogLevel::Info));
    }

    #[test]
    fn test_entry_format() {
        let line = LogEntry::info("grid 3x2").with_indent(1).format();
        assert_eq!(line, "       grid 3x2");
        assert!(LogEntry::warning("odd").format().ends_with("⚠️ odd"));
        assert_eq!(LogEntry::notice("Error: bad spec").format(), "Error: bad spec");
    }
}
