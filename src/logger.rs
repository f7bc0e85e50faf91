//! Custom logging module.
//!
//! This module provides a logger that formats entries with a timestamp and
//! level, keeps the most recent ones for the preview's log pane, and echoes
//! them to stderr unless the terminal UI owns the screen.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Number of entries kept for display.
///
const MAX_ENTRIES: usize = 200;

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Shared view of the logger's recent entries and output switch.
///
#[derive(Clone)]
pub struct LogHandle {
    entries: Arc<Mutex<VecDeque<String>>>,
    echo: Arc<AtomicBool>,
}

impl LogHandle {
    fn new() -> Self {
        LogHandle {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_ENTRIES))),
            echo: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Turn echoing to stderr on or off.
    ///
    pub fn set_echo(&self, echo: bool) {
        self.echo.store(echo, Ordering::Relaxed);
    }

    /// Most recent entries, oldest first.
    ///
    pub fn entries(&self) -> Vec<String> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn push(&self, line: String) {
        // A poisoned buffer only loses display history
        if let Ok(mut entries) = self.entries.lock() {
            if entries.len() == MAX_ENTRIES {
                entries.pop_front();
            }
            entries.push_back(line);
        }
    }
}

/// Custom logger that captures logs for display
///
pub struct CustomLogger {
    level: LevelFilter,
    handle: LogHandle,
}

impl CustomLogger {
    pub fn new(level: LevelFilter) -> Self {
        CustomLogger {
            level,
            handle: LogHandle::new(),
        }
    }

    pub fn handle(&self) -> LogHandle {
        self.handle.clone()
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let formatted = format_log(record);
            if self.handle.echo.load(Ordering::Relaxed) {
                let _ = writeln!(std::io::stderr(), "{}", formatted);
            }
            self.handle.push(formatted);
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Install the logger as the global logger.
///
pub fn init(level: LevelFilter) -> Result<LogHandle, AppError> {
    let logger: &'static CustomLogger = Box::leak(Box::new(CustomLogger::new(level)));
    let handle = logger.handle();
    log::set_logger(logger).map_err(|e| AppError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(handle)
}
