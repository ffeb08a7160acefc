//! File log sink for the `log` facade.
//!
//! The terminal is in raw mode while the game runs, so nothing may go to
//! stdout or stderr. Library crates log through `log` macros; the binary
//! installs a [`FileLogger`] once at startup.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes `LEVEL target: message` lines to any writer.
pub struct FileLogger<W: Write + Send = BufWriter<File>> {
    level: LevelFilter,
    out: Mutex<W>,
}

impl FileLogger {
    /// Open (append) `path` as the sink.
    pub fn open(path: impl AsRef<Path>, level: LevelFilter) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        Ok(Self::with_writer(BufWriter::new(file), level))
    }
}

impl<W: Write + Send + 'static> FileLogger<W> {
    pub fn with_writer(out: W, level: LevelFilter) -> Self {
        Self {
            level,
            out: Mutex::new(out),
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Install as the global logger. Fails if one is already set.
    pub fn install(self) -> Result<()> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self)).context("install logger")?;
        log::set_max_level(level);
        Ok(())
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> Log for FileLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

/// Write a panic report to the global logger and flush it.
///
/// Called from the panic hook, where buffered records would otherwise be lost.
pub fn log_panic(report: &dyn fmt::Display) {
    log_panic_to(log::logger(), report);
}

fn log_panic_to(logger: &dyn Log, report: &dyn fmt::Display) {
    logger.log(
        &Record::builder()
            .level(Level::Error)
            .target("panic")
            .args(format_args!("{report}"))
            .build(),
    );
    logger.flush();
}
