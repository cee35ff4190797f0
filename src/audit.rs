//! Miss audit trail
//!
//! Every definitive miss and every lookup attempted without a backend is
//! appended to a dedicated log file for offline analysis. The trail is
//! write-only and never affects resolution.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;

/// Prefix for lines written to stderr when the log file is unavailable
const STDERR_PREFIX: &str = "[NAME_MISS] ";

/// Why an identifier was recorded as a miss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    BackendUnavailable,
    NotFoundInBackend,
}

impl MissReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissReason::BackendUnavailable => "backend_unavailable",
            MissReason::NotFoundInBackend => "not_found_in_backend",
        }
    }
}

impl fmt::Display for MissReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only recorder of cache misses
pub struct MissAuditor {
    sink: Mutex<Box<dyn Write + Send>>,
    prefix: &'static str,
}

impl MissAuditor {
    /// Open (or create) the miss log at `path` in append mode.
    ///
    /// Falls back to stderr if the file cannot be opened.
    pub fn open(path: &Path) -> Self {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                log::info!("Name service miss log initialized: {}", path.display());
                Self::from_writer(file)
            }
            Err(e) => {
                log::warn!(
                    "Failed to create name service miss log file {}: {}, using stderr",
                    path.display(),
                    e
                );
                Self::stderr()
            }
        }
    }

    /// Auditor writing to stderr with a `[NAME_MISS]` prefix
    pub fn stderr() -> Self {
        Self {
            sink: Mutex::new(Box::new(std::io::stderr())),
            prefix: STDERR_PREFIX,
        }
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
            prefix: "",
        }
    }

    /// Append one `ID=<id> reason=<reason>` line. Write failures are logged and dropped.
    pub fn record(&self, id: &str, reason: MissReason) {
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let timestamp = Local::now().format("%Y/%m/%d %H:%M:%S");
        let written = writeln!(sink, "{}{} ID={} reason={}", self.prefix, timestamp, id, reason)
            .and_then(|_| sink.flush());

        if let Err(e) = written {
            log::debug!("Failed to write miss log entry for {}: {}", id, e);
        }
    }
}

/// In-memory sink shared between an auditor and a test
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
