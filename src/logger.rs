//! Build log writer.
//!
//! Every line carries the [`LOGGER_PREFIX`]. Sub-steps are tab-indented so
//! top-level events stand out. Write failures never abort a run; they are
//! reported through the `log` facade instead.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use log::{debug, warn};

/// Prefix of every build log line.
pub const LOGGER_PREFIX: &str = "[CASCADE]";

/// Prefixed, ordered build log.
pub struct BuildLogger {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl BuildLogger {
    pub fn new(sink: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
        }
    }

    /// Logger writing into a shared in-memory buffer.
    pub fn buffered() -> (Self, LogBuffer) {
        let buffer = LogBuffer::default();
        (Self::new(buffer.clone()), buffer)
    }

    /// Log text with the plugin prefix.
    pub fn text(&self, text: &str) {
        debug!(target: "layout_cascade::build", "{}", text);
        let mut sink = match self.sink.lock() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(sink, "{} {}", LOGGER_PREFIX, text) {
            warn!("Failed to write build log: {}", e);
        }
    }

    pub fn log(&self, text: &str) {
        self.text(text);
    }

    pub fn log_tab(&self, text: &str) {
        self.text(&format!("\t{}", text));
    }

    pub fn log_err(&self, text: &str) {
        self.text(&format!("ERROR: {}", text));
    }

    /// Log an error and its chain of causes.
    pub fn log_exc(&self, error: &dyn std::error::Error) {
        self.text(&format!("EXCEPTION: {}", error));
        let mut source = error.source();
        while let Some(cause) = source {
            self.text(&format!("\tcaused by: {}", cause));
            source = cause.source();
        }
    }
}

/// Cloneable in-memory log sink.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        let bytes = match self.0.lock() {
            Ok(bytes) => bytes,
            Err(poisoned) => poisoned.into_inner(),
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_prefix_and_indentation() {
        let (logger, buffer) = BuildLogger::buffered();
        logger.log("Layout project: layout");
        logger.log_tab("Persist project.");
        logger.log_err("Cascade project missing, skip delete.");
        assert_eq!(
            buffer.contents(),
            "[CASCADE] Layout project: layout\n\
             [CASCADE] \tPersist project.\n\
             [CASCADE] ERROR: Cascade project missing, skip delete.\n"
        );
    }

    #[test]
    fn test_log_exc_prints_cause_chain() {
        let (logger, buffer) = BuildLogger::buffered();
        let error = Error::ConfigClone {
            path: "/jobs/core/config.yaml".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        logger.log_exc(&error);
        let contents = buffer.contents();
        assert!(contents.contains("EXCEPTION: Configuration clone error"));
        assert!(contents.contains("\tcaused by: denied"));
    }
}
