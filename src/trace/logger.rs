use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use crate::trace::trace::LocateTrace;

/// JSONL sink for `LocateTrace` events.
///
/// A logger whose file could not be opened stays silent; write failures are
/// reported through `tracing` and never interrupt a locate run.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    /// Append to `path`, creating it when missing.
    pub fn new(path: &str) -> Self {
        let sink = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .inspect_err(|e| tracing::warn!(path, error = %e, "trace file unavailable, tracing off"))
            .ok()
            .map(Mutex::new);

        Self { sink }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// No path means no trace.
    pub fn from_path(path: Option<&str>) -> Self {
        path.map_or_else(Self::disabled, Self::new)
    }

    pub fn log(&self, event: &LocateTrace) {
        let Some(sink) = &self.sink else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, status = event.status.as_str(), "unserializable trace event");
                return;
            }
        };

        match sink.lock() {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", line) {
                    tracing::warn!(error = %e, "trace event dropped");
                }
            }
            Err(e) => tracing::warn!(error = %e, "trace sink poisoned"),
        }
    }
}
