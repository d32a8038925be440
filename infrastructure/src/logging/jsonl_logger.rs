//! JSONL file writer for consensus events.
//!
//! Each [`ConversationEvent`] becomes one JSON line carrying a `type` and an
//! RFC 3339 `timestamp`. The file is opened in append mode so one log can
//! span many invocations and sessions.

use lumin_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL conversation logger that appends one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Each line is flushed as it is
/// written.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open (or create) the log at `path`, creating parent directories.
    ///
    /// Returns `None` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::String(event.event_type.to_string()));
        map.insert("timestamp".to_string(), Value::String(timestamp));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("consensus.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            "round_complete",
            serde_json::json!({"round": 0, "approved": [1]}),
        ));
        logger.log(ConversationEvent::new(
            "consensus_result",
            serde_json::json!({"answer": "Paris", "forced_accept": false}),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("timestamp").is_some());
        }
        assert_eq!(lines[0]["type"], "round_complete");
        assert_eq!(lines[0]["approved"][0], 1);
        assert_eq!(lines[1]["type"], "consensus_result");
        assert_eq!(lines[1]["answer"], "Paris");
    }

    #[test]
    fn test_appends_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consensus.jsonl");

        for round in 0..2 {
            let logger = JsonlConversationLogger::open(&path).unwrap();
            logger.log(ConversationEvent::new(
                "round_complete",
                serde_json::json!({"round": round}),
            ));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["round"], 1);
    }

    #[test]
    fn test_non_object_payload_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consensus.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            "consensus_forced",
            serde_json::json!("budget exhausted"),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "consensus_forced");
        assert_eq!(lines[0]["data"], "budget exhausted");
    }

    #[test]
    fn test_unopenable_path_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        assert!(JsonlConversationLogger::open(dir.path()).is_none());
    }
}
