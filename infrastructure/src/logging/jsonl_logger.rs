//! JSONL file writer for agent transcript events.
//!
//! Each event is serialized as a single JSON line with a `type` field and
//! `timestamp`, appended to the file via a buffered writer.

use serde_json::{Map, Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;
use tutor_application::{AgentCall, AgentLogger};

/// JSONL agent logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlAgentLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAgentLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create agent log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open agent log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_event(&self, event_type: &str, payload: Map<String, Value>) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = Map::new();
        record.insert("type".to_string(), Value::String(event_type.to_string()));
        record.insert("timestamp".to_string(), Value::String(timestamp));
        record.extend(payload);

        let Ok(line) = serde_json::to_string(&Value::Object(record)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl AgentLogger for JsonlAgentLogger {
    fn log_agent(&self, call: &AgentCall<'_>) {
        let payload = json!({
            "agent": call.agent_name,
            "inputs": call.input_keys,
            "user": call.user_preview,
            "response": call.output.text(),
        });
        if let Value::Object(map) = payload {
            self.write_event("agent_call", map);
        }
    }

    fn log(&self, message: &str) {
        let mut payload = Map::new();
        payload.insert("message".to_string(), Value::String(message.to_string()));
        self.write_event("milestone", payload);
    }
}

impl Drop for JsonlAgentLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tutor_domain::{AgentInput, AgentOutput, ModelReply};

    fn read_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_jsonl_logger_writes_valid_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("agents.jsonl");
        let logger = JsonlAgentLogger::new(&path).unwrap();

        let input = AgentInput::new("why does my loop skip the last item?");
        let output = AgentOutput::new("tutor_agent", ModelReply::text("Check the range bound."));
        logger.log_agent(&AgentCall::new("tutor_agent", &input, &output));
        logger.log("Consensus reached at round #1");
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("type").is_some());
            assert!(line.get("timestamp").is_some());
        }

        assert_eq!(lines[0]["type"], "agent_call");
        assert_eq!(lines[0]["agent"], "tutor_agent");
        assert_eq!(lines[0]["inputs"], json!(["user_input"]));
        assert_eq!(lines[0]["user"], "why does my loop skip the last item?");
        assert_eq!(lines[0]["response"], "Check the range bound.");

        assert_eq!(lines[1]["type"], "milestone");
        assert_eq!(lines[1]["message"], "Consensus reached at round #1");
    }

    #[test]
    fn test_jsonl_logger_appends_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agents.jsonl");

        JsonlAgentLogger::new(&path).unwrap().log("first");
        JsonlAgentLogger::new(&path).unwrap().log("second");

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["message"], "second");
    }

    #[test]
    fn test_jsonl_logger_returns_none_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlAgentLogger::new(dir.path()).is_none());
    }
}
