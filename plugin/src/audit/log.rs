//! Buffered audit log.
//!
//! Entries are kept in memory in insertion order and appended to the log
//! file when the plugin is disabled. There is no periodic flush: entries
//! recorded since the last save are lost if the process dies.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::entry::{AuditEventType, LogEntry};
use crate::host::Player;

/// Audit log error type.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Appending buffered entries to the log file failed.
    #[error("Failed to write audit log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Open log file the buffer is flushed into.
#[derive(Debug)]
struct LogSink {
    path: PathBuf,
    file: File,
}

/// Append-only audit log.
#[derive(Debug, Default)]
pub struct AuditLog {
    entries: Vec<LogEntry>,
    sink: Option<LogSink>,
}

impl AuditLog {
    /// Memory-only log; `save_logs` discards nothing and writes nothing.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Log backed by the file at `path`, created if missing.
    pub fn open(path: &Path) -> Self {
        let mut log = Self::in_memory();
        log.attach_file(path);
        log
    }

    /// Start persisting to the file at `path`, created if missing.
    ///
    /// The file is opened for appending right away so a read-only data folder
    /// is noticed at startup. Entries already buffered are kept and go out
    /// with the next save. On failure the log stays memory-only and a single
    /// warning is emitted. Returns whether a file is now attached.
    pub fn attach_file(&mut self, path: &Path) -> bool {
        let opened = path
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| OpenOptions::new().create(true).append(true).open(path));

        match opened {
            Ok(file) => {
                info!(
                    path = %path.display(),
                    pending = self.entries.len(),
                    "Audit log opened"
                );
                self.sink = Some(LogSink {
                    path: path.to_path_buf(),
                    file,
                });
                true
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Cannot open audit log file. Admin mode actions will not be saved."
                );
                self.sink = None;
                false
            }
        }
    }

    /// Whether buffered entries will reach a file.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        self.sink.is_some()
    }

    /// Path of the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|sink| sink.path.as_path())
    }

    /// Record an action by `player`, stamped with the current time.
    pub fn log_event(&mut self, player: &Player, event_type: AuditEventType, text: &str) {
        debug!(player = %player.name, event = %event_type, text, "Audit event");
        self.record(LogEntry::new(player.name.as_str(), event_type, text));
    }

    /// Append a prepared entry.
    pub fn record(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Buffered entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Append every buffered entry to the log file, one line each.
    ///
    /// Returns the number of lines written. Written entries leave the buffer;
    /// without a file sink nothing is written and the buffer is kept.
    pub fn save_logs(&mut self) -> Result<usize, AuditError> {
        let Some(sink) = self.sink.as_mut() else {
            debug!(
                pending = self.entries.len(),
                "Audit log has no file, skipping save"
            );
            return Ok(0);
        };

        if self.entries.is_empty() {
            return Ok(0);
        }

        let mut buf = String::new();
        for entry in &self.entries {
            buf.push_str(&entry.to_string());
            buf.push('\n');
        }

        sink.file
            .write_all(buf.as_bytes())
            .and_then(|()| sink.file.flush())
            .map_err(|source| AuditError::Write {
                path: sink.path.clone(),
                source,
            })?;

        let written = self.entries.len();
        self.entries.clear();
        info!(path = %sink.path.display(), written, "Audit log saved");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn steve() -> Player {
        Player::new(Uuid::new_v4(), "Steve")
    }

    #[test]
    fn test_log_event_appends_in_order() {
        let mut log = AuditLog::in_memory();
        let player = steve();

        log.log_event(&player, AuditEventType::Command, "/fly");
        log.log_event(&player, AuditEventType::CreativeInventory, "DIAMOND");

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event_type, AuditEventType::Command);
        assert_eq!(entries[0].text, "/fly");
        assert_eq!(entries[1].event_type, AuditEventType::CreativeInventory);
        assert_eq!(entries[1].player_name, "Steve");
    }

    #[test]
    fn test_in_memory_save_keeps_entries() {
        let mut log = AuditLog::in_memory();
        log.log_event(&steve(), AuditEventType::Command, "/gamemode creative");

        assert!(!log.is_persistent());
        assert_eq!(log.save_logs().unwrap(), 0);
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn test_save_writes_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        let mut log = AuditLog::open(&path);
        assert!(log.is_persistent());

        let t1 = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 1).unwrap();
        log.record(LogEntry::at(t1, "Steve", AuditEventType::Command, "/fly"));
        log.record(LogEntry::at(
            t2,
            "Alex",
            AuditEventType::CreativeInventory,
            "DIAMOND",
        ));

        assert_eq!(log.save_logs().unwrap(), 2);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Fri Oct 16 12:00:00 UTC 2026,Steve,COMMAND,/fly\n\
             Fri Oct 16 12:00:01 UTC 2026,Alex,CREATIVE_INVENTORY,DIAMOND\n"
        );
    }

    #[test]
    fn test_save_appends_to_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        fs::write(&path, "previous session\n").unwrap();

        let mut log = AuditLog::open(&path);
        log.log_event(&steve(), AuditEventType::Command, "/time set day");
        log.save_logs().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "previous session");
        assert!(lines[1].ends_with(",Steve,COMMAND,/time set day"));
    }

    #[test]
    fn test_second_save_does_not_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        let mut log = AuditLog::open(&path);

        log.log_event(&steve(), AuditEventType::Command, "/fly");
        assert_eq!(log.save_logs().unwrap(), 1);
        assert_eq!(log.save_logs().unwrap(), 0);

        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_open_creates_data_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins").join("AdminMode").join("logs.txt");

        let log = AuditLog::open(&path);
        assert!(log.is_persistent());
        assert_eq!(log.path(), Some(path.as_path()));
        assert!(path.exists());
    }

    #[test]
    fn test_unopenable_path_degrades_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as an append-only file.
        let log = AuditLog::open(dir.path());
        assert!(!log.is_persistent());
        assert!(log.path().is_none());
    }

    #[test]
    fn test_attach_file_keeps_buffered_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs.txt");
        let mut log = AuditLog::in_memory();
        log.log_event(&steve(), AuditEventType::Command, "/fly");

        assert!(log.attach_file(&path));
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.save_logs().unwrap(), 1);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .ends_with(",Steve,COMMAND,/fly\n"));
    }

    #[test]
    fn test_attach_file_under_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("AdminMode");
        fs::write(&blocker, "not a folder").unwrap();

        let mut log = AuditLog::in_memory();
        assert!(!log.attach_file(&blocker.join("logs.txt")));
        assert!(!log.is_persistent());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_is_reported_and_keeps_entries() {
        let mut log = AuditLog::in_memory();
        // Every write to /dev/full fails with ENOSPC.
        assert!(log.attach_file(Path::new("/dev/full")));
        log.log_event(&steve(), AuditEventType::Command, "/fly");

        let err = log.save_logs().unwrap_err();
        assert!(matches!(
            &err,
            AuditError::Write { path, .. } if path == Path::new("/dev/full")
        ));
        assert!(err.to_string().starts_with("Failed to write audit log /dev/full"));
        assert_eq!(log.entries().len(), 1);
    }
}
