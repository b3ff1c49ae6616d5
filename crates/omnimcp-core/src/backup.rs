//! Backup manager — snapshot-before-overwrite and restore.
//!
//! Every destructive write to a pre-existing host config file is preceded by
//! an atomic copy into a fixed backup root, named
//! `<original-filename>.<host>.<timestamp>`. Records are appended to a TOML
//! index so backups can be listed and restored later. Pruning/retention is
//! out of scope.

use crate::error::{Error, Result};
use crate::hosts::SUPPORTED_HOSTS;
use chrono::Utc;
use omnimcp_fs::write_atomic;
use omnimcp_meta::BackupRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
struct BackupIndex {
    #[serde(default)]
    backups: Vec<BackupRecord>,
}

/// Manages config file snapshots under a fixed backup root.
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_root: PathBuf,
}

impl BackupManager {
    pub fn new(backup_root: impl Into<PathBuf>) -> Self {
        Self {
            backup_root: backup_root.into(),
        }
    }

    /// Validate a host slug against the registered set.
    fn validate_host(host: &str) -> Result<()> {
        if SUPPORTED_HOSTS.contains(&host) {
            Ok(())
        } else {
            Err(Error::InvalidHost {
                slug: host.to_string(),
            })
        }
    }

    fn index_path(&self) -> PathBuf {
        self.backup_root.join("index.toml")
    }

    fn load_index(&self) -> Result<BackupIndex> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(BackupIndex::default());
        }
        let content = omnimcp_fs::read_text(&path)?;
        toml::from_str(&content).map_err(|e| Error::Schema {
            path,
            message: e.to_string(),
        })
    }

    fn save_index(&self, index: &BackupIndex) -> Result<()> {
        let content = toml::to_string_pretty(index).map_err(|e| Error::Schema {
            path: self.index_path(),
            message: e.to_string(),
        })?;
        write_atomic(&self.index_path(), content.as_bytes())?;
        Ok(())
    }

    /// Snapshot the current content of `path` before it is overwritten.
    ///
    /// The copy is atomic: written to a temporary location and renamed into
    /// place, so a partially-written backup is never visible.
    pub fn backup(&self, host: &str, path: &Path) -> Result<BackupRecord> {
        Self::validate_host(host)?;

        let content = fs::read(path).map_err(|e| omnimcp_fs::Error::io(path, e))?;

        let created = Utc::now();
        let timestamp = created
            .timestamp_nanos_opt()
            .unwrap_or_else(|| created.timestamp_micros().saturating_mul(1000));
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "config".to_string());
        let backup_path = self
            .backup_root
            .join(format!("{file_name}.{host}.{timestamp}"));

        write_atomic(&backup_path, &content)?;

        let record = BackupRecord {
            host: host.to_string(),
            original_path: path.to_path_buf(),
            backup_path,
            created,
        };

        let mut index = self.load_index()?;
        index.backups.push(record.clone());
        self.save_index(&index)?;

        tracing::debug!(host, path = %path.display(), backup = %record.backup_path.display(), "created backup");
        Ok(record)
    }

    /// All backups recorded for a host, newest first.
    pub fn list_backups(&self, host: &str) -> Result<Vec<BackupRecord>> {
        Self::validate_host(host)?;
        let index = self.load_index()?;
        let mut records: Vec<BackupRecord> = index
            .backups
            .into_iter()
            .filter(|r| r.host == host)
            .collect();
        records.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(records)
    }

    /// Replace the live file with the backup's content.
    ///
    /// The host slug is validated before any filesystem access; the write
    /// itself is temp-write + rename, leaving the live file either fully
    /// old or fully restored.
    pub fn restore(&self, host: &str, record: &BackupRecord) -> Result<()> {
        Self::validate_host(host)?;

        let content =
            fs::read(&record.backup_path).map_err(|e| omnimcp_fs::Error::io(&record.backup_path, e))?;
        write_atomic(&record.original_path, &content)?;

        tracing::info!(host, path = %record.original_path.display(), "restored from backup");
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, BackupManager) {
        let temp = TempDir::new().unwrap();
        let manager = BackupManager::new(temp.path().join("backups"));
        (temp, manager)
    }

    #[test]
    fn test_backup_unknown_host() {
        let (temp, manager) = setup();
        let live = temp.path().join("mcp.json");
        fs::write(&live, "{}").unwrap();

        let result = manager.backup("emacs", &live);
        assert!(matches!(result, Err(Error::InvalidHost { .. })));
    }

    #[test]
    fn test_backup_and_list() {
        let (temp, manager) = setup();
        let live = temp.path().join("mcp.json");
        fs::write(&live, r#"{"mcpServers": {}}"#).unwrap();

        let record = manager.backup("cursor", &live).unwrap();
        assert!(record.backup_path.exists());
        assert_eq!(record.original_path, live);

        let listed = manager.list_backups("cursor").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], record);
    }

    #[test]
    fn test_backup_filename_convention() {
        let (temp, manager) = setup();
        let live = temp.path().join("mcp.json");
        fs::write(&live, "{}").unwrap();

        let record = manager.backup("cursor", &live).unwrap();
        let name = record.backup_path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("mcp.json.cursor."));
    }

    #[test]
    fn test_list_newest_first() {
        let (temp, manager) = setup();
        let live = temp.path().join("mcp.json");

        fs::write(&live, "first").unwrap();
        let first = manager.backup("cursor", &live).unwrap();
        fs::write(&live, "second").unwrap();
        let second = manager.backup("cursor", &live).unwrap();

        let listed = manager.list_backups("cursor").unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], second);
        assert_eq!(listed[1], first);
    }

    #[test]
    fn test_list_filters_by_host() {
        let (temp, manager) = setup();
        let live = temp.path().join("mcp.json");
        fs::write(&live, "{}").unwrap();

        manager.backup("cursor", &live).unwrap();
        manager.backup("windsurf", &live).unwrap();

        assert_eq!(manager.list_backups("cursor").unwrap().len(), 1);
        assert_eq!(manager.list_backups("gemini").unwrap().len(), 0);
    }

    #[test]
    fn test_restore_roundtrip() {
        let (temp, manager) = setup();
        let live = temp.path().join("mcp.json");
        let original = r#"{"mcpServers": {"fetch": {"command": "fetch-server"}}}"#;
        fs::write(&live, original).unwrap();

        let record = manager.backup("cursor", &live).unwrap();
        fs::write(&live, "clobbered").unwrap();

        manager.restore("cursor", &record).unwrap();
        assert_eq!(fs::read_to_string(&live).unwrap(), original);
    }

    #[test]
    fn test_restore_unknown_host_no_mutation() {
        let (temp, manager) = setup();
        let live = temp.path().join("mcp.json");
        fs::write(&live, "original").unwrap();
        let record = manager.backup("cursor", &live).unwrap();
        fs::write(&live, "changed").unwrap();

        let result = manager.restore("emacs", &record);
        assert!(matches!(result, Err(Error::InvalidHost { .. })));
        // live file untouched by the failed restore
        assert_eq!(fs::read_to_string(&live).unwrap(), "changed");
    }

    #[test]
    fn test_backup_missing_file_is_error() {
        let (temp, manager) = setup();
        let result = manager.backup("cursor", &temp.path().join("missing.json"));
        assert!(result.is_err());
    }
}
