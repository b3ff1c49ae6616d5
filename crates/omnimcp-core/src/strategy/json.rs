//! JSON strategy — read-modify-write with sibling-key preservation.

use crate::backup::BackupManager;
use crate::error::{Error, Result};
use crate::strategy::Strategy;
use omnimcp_fs::{read_text, write_atomic};
use omnimcp_meta::{HostConfiguration, HostSpec};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Strategy for hosts whose config file is JSON.
///
/// The file is always loaded in full and only the entries under the
/// recognized root key are replaced; for dedicated files (e.g. Cursor's
/// `mcp.json`) there simply are no sibling keys to preserve.
pub struct JsonStrategy {
    spec: HostSpec,
    base_dir: PathBuf,
    backups: BackupManager,
}

impl JsonStrategy {
    pub fn new(spec: HostSpec, base_dir: PathBuf, backups: BackupManager) -> Self {
        Self {
            spec,
            base_dir,
            backups,
        }
    }

    /// Load the full document, treating a missing or empty file as `{}`.
    fn load_document(&self, path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = read_text(path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&content).map_err(|e| Error::Schema {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Schema {
                path: path.to_path_buf(),
                message: "top-level value must be a JSON object".into(),
            }),
        }
    }

    fn native_url_field(&self) -> &'static str {
        self.spec
            .mapping
            .and_then(|m| m.native_for("url"))
            .unwrap_or("url")
    }
}

impl Strategy for JsonStrategy {
    fn config_path(&self) -> PathBuf {
        self.base_dir.join(self.spec.config_path.resolve())
    }

    fn config_key(&self) -> &'static str {
        self.spec.config_key
    }

    fn is_host_available(&self) -> bool {
        self.base_dir.join(self.spec.probe_dir.resolve()).is_dir()
    }

    fn read_configuration(&self) -> Result<HostConfiguration> {
        let path = self.config_path();
        let mut config = HostConfiguration::empty(self.spec.slug, self.spec.config_key);

        let doc = self.load_document(&path)?;
        if let Some(servers) = doc.get(self.spec.config_key) {
            let servers = servers.as_object().ok_or_else(|| Error::Schema {
                path: path.clone(),
                message: format!("`{}` must be a JSON object", self.spec.config_key),
            })?;
            for (name, entry) in servers {
                config.insert(name.clone(), entry.clone());
            }
        }
        Ok(config)
    }

    fn write_configuration(&self, config: &HostConfiguration, skip_backup: bool) -> Result<()> {
        let path = self.config_path();

        // Parse errors abort before any backup or write is attempted.
        let mut doc = self.load_document(&path)?;

        if path.exists() && !skip_backup {
            self.backups.backup(self.spec.slug, &path)?;
        }

        let servers = doc
            .entry(self.spec.config_key)
            .or_insert_with(|| Value::Object(Map::new()));
        let servers = servers.as_object_mut().ok_or_else(|| Error::Schema {
            path: path.clone(),
            message: format!("`{}` must be a JSON object", self.spec.config_key),
        })?;

        for (name, entry) in &config.servers {
            servers.insert(name.clone(), entry.clone());
        }

        let content = serde_json::to_string_pretty(&doc)?;
        write_atomic(&path, content.as_bytes())?;

        tracing::debug!(
            host = self.spec.slug,
            path = %path.display(),
            entries = config.servers.len(),
            "wrote host configuration"
        );
        Ok(())
    }

    fn remove_server(&self, name: &str) -> Result<bool> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(false);
        }

        let mut doc = self.load_document(&path)?;
        let removed = doc
            .get_mut(self.spec.config_key)
            .and_then(Value::as_object_mut)
            .and_then(|servers| servers.remove(name))
            .is_some();

        if removed {
            self.backups.backup(self.spec.slug, &path)?;
            let content = serde_json::to_string_pretty(&doc)?;
            write_atomic(&path, content.as_bytes())?;
        }
        Ok(removed)
    }

    fn validate_server_config(&self, config: &HostConfiguration) -> Result<()> {
        let url_field = self.native_url_field();
        let mut violations = Vec::new();

        for (name, entry) in &config.servers {
            let Some(obj) = entry.as_object() else {
                violations.push(format!("server `{name}` is not a JSON object"));
                continue;
            };
            if !obj.contains_key("command") && !obj.contains_key(url_field) {
                violations.push(format!(
                    "server `{name}` has neither `command` nor `{url_field}`"
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation {
                host: self.spec.slug.to_string(),
                violations,
            })
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
