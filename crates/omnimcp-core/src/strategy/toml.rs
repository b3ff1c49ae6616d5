//! TOML strategy — in-place edits of a sectioned config document.
//!
//! Codex keeps its MCP servers in `[mcp_servers.<name>]` tables inside a
//! config file that also carries model settings and feature-flag blocks.
//! The document is edited with `toml_edit`, so comments, formatting, and
//! every non-server section survive a write verbatim.

use crate::backup::BackupManager;
use crate::error::{Error, Result};
use crate::strategy::Strategy;
use omnimcp_fs::{read_text, write_atomic};
use omnimcp_meta::{HostConfiguration, HostSpec};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use toml_edit::{Array, DocumentMut, InlineTable, Item, Table, Value as TomlValue};

pub struct TomlStrategy {
    spec: HostSpec,
    base_dir: PathBuf,
    backups: BackupManager,
}

impl TomlStrategy {
    pub fn new(spec: HostSpec, base_dir: PathBuf, backups: BackupManager) -> Self {
        Self {
            spec,
            base_dir,
            backups,
        }
    }

    fn load_document(&self, path: &Path) -> Result<DocumentMut> {
        if !path.exists() {
            return Ok(DocumentMut::new());
        }
        let content = read_text(path)?;
        content.parse::<DocumentMut>().map_err(|e| Error::Schema {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn native_url_field(&self) -> &'static str {
        self.spec
            .mapping
            .and_then(|m| m.native_for("url"))
            .unwrap_or("url")
    }

    fn write_document(&self, path: &Path, doc: &DocumentMut) -> Result<()> {
        write_atomic(path, doc.to_string().as_bytes())?;
        Ok(())
    }
}

impl Strategy for TomlStrategy {
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
        if let Some(item) = doc.get(self.spec.config_key) {
            let servers = item.as_table_like().ok_or_else(|| Error::Schema {
                path: path.clone(),
                message: format!("`{}` must be a table", self.spec.config_key),
            })?;
            for (name, entry) in servers.iter() {
                if let Some(value) = toml_item_to_json(entry) {
                    config.insert(name.to_string(), value);
                }
            }
        }
        Ok(config)
    }

    fn write_configuration(&self, config: &HostConfiguration, skip_backup: bool) -> Result<()> {
        let path = self.config_path();
        let mut doc = self.load_document(&path)?;

        if path.exists() && !skip_backup {
            self.backups.backup(self.spec.slug, &path)?;
        }

        let item = doc
            .as_table_mut()
            .entry(self.spec.config_key)
            .or_insert(Item::Table(Table::new()));
        let servers = item.as_table_mut().ok_or_else(|| Error::Schema {
            path: path.clone(),
            message: format!("`{}` must be a table", self.spec.config_key),
        })?;
        // Render entries as [mcp_servers.<name>] sections, not a bare header.
        servers.set_implicit(true);

        for (name, entry) in &config.servers {
            let obj = entry.as_object().ok_or_else(|| Error::Schema {
                path: path.clone(),
                message: format!("server `{name}` is not a table"),
            })?;
            servers.insert(name.as_str(), Item::Table(json_map_to_table(obj)));
        }

        self.write_document(&path, &doc)?;
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
            .and_then(Item::as_table_mut)
            .and_then(|servers| servers.remove(name))
            .is_some();

        if removed {
            self.backups.backup(self.spec.slug, &path)?;
            self.write_document(&path, &doc)?;
        }
        Ok(removed)
    }

    fn validate_server_config(&self, config: &HostConfiguration) -> Result<()> {
        let url_field = self.native_url_field();
        let mut violations = Vec::new();

        for (name, entry) in &config.servers {
            let Some(obj) = entry.as_object() else {
                violations.push(format!("server `{name}` is not a table"));
                continue;
            };
            if !obj.contains_key("command") && !obj.contains_key(url_field) {
                violations.push(format!(
                    "server `{name}` has neither `command` nor `{url_field}`"
                ));
            }
            // TOML cannot represent nulls anywhere in the entry.
            if obj.values().any(contains_null) {
                violations.push(format!("server `{name}` contains a null value"));
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

fn contains_null(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().any(contains_null),
        Value::Object(map) => map.values().any(contains_null),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// JSON <-> TOML conversion
// ---------------------------------------------------------------------------

/// Build a `[section]`-style table from a native JSON entry. Null values
/// are skipped; nested maps (env, headers) become inline tables.
fn json_map_to_table(map: &Map<String, Value>) -> Table {
    let mut table = Table::new();
    for (key, value) in map {
        if let Some(v) = json_to_toml_value(value) {
            table.insert(key.as_str(), Item::Value(v));
        }
    }
    table
}

fn json_to_toml_value(value: &Value) -> Option<TomlValue> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some((*b).into()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.into())
            } else {
                n.as_f64().map(TomlValue::from)
            }
        }
        Value::String(s) => Some(s.as_str().into()),
        Value::Array(items) => {
            let mut array = Array::new();
            for item in items {
                array.push(json_to_toml_value(item)?);
            }
            Some(TomlValue::Array(array))
        }
        Value::Object(map) => {
            let mut table = InlineTable::new();
            for (key, value) in map {
                table.insert(key.as_str(), json_to_toml_value(value)?);
            }
            Some(TomlValue::InlineTable(table))
        }
    }
}

fn toml_item_to_json(item: &Item) -> Option<Value> {
    match item {
        Item::Value(v) => Some(toml_value_to_json(v)),
        Item::Table(t) => Some(Value::Object(
            t.iter()
                .filter_map(|(k, i)| toml_item_to_json(i).map(|v| (k.to_string(), v)))
                .collect(),
        )),
        Item::ArrayOfTables(a) => Some(Value::Array(
            a.iter()
                .filter_map(|t| toml_item_to_json(&Item::Table(t.clone())))
                .collect(),
        )),
        Item::None => None,
    }
}

fn toml_value_to_json(value: &TomlValue) -> Value {
    match value {
        TomlValue::String(s) => Value::String(s.value().clone()),
        TomlValue::Integer(i) => Value::from(*i.value()),
        TomlValue::Float(f) => Value::from(*f.value()),
        TomlValue::Boolean(b) => Value::Bool(*b.value()),
        TomlValue::Datetime(d) => Value::String(d.value().to_string()),
        TomlValue::Array(items) => Value::Array(items.iter().map(toml_value_to_json).collect()),
        TomlValue::InlineTable(t) => Value::Object(
            t.iter()
                .map(|(k, v)| (k.to_string(), toml_value_to_json(v)))
                .collect(),
        ),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
