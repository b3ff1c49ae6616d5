//! Canonical server record and per-host configuration snapshot.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// The canonical (Omni) MCP server record.
///
/// A superset of every field any supported host recognizes, with one
/// optional slot per field. This is the lingua franca between hosts: every
/// source representation is lifted into a `ServerConfig` and every native
/// entry is produced from one. Immutable once constructed.
///
/// Exactly one transport may be set: local (`command`, with `args`/`env`/
/// `cwd`) or remote (`url`, with `headers`). The Adapter layer enforces
/// this before any write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Local transport: executable to launch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Arguments for `command`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Environment variables for the launched process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,

    /// Working directory for the launched process.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Remote transport: server endpoint URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// HTTP headers sent to a remote server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Request timeout in milliseconds (Gemini).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    /// Trust the server, bypassing per-call tool confirmations (Gemini).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<bool>,

    /// Tool allow-list (Gemini).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_tools: Option<Vec<String>>,

    /// Tool deny-list (Gemini).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_tools: Option<Vec<String>>,

    /// Name of an environment variable holding a bearer token for a remote
    /// server (Codex). Only meaningful with `url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token_env_var: Option<String>,

    /// Seconds to wait for server startup (Codex).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup_timeout_sec: Option<u64>,
}

impl ServerConfig {
    /// Canonical field names, in a stable order. The first five are the
    /// universal fields every host supports.
    pub const FIELD_NAMES: &'static [&'static str] = &[
        "command",
        "args",
        "env",
        "url",
        "headers",
        "cwd",
        "timeout",
        "trust",
        "include_tools",
        "exclude_tools",
        "bearer_token_env_var",
        "startup_timeout_sec",
    ];

    /// Project the record into a JSON map keyed by canonical field names.
    /// `None` slots are simply absent.
    pub fn to_field_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(v) = &self.command {
            map.insert("command".into(), json!(v));
        }
        if let Some(v) = &self.args {
            map.insert("args".into(), json!(v));
        }
        if let Some(v) = &self.env {
            map.insert("env".into(), json!(v));
        }
        if let Some(v) = &self.cwd {
            map.insert("cwd".into(), json!(v));
        }
        if let Some(v) = &self.url {
            map.insert("url".into(), json!(v));
        }
        if let Some(v) = &self.headers {
            map.insert("headers".into(), json!(v));
        }
        if let Some(v) = &self.timeout {
            map.insert("timeout".into(), json!(v));
        }
        if let Some(v) = &self.trust {
            map.insert("trust".into(), json!(v));
        }
        if let Some(v) = &self.include_tools {
            map.insert("include_tools".into(), json!(v));
        }
        if let Some(v) = &self.exclude_tools {
            map.insert("exclude_tools".into(), json!(v));
        }
        if let Some(v) = &self.bearer_token_env_var {
            map.insert("bearer_token_env_var".into(), json!(v));
        }
        if let Some(v) = &self.startup_timeout_sec {
            map.insert("startup_timeout_sec".into(), json!(v));
        }
        map
    }

    /// Rebuild a record from a JSON map keyed by canonical field names.
    ///
    /// Unrecognized keys are ignored; values of the wrong JSON type are
    /// treated as absent. The inverse of [`to_field_map`](Self::to_field_map)
    /// on well-typed maps.
    pub fn from_field_map(map: &Map<String, Value>) -> Self {
        Self {
            command: string_field(map, "command"),
            args: string_list_field(map, "args"),
            env: string_map_field(map, "env"),
            cwd: string_field(map, "cwd"),
            url: string_field(map, "url"),
            headers: string_map_field(map, "headers"),
            timeout: u64_field(map, "timeout"),
            trust: map.get("trust").and_then(Value::as_bool),
            include_tools: string_list_field(map, "include_tools"),
            exclude_tools: string_list_field(map, "exclude_tools"),
            bearer_token_env_var: string_field(map, "bearer_token_env_var"),
            startup_timeout_sec: u64_field(map, "startup_timeout_sec"),
        }
    }

    /// Whether a local transport is configured.
    pub fn has_local_transport(&self) -> bool {
        self.command.is_some()
    }

    /// Whether a remote transport is configured.
    pub fn has_remote_transport(&self) -> bool {
        self.url.is_some()
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(String::from)
}

fn u64_field(map: &Map<String, Value>, key: &str) -> Option<u64> {
    map.get(key).and_then(Value::as_u64)
}

fn string_list_field(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    map.get(key).and_then(Value::as_array).map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

fn string_map_field(map: &Map<String, Value>, key: &str) -> Option<BTreeMap<String, String>> {
    map.get(key).and_then(Value::as_object).map(|obj| {
        obj.iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
            .collect()
    })
}

/// A snapshot of one host's server table: server name → native JSON entry,
/// tagged with the host slug and the file's recognized root key.
///
/// Server names are unique; insertion order is irrelevant, so entries live
/// in a `BTreeMap`.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfiguration {
    pub host: String,
    pub config_key: String,
    pub servers: BTreeMap<String, Value>,
}

impl HostConfiguration {
    /// An empty configuration for a host, used when its file does not exist.
    pub fn empty(host: impl Into<String>, config_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            config_key: config_key.into(),
            servers: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Insert or replace a native server entry.
    pub fn insert(&mut self, name: impl Into<String>, entry: Value) {
        self.servers.insert(name.into(), entry);
    }
}
