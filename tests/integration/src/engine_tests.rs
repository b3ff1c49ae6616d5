//! End-to-end tests for the configure and sync flows.

use omnimcp_core::{Registry, SyncEngine, SyncSource};
use omnimcp_meta::{HostConfiguration, ServerConfig};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

fn registry(temp: &TempDir) -> Registry {
    Registry::with_roots(temp.path().to_path_buf(), temp.path().join("backups"))
}

fn environment(servers: &[(&str, ServerConfig)]) -> SyncSource {
    SyncSource::Environment {
        name: "default".into(),
        servers: servers
            .iter()
            .map(|(n, c)| (n.to_string(), c.clone()))
            .collect(),
    }
}

fn python_server() -> ServerConfig {
    ServerConfig {
        command: Some("python".into()),
        args: Some(vec!["server.py".into()]),
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Configure flow: strict serialize + single-host write
// ---------------------------------------------------------------------------

#[test]
fn configure_writes_native_entry_under_root_key() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let record = reg.resolve("cursor").unwrap();

    let native = record.adapter.serialize_strict(&python_server()).unwrap();
    let mut config = HostConfiguration::empty("cursor", record.spec.config_key);
    config.insert("fetch", Value::Object(native));
    record.strategy.write_configuration(&config, false).unwrap();

    let doc: Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join(".cursor/mcp.json")).unwrap(),
    )
    .unwrap();
    let entry = &doc["mcpServers"]["fetch"];
    assert_eq!(entry["command"], "python");
    assert_eq!(entry["args"][0], "server.py");
    assert!(entry.get("url").is_none());
    assert_eq!(entry.as_object().unwrap().len(), 2);
}

#[test]
fn configure_rejects_remote_only_field_before_any_write() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let record = reg.resolve("codex").unwrap();

    // bearer token indirection under a local transport
    let config = ServerConfig {
        bearer_token_env_var: Some("API_TOKEN".into()),
        ..python_server()
    };
    assert!(record.adapter.serialize_strict(&config).is_err());
    assert!(!record.strategy.config_path().exists());
}

#[test]
fn configure_rejects_unsupported_field_loudly() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let record = reg.resolve("windsurf").unwrap();

    let config = ServerConfig {
        timeout: Some(30_000),
        ..python_server()
    };
    let err = record.adapter.serialize_strict(&config).unwrap_err();
    assert!(err.to_string().contains("timeout"));
}

// ---------------------------------------------------------------------------
// Sync flow: fan-out across heterogeneous destinations
// ---------------------------------------------------------------------------

#[test]
fn sync_fans_out_across_json_and_toml_hosts() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    let remote = ServerConfig {
        url: Some("https://example.com/mcp".into()),
        headers: Some(BTreeMap::from([(
            "Authorization".into(),
            "Bearer token".into(),
        )])),
        ..Default::default()
    };
    let source = environment(&[("fetch", python_server()), ("api", remote)]);
    let report = engine
        .sync(&source, &["claude-code", "gemini", "codex", "vscode"])
        .unwrap();
    assert!(report.is_success());
    assert_eq!(report.destinations.len(), 4);

    // Every destination got both servers, each under its own root key.
    let claude: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join(".claude.json")).unwrap())
            .unwrap();
    assert!(claude["mcpServers"]["fetch"].is_object());
    assert_eq!(claude["mcpServers"]["api"]["url"], "https://example.com/mcp");

    let gemini: Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join(".gemini/settings.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(gemini["mcpServers"]["api"]["httpUrl"], "https://example.com/mcp");
    assert!(gemini["mcpServers"]["api"].get("url").is_none());

    let vscode: Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join(".config/Code/User/mcp.json")).unwrap(),
    )
    .unwrap();
    assert!(vscode["servers"]["fetch"].is_object());
    assert!(vscode.get("mcpServers").is_none());

    let codex = fs::read_to_string(temp.path().join(".codex/config.toml")).unwrap();
    assert!(codex.contains("[mcp_servers.fetch]"));
    assert!(codex.contains("[mcp_servers.api]"));
    assert!(codex.contains("http_headers"));
}

#[test]
fn sync_between_vscode_variants() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    engine
        .sync(&environment(&[("fetch", python_server())]), &["vscode"])
        .unwrap();
    let report = engine
        .sync(&SyncSource::Host("vscode".into()), &["vscode-insiders"])
        .unwrap();
    assert!(report.is_success());

    let insiders: Value = serde_json::from_str(
        &fs::read_to_string(
            temp.path()
                .join(".config/Code - Insiders/User/mcp.json"),
        )
        .unwrap(),
    )
    .unwrap();
    assert_eq!(insiders["servers"]["fetch"]["command"], "python");
}

#[test]
fn sync_from_toml_host_recovers_canonical_fields() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    // Seed codex with a remote server whose headers use the native
    // http_headers spelling.
    let dir = temp.path().join(".codex");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        r#"[mcp_servers.api]
url = "https://example.com/mcp"
http_headers = { Authorization = "Bearer token" }
"#,
    )
    .unwrap();

    let report = engine
        .sync(&SyncSource::Host("codex".into()), &["claude-code"])
        .unwrap();
    assert!(report.is_success());

    let claude: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join(".claude.json")).unwrap())
            .unwrap();
    assert_eq!(
        claude["mcpServers"]["api"]["headers"]["Authorization"],
        "Bearer token"
    );
}

#[test]
fn sync_report_isolates_failing_destination() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    // trust + include_tools violates gemini's rules; other hosts just
    // drop both fields.
    let config = ServerConfig {
        trust: Some(true),
        include_tools: Some(vec!["fetch".into()]),
        ..python_server()
    };
    let report = engine
        .sync(&environment(&[("s", config)]), &["gemini", "cursor", "windsurf"])
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.result_for("gemini").unwrap().failures.len(), 1);
    assert!(report.result_for("cursor").unwrap().is_success());
    assert!(report.result_for("windsurf").unwrap().is_success());
    assert!(!temp.path().join(".gemini/settings.json").exists());
}

#[test]
fn sync_overwrites_same_name_and_keeps_others() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    // Destination already has a user-managed server plus an older copy of
    // the synced one.
    let cursor_dir = temp.path().join(".cursor");
    fs::create_dir_all(&cursor_dir).unwrap();
    fs::write(
        cursor_dir.join("mcp.json"),
        serde_json::to_string_pretty(&json!({
            "mcpServers": {
                "user-server": { "command": "user" },
                "fetch": { "command": "stale" }
            }
        }))
        .unwrap(),
    )
    .unwrap();

    engine
        .sync(&environment(&[("fetch", python_server())]), &["cursor"])
        .unwrap();

    let doc: Value =
        serde_json::from_str(&fs::read_to_string(cursor_dir.join("mcp.json")).unwrap()).unwrap();
    assert_eq!(doc["mcpServers"]["fetch"]["command"], "python");
    assert_eq!(doc["mcpServers"]["user-server"]["command"], "user");
}
