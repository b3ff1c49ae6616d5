//! End-to-end tests for backup creation during writes and restore.

use omnimcp_core::{Registry, SyncEngine, SyncSource};
use omnimcp_meta::ServerConfig;
use pretty_assertions::assert_eq;
use serde_json::Value;
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

#[test]
fn first_write_creates_no_backup() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    engine
        .sync(&environment(&[("fetch", python_server())]), &["cursor"])
        .unwrap();

    // Nothing existed to snapshot.
    assert!(reg.backups().list_backups("cursor").unwrap().is_empty());
}

#[test]
fn each_overwrite_adds_one_backup() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);
    let source = environment(&[("fetch", python_server())]);

    engine.sync(&source, &["cursor"]).unwrap();
    engine.sync(&source, &["cursor"]).unwrap();
    engine.sync(&source, &["cursor"]).unwrap();

    assert_eq!(reg.backups().list_backups("cursor").unwrap().len(), 2);
}

#[test]
fn backups_are_tracked_per_host() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);
    let source = environment(&[("fetch", python_server())]);

    engine.sync(&source, &["cursor", "windsurf"]).unwrap();
    engine.sync(&source, &["cursor", "windsurf"]).unwrap();
    engine.sync(&source, &["cursor"]).unwrap();

    assert_eq!(reg.backups().list_backups("cursor").unwrap().len(), 2);
    assert_eq!(reg.backups().list_backups("windsurf").unwrap().len(), 1);
    assert!(reg.backups().list_backups("gemini").unwrap().is_empty());
}

#[test]
fn restore_newest_backup_undoes_last_sync() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    engine
        .sync(&environment(&[("fetch", python_server())]), &["cursor"])
        .unwrap();
    let before = fs::read_to_string(temp.path().join(".cursor/mcp.json")).unwrap();

    let second = ServerConfig {
        command: Some("node".into()),
        ..Default::default()
    };
    engine
        .sync(&environment(&[("other", second)]), &["cursor"])
        .unwrap();

    let backups = reg.backups().list_backups("cursor").unwrap();
    assert_eq!(backups.len(), 1);
    reg.backups().restore("cursor", &backups[0]).unwrap();

    let restored = fs::read_to_string(temp.path().join(".cursor/mcp.json")).unwrap();
    assert_eq!(restored, before);
    let doc: Value = serde_json::from_str(&restored).unwrap();
    assert!(doc["mcpServers"].get("other").is_none());
}

#[test]
fn toml_host_backups_preserve_original_bytes() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    let dir = temp.path().join(".codex");
    fs::create_dir_all(&dir).unwrap();
    let original = "# Codex configuration\nmodel = \"o3\"\n";
    fs::write(dir.join("config.toml"), original).unwrap();

    engine
        .sync(&environment(&[("fetch", python_server())]), &["codex"])
        .unwrap();

    let backups = reg.backups().list_backups("codex").unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(
        fs::read_to_string(&backups[0].backup_path).unwrap(),
        original
    );

    reg.backups().restore("codex", &backups[0]).unwrap();
    assert_eq!(
        fs::read_to_string(dir.join("config.toml")).unwrap(),
        original
    );
}

#[test]
fn skip_backup_write_leaves_no_record() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let record = reg.resolve("windsurf").unwrap();

    let native = record.adapter.serialize(&python_server()).unwrap();
    let mut config = omnimcp_meta::HostConfiguration::empty(
        record.spec.slug,
        record.spec.config_key,
    );
    config.insert("fetch", Value::Object(native));
    record.strategy.write_configuration(&config, false).unwrap();

    let mut again = omnimcp_meta::HostConfiguration::empty(
        record.spec.slug,
        record.spec.config_key,
    );
    again.insert("fetch", serde_json::json!({ "command": "node" }));
    record.strategy.write_configuration(&again, true).unwrap();

    assert!(reg.backups().list_backups("windsurf").unwrap().is_empty());
}

#[test]
fn remove_server_snapshots_first() {
    let temp = TempDir::new().unwrap();
    let reg = registry(&temp);
    let engine = SyncEngine::new(&reg);

    engine
        .sync(&environment(&[("fetch", python_server())]), &["gemini"])
        .unwrap();
    let record = reg.resolve("gemini").unwrap();
    assert!(record.strategy.remove_server("fetch").unwrap());

    let backups = reg.backups().list_backups("gemini").unwrap();
    assert_eq!(backups.len(), 1);
    let snapshot: Value =
        serde_json::from_str(&fs::read_to_string(&backups[0].backup_path).unwrap()).unwrap();
    assert!(snapshot["mcpServers"]["fetch"].is_object());

    let live: Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join(".gemini/settings.json")).unwrap(),
    )
    .unwrap();
    assert!(live["mcpServers"].get("fetch").is_none());
}
