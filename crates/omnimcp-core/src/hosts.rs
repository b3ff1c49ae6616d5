//! Host registry data — maps host slugs to their native config specs.
//!
//! This is the single source of truth for how each host stores MCP server
//! definitions: file paths, root keys, field sets, field-name translations,
//! and semantic rules.
//!
//! # Adding a host
//!
//! 1. Add a `fn <slug>_spec() -> HostSpec` function below.
//! 2. Add the slug to the `match` in [`host_spec`].
//! 3. Add the slug to [`SUPPORTED_HOSTS`].

use omnimcp_meta::{
    ConfigFormat, FieldMapping, FieldSet, HostPaths, HostSpec, HostVariant, ValidationRules,
};

/// All supported host slugs, in alphabetical order.
pub const SUPPORTED_HOSTS: &[&str] = &[
    "claude-code",
    "claude-desktop",
    "codex",
    "cursor",
    "gemini",
    "vscode",
    "vscode-insiders",
    "windsurf",
];

/// The canonical fields every host must support.
pub const UNIVERSAL_FIELDS: &[&str] = &["command", "args", "env", "url", "headers"];

/// Look up the host spec for a slug. Returns `None` for unknown slugs;
/// the registry turns that into an `UnknownHost` error.
pub fn host_spec(slug: &str) -> Option<HostSpec> {
    match slug {
        "claude-code" => Some(claude_code_spec()),
        "claude-desktop" => Some(claude_desktop_spec()),
        "codex" => Some(codex_spec()),
        "cursor" => Some(cursor_spec()),
        "gemini" => Some(gemini_spec()),
        "vscode" => Some(vscode_spec(VSCODE_STABLE)),
        "vscode-insiders" => Some(vscode_spec(VSCODE_INSIDERS)),
        "windsurf" => Some(windsurf_spec()),
        _ => None,
    }
}

// ===========================================================================
// Per-host specs
// ===========================================================================

// ---------------------------------------------------------------------------
// Claude Code (CLI)
// ---------------------------------------------------------------------------

fn claude_code_spec() -> HostSpec {
    HostSpec {
        slug: "claude-code",
        display_name: "Claude Code",
        config_key: "mcpServers",
        format: ConfigFormat::Json,
        // ~/.claude.json holds much more than MCP servers; sibling keys
        // must survive every write.
        config_path: HostPaths::uniform(".claude.json"),
        probe_dir: HostPaths::uniform(".claude"),
        fields: FieldSet::new(&["command", "args", "env", "url", "headers", "cwd"]),
        mapping: None,
        rules: ValidationRules {
            requires_remote: &["headers"],
            mutually_exclusive: &[],
        },
    }
}

// ---------------------------------------------------------------------------
// Claude Desktop (GUI app)
// ---------------------------------------------------------------------------

fn claude_desktop_spec() -> HostSpec {
    HostSpec {
        slug: "claude-desktop",
        display_name: "Claude Desktop",
        config_key: "mcpServers",
        format: ConfigFormat::Json,
        config_path: HostPaths {
            macos: "Library/Application Support/Claude/claude_desktop_config.json",
            linux: ".config/Claude/claude_desktop_config.json",
            windows: "AppData/Roaming/Claude/claude_desktop_config.json",
        },
        probe_dir: HostPaths {
            macos: "Library/Application Support/Claude",
            linux: ".config/Claude",
            windows: "AppData/Roaming/Claude",
        },
        fields: FieldSet::new(&["command", "args", "env", "url", "headers"]),
        mapping: None,
        rules: ValidationRules {
            requires_remote: &["headers"],
            mutually_exclusive: &[],
        },
    }
}

// ---------------------------------------------------------------------------
// Codex CLI — TOML config with nested tables
// ---------------------------------------------------------------------------

fn codex_spec() -> HostSpec {
    HostSpec {
        slug: "codex",
        display_name: "Codex CLI",
        config_key: "mcp_servers",
        format: ConfigFormat::Toml,
        // config.toml also carries model settings and feature-flag tables;
        // those sections are preserved verbatim on write.
        config_path: HostPaths::uniform(".codex/config.toml"),
        probe_dir: HostPaths::uniform(".codex"),
        fields: FieldSet::new(&[
            "command",
            "args",
            "env",
            "url",
            "headers",
            "cwd",
            "bearer_token_env_var",
            "startup_timeout_sec",
        ]),
        mapping: Some(FieldMapping::new(&[("headers", "http_headers")])),
        rules: ValidationRules {
            requires_remote: &["headers", "bearer_token_env_var"],
            mutually_exclusive: &[],
        },
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

fn cursor_spec() -> HostSpec {
    HostSpec {
        slug: "cursor",
        display_name: "Cursor",
        config_key: "mcpServers",
        format: ConfigFormat::Json,
        // Dedicated file: mcp.json contains only the servers table.
        config_path: HostPaths::uniform(".cursor/mcp.json"),
        probe_dir: HostPaths::uniform(".cursor"),
        fields: FieldSet::new(&["command", "args", "env", "url", "headers", "cwd"]),
        mapping: None,
        rules: ValidationRules {
            requires_remote: &["headers"],
            mutually_exclusive: &[],
        },
    }
}

// ---------------------------------------------------------------------------
// Gemini CLI
// ---------------------------------------------------------------------------

fn gemini_spec() -> HostSpec {
    HostSpec {
        slug: "gemini",
        display_name: "Gemini CLI",
        config_key: "mcpServers",
        format: ConfigFormat::Json,
        // settings.json has other keys too
        config_path: HostPaths::uniform(".gemini/settings.json"),
        probe_dir: HostPaths::uniform(".gemini"),
        fields: FieldSet::new(&[
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
        ]),
        mapping: Some(FieldMapping::new(&[
            ("url", "httpUrl"),
            ("include_tools", "includeTools"),
            ("exclude_tools", "excludeTools"),
        ])),
        rules: ValidationRules {
            requires_remote: &["headers"],
            // trust bypasses tool confirmations entirely, so allow/deny
            // lists are meaningless alongside it.
            mutually_exclusive: &[("trust", "include_tools"), ("trust", "exclude_tools")],
        },
    }
}

// ---------------------------------------------------------------------------
// VS Code (+ Insiders variant)
// ---------------------------------------------------------------------------

const VSCODE_STABLE: HostVariant = HostVariant {
    slug: "vscode",
    display_name: "VS Code",
    config_path: HostPaths {
        macos: "Library/Application Support/Code/User/mcp.json",
        linux: ".config/Code/User/mcp.json",
        windows: "AppData/Roaming/Code/User/mcp.json",
    },
    probe_dir: HostPaths {
        macos: "Library/Application Support/Code",
        linux: ".config/Code",
        windows: "AppData/Roaming/Code",
    },
};

const VSCODE_INSIDERS: HostVariant = HostVariant {
    slug: "vscode-insiders",
    display_name: "VS Code Insiders",
    config_path: HostPaths {
        macos: "Library/Application Support/Code - Insiders/User/mcp.json",
        linux: ".config/Code - Insiders/User/mcp.json",
        windows: "AppData/Roaming/Code - Insiders/User/mcp.json",
    },
    probe_dir: HostPaths {
        macos: "Library/Application Support/Code - Insiders",
        linux: ".config/Code - Insiders",
        windows: "AppData/Roaming/Code - Insiders",
    },
};

/// Both VS Code flavors share one spec; the variant descriptor only moves
/// the file paths and the display name, never the adapter behavior.
fn vscode_spec(variant: HostVariant) -> HostSpec {
    HostSpec {
        slug: variant.slug,
        display_name: variant.display_name,
        config_key: "servers", // VS Code uses "servers", NOT "mcpServers"
        format: ConfigFormat::Json,
        config_path: variant.config_path,
        probe_dir: variant.probe_dir,
        fields: FieldSet::new(&["command", "args", "env", "url", "headers", "cwd"]),
        mapping: None,
        rules: ValidationRules {
            requires_remote: &["headers"],
            mutually_exclusive: &[],
        },
    }
}

// ---------------------------------------------------------------------------
// Windsurf
// ---------------------------------------------------------------------------

fn windsurf_spec() -> HostSpec {
    HostSpec {
        slug: "windsurf",
        display_name: "Windsurf",
        config_key: "mcpServers",
        format: ConfigFormat::Json,
        config_path: HostPaths::uniform(".codeium/windsurf/mcp_config.json"),
        probe_dir: HostPaths::uniform(".codeium/windsurf"),
        fields: FieldSet::new(&["command", "args", "env", "url", "headers"]),
        mapping: Some(FieldMapping::new(&[("url", "serverUrl")])),
        rules: ValidationRules {
            requires_remote: &["headers"],
            mutually_exclusive: &[],
        },
    }
}

// ===========================================================================
// Tests
// ===========================================================================
