//! Generated workspace settings.
//!
//! Turns a detection result into the persisted settings document under
//! `.mcpscout/settings.json`: the workspace shape plus one MCP server
//! entry per discovered project. Writes are atomic (temp file + rename)
//! so a crashed run never leaves a half-written settings file behind.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::detect::{WorkspaceDetectionResult, WorkspaceKind, WorkspaceStructure};

const SETTINGS_FILE: &str = "settings.json";
const SETTINGS_VERSION: u32 = 1;

/// Persisted settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub workspace: WorkspaceSection,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSection {
    pub is_workspace: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_type: Option<WorkspaceKind>,
    pub structure: WorkspaceStructure,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub path: String,
    pub project_type: crate::detect::ProjectType,
    pub confidence: u8,
    #[serde(default)]
    pub is_external: bool,
    pub server: ServerEntry,
}

/// MCP server wiring for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerEntry {
    pub id: String,
    pub command: String,
    pub args: Vec<String>,
}

impl WorkspaceSettings {
    /// Build the settings document from a detection result.
    pub fn from_detection(result: &WorkspaceDetectionResult) -> Self {
        let projects = result
            .projects
            .iter()
            .map(|candidate| {
                let server_id = slugify(&candidate.name);
                ProjectEntry {
                    name: candidate.name.clone(),
                    path: candidate.path.clone(),
                    project_type: candidate.primary_type,
                    confidence: candidate.confidence,
                    is_external: candidate.is_external,
                    server: ServerEntry {
                        id: server_id,
                        command: candidate.primary_type.server_runtime().to_string(),
                        args: vec![
                            format!(
                                ".mcpscout/servers/{}",
                                candidate.primary_type.server_template()
                            ),
                            "--project".to_string(),
                            candidate.path.clone(),
                        ],
                    },
                }
            })
            .collect();

        Self {
            version: SETTINGS_VERSION,
            generated_at: Utc::now(),
            workspace: WorkspaceSection {
                is_workspace: result.is_workspace,
                workspace_type: result.workspace_type,
                structure: result.structure,
                package_patterns: result.package_patterns.clone(),
            },
            projects,
        }
    }

    pub fn settings_path(root: &Path) -> PathBuf {
        Config::tool_dir(root).join(SETTINGS_FILE)
    }

    pub fn exists(root: &Path) -> bool {
        Self::settings_path(root).exists()
    }

    /// Load settings previously written for `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::settings_path(root);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {:?}", path))
    }

    /// Save settings using atomic file operations.
    pub fn save(&self, root: &Path) -> Result<PathBuf> {
        let settings_dir = Config::tool_dir(root);
        let settings_path = Self::settings_path(root);

        fs::create_dir_all(&settings_dir)
            .with_context(|| format!("Failed to create settings directory {:?}", settings_dir))?;

        let content =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize settings")?;

        // Write to a temporary file first, then rename for atomicity
        let temp_path = settings_path.with_extension("json.tmp");

        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file {:?}", temp_path))?;

        file.write_all(content.as_bytes())
            .with_context(|| "Failed to write settings content")?;

        file.sync_all()
            .with_context(|| "Failed to sync settings file")?;

        fs::rename(&temp_path, &settings_path)
            .with_context(|| format!("Failed to rename temp file to {:?}", settings_path))?;

        debug!("Saved settings to {:?}", settings_path);
        Ok(settings_path)
    }
}

/// Lowercase alphanumeric identifier for server ids.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug
    }
}
