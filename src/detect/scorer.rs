//! Weighted indicator scoring for a single directory.
//!
//! The scorer is a pure function of filesystem state: it evaluates every
//! project indicator against a directory, accumulates matched weights into
//! a confidence score, and picks the heaviest indicator's type as the
//! primary type. A directory with no matches is not a project.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::probe::FileProbe;

use super::indicators::{
    IndicatorRegistry, ProjectType, IGNORED_DIRECTORIES, NORMALIZATION_WEIGHT,
};

/// A directory classified as a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCandidate {
    /// Path relative to the scanned root (`"."` for the root itself), or
    /// the declared path for workspace-descriptor entries
    pub path: String,

    /// Canonicalized location on disk
    pub absolute_path: PathBuf,

    /// Declared manifest name, or the directory's base name
    pub name: String,

    /// Type of the heaviest matched indicator
    pub primary_type: ProjectType,

    /// Normalized score, 0–100
    pub confidence: u8,

    /// Patterns that matched, in registry order
    pub matched_indicators: Vec<String>,

    /// Files under the directory, ignore set excluded
    pub file_count: usize,

    /// True only for candidates reached through an explicit folder
    /// reference pointing outside the scanned root
    pub is_external: bool,
}

impl ProjectCandidate {
    /// Merge another candidate's matched indicators into this one,
    /// preserving order and skipping duplicates. Used by dedup when a
    /// convention-declared candidate absorbs a scan-discovered one.
    pub fn merge_indicators(&mut self, other: &ProjectCandidate) {
        for pattern in &other.matched_indicators {
            if !self.matched_indicators.contains(pattern) {
                self.matched_indicators.push(pattern.clone());
            }
        }
    }
}

/// Scores directories against an injected indicator registry.
pub struct ProjectScorer {
    registry: Arc<IndicatorRegistry>,
    probe: Arc<dyn FileProbe>,
}

impl ProjectScorer {
    pub fn new(registry: Arc<IndicatorRegistry>, probe: Arc<dyn FileProbe>) -> Self {
        Self { registry, probe }
    }

    /// Score a directory. Returns `None` when no indicator matches.
    ///
    /// Individual probe failures count as non-matches; they never abort
    /// the scoring of the remaining indicators.
    pub async fn score(&self, dir: &Path, rel_path: &str) -> Option<ProjectCandidate> {
        let mut total_weight = 0u32;
        let mut matched = Vec::new();
        let mut primary: Option<(&'static str, ProjectType, u32)> = None;

        for indicator in self.registry.projects.iter() {
            if !self.probe.exists(indicator.pattern, dir).await {
                continue;
            }

            trace!(
                dir = %dir.display(),
                pattern = indicator.pattern,
                weight = indicator.weight,
                "Indicator matched"
            );

            total_weight += indicator.weight;
            matched.push(indicator.pattern.to_string());

            // Strictly-greater keeps the first indicator in registry
            // order as the winner among equal weights.
            let beats_current = primary.map(|(_, _, w)| indicator.weight > w).unwrap_or(true);
            if beats_current {
                primary = Some((indicator.pattern, indicator.project_type, indicator.weight));
            }
        }

        let (_, primary_type, _) = primary?;

        let confidence = (total_weight * 100 / NORMALIZATION_WEIGHT).min(100) as u8;
        let absolute_path = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let name = self
            .extract_name(primary_type, dir)
            .await
            .unwrap_or_else(|| directory_name(&absolute_path, rel_path));
        let file_count = self.probe.count_files(dir, IGNORED_DIRECTORIES).await;

        debug!(
            dir = %dir.display(),
            name = %name,
            project_type = %primary_type,
            confidence,
            "Scored project candidate"
        );

        Some(ProjectCandidate {
            path: rel_path.to_string(),
            absolute_path,
            name,
            primary_type,
            confidence,
            matched_indicators: matched,
            file_count,
            is_external: false,
        })
    }

    /// Read the declared name from the primary manifest, when the type
    /// has one. Malformed manifests fall back to the directory name.
    async fn extract_name(&self, project_type: ProjectType, dir: &Path) -> Option<String> {
        let name = match project_type {
            ProjectType::Node
            | ProjectType::NextJs
            | ProjectType::Angular
            | ProjectType::Vue
            | ProjectType::Svelte
            | ProjectType::TypeScript => self.json_name(&dir.join("package.json"), false).await,
            ProjectType::Php => self.json_name(&dir.join("composer.json"), true).await,
            ProjectType::Rust => self.cargo_name(&dir.join("Cargo.toml")).await,
            ProjectType::Go => self.go_module_name(&dir.join("go.mod")).await,
            ProjectType::Python => self.python_name(&dir.join("pyproject.toml")).await,
            _ => None,
        };

        name.filter(|n| !n.is_empty())
    }

    async fn json_name(&self, path: &Path, strip_vendor: bool) -> Option<String> {
        let content = self.probe.read_to_string(path).await.ok()?;
        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Manifest is not valid JSON");
                return None;
            }
        };

        let name = value.get("name")?.as_str()?;
        if strip_vendor {
            // Composer names are "vendor/package"; keep the package part.
            Some(name.rsplit('/').next().unwrap_or(name).to_string())
        } else {
            Some(name.to_string())
        }
    }

    async fn cargo_name(&self, path: &Path) -> Option<String> {
        let content = self.probe.read_to_string(path).await.ok()?;
        let value: toml::Value = match content.parse() {
            Ok(v) => v,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Manifest is not valid TOML");
                return None;
            }
        };

        value
            .get("package")?
            .get("name")?
            .as_str()
            .map(|s| s.to_string())
    }

    async fn go_module_name(&self, path: &Path) -> Option<String> {
        let content = self.probe.read_to_string(path).await.ok()?;
        let module = content
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix("module "))?;

        // Module paths look like "github.com/org/project"; the tail is
        // the human-facing name.
        Some(module.trim().rsplit('/').next().unwrap_or(module).to_string())
    }

    async fn python_name(&self, path: &Path) -> Option<String> {
        let content = self.probe.read_to_string(path).await.ok()?;
        let value: toml::Value = match content.parse() {
            Ok(v) => v,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Manifest is not valid TOML");
                return None;
            }
        };

        let project_name = value
            .get("project")
            .and_then(|p| p.get("name"))
            .and_then(|n| n.as_str());

        let poetry_name = || {
            value
                .get("tool")
                .and_then(|t| t.get("poetry"))
                .and_then(|p| p.get("name"))
                .and_then(|n| n.as_str())
        };

        project_name.or_else(poetry_name).map(|s| s.to_string())
    }
}

/// Base name of the scored directory, with the relative label as a last
/// resort for paths without a final component.
fn directory_name(absolute_path: &Path, rel_path: &str) -> String {
    absolute_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| rel_path.to_string())
}
