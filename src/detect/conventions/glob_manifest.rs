//! Conventions whose marker manifest carries the member list itself:
//! `pnpm-workspace.yaml`, `lerna.json`, `Cargo.toml` `[workspace]`, and
//! `go.work`.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::detect::indicators::WorkspaceKind;
use crate::detect::scorer::ProjectScorer;
use crate::probe::FileProbe;

use super::{score_members, ConventionAnalyzer, ConventionOutcome};

/// Lerna treats a missing `packages` field as `["packages/*"]`.
const LERNA_DEFAULT_PATTERN: &str = "packages/*";

pub struct GlobManifestAnalyzer {
    kind: WorkspaceKind,
    scorer: Arc<ProjectScorer>,
    probe: Arc<dyn FileProbe>,
}

impl GlobManifestAnalyzer {
    pub fn new(kind: WorkspaceKind, scorer: Arc<ProjectScorer>, probe: Arc<dyn FileProbe>) -> Self {
        Self {
            kind,
            scorer,
            probe,
        }
    }

    /// Pull the member pattern list out of the convention's manifest.
    /// `None` means the manifest is missing, malformed, or does not
    /// declare the convention.
    async fn read_patterns(&self, root: &Path) -> Option<Vec<String>> {
        match self.kind {
            WorkspaceKind::PnpmWorkspace => self.pnpm_patterns(root).await,
            WorkspaceKind::Lerna => self.lerna_patterns(root).await,
            WorkspaceKind::CargoWorkspace => self.cargo_patterns(root).await,
            WorkspaceKind::GoWorkspace => self.go_work_patterns(root).await,
            _ => None,
        }
    }

    async fn pnpm_patterns(&self, root: &Path) -> Option<Vec<String>> {
        let path = root.join("pnpm-workspace.yaml");
        let content = self.probe.read_to_string(&path).await.ok()?;
        let value: serde_yaml::Value = match serde_yaml::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unparseable pnpm workspace manifest");
                return None;
            }
        };

        let packages = value.get("packages")?.as_sequence()?;
        Some(
            packages
                .iter()
                .filter_map(|p| p.as_str().map(|s| s.to_string()))
                .collect(),
        )
    }

    async fn lerna_patterns(&self, root: &Path) -> Option<Vec<String>> {
        let path = root.join("lerna.json");
        let content = self.probe.read_to_string(&path).await.ok()?;
        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unparseable lerna manifest");
                return None;
            }
        };

        let patterns = value
            .get("packages")
            .and_then(|p| p.as_array())
            .map(|packages| {
                packages
                    .iter()
                    .filter_map(|p| p.as_str().map(|s| s.to_string()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|| vec![LERNA_DEFAULT_PATTERN.to_string()]);

        Some(patterns)
    }

    async fn cargo_patterns(&self, root: &Path) -> Option<Vec<String>> {
        let path = root.join("Cargo.toml");
        let content = self.probe.read_to_string(&path).await.ok()?;
        let value: toml::Value = match content.parse() {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unparseable Cargo manifest");
                return None;
            }
        };

        // Only a [workspace] table makes Cargo.toml a workspace marker;
        // a plain package manifest falls through to the next indicator.
        let workspace = value.get("workspace")?;
        let members = workspace
            .get("members")
            .and_then(|m| m.as_array())
            .map(|members| {
                members
                    .iter()
                    .filter_map(|m| m.as_str().map(|s| s.to_string()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Some(members)
    }

    async fn go_work_patterns(&self, root: &Path) -> Option<Vec<String>> {
        let path = root.join("go.work");
        let content = self.probe.read_to_string(&path).await.ok()?;

        let mut patterns = Vec::new();
        let mut in_block = false;

        for line in content.lines() {
            let line = line.trim();
            if in_block {
                if line == ")" {
                    in_block = false;
                } else if !line.is_empty() && !line.starts_with("//") {
                    patterns.push(line.to_string());
                }
            } else if line == "use (" {
                in_block = true;
            } else if let Some(dir) = line.strip_prefix("use ") {
                patterns.push(dir.trim().to_string());
            }
        }

        Some(patterns)
    }
}

#[async_trait]
impl ConventionAnalyzer for GlobManifestAnalyzer {
    fn kind(&self) -> WorkspaceKind {
        self.kind
    }

    async fn confirm(&self, root: &Path) -> bool {
        self.read_patterns(root).await.is_some()
    }

    async fn analyze(&self, root: &Path) -> ConventionOutcome {
        let Some(patterns) = self.read_patterns(root).await else {
            return ConventionOutcome::default();
        };

        let candidates = score_members(root, &patterns, &self.scorer, self.probe.as_ref()).await;

        ConventionOutcome {
            package_patterns: patterns,
            candidates,
        }
    }
}
