//! Workspace topology detection.
//!
//! Walks the ordered workspace indicator table; the first indicator whose
//! pattern exists *and* whose convention sub-analyzer confirms the
//! manifest wins. Confirmation matters because some manifests serve
//! double duty: a `Cargo.toml` is a workspace marker only when it carries
//! a `[workspace]` table, otherwise it is an ordinary project marker and
//! the walk continues down the table.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::probe::FileProbe;

use super::conventions::analyzer_for;
use super::discovery::{merge_and_sort, ProjectDiscovery, DEFAULT_SCORING_FAN_OUT};
use super::indicators::{IndicatorRegistry, WorkspaceKind};
use super::scorer::{ProjectCandidate, ProjectScorer};

/// Shape of the scanned tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkspaceStructure {
    /// Zero or one project, no workspace manifest
    SingleProject,
    /// Several unrelated projects, no workspace manifest
    MultiProject,
    /// A workspace convention governs the tree
    Workspace,
}

impl std::fmt::Display for WorkspaceStructure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::SingleProject => "single-project",
            Self::MultiProject => "multi-project",
            Self::Workspace => "workspace",
        };
        write!(f, "{label}")
    }
}

/// Immutable snapshot returned by [`WorkspaceDetector::detect`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceDetectionResult {
    pub is_workspace: bool,
    pub workspace_type: Option<WorkspaceKind>,
    pub structure: WorkspaceStructure,
    pub projects: Vec<ProjectCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_patterns: Option<Vec<String>>,
}

/// Detects the workspace convention governing a root directory and
/// assembles the merged, deduplicated project list.
///
/// The root must exist; callers validate that precondition before
/// invoking the detector.
pub struct WorkspaceDetector {
    registry: Arc<IndicatorRegistry>,
    probe: Arc<dyn FileProbe>,
    scorer: Arc<ProjectScorer>,
    fan_out: usize,
    extra_ignores: Vec<String>,
}

impl WorkspaceDetector {
    pub fn new(registry: Arc<IndicatorRegistry>, probe: Arc<dyn FileProbe>) -> Self {
        let scorer = Arc::new(ProjectScorer::new(registry.clone(), probe.clone()));
        Self {
            registry,
            probe,
            scorer,
            fan_out: DEFAULT_SCORING_FAN_OUT,
            extra_ignores: Vec::new(),
        }
    }

    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out.max(1);
        self
    }

    pub fn with_extra_ignores(mut self, extra_ignores: Vec<String>) -> Self {
        self.extra_ignores = extra_ignores;
        self
    }

    /// Classify the tree under `root`.
    pub async fn detect(&self, root: &Path) -> WorkspaceDetectionResult {
        debug!(root = %root.display(), "Starting workspace detection");

        let discovery = ProjectDiscovery::new(self.scorer.clone(), self.probe.clone())
            .with_fan_out(self.fan_out)
            .with_extra_ignores(self.extra_ignores.clone());
        let scanned = discovery.discover(root).await;

        if let Some((kind, outcome)) = self.match_convention(root).await {
            let projects = merge_and_sort(scanned, outcome.candidates);

            info!(
                root = %root.display(),
                workspace_type = %kind,
                projects = projects.len(),
                "Detected workspace"
            );

            return WorkspaceDetectionResult {
                is_workspace: true,
                workspace_type: Some(kind),
                structure: WorkspaceStructure::Workspace,
                projects,
                package_patterns: Some(outcome.package_patterns),
            };
        }

        let projects = merge_and_sort(scanned, Vec::new());

        if projects.len() > 1 {
            info!(
                root = %root.display(),
                projects = projects.len(),
                "Detected implicit multi-project root"
            );

            WorkspaceDetectionResult {
                is_workspace: false,
                workspace_type: Some(WorkspaceKind::ImplicitMultiProject),
                structure: WorkspaceStructure::MultiProject,
                projects,
                package_patterns: None,
            }
        } else {
            WorkspaceDetectionResult {
                is_workspace: false,
                workspace_type: None,
                structure: WorkspaceStructure::SingleProject,
                projects,
                package_patterns: None,
            }
        }
    }

    /// First-match walk over the workspace indicator table, gated on
    /// sub-analyzer confirmation.
    async fn match_convention(
        &self,
        root: &Path,
    ) -> Option<(WorkspaceKind, super::conventions::ConventionOutcome)> {
        for indicator in self.registry.workspaces.iter() {
            if !self.probe.exists(indicator.pattern, root).await {
                continue;
            }

            let Some(analyzer) =
                analyzer_for(indicator.kind, self.scorer.clone(), self.probe.clone())
            else {
                continue;
            };

            if !analyzer.confirm(root).await {
                debug!(
                    pattern = indicator.pattern,
                    kind = %indicator.kind,
                    "Workspace indicator present but not confirmed, falling through"
                );
                continue;
            }

            return Some((indicator.kind, analyzer.analyze(root).await));
        }

        None
    }
}
