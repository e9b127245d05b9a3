//! Per-convention workspace sub-analyzers.
//!
//! Each workspace convention (pnpm, lerna, cargo, go.work, npm/yarn
//! workspaces, VS Code multi-root descriptors) gets one analyzer that
//! expands the convention's manifest into member package patterns and
//! scored project candidates.
//!
//! Analyzers also arbitrate the presence-vs-content ambiguity: a manifest
//! like `Cargo.toml` doubles as an ordinary project marker, so the
//! topology detector only commits to a workspace indicator after its
//! analyzer confirms the manifest declares the convention. A bare
//! `Cargo.toml` without a `[workspace]` table falls through.

mod folder_list;
mod glob_manifest;
mod inline_list;

pub use folder_list::FolderListAnalyzer;
pub use glob_manifest::GlobManifestAnalyzer;
pub use inline_list::InlineListAnalyzer;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use crate::probe::FileProbe;

use super::indicators::WorkspaceKind;
use super::scorer::{ProjectCandidate, ProjectScorer};

/// What a convention contributes on top of plain discovery.
#[derive(Debug, Default)]
pub struct ConventionOutcome {
    /// Member glob patterns (or declared folder paths) from the manifest
    pub package_patterns: Vec<String>,
    /// Scored candidates for the members that exist on disk
    pub candidates: Vec<ProjectCandidate>,
}

/// One workspace convention's structural parser.
#[async_trait]
pub trait ConventionAnalyzer: Send + Sync {
    /// Convention this analyzer understands.
    fn kind(&self) -> WorkspaceKind;

    /// Whether the root's manifest actually declares this convention.
    /// Unreadable or malformed manifests do not confirm.
    async fn confirm(&self, root: &Path) -> bool;

    /// Expand the manifest into patterns and member candidates. Malformed
    /// manifests degrade to an empty outcome, never an error.
    async fn analyze(&self, root: &Path) -> ConventionOutcome;
}

/// Build the analyzer for a workspace kind.
pub fn analyzer_for(
    kind: WorkspaceKind,
    scorer: Arc<ProjectScorer>,
    probe: Arc<dyn FileProbe>,
) -> Option<Box<dyn ConventionAnalyzer>> {
    match kind {
        WorkspaceKind::PnpmWorkspace
        | WorkspaceKind::Lerna
        | WorkspaceKind::CargoWorkspace
        | WorkspaceKind::GoWorkspace => {
            Some(Box::new(GlobManifestAnalyzer::new(kind, scorer, probe)))
        }
        WorkspaceKind::NpmWorkspaces | WorkspaceKind::YarnWorkspaces => {
            Some(Box::new(InlineListAnalyzer::new(kind, scorer, probe)))
        }
        WorkspaceKind::VsCodeMultiRoot => Some(Box::new(FolderListAnalyzer::new(scorer, probe))),
        WorkspaceKind::ImplicitMultiProject => None,
    }
}

/// Relative label for a member directory, used as the candidate's path.
pub(crate) fn relative_label(root: &Path, dir: &Path) -> String {
    dir.strip_prefix(root)
        .map(|rel| rel.to_string_lossy().to_string())
        .unwrap_or_else(|_| dir.to_string_lossy().to_string())
}

/// Expand member patterns against the root and score every directory
/// they resolve to. Shared by the glob-manifest and inline-list analyzers.
pub(crate) async fn score_members(
    root: &Path,
    patterns: &[String],
    scorer: &ProjectScorer,
    probe: &dyn FileProbe,
) -> Vec<ProjectCandidate> {
    let mut candidates = Vec::new();

    for pattern in patterns {
        let pattern = pattern.trim_start_matches("./");
        for dir in probe.glob_directories(pattern, root).await {
            let rel = relative_label(root, &dir);
            if let Some(candidate) = scorer.score(&dir, &rel).await {
                candidates.push(candidate);
            }
        }
    }

    candidates
}
