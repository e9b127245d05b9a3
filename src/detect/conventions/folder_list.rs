//! VS Code multi-root workspace descriptors (`*.code-workspace`).
//!
//! Folder entries carry a path relative to the descriptor (or absolute)
//! and an optional display name. Paths may point outside the scanned
//! root; such candidates are marked external and keep the declared
//! name/path instead of the directory's own metadata.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::detect::indicators::WorkspaceKind;
use crate::detect::scorer::ProjectScorer;
use crate::probe::FileProbe;

use super::{ConventionAnalyzer, ConventionOutcome};

#[derive(Debug, Deserialize)]
struct WorkspaceDescriptor {
    #[serde(default)]
    folders: Vec<FolderEntry>,
}

#[derive(Debug, Deserialize)]
struct FolderEntry {
    path: String,
    #[serde(default)]
    name: Option<String>,
}

pub struct FolderListAnalyzer {
    scorer: Arc<ProjectScorer>,
    probe: Arc<dyn FileProbe>,
}

impl FolderListAnalyzer {
    pub fn new(scorer: Arc<ProjectScorer>, probe: Arc<dyn FileProbe>) -> Self {
        Self { scorer, probe }
    }

    /// Read the first descriptor under the root (sorted glob order keeps
    /// the choice deterministic when several exist).
    async fn read_descriptor(&self, root: &Path) -> Option<WorkspaceDescriptor> {
        let files = self.probe.glob_files("*.code-workspace", root).await;
        let path = files.first()?;

        let content = self.probe.read_to_string(path).await.ok()?;
        let descriptor: WorkspaceDescriptor = match serde_json::from_str(&content) {
            Ok(d) => d,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unparseable workspace descriptor");
                return None;
            }
        };

        if descriptor.folders.is_empty() {
            return None;
        }

        Some(descriptor)
    }
}

#[async_trait]
impl ConventionAnalyzer for FolderListAnalyzer {
    fn kind(&self) -> WorkspaceKind {
        WorkspaceKind::VsCodeMultiRoot
    }

    async fn confirm(&self, root: &Path) -> bool {
        self.read_descriptor(root).await.is_some()
    }

    async fn analyze(&self, root: &Path) -> ConventionOutcome {
        let Some(descriptor) = self.read_descriptor(root).await else {
            return ConventionOutcome::default();
        };

        let canonical_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let mut outcome = ConventionOutcome::default();

        for folder in &descriptor.folders {
            outcome.package_patterns.push(folder.path.clone());

            let declared = Path::new(&folder.path);
            let resolved: PathBuf = if declared.is_absolute() {
                declared.to_path_buf()
            } else {
                root.join(declared)
            };

            let Ok(canonical) = resolved.canonicalize() else {
                debug!(path = %resolved.display(), "Declared folder does not exist, skipping");
                continue;
            };

            let Some(mut candidate) = self.scorer.score(&canonical, &folder.path).await else {
                continue;
            };

            // Declared metadata is authoritative for descriptor entries.
            candidate.path = folder.path.clone();
            candidate.is_external = !canonical.starts_with(&canonical_root);
            if let Some(name) = &folder.name {
                candidate.name = name.clone();
            }

            outcome.candidates.push(candidate);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::indicators::IndicatorRegistry;
    use crate::probe::FsProbe;
    use tempfile::tempdir;

    fn analyzer() -> FolderListAnalyzer {
        let probe: Arc<dyn FileProbe> = Arc::new(FsProbe::new());
        let scorer = Arc::new(ProjectScorer::new(
            Arc::new(IndicatorRegistry::default()),
            probe.clone(),
        ));
        FolderListAnalyzer::new(scorer, probe)
    }

    #[tokio::test]
    async fn test_external_folder_keeps_declared_name_and_path() {
        let outside = tempdir().unwrap();
        std::fs::write(
            outside.path().join("Cargo.toml"),
            "[package]\nname = \"shared-lib\"",
        )
        .unwrap();

        let root = tempdir().unwrap();
        std::fs::write(root.path().join("Cargo.toml"), "[package]\nname = \"main\"").unwrap();
        let descriptor = serde_json::json!({
            "folders": [
                { "path": "." },
                { "path": outside.path().to_string_lossy(), "name": "Shared Library" },
            ]
        });
        std::fs::write(
            root.path().join("main.code-workspace"),
            serde_json::to_string_pretty(&descriptor).unwrap(),
        )
        .unwrap();

        let a = analyzer();
        assert!(a.confirm(root.path()).await);

        let outcome = a.analyze(root.path()).await;
        assert_eq!(outcome.candidates.len(), 2);

        let internal = &outcome.candidates[0];
        assert_eq!(internal.path, ".");
        assert!(!internal.is_external);

        let external = &outcome.candidates[1];
        assert!(external.is_external);
        assert_eq!(external.name, "Shared Library");
        assert_eq!(external.path, outside.path().to_string_lossy());
    }

    #[tokio::test]
    async fn test_missing_folder_is_skipped() {
        let root = tempdir().unwrap();
        std::fs::write(root.path().join("Cargo.toml"), "[package]\nname = \"main\"").unwrap();
        std::fs::write(
            root.path().join("x.code-workspace"),
            r#"{"folders": [{"path": "."}, {"path": "gone"}]}"#,
        )
        .unwrap();

        let outcome = analyzer().analyze(root.path()).await;
        // The declared pattern is still reported, the candidate is not.
        assert_eq!(outcome.package_patterns.len(), 2);
        assert_eq!(outcome.candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_descriptor_without_folders_does_not_confirm() {
        let root = tempdir().unwrap();
        std::fs::write(root.path().join("empty.code-workspace"), r#"{"folders": []}"#).unwrap();

        assert!(!analyzer().confirm(root.path()).await);
    }

    #[tokio::test]
    async fn test_malformed_descriptor_does_not_confirm() {
        let root = tempdir().unwrap();
        std::fs::write(root.path().join("bad.code-workspace"), "{folders: [").unwrap();

        assert!(!analyzer().confirm(root.path()).await);
    }
}
