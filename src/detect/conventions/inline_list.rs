//! npm/yarn workspaces: the member list lives in the root `package.json`
//! `workspaces` field, which is a different manifest than the workspace
//! marker when the marker is `yarn.lock`.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::detect::indicators::WorkspaceKind;
use crate::detect::scorer::ProjectScorer;
use crate::probe::FileProbe;

use super::{score_members, ConventionAnalyzer, ConventionOutcome};

pub struct InlineListAnalyzer {
    kind: WorkspaceKind,
    scorer: Arc<ProjectScorer>,
    probe: Arc<dyn FileProbe>,
}

impl InlineListAnalyzer {
    pub fn new(kind: WorkspaceKind, scorer: Arc<ProjectScorer>, probe: Arc<dyn FileProbe>) -> Self {
        Self {
            kind,
            scorer,
            probe,
        }
    }

    /// The `workspaces` field supports two shapes: a plain pattern array
    /// and the `{ "packages": [...], "nohoist": [...] }` object form.
    async fn read_patterns(&self, root: &Path) -> Option<Vec<String>> {
        let path = root.join("package.json");
        let content = self.probe.read_to_string(&path).await.ok()?;
        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unparseable package manifest");
                return None;
            }
        };

        let workspaces = value.get("workspaces")?;

        let list = workspaces
            .as_array()
            .or_else(|| workspaces.get("packages").and_then(|p| p.as_array()))?;

        Some(
            list.iter()
                .filter_map(|p| p.as_str().map(|s| s.to_string()))
                .collect(),
        )
    }
}

#[async_trait]
impl ConventionAnalyzer for InlineListAnalyzer {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::indicators::IndicatorRegistry;
    use crate::probe::FsProbe;
    use tempfile::tempdir;

    fn analyzer() -> InlineListAnalyzer {
        let probe: Arc<dyn FileProbe> = Arc::new(FsProbe::new());
        let scorer = Arc::new(ProjectScorer::new(
            Arc::new(IndicatorRegistry::default()),
            probe.clone(),
        ));
        InlineListAnalyzer::new(WorkspaceKind::NpmWorkspaces, scorer, probe)
    }

    #[tokio::test]
    async fn test_workspaces_array_form() {
        let root = tempdir().unwrap();
        std::fs::write(
            root.path().join("package.json"),
            r#"{"name": "monorepo", "workspaces": ["apps/*"]}"#,
        )
        .unwrap();
        std::fs::create_dir_all(root.path().join("apps/site")).unwrap();
        std::fs::write(
            root.path().join("apps/site/package.json"),
            r#"{"name": "site"}"#,
        )
        .unwrap();

        let a = analyzer();
        assert!(a.confirm(root.path()).await);

        let outcome = a.analyze(root.path()).await;
        assert_eq!(outcome.package_patterns, vec!["apps/*".to_string()]);
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.candidates[0].name, "site");
    }

    #[tokio::test]
    async fn test_workspaces_object_form() {
        let root = tempdir().unwrap();
        std::fs::write(
            root.path().join("package.json"),
            r#"{"workspaces": {"packages": ["libs/*"], "nohoist": ["**/react"]}}"#,
        )
        .unwrap();
        std::fs::create_dir_all(root.path().join("libs/ui")).unwrap();
        std::fs::write(root.path().join("libs/ui/package.json"), r#"{"name": "ui"}"#).unwrap();

        let outcome = analyzer().analyze(root.path()).await;
        assert_eq!(outcome.package_patterns, vec!["libs/*".to_string()]);
        assert_eq!(outcome.candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_package_json_without_workspaces_does_not_confirm() {
        let root = tempdir().unwrap();
        std::fs::write(
            root.path().join("package.json"),
            r#"{"name": "plain-app", "version": "1.0.0"}"#,
        )
        .unwrap();

        assert!(!analyzer().confirm(root.path()).await);
    }

    #[tokio::test]
    async fn test_missing_package_json_does_not_confirm() {
        let root = tempdir().unwrap();
        assert!(!analyzer().confirm(root.path()).await);
    }
}
