//! Root and subdirectory discovery with deduplication.
//!
//! Discovery probes the root itself plus its immediate subdirectories
//! (one level only, to bound cost) and merges the results with candidates
//! a convention sub-analyzer declared. Dedup keys on the normalized
//! absolute path, so descriptor references that loop back into the tree
//! collapse instead of recursing.

use futures::stream::{self, StreamExt};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::probe::FileProbe;

use super::indicators::is_ignored_directory;
use super::scorer::{ProjectCandidate, ProjectScorer};

/// Default number of subdirectory scoring probes in flight at once.
pub const DEFAULT_SCORING_FAN_OUT: usize = 8;

pub struct ProjectDiscovery {
    scorer: Arc<ProjectScorer>,
    probe: Arc<dyn FileProbe>,
    fan_out: usize,
    extra_ignores: Vec<String>,
}

impl ProjectDiscovery {
    pub fn new(scorer: Arc<ProjectScorer>, probe: Arc<dyn FileProbe>) -> Self {
        Self {
            scorer,
            probe,
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

    /// Score the root (as `"."`) and every non-ignored immediate
    /// subdirectory. Result order: root first, then subdirectories in
    /// sorted listing order.
    pub async fn discover(&self, root: &Path) -> Vec<ProjectCandidate> {
        let mut candidates = Vec::new();

        if let Some(candidate) = self.scorer.score(root, ".").await {
            candidates.push(candidate);
        }

        let names: Vec<String> = self
            .probe
            .list_directories(root)
            .await
            .into_iter()
            .filter(|name| {
                !is_ignored_directory(name) && !self.extra_ignores.iter().any(|i| i == name)
            })
            .collect();

        // buffered() preserves submission order, so bounded fan-out does
        // not leak completion order into the result.
        let scored: Vec<Option<ProjectCandidate>> = stream::iter(names)
            .map(|name| {
                let scorer = self.scorer.clone();
                let dir = root.join(&name);
                async move { scorer.score(&dir, &name).await }
            })
            .buffered(self.fan_out)
            .collect()
            .await;

        candidates.extend(scored.into_iter().flatten());

        debug!(
            root = %root.display(),
            count = candidates.len(),
            "Discovery scan finished"
        );

        candidates
    }
}

/// Merge scan-discovered and convention-declared candidates, then sort.
///
/// A convention-declared candidate wins over a scan-discovered one for
/// the same normalized path (it carries authoritative naming/path
/// metadata), but absorbs the scanned candidate's matched indicators.
/// The final sequence is sorted by confidence descending; the sort is
/// stable, so ties keep discovery order — root, subdirectories in
/// listing order, convention-declared extras last.
pub fn merge_and_sort(
    scanned: Vec<ProjectCandidate>,
    declared: Vec<ProjectCandidate>,
) -> Vec<ProjectCandidate> {
    let mut declared_by_path: HashMap<PathBuf, ProjectCandidate> = HashMap::new();
    let mut declared_order: Vec<PathBuf> = Vec::new();

    for candidate in declared {
        match declared_by_path.entry(candidate.absolute_path.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().merge_indicators(&candidate),
            Entry::Vacant(entry) => {
                declared_order.push(candidate.absolute_path.clone());
                entry.insert(candidate);
            }
        }
    }

    let mut merged = Vec::new();

    for candidate in scanned {
        match declared_by_path.remove(&candidate.absolute_path) {
            Some(mut winner) => {
                winner.merge_indicators(&candidate);
                merged.push(winner);
            }
            None => merged.push(candidate),
        }
    }

    for path in declared_order {
        if let Some(candidate) = declared_by_path.remove(&path) {
            merged.push(candidate);
        }
    }

    merged.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::indicators::IndicatorRegistry;
    use crate::probe::FsProbe;
    use tempfile::tempdir;

    fn discovery() -> ProjectDiscovery {
        let probe: Arc<dyn FileProbe> = Arc::new(FsProbe::new());
        let scorer = Arc::new(ProjectScorer::new(
            Arc::new(IndicatorRegistry::default()),
            probe.clone(),
        ));
        ProjectDiscovery::new(scorer, probe)
    }

    #[tokio::test]
    async fn test_empty_root_discovers_nothing() {
        let root = tempdir().unwrap();
        let candidates = discovery().discover(root.path()).await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_root_candidate_comes_first() {
        let root = tempdir().unwrap();
        std::fs::write(root.path().join("Cargo.toml"), "[package]\nname = \"root\"").unwrap();
        std::fs::create_dir(root.path().join("api")).unwrap();
        std::fs::write(
            root.path().join("api/package.json"),
            r#"{"name": "api"}"#,
        )
        .unwrap();

        let candidates = discovery().discover(root.path()).await;
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].path, ".");
        assert_eq!(candidates[1].path, "api");
    }

    #[tokio::test]
    async fn test_ignored_and_hidden_subdirectories_are_skipped() {
        let root = tempdir().unwrap();
        std::fs::create_dir(root.path().join("node_modules")).unwrap();
        std::fs::write(
            root.path().join("node_modules/package.json"),
            r#"{"name": "dep"}"#,
        )
        .unwrap();
        std::fs::create_dir(root.path().join(".hidden")).unwrap();
        std::fs::write(
            root.path().join(".hidden/package.json"),
            r#"{"name": "hidden"}"#,
        )
        .unwrap();
        std::fs::create_dir(root.path().join("app")).unwrap();
        std::fs::write(root.path().join("app/package.json"), r#"{"name": "app"}"#).unwrap();

        let candidates = discovery().discover(root.path()).await;
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "app");
    }

    #[tokio::test]
    async fn test_subdirectories_score_in_listing_order() {
        let root = tempdir().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            std::fs::create_dir(root.path().join(name)).unwrap();
            std::fs::write(
                root.path().join(name).join("package.json"),
                format!(r#"{{"name": "{name}"}}"#),
            )
            .unwrap();
        }

        let candidates = discovery().discover(root.path()).await;
        let order: Vec<&str> = candidates.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(order, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_merge_prefers_declared_metadata() {
        let root = tempdir().unwrap();
        std::fs::create_dir(root.path().join("web")).unwrap();
        std::fs::write(root.path().join("web/package.json"), r#"{"name": "web"}"#).unwrap();

        let d = discovery();
        let scanned = d.discover(root.path()).await;
        assert_eq!(scanned.len(), 1);

        let mut declared = scanned.clone();
        declared[0].name = "Declared Name".to_string();
        declared[0].path = "packages/web".to_string();
        declared[0].matched_indicators = vec!["tsconfig.json".to_string()];

        let merged = merge_and_sort(scanned, declared);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Declared Name");
        assert_eq!(merged[0].path, "packages/web");
        // Scanned indicators are absorbed, not lost.
        assert!(merged[0]
            .matched_indicators
            .contains(&"package.json".to_string()));
        assert!(merged[0]
            .matched_indicators
            .contains(&"tsconfig.json".to_string()));
    }

    #[tokio::test]
    async fn test_sort_is_confidence_descending_and_stable() {
        let root = tempdir().unwrap();
        // "app" saturates (manifest + framework config); "lib" scores lower.
        std::fs::create_dir(root.path().join("app")).unwrap();
        std::fs::write(root.path().join("app/package.json"), r#"{"name": "app"}"#).unwrap();
        std::fs::write(root.path().join("app/next.config.js"), "").unwrap();
        std::fs::create_dir(root.path().join("lib")).unwrap();
        std::fs::write(root.path().join("lib/package.json"), r#"{"name": "lib"}"#).unwrap();

        let d = discovery();
        let scanned = d.discover(root.path()).await;
        let merged = merge_and_sort(scanned, Vec::new());

        assert_eq!(merged[0].name, "app");
        assert_eq!(merged[1].name, "lib");
        assert!(merged[0].confidence > merged[1].confidence);
    }
}
