//! Filesystem probing capability consumed by the classification engine.
//!
//! The engine never touches the filesystem directly; it goes through the
//! [`FileProbe`] trait so tests and embedders can substitute their own
//! probing strategy. The default implementation, [`FsProbe`], combines
//! `tokio::fs` for direct checks, the `glob` crate for pattern expansion,
//! and `walkdir` for file counting.
//!
//! Probe failures (permission errors, racing deletes) degrade to
//! "did not match" — a single unreadable path must never abort the
//! classification of a whole directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::trace;

/// Errors surfaced by probe operations that callers may want to recover
/// from individually (manifest reads). Existence checks never error.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("IO error while probing: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Capability trait for all filesystem questions the engine asks.
#[async_trait]
pub trait FileProbe: Send + Sync {
    /// Check whether a literal path or glob pattern matches anything
    /// under `base`. Errors are treated as "no match".
    async fn exists(&self, pattern: &str, base: &Path) -> bool;

    /// Immediate subdirectory names of `base`, sorted for determinism.
    async fn list_directories(&self, base: &Path) -> Vec<String>;

    /// Read a manifest file as raw text; parsing is the caller's concern.
    async fn read_to_string(&self, path: &Path) -> Result<String, ProbeError>;

    /// Count regular files under `dir`, skipping the given directory
    /// names and anything hidden.
    async fn count_files(&self, dir: &Path, ignore: &[&str]) -> usize;

    /// Expand a glob pattern under `base`, keeping only directories.
    async fn glob_directories(&self, pattern: &str, base: &Path) -> Vec<PathBuf>;

    /// Expand a glob pattern under `base`, keeping only files.
    async fn glob_files(&self, pattern: &str, base: &Path) -> Vec<PathBuf>;
}

/// Default probe backed by the real filesystem.
#[derive(Debug, Default, Clone)]
pub struct FsProbe;

impl FsProbe {
    pub fn new() -> Self {
        Self
    }

    fn expand(&self, pattern: &str, base: &Path) -> Vec<PathBuf> {
        let full = format!(
            "{}/{}",
            glob::Pattern::escape(&base.to_string_lossy()),
            pattern
        );

        match glob::glob(&full) {
            Ok(paths) => {
                let mut matches: Vec<PathBuf> = paths.filter_map(|p| p.ok()).collect();
                matches.sort();
                matches
            }
            Err(e) => {
                trace!(pattern = %full, error = %e, "Glob pattern failed to compile");
                Vec::new()
            }
        }
    }
}

/// Whether a pattern needs glob expansion or can be joined literally.
fn has_glob_meta(pattern: &str) -> bool {
    pattern.chars().any(|c| matches!(c, '*' | '?' | '['))
}

#[async_trait]
impl FileProbe for FsProbe {
    async fn exists(&self, pattern: &str, base: &Path) -> bool {
        if has_glob_meta(pattern) {
            return !self.expand(pattern, base).is_empty();
        }

        let path = base.join(pattern);
        match tokio::fs::try_exists(&path).await {
            Ok(found) => found,
            Err(e) => {
                trace!(path = %path.display(), error = %e, "Existence check failed");
                false
            }
        }
    }

    async fn list_directories(&self, base: &Path) -> Vec<String> {
        let mut names = Vec::new();

        let Ok(mut entries) = tokio::fs::read_dir(base).await else {
            return names;
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let is_dir = entry
                .file_type()
                .await
                .map(|ft| ft.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        // read_dir order is platform-dependent; sort so discovery order
        // is stable across runs.
        names.sort();
        names
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, ProbeError> {
        Ok(tokio::fs::read_to_string(path).await?)
    }

    async fn count_files(&self, dir: &Path, ignore: &[&str]) -> usize {
        let dir = dir.to_path_buf();
        let ignore: Vec<String> = ignore.iter().map(|s| s.to_string()).collect();

        tokio::task::spawn_blocking(move || {
            walkdir::WalkDir::new(&dir)
                .into_iter()
                .filter_entry(|entry| {
                    if entry.depth() == 0 {
                        return true;
                    }
                    let name = entry.file_name().to_string_lossy();
                    !name.starts_with('.') && !ignore.iter().any(|i| i.as_str() == name)
                })
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .count()
        })
        .await
        .unwrap_or(0)
    }

    async fn glob_directories(&self, pattern: &str, base: &Path) -> Vec<PathBuf> {
        self.expand(pattern, base)
            .into_iter()
            .filter(|p| p.is_dir())
            .collect()
    }

    async fn glob_files(&self, pattern: &str, base: &Path) -> Vec<PathBuf> {
        self.expand(pattern, base)
            .into_iter()
            .filter(|p| p.is_file())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_exists_literal() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]").unwrap();

        let probe = FsProbe::new();
        assert!(probe.exists("Cargo.toml", dir.path()).await);
        assert!(!probe.exists("package.json", dir.path()).await);
    }

    #[tokio::test]
    async fn test_exists_glob() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("app.csproj"), "<Project/>").unwrap();

        let probe = FsProbe::new();
        assert!(probe.exists("*.csproj", dir.path()).await);
        assert!(!probe.exists("*.sln", dir.path()).await);
    }

    #[tokio::test]
    async fn test_list_directories_sorted_dirs_only() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("zeta")).unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::write(dir.path().join("file.txt"), "x").unwrap();

        let probe = FsProbe::new();
        let names = probe.list_directories(dir.path()).await;
        assert_eq!(names, vec!["alpha".to_string(), "zeta".to_string()]);
    }

    #[tokio::test]
    async fn test_list_directories_missing_base_is_empty() {
        let probe = FsProbe::new();
        let names = probe.list_directories(Path::new("/nonexistent/base")).await;
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_glob_directories_skips_files() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("packages/api")).unwrap();
        std::fs::create_dir_all(dir.path().join("packages/web")).unwrap();
        std::fs::write(dir.path().join("packages/README.md"), "#").unwrap();

        let probe = FsProbe::new();
        let dirs = probe.glob_directories("packages/*", dir.path()).await;
        assert_eq!(dirs.len(), 2);
        assert!(dirs.iter().all(|p| p.is_dir()));
    }

    #[tokio::test]
    async fn test_count_files_skips_ignored_and_hidden() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/lib.rs"), "").unwrap();
        std::fs::create_dir(dir.path().join("target")).unwrap();
        std::fs::write(dir.path().join("target/out.o"), "").unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();

        let probe = FsProbe::new();
        let count = probe.count_files(dir.path(), &["target"]).await;
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_read_to_string_missing_file_errors() {
        let dir = tempdir().unwrap();
        let probe = FsProbe::new();
        let result = probe.read_to_string(&dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(ProbeError::Io(_))));
    }
}
