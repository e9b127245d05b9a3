//! CLI command implementations.

pub mod detect;
pub mod init;
pub mod repos;

use anyhow::{bail, Result};
use std::env;
use std::path::PathBuf;

/// Resolve and validate the root directory argument.
///
/// A missing root is the one fatal condition: the engine's behavior on a
/// nonexistent root is undefined, so commands reject it up front.
pub(crate) fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf> {
    let root = match path {
        Some(p) => p,
        None => env::current_dir()?,
    };

    if !root.is_dir() {
        bail!("Directory does not exist: {}", root.display());
    }

    Ok(root.canonicalize().unwrap_or(root))
}

/// Truncate a string to a maximum length, adding "..." if truncated.
pub(crate) fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        format!("{}...", &s[..max_len - 3])
    } else {
        s[..max_len].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_root_rejects_missing_directory() {
        let result = resolve_root(Some(PathBuf::from("/nonexistent/path/nowhere")));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_root_canonicalizes() {
        let dir = tempdir().unwrap();
        let resolved = resolve_root(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(resolved, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("hi", 2), "hi");
    }
}
