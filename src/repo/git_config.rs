//! Remote URL extraction from a project's `.git/config`.
//!
//! The config is read as plain text through the probe capability; no git
//! machinery is involved. Only the section/key shapes git itself writes
//! are recognized.

use std::path::Path;

use crate::probe::FileProbe;

/// Read the `origin` remote URL declared in `dir/.git/config`, if any.
pub async fn origin_url(probe: &dyn FileProbe, dir: &Path) -> Option<String> {
    remote_url(probe, dir, "origin").await
}

/// Read a named remote's URL from `dir/.git/config`.
pub async fn remote_url(probe: &dyn FileProbe, dir: &Path, remote: &str) -> Option<String> {
    let config_path = dir.join(".git").join("config");
    let content = probe.read_to_string(&config_path).await.ok()?;

    let header = format!("[remote \"{remote}\"]");
    let mut in_section = false;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with('[') {
            in_section = line == header;
            continue;
        }

        if !in_section {
            continue;
        }

        if let Some(value) = line.strip_prefix("url") {
            let value = value.trim_start();
            if let Some(url) = value.strip_prefix('=') {
                let url = url.trim();
                if !url.is_empty() {
                    return Some(url.to_string());
                }
            }
        }
    }

    None
}
