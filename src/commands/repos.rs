//! `mcpscout repos` — per-project repository remote report.
//!
//! Reads each detected project's `.git/config`, classifies and parses the
//! `origin` URL, and prints the structured fields next to regenerated
//! canonical clone/web URLs.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::config::Config;
use crate::detect::{IndicatorRegistry, WorkspaceDetector};
use crate::probe::{FileProbe, FsProbe};
use crate::repo::{self, Protocol, RepositoryRemote};

use super::{resolve_root, truncate_string};

#[derive(Debug, Serialize)]
struct RepoReport {
    project: String,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote: Option<RepositoryRemote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    clone_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_url: Option<String>,
}

pub async fn run(path: Option<PathBuf>, protocol: String, json: bool) -> Result<()> {
    let root = resolve_root(path)?;
    let config = Config::load(&root).unwrap_or_default();

    let protocol = match protocol.to_lowercase().as_str() {
        "ssh" => Protocol::Ssh,
        "https" => Protocol::Https,
        other => {
            warn!(protocol = other, "Unknown protocol, defaulting to https");
            Protocol::Https
        }
    };

    let probe: Arc<dyn FileProbe> = Arc::new(FsProbe::new());
    let detector = WorkspaceDetector::new(Arc::new(IndicatorRegistry::default()), probe.clone())
        .with_fan_out(config.detection.scoring_fan_out)
        .with_extra_ignores(config.detection.extra_ignore_dirs.clone());

    let result = detector.detect(&root).await;

    let mut reports = Vec::new();
    for project in &result.projects {
        let remote = repo::origin_url(probe.as_ref(), &project.absolute_path)
            .await
            .map(|url| RepositoryRemote::from_url("origin", url));

        let (clone_url, web_url) = match &remote {
            Some(remote) => {
                let fields = remote.fields();
                (
                    Some(repo::generate(remote.kind, &fields, protocol)),
                    repo::generate_web_url(remote.kind, &fields),
                )
            }
            None => (None, None),
        };

        reports.push(RepoReport {
            project: project.name.clone(),
            path: project.path.clone(),
            remote,
            clone_url,
            web_url,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("No projects recognized under {}.", root.display());
        return Ok(());
    }

    for report in &reports {
        println!("{} ({})", report.project, report.path);

        match &report.remote {
            Some(remote) => {
                println!("  Provider: {}", remote.kind);
                if let (Some(owner), Some(name)) = (&remote.owner, &remote.repo) {
                    match &remote.org {
                        Some(org) => println!("  Repository: {}/{}/{}", org, owner, name),
                        None => println!("  Repository: {}/{}", owner, name),
                    }
                }
                println!("  Origin: {}", truncate_string(&remote.url, 70));
                if let Some(clone_url) = &report.clone_url {
                    println!("  Clone: {}", clone_url);
                }
                if let Some(web_url) = &report.web_url {
                    println!("  Web: {}", web_url);
                }
            }
            None => println!("  No origin remote found"),
        }

        println!();
    }

    Ok(())
}
