//! `mcpscout detect` — run the classification engine and print the result.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::detect::{IndicatorRegistry, WorkspaceDetectionResult, WorkspaceDetector};
use crate::probe::FsProbe;

use super::{resolve_root, truncate_string};

pub async fn run(path: Option<PathBuf>, json: bool) -> Result<()> {
    let root = resolve_root(path)?;
    let config = Config::load(&root).unwrap_or_default();

    let detector = WorkspaceDetector::new(
        Arc::new(IndicatorRegistry::default()),
        Arc::new(FsProbe::new()),
    )
    .with_fan_out(config.detection.scoring_fan_out)
    .with_extra_ignores(config.detection.extra_ignore_dirs.clone());

    let result = detector.detect(&root).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&root, &result);
    }

    Ok(())
}

fn print_result(root: &std::path::Path, result: &WorkspaceDetectionResult) {
    println!("Scanned: {}\n", root.display());

    match &result.workspace_type {
        Some(kind) => println!("Structure: {} ({})", result.structure, kind),
        None => println!("Structure: {}", result.structure),
    }

    if let Some(patterns) = &result.package_patterns {
        println!("Package patterns: {}", patterns.join(", "));
    }

    if result.projects.is_empty() {
        println!("\nNo projects recognized.");
        return;
    }

    println!();
    println!(
        "{:<24} {:<20} {:<14} {:>5} {:>7}",
        "NAME", "PATH", "TYPE", "CONF", "FILES"
    );
    println!("{}", "-".repeat(75));

    for project in &result.projects {
        let external_marker = if project.is_external { " (external)" } else { "" };
        println!(
            "{:<24} {:<20} {:<14} {:>4}% {:>7}{}",
            truncate_string(&project.name, 22),
            truncate_string(&project.path, 18),
            project.primary_type.to_string(),
            project.confidence,
            project.file_count,
            external_marker
        );
    }

    println!("\nTotal: {} project(s)", result.projects.len());
}
