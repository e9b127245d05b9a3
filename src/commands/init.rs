//! `mcpscout init` — detect and persist workspace settings.

use anyhow::{bail, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::detect::{IndicatorRegistry, WorkspaceDetector};
use crate::probe::FsProbe;
use crate::settings::WorkspaceSettings;

use super::resolve_root;

pub async fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let root = resolve_root(path)?;

    if WorkspaceSettings::exists(&root) && !force {
        bail!(
            "Settings already exist at {:?}.\n\
             Re-run with --force to overwrite them.",
            WorkspaceSettings::settings_path(&root)
        );
    }

    let config = Config::load(&root).unwrap_or_default();

    let detector = WorkspaceDetector::new(
        Arc::new(IndicatorRegistry::default()),
        Arc::new(FsProbe::new()),
    )
    .with_fan_out(config.detection.scoring_fan_out)
    .with_extra_ignores(config.detection.extra_ignore_dirs.clone());

    let result = detector.detect(&root).await;

    if result.projects.is_empty() {
        bail!(
            "No projects recognized under {}.\n\
             Nothing to initialize.",
            root.display()
        );
    }

    let settings = WorkspaceSettings::from_detection(&result);
    let settings_path = settings.save(&root)?;

    info!(
        path = %settings_path.display(),
        projects = settings.projects.len(),
        "Wrote workspace settings"
    );

    println!(
        "✓ Wrote {} with {} project(s)",
        settings_path.display(),
        settings.projects.len()
    );
    match &result.workspace_type {
        Some(kind) => println!("  Structure: {} ({})", result.structure, kind),
        None => println!("  Structure: {}", result.structure),
    }

    println!("\nNext steps:");
    println!("  1. Review .mcpscout/settings.json and adjust server entries");
    println!("  2. Run 'mcpscout repos' to inspect repository remotes");
    println!("  3. Point your MCP client at the generated server entries");

    Ok(())
}
