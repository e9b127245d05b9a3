//! Integration tests for the repository codec applied to on-disk git
//! configs, and for generated settings round-trips.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use mcpscout::detect::{IndicatorRegistry, WorkspaceDetector};
use mcpscout::probe::FsProbe;
use mcpscout::repo::{self, Protocol, ProviderKind, RepositoryRemote};
use mcpscout::settings::WorkspaceSettings;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn write_git_config(project: &Path, url: &str) {
    write(
        &project.join(".git/config"),
        &format!(
            "[core]\n\trepositoryformatversion = 0\n\
             [remote \"origin\"]\n\turl = {url}\n\
             \tfetch = +refs/heads/*:refs/remotes/origin/*\n"
        ),
    );
}

#[tokio::test]
async fn origin_remote_resolves_to_canonical_urls() -> Result<()> {
    let root = TempDir::new()?;
    write(&root.path().join("Cargo.toml"), "[package]\nname = \"widget\"\n");
    write_git_config(root.path(), "git@github.com:acme/widget.git");

    let probe = FsProbe::new();
    let url = repo::origin_url(&probe, root.path()).await.unwrap();
    let remote = RepositoryRemote::from_url("origin", url);

    assert_eq!(remote.kind, ProviderKind::GitHub);
    assert_eq!(remote.owner.as_deref(), Some("acme"));
    assert_eq!(remote.repo.as_deref(), Some("widget"));

    let fields = remote.fields();
    assert_eq!(
        repo::generate(remote.kind, &fields, Protocol::Https),
        "https://github.com/acme/widget.git"
    );
    assert_eq!(
        repo::generate(remote.kind, &fields, Protocol::Ssh),
        "git@github.com:acme/widget.git"
    );
    assert_eq!(
        repo::generate_web_url(remote.kind, &fields).as_deref(),
        Some("https://github.com/acme/widget")
    );

    Ok(())
}

#[tokio::test]
async fn azure_remote_round_trips_through_the_codec() -> Result<()> {
    let root = TempDir::new()?;
    write_git_config(
        root.path(),
        "https://contoso@dev.azure.com/contoso/platform/_git/billing",
    );

    let probe = FsProbe::new();
    let url = repo::origin_url(&probe, root.path()).await.unwrap();
    let remote = RepositoryRemote::from_url("origin", url);

    assert_eq!(remote.kind, ProviderKind::AzureDevOps);
    assert_eq!(remote.org.as_deref(), Some("contoso"));
    assert_eq!(remote.owner.as_deref(), Some("platform"));
    assert_eq!(remote.repo.as_deref(), Some("billing"));

    let fields = remote.fields();
    let regenerated = repo::generate(remote.kind, &fields, Protocol::Https);
    assert_eq!(
        regenerated,
        "https://dev.azure.com/contoso/platform/_git/billing"
    );
    assert_eq!(repo::parse(&regenerated, remote.kind), fields);

    Ok(())
}

#[tokio::test]
async fn unrecognized_remote_still_produces_a_record() -> Result<()> {
    let root = TempDir::new()?;
    write_git_config(root.path(), "not-a-remote-url");

    let probe = FsProbe::new();
    let url = repo::origin_url(&probe, root.path()).await.unwrap();
    let remote = RepositoryRemote::from_url("origin", url);

    assert_eq!(remote.kind, ProviderKind::Custom);
    assert!(remote.owner.is_none());
    assert!(remote.repo.is_none());

    Ok(())
}

#[tokio::test]
async fn settings_generation_covers_every_detected_project() -> Result<()> {
    let root = TempDir::new()?;
    write(
        &root.path().join("pnpm-workspace.yaml"),
        "packages:\n  - \"packages/*\"\n",
    );
    write(
        &root.path().join("packages/api/package.json"),
        r#"{"name": "@acme/api"}"#,
    );
    write(
        &root.path().join("packages/ml/pyproject.toml"),
        "[project]\nname = \"ml\"\n",
    );

    let detector = WorkspaceDetector::new(
        Arc::new(IndicatorRegistry::default()),
        Arc::new(FsProbe::new()),
    );
    let result = detector.detect(root.path()).await;

    let settings = WorkspaceSettings::from_detection(&result);
    settings.save(root.path())?;

    let loaded = WorkspaceSettings::load(root.path())?;
    assert_eq!(loaded.projects.len(), result.projects.len());
    assert!(loaded.workspace.is_workspace);

    let ml = loaded
        .projects
        .iter()
        .find(|p| p.name == "ml")
        .expect("python project present");
    assert_eq!(ml.server.command, "python3");
    assert!(ml.server.args[0].ends_with("python-server.py"));

    let api = loaded
        .projects
        .iter()
        .find(|p| p.name == "@acme/api")
        .expect("node project present");
    assert_eq!(api.server.command, "node");
    assert_eq!(api.server.id, "acme-api");

    Ok(())
}

#[tokio::test]
async fn settings_save_is_atomic_enough_to_leave_no_temp_file() -> Result<()> {
    let root = TempDir::new()?;
    write(&root.path().join("go.mod"), "module example.com/svc\n");

    let detector = WorkspaceDetector::new(
        Arc::new(IndicatorRegistry::default()),
        Arc::new(FsProbe::new()),
    );
    let result = detector.detect(root.path()).await;
    WorkspaceSettings::from_detection(&result).save(root.path())?;

    let tool_dir = root.path().join(".mcpscout");
    let leftovers: Vec<_> = std::fs::read_dir(&tool_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|x| x == "tmp").unwrap_or(false))
        .collect();
    assert!(leftovers.is_empty());

    Ok(())
}
