//! Indicator tables for project and workspace classification.
//!
//! An indicator pairs a manifest filename (or glob pattern) with the
//! project type it implies and a weight. The tables are static data;
//! registration order doubles as the tie-break priority when two matched
//! indicators carry the same weight.

use serde::{Deserialize, Serialize};

/// A manifest filename or glob pattern that marks a directory as a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIndicator {
    /// Literal filename or glob pattern, relative to the probed directory
    pub pattern: &'static str,
    /// Project type this indicator implies
    pub project_type: ProjectType,
    /// Score contribution when the pattern matches
    pub weight: u32,
}

impl ProjectIndicator {
    pub const fn new(pattern: &'static str, project_type: ProjectType, weight: u32) -> Self {
        Self {
            pattern,
            project_type,
            weight,
        }
    }
}

/// A manifest filename or glob pattern that marks a directory as the root
/// of a multi-project workspace convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceIndicator {
    /// Literal filename or glob pattern, relative to the workspace root
    pub pattern: &'static str,
    /// Workspace convention this indicator implies
    pub kind: WorkspaceKind,
}

impl WorkspaceIndicator {
    pub const fn new(pattern: &'static str, kind: WorkspaceKind) -> Self {
        Self { pattern, kind }
    }
}

/// Recognized project types, in decreasing specificity.
///
/// Framework-specific types carry heavier indicators than the generic
/// ecosystem manifest, so a Next.js app scores `NextJs` rather than `Node`
/// even though both indicators match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Rust project (Cargo.toml)
    Rust,
    /// Go module (go.mod)
    Go,
    /// Node.js/JavaScript project (package.json)
    Node,
    /// Next.js app (next.config.*)
    #[serde(rename = "nextjs")]
    NextJs,
    /// Angular app (angular.json)
    Angular,
    /// Vue app (vue.config.js)
    Vue,
    /// Svelte app (svelte.config.js)
    Svelte,
    /// Python project (pyproject.toml, setup.py, requirements.txt)
    Python,
    /// Java Maven project (pom.xml)
    Maven,
    /// Java/Kotlin Gradle project (build.gradle, build.gradle.kts)
    Gradle,
    /// PHP Composer project (composer.json)
    Php,
    /// Ruby Bundler project (Gemfile)
    Ruby,
    /// C#/.NET project (*.csproj, *.sln)
    #[serde(rename = "dotnet")]
    DotNet,
    /// Dart/Flutter project (pubspec.yaml)
    Flutter,
    /// C/C++ CMake project (CMakeLists.txt)
    #[serde(rename = "cmake")]
    CMake,
    /// TypeScript config without a stronger marker (tsconfig.json)
    #[serde(rename = "typescript")]
    TypeScript,
}

impl ProjectType {
    /// Human-readable name for CLI output.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Node => "Node.js",
            Self::NextJs => "Next.js",
            Self::Angular => "Angular",
            Self::Vue => "Vue",
            Self::Svelte => "Svelte",
            Self::Python => "Python",
            Self::Maven => "Maven",
            Self::Gradle => "Gradle",
            Self::Php => "PHP",
            Self::Ruby => "Ruby",
            Self::DotNet => ".NET",
            Self::Flutter => "Flutter",
            Self::CMake => "CMake",
            Self::TypeScript => "TypeScript",
        }
    }

    /// Runtime used by the generated MCP server entry for this type.
    pub fn server_runtime(&self) -> &'static str {
        match self {
            Self::Python => "python3",
            _ => "node",
        }
    }

    /// Server template filename the settings generator references.
    pub fn server_template(&self) -> &'static str {
        match self {
            Self::Python => "python-server.py",
            Self::TypeScript => "typescript-server.ts",
            _ => "node-server.js",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Workspace conventions recognized by the topology detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkspaceKind {
    #[serde(rename = "pnpm-workspace")]
    PnpmWorkspace,
    #[serde(rename = "lerna")]
    Lerna,
    #[serde(rename = "vscode-multi-root")]
    VsCodeMultiRoot,
    #[serde(rename = "go-workspace")]
    GoWorkspace,
    #[serde(rename = "cargo-workspace")]
    CargoWorkspace,
    #[serde(rename = "yarn-workspaces")]
    YarnWorkspaces,
    #[serde(rename = "npm-workspaces")]
    NpmWorkspaces,
    /// Synthetic label for a root that holds several unrelated projects
    /// without any workspace manifest.
    #[serde(rename = "implicit multi-project")]
    ImplicitMultiProject,
}

impl WorkspaceKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PnpmWorkspace => "pnpm-workspace",
            Self::Lerna => "lerna",
            Self::VsCodeMultiRoot => "vscode-multi-root",
            Self::GoWorkspace => "go-workspace",
            Self::CargoWorkspace => "cargo-workspace",
            Self::YarnWorkspaces => "yarn-workspaces",
            Self::NpmWorkspaces => "npm-workspaces",
            Self::ImplicitMultiProject => "implicit multi-project",
        }
    }
}

impl std::fmt::Display for WorkspaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Calibration divisor for confidence normalization.
///
/// One strong indicator (weight 15) scores 60; a generic manifest (10)
/// plus a framework config (15) saturates at 100.
pub const NORMALIZATION_WEIGHT: u32 = 25;

/// Default project indicators, in tie-break priority order.
pub const DEFAULT_PROJECT_INDICATORS: &[ProjectIndicator] = &[
    ProjectIndicator::new("Cargo.toml", ProjectType::Rust, 15),
    ProjectIndicator::new("go.mod", ProjectType::Go, 15),
    ProjectIndicator::new("next.config.*", ProjectType::NextJs, 15),
    ProjectIndicator::new("angular.json", ProjectType::Angular, 15),
    ProjectIndicator::new("vue.config.js", ProjectType::Vue, 15),
    ProjectIndicator::new("svelte.config.js", ProjectType::Svelte, 15),
    ProjectIndicator::new("package.json", ProjectType::Node, 10),
    ProjectIndicator::new("pyproject.toml", ProjectType::Python, 12),
    ProjectIndicator::new("setup.py", ProjectType::Python, 8),
    ProjectIndicator::new("requirements.txt", ProjectType::Python, 5),
    ProjectIndicator::new("pom.xml", ProjectType::Maven, 12),
    ProjectIndicator::new("build.gradle", ProjectType::Gradle, 12),
    ProjectIndicator::new("build.gradle.kts", ProjectType::Gradle, 12),
    ProjectIndicator::new("composer.json", ProjectType::Php, 12),
    ProjectIndicator::new("Gemfile", ProjectType::Ruby, 12),
    ProjectIndicator::new("*.csproj", ProjectType::DotNet, 12),
    ProjectIndicator::new("*.sln", ProjectType::DotNet, 10),
    ProjectIndicator::new("pubspec.yaml", ProjectType::Flutter, 12),
    ProjectIndicator::new("CMakeLists.txt", ProjectType::CMake, 10),
    ProjectIndicator::new("tsconfig.json", ProjectType::TypeScript, 5),
];

/// Default workspace indicators. Order matters: the topology detector
/// commits to the first indicator whose pattern exists and whose
/// sub-analyzer confirms the manifest actually declares the convention.
pub const DEFAULT_WORKSPACE_INDICATORS: &[WorkspaceIndicator] = &[
    WorkspaceIndicator::new("pnpm-workspace.yaml", WorkspaceKind::PnpmWorkspace),
    WorkspaceIndicator::new("lerna.json", WorkspaceKind::Lerna),
    WorkspaceIndicator::new("*.code-workspace", WorkspaceKind::VsCodeMultiRoot),
    WorkspaceIndicator::new("go.work", WorkspaceKind::GoWorkspace),
    WorkspaceIndicator::new("Cargo.toml", WorkspaceKind::CargoWorkspace),
    WorkspaceIndicator::new("yarn.lock", WorkspaceKind::YarnWorkspaces),
    WorkspaceIndicator::new("package.json", WorkspaceKind::NpmWorkspaces),
];

/// Directory names excluded from discovery and file counting: build
/// outputs, VCS metadata, and dependency caches.
pub const IGNORED_DIRECTORIES: &[&str] = &[
    "node_modules",
    "target",
    "build",
    "dist",
    "out",
    "vendor",
    "__pycache__",
    ".venv",
    "venv",
    "coverage",
    "bin",
    "obj",
];

/// Check whether a directory name is excluded from discovery. Hidden
/// directories are excluded wholesale.
pub fn is_ignored_directory(name: &str) -> bool {
    name.starts_with('.') || IGNORED_DIRECTORIES.contains(&name)
}

/// Immutable indicator tables injected into the scorer and detector.
///
/// Wrapping the tables in a handle keeps the engine testable with fixture
/// registries instead of consulting the defaults as ambient globals.
#[derive(Debug, Clone)]
pub struct IndicatorRegistry {
    pub projects: &'static [ProjectIndicator],
    pub workspaces: &'static [WorkspaceIndicator],
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self {
            projects: DEFAULT_PROJECT_INDICATORS,
            workspaces: DEFAULT_WORKSPACE_INDICATORS,
        }
    }
}

impl IndicatorRegistry {
    /// Build a registry from custom tables.
    pub fn new(
        projects: &'static [ProjectIndicator],
        workspaces: &'static [WorkspaceIndicator],
    ) -> Self {
        Self {
            projects,
            workspaces,
        }
    }

    /// Find a project indicator by its pattern.
    pub fn find_project_indicator(&self, pattern: &str) -> Option<&ProjectIndicator> {
        self.projects.iter().find(|i| i.pattern == pattern)
    }
}
