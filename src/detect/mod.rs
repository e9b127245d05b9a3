//! Project and workspace classification engine.
//!
//! The engine answers three questions about a directory tree:
//! what projects live in it, what technology each project uses (with a
//! confidence score), and whether the tree is governed by a workspace
//! convention. Detection is manifest/filename based only — no source
//! parsing, no process execution, no filesystem mutation.
//!
//! # Pipeline
//!
//! 1. The workspace indicator table is walked in order; the first
//!    pattern that exists and whose convention sub-analyzer confirms the
//!    manifest selects the workspace convention.
//! 2. The sub-analyzer expands the convention's member declarations into
//!    package patterns and scored candidates.
//! 3. Plain discovery scores the root and its immediate subdirectories.
//! 4. Both candidate sets are merged (convention metadata wins),
//!    deduplicated on normalized absolute paths, and sorted by
//!    confidence.
//!
//! All tables are injected [`indicators::IndicatorRegistry`] data and all
//! filesystem access goes through the [`crate::probe::FileProbe`]
//! capability, so the engine runs against fixtures in tests.

pub mod conventions;
pub mod discovery;
pub mod indicators;
pub mod scorer;
pub mod topology;

pub use discovery::{merge_and_sort, ProjectDiscovery, DEFAULT_SCORING_FAN_OUT};
pub use indicators::{
    IndicatorRegistry, ProjectIndicator, ProjectType, WorkspaceIndicator, WorkspaceKind,
    DEFAULT_PROJECT_INDICATORS, DEFAULT_WORKSPACE_INDICATORS, IGNORED_DIRECTORIES,
    NORMALIZATION_WEIGHT,
};
pub use scorer::{ProjectCandidate, ProjectScorer};
pub use topology::{WorkspaceDetectionResult, WorkspaceDetector, WorkspaceStructure};
