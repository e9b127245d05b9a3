pub mod cli;
pub mod commands;
pub mod config;
pub mod detect;
pub mod logging;
pub mod probe;
pub mod repo;
pub mod settings;

pub use config::Config;
pub use detect::{
    IndicatorRegistry, ProjectCandidate, ProjectType, WorkspaceDetectionResult, WorkspaceDetector,
    WorkspaceKind, WorkspaceStructure,
};
pub use probe::{FileProbe, FsProbe};
pub use settings::WorkspaceSettings;
