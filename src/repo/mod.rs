//! Repository remote URL codec.
//!
//! Transforms remote URLs between string and structured form per hosting
//! provider, and extracts remote URLs from a project's `.git/config`.
//! The provider table in [`provider`] is the extension point for new
//! hosts.

pub mod codec;
pub mod git_config;
pub mod provider;

pub use codec::{
    classify, generate, generate_web_url, parse, Protocol, RemoteFields, RepositoryRemote,
    Visibility,
};
pub use git_config::{origin_url, remote_url};
pub use provider::{template_for, ProviderKind, ProviderTemplate, PROVIDER_TEMPLATES};
