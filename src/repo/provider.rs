//! Hosting provider templates.
//!
//! Each provider is a declarative record: host hints for classification
//! and placeholder templates for clone/web URL generation. Adding a
//! provider is a data change here, not a control-flow change in the
//! codec.

use serde::{Deserialize, Serialize};

/// Supported hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    GitHub,
    GitLab,
    Bitbucket,
    #[serde(rename = "azure-devops")]
    AzureDevOps,
    /// Catch-all for self-hosted or unrecognized hosts
    Custom,
}

impl ProviderKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
            Self::AzureDevOps => "azure-devops",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Placeholder-substitution record for one provider.
///
/// Templates understand `{host}`, `{owner}`, `{repo}`, and `{org}`.
/// Azure-style hosting uses a four-segment path where `{org}` is the
/// organization and `{owner}` carries the Azure project.
#[derive(Debug, Clone)]
pub struct ProviderTemplate {
    pub kind: ProviderKind,
    /// Host used when generated fields carry none
    pub default_host: &'static str,
    /// Substrings that classify a URL as this provider
    pub host_hints: &'static [&'static str],
    pub https: &'static str,
    pub ssh: &'static str,
    /// Browsing URL; None for providers without a known web frontend
    pub web: Option<&'static str>,
}

pub const PROVIDER_TEMPLATES: &[ProviderTemplate] = &[
    ProviderTemplate {
        kind: ProviderKind::GitHub,
        default_host: "github.com",
        host_hints: &["github.com"],
        https: "https://{host}/{owner}/{repo}.git",
        ssh: "git@{host}:{owner}/{repo}.git",
        web: Some("https://{host}/{owner}/{repo}"),
    },
    ProviderTemplate {
        kind: ProviderKind::GitLab,
        default_host: "gitlab.com",
        host_hints: &["gitlab"],
        https: "https://{host}/{owner}/{repo}.git",
        ssh: "git@{host}:{owner}/{repo}.git",
        web: Some("https://{host}/{owner}/{repo}"),
    },
    ProviderTemplate {
        kind: ProviderKind::Bitbucket,
        default_host: "bitbucket.org",
        host_hints: &["bitbucket"],
        https: "https://{host}/{owner}/{repo}.git",
        ssh: "git@{host}:{owner}/{repo}.git",
        web: Some("https://{host}/{owner}/{repo}"),
    },
    ProviderTemplate {
        kind: ProviderKind::AzureDevOps,
        default_host: "dev.azure.com",
        host_hints: &["dev.azure.com", "visualstudio.com"],
        https: "https://{host}/{org}/{owner}/_git/{repo}",
        ssh: "git@ssh.{host}:v3/{org}/{owner}/{repo}",
        web: Some("https://{host}/{org}/{owner}/_git/{repo}"),
    },
    ProviderTemplate {
        kind: ProviderKind::Custom,
        default_host: "",
        host_hints: &[],
        https: "https://{host}/{owner}/{repo}.git",
        ssh: "git@{host}:{owner}/{repo}.git",
        web: None,
    },
];

/// Look up the template record for a provider. Every kind has one.
pub fn template_for(kind: ProviderKind) -> &'static ProviderTemplate {
    PROVIDER_TEMPLATES
        .iter()
        .find(|t| t.kind == kind)
        .unwrap_or(&PROVIDER_TEMPLATES[PROVIDER_TEMPLATES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_template() {
        for kind in [
            ProviderKind::GitHub,
            ProviderKind::GitLab,
            ProviderKind::Bitbucket,
            ProviderKind::AzureDevOps,
            ProviderKind::Custom,
        ] {
            assert_eq!(template_for(kind).kind, kind);
        }
    }

    #[test]
    fn test_custom_has_no_web_template() {
        assert!(template_for(ProviderKind::Custom).web.is_none());
    }

    #[test]
    fn test_azure_templates_use_four_segments() {
        let azure = template_for(ProviderKind::AzureDevOps);
        assert!(azure.https.contains("{org}"));
        assert!(azure.https.contains("_git"));
        assert!(azure.ssh.contains("v3/"));
    }
}
