//! Remote URL parsing and generation.
//!
//! `classify` is total: every input maps to exactly one provider, with
//! `Custom` as the catch-all. `parse` never errors — unmatched fields
//! stay `None`, and an all-`None` result means "not recognized".
//! `generate` is the designed inverse of `parse`, substituting structured
//! fields into the provider's template.

use serde::{Deserialize, Serialize};

use super::provider::{template_for, ProviderKind, PROVIDER_TEMPLATES};

/// Clone protocol for URL generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Https,
    Ssh,
}

/// Repository visibility as declared in persisted configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Private,
    Public,
    Internal,
    #[default]
    Unknown,
}

/// Structured fields recovered from a remote URL.
///
/// For Azure-style hosting, `org` is the organization and `owner`
/// carries the Azure project segment; other providers leave `org` empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFields {
    pub host: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub org: Option<String>,
}

impl RemoteFields {
    /// Whether parsing recovered anything at all.
    pub fn is_recognized(&self) -> bool {
        self.host.is_some() || self.owner.is_some() || self.repo.is_some() || self.org.is_some()
    }
}

/// A named remote attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryRemote {
    pub name: String,
    pub url: String,
    pub kind: ProviderKind,
    pub host: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub org: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl RepositoryRemote {
    /// Build a remote record by classifying and parsing a URL.
    pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let kind = classify(&url);
        let fields = parse(&url, kind);

        Self {
            name: name.into(),
            url,
            kind,
            host: fields.host,
            owner: fields.owner,
            repo: fields.repo,
            org: fields.org,
            visibility: Visibility::Unknown,
        }
    }

    pub fn fields(&self) -> RemoteFields {
        RemoteFields {
            host: self.host.clone(),
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            org: self.org.clone(),
        }
    }
}

/// Classify a URL by host-hint substring. Total and idempotent.
pub fn classify(url: &str) -> ProviderKind {
    let lowered = url.to_lowercase();

    for template in PROVIDER_TEMPLATES {
        if template
            .host_hints
            .iter()
            .any(|hint| lowered.contains(hint))
        {
            return template.kind;
        }
    }

    ProviderKind::Custom
}

/// Parse a remote URL into structured fields for the given provider.
pub fn parse(url: &str, kind: ProviderKind) -> RemoteFields {
    let url = url.trim();

    if url.contains("://") {
        parse_https(url, kind)
    } else if url.contains('@') && url.contains(':') {
        parse_ssh(url, kind)
    } else {
        RemoteFields::default()
    }
}

/// Generate a clone URL from structured fields.
pub fn generate(kind: ProviderKind, fields: &RemoteFields, protocol: Protocol) -> String {
    let template = template_for(kind);
    let pattern = match protocol {
        Protocol::Https => template.https,
        Protocol::Ssh => template.ssh,
    };

    substitute(pattern, template.default_host, fields)
}

/// Generate a browsing URL, or `None` when the provider has no web
/// frontend template.
pub fn generate_web_url(kind: ProviderKind, fields: &RemoteFields) -> Option<String> {
    let template = template_for(kind);
    template
        .web
        .map(|pattern| substitute(pattern, template.default_host, fields))
}

fn substitute(pattern: &str, default_host: &str, fields: &RemoteFields) -> String {
    let host = fields.host.as_deref().unwrap_or(default_host);

    pattern
        .replace("{host}", host)
        .replace("{owner}", fields.owner.as_deref().unwrap_or(""))
        .replace("{repo}", fields.repo.as_deref().unwrap_or(""))
        .replace("{org}", fields.org.as_deref().unwrap_or(""))
}

fn parse_https(url: &str, kind: ProviderKind) -> RemoteFields {
    let Some((_, rest)) = url.split_once("://") else {
        return RemoteFields::default();
    };

    let mut parts = rest.splitn(2, '/');
    let authority = parts.next().unwrap_or_default();
    let path = parts.next().unwrap_or_default();

    // Azure HTTPS remotes often embed the organization as userinfo
    // ("https://org@dev.azure.com/..."); the host is what follows.
    let host = authority.rsplit('@').next().unwrap_or(authority);
    if host.is_empty() {
        return RemoteFields::default();
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match kind {
        ProviderKind::AzureDevOps => parse_azure_path(host, &segments),
        _ => parse_owner_repo_path(host, &segments),
    }
}

fn parse_ssh(url: &str, kind: ProviderKind) -> RemoteFields {
    let Some((_, rest)) = url.split_once('@') else {
        return RemoteFields::default();
    };
    let Some((host, path)) = rest.split_once(':') else {
        return RemoteFields::default();
    };
    if host.is_empty() {
        return RemoteFields::default();
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match kind {
        ProviderKind::AzureDevOps => {
            // "git@ssh.dev.azure.com:v3/org/project/repo" — the clone
            // host carries an "ssh." prefix the canonical host drops.
            let host = host.strip_prefix("ssh.").unwrap_or(host);
            if segments.len() >= 4 && segments[0] == "v3" {
                RemoteFields {
                    host: Some(host.to_string()),
                    org: Some(segments[1].to_string()),
                    owner: Some(segments[2].to_string()),
                    repo: Some(strip_git_suffix(segments[3]).to_string()),
                }
            } else {
                parse_owner_repo_path(host, &segments)
            }
        }
        _ => parse_owner_repo_path(host, &segments),
    }
}

/// Uniform two-segment `owner/repo` path shared by every provider except
/// Azure-style hosting.
fn parse_owner_repo_path(host: &str, segments: &[&str]) -> RemoteFields {
    let mut fields = RemoteFields {
        host: Some(host.to_string()),
        ..Default::default()
    };

    if segments.len() >= 2 {
        fields.owner = Some(segments[0].to_string());
        fields.repo = Some(strip_git_suffix(segments[1]).to_string());
    }

    fields
}

/// Four-segment `org/project/_git/repo` path.
fn parse_azure_path(host: &str, segments: &[&str]) -> RemoteFields {
    let mut fields = RemoteFields {
        host: Some(host.to_string()),
        ..Default::default()
    };

    if segments.len() >= 4 && segments[2] == "_git" {
        fields.org = Some(segments[0].to_string());
        fields.owner = Some(segments[1].to_string());
        fields.repo = Some(strip_git_suffix(segments[3]).to_string());
    }

    fields
}

fn strip_git_suffix(segment: &str) -> &str {
    segment.strip_suffix(".git").unwrap_or(segment)
}
