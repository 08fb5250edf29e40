use std::fmt;

use thiserror::Error;
use url::Url;

const WATCH_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];
const SHORT_HOSTS: &[&str] = &["youtu.be", "www.youtu.be"];
const PATH_PREFIXES: &[&str] = &["embed", "shorts", "v", "live"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("empty identifier")]
    Empty,
    #[error("malformed url {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },
    #[error("unsupported host {0:?}")]
    UnsupportedHost(String),
    #[error("no media identifier in {0:?}")]
    MissingId(String),
}

/// Bare identifier naming one remote media item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub identifier: Identifier,
    pub was_url: bool,
}

/// Returns true when `raw` should be parsed as a URL rather than taken verbatim.
pub fn is_url(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.contains("://") {
        return true;
    }
    let host = raw.split('/').next().unwrap_or(raw);
    raw.contains('/') && (is_watch_host(host) || is_short_host(host))
}

/// Reduces a raw argument to a bare identifier, extracting it from a URL when needed.
pub fn normalize_identifier(raw: &str) -> Result<Normalized, IdentifierError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if !is_url(trimmed) {
        return Ok(Normalized {
            identifier: Identifier(trimmed.to_string()),
            was_url: false,
        });
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&with_scheme).map_err(|err| IdentifierError::MalformedUrl {
        url: trimmed.to_string(),
        reason: err.to_string(),
    })?;
    let identifier = extract_id(&url).ok_or_else(|| match url.host_str() {
        Some(host) if !is_watch_host(host) && !is_short_host(host) => {
            IdentifierError::UnsupportedHost(host.to_string())
        }
        Some(_) => IdentifierError::MissingId(trimmed.to_string()),
        None => IdentifierError::MalformedUrl {
            url: trimmed.to_string(),
            reason: "missing host".to_string(),
        },
    })?;

    Ok(Normalized {
        identifier: Identifier(identifier),
        was_url: true,
    })
}

fn extract_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let candidate = if is_short_host(host) {
        segments.next().map(ToOwned::to_owned)
    } else if is_watch_host(host) {
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some(prefix) if PATH_PREFIXES.contains(&prefix) => {
                segments.next().map(ToOwned::to_owned)
            }
            _ => None,
        }
    } else {
        None
    };

    candidate.filter(|id| is_valid_id(id))
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_watch_host(host: &str) -> bool {
    WATCH_HOSTS.iter().any(|h| h.eq_ignore_ascii_case(host))
}

fn is_short_host(host: &str) -> bool {
    SHORT_HOSTS.iter().any(|h| h.eq_ignore_ascii_case(host))
}
