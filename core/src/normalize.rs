use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
#[error("invalid url {input:?}: {reason}")]
pub struct InvalidUrl {
    pub input: String,
    pub reason: String,
}

/// Deduplication key for a page: `host[:port]` followed by the path without
/// its trailing slash. Scheme, query and fragment never take part.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedUrl(String);

impl NormalizedUrl {
    pub fn as_str(&self) -> &str { &self.0 }

    pub fn into_string(self) -> String { self.0 }

    /// Host part of the key, without port.
    pub fn host(&self) -> &str {
        // bracketed IPv6 hosts carry their own colons
        let end = match self.0.strip_prefix('[') {
            Some(rest) => rest.find(']').map_or(self.0.len(), |i| i + 2),
            None => self.0.find(['/', ':']).unwrap_or(self.0.len()),
        };
        &self.0[..end]
    }

    /// Normalizes the key again after giving it back a scheme. A normalized
    /// key always survives this unchanged.
    pub fn renormalize(&self) -> Result<NormalizedUrl, InvalidUrl> {
        normalize_url(&format!("http://{}", self.0))
    }
}

impl fmt::Display for NormalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&Url> for NormalizedUrl {
    fn from(url: &Url) -> Self {
        let mut key = url.host_str().unwrap_or_default().to_string();
        if let Some(port) = url.port() {
            key.push(':');
            key.push_str(&port.to_string());
        }
        key.push_str(url.path().trim_end_matches('/'));
        NormalizedUrl(key)
    }
}

pub fn normalize_url(raw: &str) -> Result<NormalizedUrl, InvalidUrl> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidUrl { input: raw.to_string(), reason: "empty url".into() });
    }
    let url = Url::parse(trimmed).map_err(|e| InvalidUrl { input: raw.to_string(), reason: e.to_string() })?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(InvalidUrl { input: raw.to_string(), reason: "url has no host".into() });
    }
    Ok(NormalizedUrl::from(&url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_scheme_slash_query_and_fragment() {
        let cases = [
            "http://www.hello.com/world",
            "http://www.hello.com/world/",
            "https://www.hello.com/world",
            "https://www.hello.com/world/",
            "https://www.hello.com/world?unit=testing",
            "https://www.hello.com/world?unit=testing#foo",
        ];
        for c in cases {
            assert_eq!(normalize_url(c).unwrap().as_str(), "www.hello.com/world", "{c}");
        }
    }

    #[test]
    fn root_path_collapses_to_host() {
        assert_eq!(normalize_url("https://h.test/").unwrap().as_str(), "h.test");
        assert_eq!(normalize_url("https://h.test").unwrap().as_str(), "h.test");
    }

    #[test]
    fn keeps_explicit_port() {
        let n = normalize_url("http://127.0.0.1:8080/docs/").unwrap();
        assert_eq!(n.as_str(), "127.0.0.1:8080/docs");
        assert_eq!(n.host(), "127.0.0.1");
    }

    #[test]
    fn host_of_ipv6_key_keeps_brackets() {
        let n = normalize_url("http://[::1]:8080/docs").unwrap();
        assert_eq!(n.as_str(), "[::1]:8080/docs");
        assert_eq!(n.host(), "[::1]");
        assert_eq!(normalize_url("http://[::1]/").unwrap().host(), "[::1]");
    }

    #[test]
    fn renormalize_is_stable() {
        for raw in ["http://h/p/", "https://h/p?x=1#y", "http://h", "http://h:81/a/b//"] {
            let once = normalize_url(raw).unwrap();
            assert_eq!(once.renormalize().unwrap(), once, "{raw}");
        }
    }

    #[test]
    fn rejects_blank_and_hostless_input() {
        assert!(normalize_url("").is_err());
        assert!(normalize_url("   ").is_err());
        assert!(normalize_url("/relative/path").is_err());
        assert!(normalize_url("mailto:someone@example.com").is_err());
    }
}
