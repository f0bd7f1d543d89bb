//! URI path type for type-safe request path handling.
//!
//! - Internal representation: always decoded (human-readable)
//! - Browser boundary: decode on input, encode on output

use std::borrow::Borrow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Decoded request path (internal representation)
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Never carries a query string or fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UriPath(Arc<str>);

impl UriPath {
    /// Create from a browser path (decode percent-encoding, strip query string
    /// and fragment).
    pub fn from_browser(encoded: &str) -> Self {
        use percent_encoding::percent_decode_str;
        let path = encoded.split(['?', '#']).next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::new(&decoded)
    }

    /// Create from a decoded path. Normalizes the leading slash.
    pub fn new(decoded: &str) -> Self {
        let trimmed = decoded.trim();

        if trimmed.is_empty() || trimmed == "/" {
            return Self(Arc::from("/"));
        }

        if trimmed.starts_with('/') {
            Self(Arc::from(trimmed))
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    /// Get the decoded path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path relative to the root, without the leading slash.
    #[inline]
    pub fn relative(&self) -> &str {
        self.0.trim_start_matches('/')
    }

    /// Iterate over the path segments (skips the leading empty segment).
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.relative().split('/').filter(|s| !s.is_empty())
    }

    /// The first path segment, if any.
    pub fn first_segment(&self) -> Option<&str> {
        self.segments().next()
    }

    /// The trailing part of the path starting at the last `/`.
    ///
    /// `/foo/bar@user-jdoe` -> `/bar@user-jdoe`, `/` -> `/`
    pub fn tail(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx..],
            None => &self.0,
        }
    }

    /// Check if the path is empty (only contains `/`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.as_ref() == "/"
    }

    /// Encode for browser (percent-encode non-ASCII and special characters).
    pub fn to_encoded(&self) -> String {
        use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
        self.0
            .split('/')
            .map(|segment| utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl std::fmt::Display for UriPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for UriPath {
    fn default() -> Self {
        Self::new("/")
    }
}

impl AsRef<str> for UriPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UriPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UriPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UriPath {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl PartialEq<str> for UriPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for UriPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UriPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UriPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_browser_decodes() {
        let path = UriPath::from_browser("/posts/%E4%B8%AD%E6%96%87");
        assert_eq!(path.as_str(), "/posts/中文");
    }

    #[test]
    fn test_from_browser_strips_query_and_fragment() {
        let path = UriPath::from_browser("/about-us?v=1#team");
        assert_eq!(path.as_str(), "/about-us");
    }

    #[test]
    fn test_from_browser_invalid_utf8_preserved() {
        let path = UriPath::from_browser("/posts/%FF");
        assert_eq!(path.as_str(), "/posts/%FF");
    }

    #[test]
    fn test_new_adds_leading_slash() {
        assert_eq!(UriPath::new("about-us").as_str(), "/about-us");
        assert_eq!(UriPath::new("/about-us").as_str(), "/about-us");
    }

    #[test]
    fn test_root_is_empty() {
        assert!(UriPath::new("/").is_empty());
        assert!(UriPath::new("").is_empty());
        assert!(!UriPath::new("/about-us").is_empty());
    }

    #[test]
    fn test_segments() {
        let path = UriPath::new("/de/about-us/team");
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments, vec!["de", "about-us", "team"]);
        assert_eq!(path.first_segment(), Some("de"));
    }

    #[test]
    fn test_tail() {
        assert_eq!(UriPath::new("/foo/bar@user-jdoe").tail(), "/bar@user-jdoe");
        assert_eq!(UriPath::new("/bar").tail(), "/bar");
        assert_eq!(UriPath::new("/").tail(), "/");
    }

    #[test]
    fn test_to_encoded() {
        let path = UriPath::new("/posts/中文");
        assert_eq!(path.to_encoded(), "/posts/%E4%B8%AD%E6%96%87");
    }

    #[test]
    fn test_serialize_deserialize() {
        let path = UriPath::new("/de/about-us");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#""/de/about-us""#);
        let parsed: UriPath = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, path);
    }
}
