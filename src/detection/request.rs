//! Inbound request facts relevant to dimension detection.

use url::Url;

use crate::core::UriPath;

/// The parts of an inbound request the detectors inspect: host and path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    host: String,
    path: UriPath,
}

impl RequestInfo {
    pub fn new(host: impl Into<String>, path: impl Into<UriPath>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
        }
    }

    /// Build from a full request URI. Fails for host-less URIs.
    pub fn from_url(url: &Url) -> Option<Self> {
        let host = url.host_str()?;
        Some(Self::new(host, UriPath::from_browser(url.path())))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &UriPath {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_url() {
        let url = Url::parse("https://de.example.com/about-us?utm=1").unwrap();
        let request = RequestInfo::from_url(&url).unwrap();
        assert_eq!(request.host(), "de.example.com");
        assert_eq!(request.path().as_str(), "/about-us");
    }

    #[test]
    fn test_from_url_without_host() {
        let url = Url::parse("mailto:user@example.com").unwrap();
        assert!(RequestInfo::from_url(&url).is_none());
    }
}
