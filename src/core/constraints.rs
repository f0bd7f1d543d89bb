//! Accumulating URI constraints for link generation.
//!
//! Link processors add constraints (host rewriting, path prefixing) to the
//! URI of a resolved route without knowing the final base URI. Constraints
//! only accumulate; a later processor never removes what an earlier one set.

use url::Url;

/// A host prefix replacement rule.
///
/// `prefix` is prepended to the host after any of `replace` prefixes
/// (each followed by a separator dot) has been stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPrefix {
    pub prefix: String,
    pub replace: Vec<String>,
}

/// A host suffix replacement rule, mirroring [`HostPrefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSuffix {
    pub suffix: String,
    pub replace: Vec<String>,
}

/// Accumulated adjustments to apply to a generated URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriConstraints {
    scheme: Option<String>,
    host: Option<String>,
    host_prefix: Option<HostPrefix>,
    host_suffix: Option<HostSuffix>,
    path_prefix: Option<String>,
    path_suffix: Option<String>,
}

impl UriConstraints {
    /// Create an empty constraint set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture scheme, host and path of a full URI, for results that bypass
    /// path construction entirely (external shortcut targets).
    pub fn from_uri(uri: &Url) -> Self {
        Self {
            scheme: Some(uri.scheme().to_string()),
            host: uri.host_str().map(str::to_string),
            host_prefix: None,
            host_suffix: None,
            path_prefix: Some(uri.path().trim_start_matches('/').to_string()),
            path_suffix: None,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Require the host to carry `prefix`, replacing any of the
    /// `replace` prefixes currently present.
    pub fn with_host_prefix(
        mut self,
        prefix: impl Into<String>,
        replace: impl IntoIterator<Item = String>,
    ) -> Self {
        self.host_prefix = Some(HostPrefix {
            prefix: prefix.into(),
            replace: replace.into_iter().collect(),
        });
        self
    }

    /// Require the host to carry `suffix`, replacing any of the
    /// `replace` suffixes currently present.
    pub fn with_host_suffix(
        mut self,
        suffix: impl Into<String>,
        replace: impl IntoIterator<Item = String>,
    ) -> Self {
        self.host_suffix = Some(HostSuffix {
            suffix: suffix.into(),
            replace: replace.into_iter().collect(),
        });
        self
    }

    /// Set or extend the path prefix. With `append`, the new prefix is placed
    /// after an already-present one; otherwise it is placed in front.
    pub fn with_path_prefix(mut self, prefix: impl Into<String>, append: bool) -> Self {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return self;
        }
        self.path_prefix = Some(match self.path_prefix.take() {
            Some(existing) if append => format!("{existing}{prefix}"),
            Some(existing) => format!("{prefix}{existing}"),
            None => prefix,
        });
        self
    }

    /// Pack another dimension code into the leading path segment: an empty
    /// prefix becomes `code/`, an existing `de/` prefix becomes
    /// `de<delimiter>code/`.
    pub fn with_packed_path_prefix(mut self, code: &str, delimiter: &str) -> Self {
        if code.is_empty() {
            return self;
        }
        self.path_prefix = Some(match self.path_prefix.take() {
            Some(existing) => {
                format!("{}{delimiter}{code}/", existing.trim_end_matches('/'))
            }
            None => format!("{code}/"),
        });
        self
    }

    pub fn with_path_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.path_suffix = Some(suffix.into());
        self
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn path_prefix(&self) -> Option<&str> {
        self.path_prefix.as_deref()
    }

    pub fn path_suffix(&self) -> Option<&str> {
        self.path_suffix.as_deref()
    }

    /// Apply the constraints to a base URI and a route path, producing the
    /// final absolute URI.
    pub fn apply_to(&self, base: &Url, uri_path: &str) -> Url {
        let mut uri = base.clone();

        if let Some(scheme) = &self.scheme {
            let _ = uri.set_scheme(scheme);
        }
        if let Some(host) = &self.host {
            let _ = uri.set_host(Some(host));
        }
        if let Some(host) = uri.host_str().map(|h| self.transform_host(h))
            && Some(host.as_str()) != uri.host_str()
        {
            let _ = uri.set_host(Some(&host));
        }

        let mut path = String::from("/");
        if let Some(prefix) = &self.path_prefix {
            path.push_str(prefix.trim_start_matches('/'));
        }
        path.push_str(uri_path.trim_start_matches('/'));
        if let Some(suffix) = &self.path_suffix
            && !uri_path.is_empty()
        {
            path.push_str(suffix);
        }
        uri.set_path(&path);

        uri
    }

    /// Apply host prefix/suffix replacement rules to a host name.
    fn transform_host(&self, host: &str) -> String {
        let mut host = host.to_string();

        if let Some(rule) = &self.host_prefix {
            for replace in &rule.replace {
                if replace.is_empty() {
                    continue;
                }
                if let Some(rest) = host
                    .strip_prefix(replace.as_str())
                    .and_then(|rest| rest.strip_prefix('.'))
                {
                    host = rest.to_string();
                    break;
                }
            }
            host = format!("{}{}", rule.prefix, host);
        }

        if let Some(rule) = &self.host_suffix {
            for replace in &rule.replace {
                if replace.is_empty() {
                    continue;
                }
                if let Some(rest) = host.strip_suffix(replace.as_str()) {
                    host = rest.to_string();
                    break;
                }
            }
            host = format!("{}{}", host, rule.suffix);
        }

        host
    }
}
