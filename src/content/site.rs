//! Site lookup with a bounded per-host memo.

use std::sync::Arc;

use dashmap::DashMap;

use crate::debug;

/// Upper bound for the per-host memo; the memo is reset when exceeded so a
/// flood of unique Host headers cannot grow it without bound.
const HOST_MEMO_CAPACITY: usize = 1024;

/// A configured site, identified by its site node name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub name: String,
}

impl Site {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Site/domain configuration collaborator.
pub trait SiteSource: Send + Sync {
    /// The site bound to the given host name, if any.
    fn find_by_host(&self, host: &str) -> Option<Site>;

    /// The configured default site, if any.
    fn default_site(&self) -> Option<Site>;
}

/// Read-through, per-process memo over a [`SiteSource`].
///
/// Site-to-domain bindings are not expected to change within a running
/// process; staleness after configuration changes requires a restart.
/// Concurrent first-writes are last-write-wins, which is acceptable since
/// the computed value is deterministic for a given host.
pub struct SiteDirectory {
    source: Arc<dyn SiteSource>,
    by_host: DashMap<String, Site>,
}

impl SiteDirectory {
    pub fn new(source: Arc<dyn SiteSource>) -> Self {
        Self {
            source,
            by_host: DashMap::new(),
        }
    }

    /// The site serving the given host: the host's bound site, or the
    /// default site. Only successful lookups are memoized.
    pub fn site_for_host(&self, host: &str) -> Option<Site> {
        if let Some(site) = self.by_host.get(host) {
            return Some(site.clone());
        }

        let site = self
            .source
            .find_by_host(host)
            .or_else(|| self.source.default_site())?;

        if self.by_host.len() >= HOST_MEMO_CAPACITY {
            debug!("site"; "host memo exceeded {HOST_MEMO_CAPACITY} entries, resetting");
            self.by_host.clear();
        }
        self.by_host.insert(host.to_string(), site.clone());

        Some(site)
    }
}
