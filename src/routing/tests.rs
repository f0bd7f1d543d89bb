//! End-to-end matcher/resolver tests over the in-memory backend.

use std::sync::Arc;

use crate::config::DimensionConfig;
use crate::content::{
    ContentBackend, ContentContext, ShortcutTarget, Site, SiteDirectory, SiteSource,
    memory::{MemoryBackend, NodeSpec},
};
use crate::core::CoordinateSet;
use crate::detection::{RequestInfo, SubgraphDetector};
use crate::routing::{
    FrontendRoutePart, ResolveTarget, RouteParameters, RoutePartOptions, RoutingError,
};

struct StaticSites;

impl SiteSource for StaticSites {
    fn find_by_host(&self, host: &str) -> Option<Site> {
        host.ends_with("example.com").then(|| Site::new("examplecom"))
    }

    fn default_site(&self) -> Option<Site> {
        Some(Site::new("examplecom"))
    }
}

fn backend() -> Arc<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend.insert_site(
        "live",
        NodeSpec::site("examplecom")
            .with_identifier("site")
            .with_child(
                NodeSpec::document("about-us", "about-us")
                    .with_identifier("about")
                    .with_child(NodeSpec::document("team", "team").with_identifier("team")),
            )
            .with_child(NodeSpec::document("imprint", "imprint").hidden())
            .with_child(NodeSpec::shortcut(
                "partner",
                "partner",
                ShortcutTarget::Uri("https://partner.example.org/landing".to_string()),
            )),
    );
    Arc::new(backend)
}

fn route_part(backend: Arc<MemoryBackend>, config: DimensionConfig) -> FrontendRoutePart {
    FrontendRoutePart::new(backend, SiteDirectory::new(Arc::new(StaticSites)), config)
}

fn live_parameters() -> RouteParameters {
    let mut parameters = RouteParameters::new();
    parameters.set_request_uri_host("example.com");
    parameters
}

const SUBDOMAIN_CONFIG: &str = r#"
[[dimension]]
name = "language"
default_preset = "en"

[dimension.resolution]
mode = "subdomain"

[[dimension.preset]]
identifier = "en"
values = ["en"]
resolution_value = "en"

[[dimension.preset]]
identifier = "de"
values = ["de"]
resolution_value = "de"
"#;

const PATH_SEGMENT_CONFIG: &str = r#"
[[dimension]]
name = "language"
default_preset = "en"

[dimension.resolution]
mode = "uriPathSegment"

[dimension.resolution.options]
offset = 0

[[dimension.preset]]
identifier = "en"
values = ["en"]
resolution_value = "en"

[[dimension.preset]]
identifier = "de"
values = ["de"]
resolution_value = "de"
"#;

// ============================================================================
// matching
// ============================================================================

#[test]
fn test_match_nested_document() {
    let part = route_part(backend(), DimensionConfig::default());

    let result = part
        .match_value("about-us/team", &live_parameters())
        .unwrap()
        .unwrap();
    assert_eq!(result.context_path, "/sites/examplecom/about-us/team");
    assert_eq!(result.tags.as_slice(), &["live", "team", "about", "site"]);
}

#[test]
fn test_match_homepage_is_site_node() {
    let part = route_part(backend(), DimensionConfig::default());

    let result = part.match_value("", &live_parameters()).unwrap().unwrap();
    assert_eq!(result.context_path, "/sites/examplecom");
}

#[test]
fn test_unknown_path_is_no_match() {
    let part = route_part(backend(), DimensionConfig::default());

    assert!(part.match_value("no-such-page", &live_parameters()).unwrap().is_none());
    assert!(
        part.match_value("about-us/no-such-page", &live_parameters())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_hidden_node_does_not_match_in_live() {
    let part = route_part(backend(), DimensionConfig::default());

    assert!(part.match_value("imprint", &live_parameters()).unwrap().is_none());
}

#[test]
fn test_empty_path_without_site_content_is_fatal() {
    let backend = MemoryBackend::new();
    backend.insert_site("live", NodeSpec::site("othersite"));
    let part = route_part(Arc::new(backend), DimensionConfig::default());

    let err = part.match_value("", &live_parameters()).unwrap_err();
    assert!(matches!(err, RoutingError::NoHomepage(site) if site == "examplecom"));

    // a non-empty path against the same gap is an ordinary no-match
    let backend = MemoryBackend::new();
    backend.insert_site("live", NodeSpec::site("othersite"));
    let part = route_part(Arc::new(backend), DimensionConfig::default());
    assert!(part.match_value("about-us", &live_parameters()).unwrap().is_none());
}

#[test]
fn test_uri_path_suffix_is_stripped_and_required() {
    let part = route_part(backend(), DimensionConfig::default()).with_options(RoutePartOptions {
        uri_path_suffix: Some(".html".to_string()),
        ..RoutePartOptions::default()
    });

    let result = part
        .match_value("about-us.html", &live_parameters())
        .unwrap()
        .unwrap();
    assert_eq!(result.context_path, "/sites/examplecom/about-us");

    // missing suffix fails the precondition, recovered into a no-match
    assert!(part.match_value("about-us", &live_parameters()).unwrap().is_none());
    // the homepage carries no suffix
    assert!(part.match_value("", &live_parameters()).unwrap().is_some());
}

#[test]
fn test_only_match_site_nodes() {
    let part = route_part(backend(), DimensionConfig::default()).with_options(RoutePartOptions {
        only_match_site_nodes: true,
        ..RoutePartOptions::default()
    });

    assert!(part.match_value("", &live_parameters()).unwrap().is_some());
    assert!(part.match_value("about-us", &live_parameters()).unwrap().is_none());
}

#[test]
fn test_split_string_limits_the_matched_span() {
    let part = route_part(backend(), DimensionConfig::default()).with_options(RoutePartOptions {
        split_string: Some(".".to_string()),
        ..RoutePartOptions::default()
    });

    let result = part
        .match_value("about-us.remainder", &live_parameters())
        .unwrap()
        .unwrap();
    assert_eq!(result.context_path, "/sites/examplecom/about-us");
}

#[test]
fn test_match_with_detected_subdomain_dimension() {
    let config = DimensionConfig::from_toml_str(SUBDOMAIN_CONFIG).unwrap();
    let request = RequestInfo::new("de.example.com", "/about-us");
    let mut parameters = RouteParameters::new();
    SubgraphDetector::new(&config)
        .detect_into(&request, &mut parameters)
        .unwrap();

    let part = route_part(backend(), config);
    let result = part.match_value("about-us", &parameters).unwrap().unwrap();
    assert_eq!(result.context_path, "/sites/examplecom/about-us@live;language=de");
}

#[test]
fn test_match_strips_detected_path_segment() {
    let config = DimensionConfig::from_toml_str(PATH_SEGMENT_CONFIG).unwrap();
    let request = RequestInfo::new("example.com", "/de/about-us");
    let mut parameters = RouteParameters::new();
    SubgraphDetector::new(&config)
        .detect_into(&request, &mut parameters)
        .unwrap();

    let part = route_part(backend(), config);
    let result = part.match_value("de/about-us", &parameters).unwrap().unwrap();
    assert_eq!(result.context_path, "/sites/examplecom/about-us@live;language=de");
}

#[test]
fn test_match_in_user_workspace() {
    let backend = backend();
    backend.insert_site(
        "user-jdoe",
        NodeSpec::site("examplecom")
            .with_child(NodeSpec::document("draft", "draft").with_identifier("draft")),
    );
    let config = DimensionConfig::default();
    let request = RequestInfo::new("example.com", "/draft@user-jdoe");
    let mut parameters = RouteParameters::new();
    SubgraphDetector::new(&config)
        .detect_into(&request, &mut parameters)
        .unwrap();

    let part = route_part(backend, config);
    let result = part.match_value("draft@user-jdoe", &parameters).unwrap().unwrap();
    assert_eq!(result.context_path, "/sites/examplecom/draft@user-jdoe");
    assert!(result.tags.contains("user-jdoe"));
    assert!(result.tags.contains("draft"));
}

#[test]
fn test_unknown_workspace_is_no_match() {
    let config = DimensionConfig::default();
    let request = RequestInfo::new("example.com", "/about-us@user-nobody");
    let mut parameters = RouteParameters::new();
    SubgraphDetector::new(&config)
        .detect_into(&request, &mut parameters)
        .unwrap();

    let part = route_part(backend(), config);
    assert!(part.match_value("about-us@user-nobody", &parameters).unwrap().is_none());
}

// ============================================================================
// resolving
// ============================================================================

fn node_target(backend: &MemoryBackend, path: &str) -> ResolveTarget {
    let ctx = ContentContext::live();
    let node = backend
        .node_at(&ctx, &Site::new("examplecom"), path)
        .unwrap();
    ResolveTarget::Node { node, context: ctx }
}

#[test]
fn test_resolve_nested_document() {
    let backend = backend();
    let target = node_target(&backend, "about-us/team");
    let part = route_part(backend, DimensionConfig::default());

    let result = part.resolve_value(target).unwrap().unwrap();
    assert_eq!(result.uri_path.as_str(), "/about-us/team");
}

#[test]
fn test_resolve_site_node_is_empty_path() {
    let backend = backend();
    let target = node_target(&backend, "");
    let part = route_part(backend, DimensionConfig::default());

    let result = part.resolve_value(target).unwrap().unwrap();
    assert!(result.uri_path.is_empty());
}

#[test]
fn test_resolve_from_plain_context_path() {
    let part = route_part(backend(), DimensionConfig::default());

    let result = part
        .resolve_value(ResolveTarget::ContextPath(
            "/sites/examplecom/about-us".to_string(),
        ))
        .unwrap()
        .unwrap();
    assert_eq!(result.uri_path.as_str(), "/about-us");
}

#[test]
fn test_resolve_in_user_workspace_appends_context() {
    let backend = backend();
    backend.insert_site(
        "user-jdoe",
        NodeSpec::site("examplecom")
            .with_child(NodeSpec::document("draft", "draft").with_identifier("draft")),
    );
    let part = route_part(backend, DimensionConfig::default());

    let result = part
        .resolve_value(ResolveTarget::ContextPath(
            "/sites/examplecom/draft@user-jdoe".to_string(),
        ))
        .unwrap()
        .unwrap();
    assert_eq!(result.uri_path.as_str(), "/draft@user-jdoe");
}

#[test]
fn test_resolve_hidden_node_still_produces_a_path() {
    let backend = backend();
    let ctx = ContentContext::live().allowing_hidden();
    let node = backend
        .node_at(&ctx, &Site::new("examplecom"), "imprint")
        .unwrap();
    let part = route_part(backend, DimensionConfig::default());

    let result = part
        .resolve_value(ResolveTarget::Node { node, context: ContentContext::live() })
        .unwrap()
        .unwrap();
    assert_eq!(result.uri_path.as_str(), "/imprint");
}

#[test]
fn test_resolve_external_shortcut_bypasses_path_construction() {
    let backend = backend();
    let ctx = ContentContext::live();
    let node = backend
        .node_at(&ctx, &Site::new("examplecom"), "partner")
        .unwrap();
    let part = route_part(backend, DimensionConfig::default());

    let result = part
        .resolve_value(ResolveTarget::Node { node, context: ctx })
        .unwrap()
        .unwrap();
    assert!(result.uri_path.is_empty());
    assert_eq!(result.constraints.scheme(), Some("https"));
    assert_eq!(result.constraints.host(), Some("partner.example.org"));
    assert_eq!(result.constraints.path_prefix(), Some("landing"));
}

#[test]
fn test_resolve_with_dimensions_adds_constraints() {
    let backend = backend();
    let mut dimensions = CoordinateSet::new();
    dimensions.insert("language", vec!["de".to_string()]);
    let ctx = ContentContext::for_workspace("live", dimensions);
    let node = backend
        .node_at(&ctx, &Site::new("examplecom"), "about-us")
        .unwrap();
    let config = DimensionConfig::from_toml_str(SUBDOMAIN_CONFIG).unwrap();
    let part = route_part(backend, config);

    let result = part
        .resolve_value(ResolveTarget::Node { node, context: ctx })
        .unwrap()
        .unwrap();
    assert_eq!(result.uri_path.as_str(), "/about-us");

    let base = url::Url::parse("http://en.example.com/").unwrap();
    let uri = result.constraints.apply_to(&base, result.uri_path.relative());
    assert_eq!(uri.as_str(), "http://de.example.com/about-us");
}

#[test]
fn test_resolve_suffix_skips_site_node() {
    let backend = backend();
    let options = RoutePartOptions {
        uri_path_suffix: Some(".html".to_string()),
        ..RoutePartOptions::default()
    };

    let target = node_target(&backend, "about-us");
    let part = route_part(backend.clone(), DimensionConfig::default())
        .with_options(options.clone());
    let result = part.resolve_value(target).unwrap().unwrap();
    assert_eq!(result.constraints.path_suffix(), Some(".html"));

    let target = node_target(&backend, "");
    let part = route_part(backend, DimensionConfig::default()).with_options(options);
    let result = part.resolve_value(target).unwrap().unwrap();
    assert_eq!(result.constraints.path_suffix(), None);
}

#[test]
fn test_resolve_missing_path_segment_property_is_fatal() {
    let backend = MemoryBackend::new();
    backend.insert_site(
        "live",
        NodeSpec::site("examplecom").with_child(
            NodeSpec::document("broken", "broken").without_property("uriPathSegment"),
        ),
    );
    let backend = Arc::new(backend);
    let target = node_target(&backend, "broken");
    let part = route_part(backend, DimensionConfig::default());

    let err = part.resolve_value(target).unwrap_err();
    assert!(matches!(err, RoutingError::MissingNodeProperty { property, .. }
        if property == "uriPathSegment"));
}

#[test]
fn test_resolve_unknown_context_path_is_no_result() {
    let part = route_part(backend(), DimensionConfig::default());

    assert!(
        part.resolve_value(ResolveTarget::ContextPath(
            "/sites/examplecom/no-such-page".to_string(),
        ))
        .unwrap()
        .is_none()
    );
    assert!(
        part.resolve_value(ResolveTarget::ContextPath("not-a-site-path".to_string()))
            .unwrap()
            .is_none()
    );
}

// ============================================================================
// round trips
// ============================================================================

#[test]
fn test_resolved_path_matches_back_to_the_same_node() {
    let backend = backend();
    let target = node_target(&backend, "about-us/team");
    let part = route_part(backend, DimensionConfig::default());

    let resolved = part.resolve_value(target).unwrap().unwrap();
    let matched = part
        .match_value(resolved.uri_path.relative(), &live_parameters())
        .unwrap()
        .unwrap();
    assert_eq!(matched.context_path, "/sites/examplecom/about-us/team");
}

#[test]
fn test_matched_context_path_resolves_to_the_same_path() {
    let part = route_part(backend(), DimensionConfig::default());

    let matched = part
        .match_value("about-us/team", &live_parameters())
        .unwrap()
        .unwrap();
    let resolved = part
        .resolve_value(ResolveTarget::ContextPath(matched.context_path))
        .unwrap()
        .unwrap();
    assert_eq!(resolved.uri_path.as_str(), "/about-us/team");
}
