//! Per-node dimension URI constraints.

use crate::config::DimensionConfig;
use crate::content::ContentContext;
use crate::core::UriConstraints;
use crate::detection::{DEFAULT_URI_PATH_SEGMENT_DELIMITER, DetectionError};
use crate::linking::resolve_link_processor;

/// Builds the dimension-derived URI constraints for one resolved node.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubgraphUriProcessor;

impl SubgraphUriProcessor {
    /// Constraints expressing the context's dimension values, accumulated
    /// in dimension declaration order. Dimensions without a value in the
    /// context, or whose values match no preset, contribute nothing.
    pub fn dimension_constraints(
        &self,
        config: &DimensionConfig,
        ctx: &ContentContext,
    ) -> Result<UriConstraints, DetectionError> {
        let mut constraints = UriConstraints::empty();
        for declaration in config.dimensions() {
            let Some(values) = ctx.dimensions.get(&declaration.name) else {
                continue;
            };
            let Some(preset) = declaration.config.preset_by_values(values) else {
                continue;
            };
            let processor = resolve_link_processor(
                &declaration.name,
                &declaration.config.resolution.mode,
            )?;
            let delimiter = config
                .uri_path_segment_delimiter
                .as_deref()
                .or_else(|| {
                    declaration
                        .config
                        .resolution
                        .options
                        .as_ref()
                        .and_then(|options| options.delimiter.as_deref())
                })
                .unwrap_or(DEFAULT_URI_PATH_SEGMENT_DELIMITER);
            constraints = processor.process_uri_constraints(
                constraints,
                &declaration.config,
                preset,
                delimiter,
            );
        }
        Ok(constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    use crate::core::CoordinateSet;

    const CONFIG: &str = r#"
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

[[dimension]]
name = "country"
default_preset = "global"

[dimension.resolution]
mode = "uriPathSegment"

[dimension.resolution.options]
offset = 0

[[dimension.preset]]
identifier = "global"
values = ["global"]
resolution_value = "global"

[[dimension.preset]]
identifier = "at"
values = ["at"]
resolution_value = "at"
"#;

    fn context(pairs: &[(&str, &str)]) -> ContentContext {
        let mut dimensions = CoordinateSet::new();
        for (dimension, value) in pairs {
            dimensions.insert(*dimension, vec![value.to_string()]);
        }
        ContentContext::for_workspace("live", dimensions)
    }

    #[test]
    fn test_constraints_accumulate_across_dimensions() {
        let config = DimensionConfig::from_toml_str(CONFIG).unwrap();
        let ctx = context(&[("language", "de"), ("country", "at")]);

        let constraints = SubgraphUriProcessor
            .dimension_constraints(&config, &ctx)
            .unwrap();

        let base = Url::parse("http://en.example.com/").unwrap();
        let uri = constraints.apply_to(&base, "about-us");
        assert_eq!(uri.as_str(), "http://de.example.com/at/about-us");
    }

    #[test]
    fn test_missing_dimension_contributes_nothing() {
        let config = DimensionConfig::from_toml_str(CONFIG).unwrap();
        let ctx = context(&[("country", "at")]);

        let constraints = SubgraphUriProcessor
            .dimension_constraints(&config, &ctx)
            .unwrap();

        let base = Url::parse("http://example.com/").unwrap();
        let uri = constraints.apply_to(&base, "about-us");
        assert_eq!(uri.as_str(), "http://example.com/at/about-us");
    }

    #[test]
    fn test_unknown_values_contribute_nothing() {
        let config = DimensionConfig::from_toml_str(CONFIG).unwrap();
        let ctx = context(&[("country", "fr")]);

        let constraints = SubgraphUriProcessor
            .dimension_constraints(&config, &ctx)
            .unwrap();
        assert_eq!(constraints, UriConstraints::empty());
    }

    #[test]
    fn test_consecutive_path_dimensions_pack() {
        let toml = r#"
uri_path_segment_delimiter = "-"

[[dimension]]
name = "language"
default_preset = "de"

[[dimension.preset]]
identifier = "de"
values = ["de"]
resolution_value = "de"

[[dimension]]
name = "country"
default_preset = "at"

[[dimension.preset]]
identifier = "at"
values = ["at"]
resolution_value = "at"
"#;
        let config = DimensionConfig::from_toml_str(toml).unwrap();
        let ctx = context(&[("language", "de"), ("country", "at")]);

        let constraints = SubgraphUriProcessor
            .dimension_constraints(&config, &ctx)
            .unwrap();
        assert_eq!(constraints.path_prefix(), Some("de-at/"));
    }
}
