//! Dimension coordinate sets - one value sequence per dimension.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Mapping from dimension name to the selected preset's values.
///
/// Values are ordered most-specific first (e.g. `["en_UK", "en"]`). Entries
/// keep insertion order, which follows dimension declaration order when built
/// by the detection orchestrator. Serializes as a JSON object so it can be
/// carried through routing parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateSet {
    entries: Vec<(String, Vec<String>)>,
}

impl CoordinateSet {
    /// Create an empty coordinate set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the values for a dimension, replacing any previous entry.
    pub fn insert(&mut self, dimension: impl Into<String>, values: Vec<String>) {
        let dimension = dimension.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == dimension) {
            entry.1 = values;
        } else {
            self.entries.push((dimension, values));
        }
    }

    /// Get the values for a dimension.
    pub fn get(&self, dimension: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == dimension)
            .map(|(_, values)| values.as_slice())
    }

    /// Check whether no dimension has a value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of dimensions with values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(dimension, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

impl FromIterator<(String, Vec<String>)> for CoordinateSet {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (dimension, values) in iter {
            set.insert(dimension, values);
        }
        set
    }
}

impl Serialize for CoordinateSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (dimension, values) in &self.entries {
            map.serialize_entry(dimension, values)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CoordinateSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CoordinateSetVisitor;

        impl<'de> Visitor<'de> for CoordinateSetVisitor {
            type Value = CoordinateSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of dimension names to value arrays")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut set = CoordinateSet::new();
                while let Some((dimension, values)) =
                    access.next_entry::<String, Vec<String>>()?
                {
                    set.insert(dimension, values);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(CoordinateSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut set = CoordinateSet::new();
        set.insert("language", vec!["de".to_string()]);
        set.insert("country", vec!["com".to_string()]);

        assert_eq!(set.get("language"), Some(&["de".to_string()][..]));
        assert_eq!(set.get("country"), Some(&["com".to_string()][..]));
        assert_eq!(set.get("market"), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut set = CoordinateSet::new();
        set.insert("language", vec!["de".to_string()]);
        set.insert("language", vec!["en".to_string()]);

        assert_eq!(set.get("language"), Some(&["en".to_string()][..]));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_keeps_insertion_order() {
        let mut set = CoordinateSet::new();
        set.insert("b", vec!["1".to_string()]);
        set.insert("a", vec!["2".to_string()]);

        let names: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut set = CoordinateSet::new();
        set.insert("language", vec!["en_UK".to_string(), "en".to_string()]);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"language":["en_UK","en"]}"#);

        let parsed: CoordinateSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }
}
