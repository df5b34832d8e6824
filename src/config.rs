//! Parser configuration.
//!
//! Everything the parser needs to know about the wiki it runs for is passed in
//! a [`QueryConfig`]: permitted features, namespace names, property types and
//! the limits used for pruning. The configuration is immutable once a parser
//! has been built from it. It can be loaded from JSON, where every field is
//! optional:
//!
//! ```json
//! {
//!   "features": "PROPERTY | CATEGORY | CONJUNCTION",
//!   "category_label": "Kategorie",
//!   "default_namespaces": [0],
//!   "property_types": { "Population": "number" },
//!   "max_size": 8
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ast::datavalue::{CANONICAL_NAMESPACES, NS_CATEGORY, NS_CONCEPT};
use crate::ast::{Comparator, Property, QueryFeatures, ValueType};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid delimiter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("the {0} namespace label must not be empty")]
    EmptyLabel(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Constructs the parser accepts.
    pub features: QueryFeatures,
    /// Depth of subcategory expansion when queries are evaluated; any value
    /// above zero makes class conditions cost 1 regardless of their size.
    pub subcategory_depth: u32,
    /// Localized name of the category namespace.
    pub category_label: String,
    /// Localized name of the concept namespace.
    pub concept_label: String,
    /// Additional namespace names, for `[[Name:+]]` atoms.
    pub namespaces: BTreeMap<String, i32>,
    /// Namespaces a query is restricted to when it does not name any.
    pub default_namespaces: Option<Vec<i32>>,
    /// Value types by property label; unlisted properties hold pages.
    pub property_types: BTreeMap<String, ValueType>,
    /// Read a bare `<` or `>` as a strict comparison.
    pub strict_comparators: bool,
    /// Comparator prefixes recognised in values.
    pub comparators: Vec<Comparator>,
    /// Upper-case the first letter of titles.
    pub capital_links: bool,
    pub max_size: usize,
    pub max_depth: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            features: QueryFeatures::all(),
            subcategory_depth: 10,
            category_label: "Category".to_string(),
            concept_label: "Concept".to_string(),
            namespaces: BTreeMap::new(),
            default_namespaces: None,
            property_types: BTreeMap::new(),
            strict_comparators: false,
            comparators: Comparator::ALL.to_vec(),
            capital_links: true,
            max_size: 12,
            max_depth: 4,
        }
    }
}

impl QueryConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: QueryConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.category_label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel("category"));
        }
        if self.concept_label.trim().is_empty() {
            return Err(ConfigError::EmptyLabel("concept"));
        }
        Ok(())
    }

    pub fn hierarchy_expansion(&self) -> bool {
        self.subcategory_depth > 0
    }

    /// Spellings of the category namespace, localized one first.
    pub fn category_labels(&self) -> Vec<&str> {
        let mut labels = vec![self.category_label.as_str()];
        if !self.category_label.eq_ignore_ascii_case("Category") {
            labels.push("Category");
        }
        labels
    }

    /// Spellings of the concept namespace, localized one first.
    pub fn concept_labels(&self) -> Vec<&str> {
        let mut labels = vec![self.concept_label.as_str()];
        if !self.concept_label.eq_ignore_ascii_case("Concept") {
            labels.push("Concept");
        }
        labels
    }

    /// Namespace id for a name as written in a query (`Help`, `user_talk`,
    /// or the empty string for the main namespace).
    pub fn namespace_index(&self, name: &str) -> Option<i32> {
        let name = name.trim().replace('_', " ");
        let matches = |candidate: &str| candidate.eq_ignore_ascii_case(&name);

        if matches(&self.category_label) {
            return Some(NS_CATEGORY);
        }
        if matches(&self.concept_label) {
            return Some(NS_CONCEPT);
        }
        if matches("Main") {
            return Some(0);
        }
        self.namespaces
            .iter()
            .find(|(label, _)| matches(label))
            .map(|(_, id)| *id)
            .or_else(|| {
                CANONICAL_NAMESPACES
                    .iter()
                    .find(|(label, _)| matches(label))
                    .map(|(_, id)| *id)
            })
    }

    /// Name used when writing a namespace back into a query.
    pub fn namespace_label(&self, namespace: i32) -> Option<String> {
        match namespace {
            NS_CATEGORY => return Some(self.category_label.clone()),
            NS_CONCEPT => return Some(self.concept_label.clone()),
            _ => {}
        }
        self.namespaces
            .iter()
            .find(|(_, id)| **id == namespace)
            .map(|(label, _)| label.clone())
            .or_else(|| {
                CANONICAL_NAMESPACES
                    .iter()
                    .find(|(_, id)| *id == namespace)
                    .map(|(label, _)| label.to_string())
            })
    }

    /// How values of a property are read. Inverse properties hold pages.
    pub fn value_type(&self, property: &Property) -> ValueType {
        if property.inverse {
            return ValueType::Page;
        }
        self.property_types
            .get(&property.label)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = QueryConfig::from_json_str("{}").unwrap();
        assert_eq!(config, QueryConfig::default());
        assert_eq!(config.features, QueryFeatures::all());
        assert!(config.hierarchy_expansion());
    }

    #[test]
    fn features_read_as_flag_names() {
        let config =
            QueryConfig::from_json_str(r#"{ "features": "PROPERTY | CATEGORY" }"#).unwrap();
        assert_eq!(
            config.features,
            QueryFeatures::PROPERTY | QueryFeatures::CATEGORY
        );
    }

    #[test]
    fn property_types_and_inverse() {
        let config =
            QueryConfig::from_json_str(r#"{ "property_types": { "Population": "number" } }"#)
                .unwrap();
        assert_eq!(config.value_type(&Property::new("Population")), ValueType::Number);
        assert_eq!(config.value_type(&Property::inverse("Population")), ValueType::Page);
        assert_eq!(config.value_type(&Property::new("Located in")), ValueType::Page);
    }

    #[test]
    fn namespace_lookup() {
        let config = QueryConfig::from_json_str(
            r#"{ "category_label": "Kategorie", "namespaces": { "Recipe": 3000 } }"#,
        )
        .unwrap();
        assert_eq!(config.namespace_index("kategorie"), Some(NS_CATEGORY));
        assert_eq!(config.namespace_index("Category"), Some(NS_CATEGORY));
        assert_eq!(config.namespace_index("user_talk"), Some(3));
        assert_eq!(config.namespace_index(""), Some(0));
        assert_eq!(config.namespace_index("recipe"), Some(3000));
        assert_eq!(config.namespace_index("Nowhere"), None);
        assert_eq!(config.namespace_label(NS_CATEGORY).as_deref(), Some("Kategorie"));
        assert_eq!(config.namespace_label(3000).as_deref(), Some("Recipe"));
        assert_eq!(config.namespace_label(12).as_deref(), Some("Help"));
        assert_eq!(config.category_labels(), vec!["Kategorie", "Category"]);
    }

    #[test]
    fn empty_label_is_rejected() {
        let err = QueryConfig::from_json_str(r#"{ "concept_label": " " }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyLabel("concept")));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = QueryConfig::from_json_str("{ max_size: 3 ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("wikiq-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "max_size": 3, "max_depth": 1 }"#).unwrap();
        let config = QueryConfig::from_json_file(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!((config.max_size, config.max_depth), (3, 1));

        let err = QueryConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
