//! Render configuration.

use serde::{Deserialize, Serialize};
use studio_core::GenericDataSchema;

/// Options for [`ReactStudioRenderer`](crate::ReactStudioRenderer).
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderConfig {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Query has-many relations of collection models when a data schema is
    /// available.
    pub nested_queries: bool,
    /// Backend data schema, used for nested collection queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_schema: Option<GenericDataSchema>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            nested_queries: true,
            data_schema: None,
        }
    }
}

impl RenderConfig {
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_nested_queries(mut self, nested_queries: bool) -> Self {
        self.nested_queries = nested_queries;
        self
    }

    pub fn with_data_schema(mut self, data_schema: GenericDataSchema) -> Self {
        self.data_schema = Some(data_schema);
        self
    }

    /// The data schema to drive nested queries with, if they are enabled.
    pub fn nested_query_schema(&self) -> Option<&GenericDataSchema> {
        self.data_schema.as_ref().filter(|_| self.nested_queries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.indent_width, 2);
        assert!(config.nested_queries);
        assert!(config.nested_query_schema().is_none());
    }

    #[test]
    fn test_partial_json() {
        let config: RenderConfig = serde_json::from_value(json!({ "indentWidth": 4 })).unwrap();
        assert_eq!(config, RenderConfig::default().with_indent_width(4));
    }

    #[test]
    fn test_nested_queries_disabled() {
        let config = RenderConfig::default()
            .with_data_schema(GenericDataSchema::new())
            .with_nested_queries(false);
        assert!(config.nested_query_schema().is_none());
        assert!(config.with_nested_queries(true).nested_query_schema().is_some());
    }
}
