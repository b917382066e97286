//! Data-model schema of the backend the generated components bind to.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// All models, enums, and non-model types known to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericDataSchema {
    #[serde(default)]
    pub data_source_type: Option<String>,
    #[serde(default)]
    pub models: IndexMap<String, GenericDataModel>,
    #[serde(default)]
    pub enums: IndexMap<String, GenericDataEnum>,
    #[serde(default)]
    pub non_models: IndexMap<String, GenericDataModel>,
}

impl GenericDataSchema {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericDataModel {
    #[serde(default)]
    pub fields: IndexMap<String, GenericDataField>,
}

impl GenericDataModel {
    /// Add a field.
    pub fn with_field(mut self, name: impl Into<String>, field: GenericDataField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Fields holding a has-many relationship, with the relationship.
    pub fn has_many_fields(&self) -> impl Iterator<Item = (&str, &HasManyRelationship)> {
        self.fields.iter().filter_map(|(name, field)| match &field.relationship {
            Some(GenericDataRelationship::HasMany(rel)) => Some((name.as_str(), rel)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericDataField {
    pub data_type: DataFieldDataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<GenericDataRelationship>,
}

impl GenericDataField {
    /// A non-array, optional field of a scalar type.
    pub fn scalar(data_type: impl Into<String>) -> Self {
        Self {
            data_type: DataFieldDataType::Scalar(data_type.into()),
            required: false,
            read_only: false,
            is_array: false,
            relationship: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Type of a data field: a scalar name such as `ID` or `AWSDateTime`, or a
/// reference to a model, non-model, or enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataFieldDataType {
    Scalar(String),
    Model {
        model: String,
    },
    NonModel {
        #[serde(rename = "nonModel")]
        non_model: String,
    },
    Enum {
        #[serde(rename = "enum")]
        enum_name: String,
    },
}

impl DataFieldDataType {
    pub fn is_non_model(&self) -> bool {
        matches!(self, Self::NonModel { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GenericDataRelationship {
    #[serde(rename = "HAS_ONE")]
    HasOne(RelatedModel),
    #[serde(rename = "HAS_MANY")]
    HasMany(HasManyRelationship),
    #[serde(rename = "BELONGS_TO")]
    BelongsTo(RelatedModel),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedModel {
    pub related_model_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasManyRelationship {
    pub related_model_name: String,
    /// Foreign-key fields on the related model pointing back at this one.
    #[serde(default)]
    pub related_model_fields: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericDataEnum {
    #[serde(default)]
    pub values: Vec<String>,
}

/// Whether a form can be generated for `model`.
///
/// Non-model and relationship fields cannot be rendered as form inputs. The
/// model is supported when it has at least one renderable field and none of
/// the unrenderable fields is required.
pub fn check_is_supported_as_form(model: &GenericDataModel) -> bool {
    let mut has_supported_field = false;

    for field in model.fields.values() {
        let unsupported = field.data_type.is_non_model() || field.relationship.is_some();
        if unsupported {
            if field.required {
                return false;
            }
        } else {
            has_supported_field = true;
        }
    }

    has_supported_field
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(value: serde_json::Value) -> GenericDataModel {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_no_fields_unsupported() {
        assert!(!check_is_supported_as_form(&GenericDataModel::default()));
    }

    #[test]
    fn test_all_fields_unsupported() {
        let model = model(json!({
            "fields": {
                "nonModel": { "dataType": { "nonModel": "myNonModel" }, "required": false, "readOnly": false, "isArray": false },
                "relationship": {
                    "dataType": "ID",
                    "required": false,
                    "readOnly": false,
                    "isArray": false,
                    "relationship": { "type": "HAS_ONE", "relatedModelName": "RelatedModel" }
                }
            }
        }));
        assert!(!check_is_supported_as_form(&model));
    }

    #[test]
    fn test_supported_field_with_optional_unsupported_fields() {
        let model = model(json!({
            "fields": {
                "nonModel": { "dataType": { "nonModel": "myNonModel" }, "required": false, "readOnly": false, "isArray": false },
                "relationship": {
                    "dataType": "ID",
                    "required": false,
                    "readOnly": false,
                    "isArray": false,
                    "relationship": { "type": "HAS_ONE", "relatedModelName": "RelatedModel" }
                },
                "supportedField": { "dataType": "Boolean", "required": false, "readOnly": false, "isArray": false }
            }
        }));
        assert!(check_is_supported_as_form(&model));
    }

    #[test]
    fn test_required_unsupported_field() {
        let model = model(json!({
            "fields": {
                "requiredNonModel": { "dataType": { "nonModel": "myNonModel" }, "required": true, "readOnly": false, "isArray": false },
                "supportedField": { "dataType": "Boolean", "required": false, "readOnly": false, "isArray": false }
            }
        }));
        assert!(!check_is_supported_as_form(&model));
    }

    #[test]
    fn test_has_many_fields() {
        let author = GenericDataModel::default()
            .with_field("id", GenericDataField::scalar("ID").required())
            .with_field(
                "books",
                GenericDataField {
                    data_type: DataFieldDataType::Model { model: "Book".to_string() },
                    required: false,
                    read_only: false,
                    is_array: true,
                    relationship: Some(GenericDataRelationship::HasMany(HasManyRelationship {
                        related_model_name: "Book".to_string(),
                        related_model_fields: vec!["authorID".to_string()],
                    })),
                },
            );

        let relations: Vec<_> = author.has_many_fields().collect();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].0, "books");
        assert_eq!(relations[0].1.related_model_fields, ["authorID"]);
    }
}
