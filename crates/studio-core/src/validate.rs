//! Schema validation, run before any code is generated.

use crate::errors::InvalidInputError;
use crate::naming::sanitize_name;
use crate::schema::{ComponentNode, StudioComponent, StudioComponentEvent, StudioComponentPropertyBinding};
use tracing::debug;

/// Check that a component schema is complete enough to generate code from.
pub fn validate_component(component: &StudioComponent) -> Result<(), InvalidInputError> {
    if component.name.trim().is_empty() {
        return Err(InvalidInputError::schema("component", "name must not be empty"));
    }
    if sanitize_name(&component.name).is_empty() {
        return Err(InvalidInputError::schema(
            component.name.as_str(),
            "name has no identifier characters",
        ));
    }

    for (prop, binding) in &component.binding_properties {
        if let StudioComponentPropertyBinding::Data { binding_properties } = binding {
            if binding_properties.model.is_empty() {
                return Err(InvalidInputError::schema(
                    format!("{}.bindingProperties.{}", component.name, prop),
                    "data binding has no model",
                ));
            }
        }
    }

    if let Some(collection) = &component.collection_properties {
        for (prop, config) in collection {
            if config.model.is_empty() {
                return Err(InvalidInputError::schema(
                    format!("{}.collectionProperties.{}", component.name, prop),
                    "collection has no model",
                ));
            }
        }
    }

    validate_node(component, &component.name)?;
    debug!(component = %component.name, "schema validated");
    Ok(())
}

fn validate_node(node: &dyn ComponentNode, location: &str) -> Result<(), InvalidInputError> {
    if node.component_type().is_empty() {
        return Err(InvalidInputError::schema(location, "componentType must not be empty"));
    }

    for (event, value) in node.events() {
        if let StudioComponentEvent::Action(action) = value {
            if action.action.is_empty() {
                return Err(InvalidInputError::schema(
                    format!("{}.events.{}", location, event),
                    "action must not be empty",
                ));
            }
        }
    }

    for child in node.children() {
        validate_node(child, &format!("{}.{}", location, child.name))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ActionStudioComponentEvent, StudioComponentChild};
    use serde_json::json;

    fn component(value: serde_json::Value) -> StudioComponent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_valid_component() {
        let comp = component(json!({
            "name": "AuthorCard",
            "componentType": "Flex",
            "children": [{ "name": "Title", "componentType": "Text" }]
        }));
        assert!(validate_component(&comp).is_ok());
    }

    #[test]
    fn test_empty_name() {
        let comp = component(json!({ "name": "  ", "componentType": "Flex" }));
        assert!(matches!(
            validate_component(&comp),
            Err(InvalidInputError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_unsanitizable_name() {
        let comp = component(json!({ "name": "???", "componentType": "Flex" }));
        assert!(validate_component(&comp).is_err());
    }

    #[test]
    fn test_child_without_type_reports_location() {
        let mut comp = component(json!({ "name": "Card", "componentType": "Flex" }));
        comp.children.push(
            StudioComponentChild::new("Body", "View").with_child(StudioComponentChild::new("Label", "")),
        );

        let err = validate_component(&comp).unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::InvalidSchema {
                location: "Card.Body.Label".to_string(),
                reason: "componentType must not be empty".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_action() {
        let mut comp = component(json!({ "name": "Card", "componentType": "Flex" }));
        comp.children.push(
            StudioComponentChild::new("Save", "Button")
                .with_event("click", StudioComponentEvent::Action(ActionStudioComponentEvent::new(""))),
        );
        assert!(validate_component(&comp).is_err());
    }

    #[test]
    fn test_collection_without_model() {
        let comp = component(json!({
            "name": "AuthorCollection",
            "componentType": "Collection",
            "collectionProperties": { "items": { "model": "" } }
        }));
        assert!(validate_component(&comp).is_err());
    }
}
