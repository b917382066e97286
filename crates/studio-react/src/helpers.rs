//! Helpers shared by the React render stages.

use crate::ast::{BinaryOp, Expr, TemplatePart};
use indexmap::IndexMap;
use studio_core::{
    capitalize_first_letter, lower_case_first, sanitize_name, walk_components, ActionParameter,
    ComponentNode, InvalidInputError, PropertyCondition, StateReference, StudioComponent,
    StudioComponentProperty, StudioComponentPropertyBinding,
};
use tracing::trace;

/// Identifier holding the signed-in user's attributes.
pub const AUTH_ATTRIBUTES: &str = "authAttributes";

/// Identifier of the current item inside a collection.
pub const COLLECTION_ITEM: &str = "item";

/// Facts about a component tree gathered before any code is emitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentMetadata {
    pub has_auth_bindings: bool,
    /// Models referenced by data and collection bindings, in first-use order.
    pub required_data_models: Vec<String>,
    /// State read or written anywhere in the tree, already resolved through
    /// [`resolve_state_reference`].
    pub state_references: Vec<StateReference>,
    pub component_name_to_type_map: IndexMap<String, String>,
}

impl ComponentMetadata {
    fn add_state_reference(&mut self, reference: StateReference) {
        if !self.state_references.contains(&reference) {
            self.state_references.push(reference);
        }
    }

    fn add_data_model(&mut self, model: &str) {
        if !self.required_data_models.iter().any(|m| m == model) {
            self.required_data_models.push(model.to_string());
        }
    }
}

/// Walk the component tree and collect its [`ComponentMetadata`].
pub fn compute_component_metadata(component: &StudioComponent) -> ComponentMetadata {
    let mut metadata = ComponentMetadata::default();

    walk_components(component, &mut |node| {
        metadata
            .component_name_to_type_map
            .insert(node.name().to_string(), node.component_type().to_string());
    });

    let mut references = Vec::new();
    walk_components(component, &mut |node| {
        for property in node.properties().values() {
            collect_property_facts(property, &mut metadata, &mut references);
        }
        for event in node.events().values() {
            let Some(action) = event.as_action() else { continue };
            for parameter in action.parameters.iter().flat_map(|p| p.values()) {
                match parameter {
                    ActionParameter::MutationState(state) => {
                        references.push(state.state_reference());
                        collect_property_facts(&state.set, &mut metadata, &mut references);
                    }
                    ActionParameter::Property(property) => {
                        collect_property_facts(property, &mut metadata, &mut references);
                    }
                    ActionParameter::Fields(fields) => {
                        for property in fields.values() {
                            collect_property_facts(property, &mut metadata, &mut references);
                        }
                    }
                    ActionParameter::Literal(_) => {}
                }
            }
        }
    });

    for reference in references {
        let resolved = resolve_state_reference(&metadata, &reference);
        metadata.add_state_reference(resolved);
    }

    for binding in component.binding_properties.values() {
        if let StudioComponentPropertyBinding::Data { binding_properties } = binding {
            metadata.add_data_model(&binding_properties.model);
        }
    }
    for config in component.collection_properties.iter().flat_map(|c| c.values()) {
        metadata.add_data_model(&config.model);
    }

    trace!(
        states = metadata.state_references.len(),
        models = metadata.required_data_models.len(),
        "component metadata computed"
    );
    metadata
}

fn collect_property_facts(
    property: &StudioComponentProperty,
    metadata: &mut ComponentMetadata,
    references: &mut Vec<StateReference>,
) {
    match property {
        StudioComponentProperty::Auth(_) => metadata.has_auth_bindings = true,
        StudioComponentProperty::State(reference) => references.push(reference.clone()),
        StudioComponentProperty::Concat(concat) => {
            for part in &concat.concat {
                collect_property_facts(part, metadata, references);
            }
        }
        StudioComponentProperty::Conditional(conditional) => {
            collect_property_facts(&conditional.condition.then, metadata, references);
            collect_property_facts(&conditional.condition.else_, metadata, references);
        }
        StudioComponentProperty::Bound(_)
        | StudioComponentProperty::CollectionBound(_)
        | StudioComponentProperty::Fixed(_) => {}
    }
}

/// Name of the prop a component type renders as its JSX children.
pub fn child_prop_mapping(component_type: &str) -> Option<&'static str> {
    match component_type {
        "Text" | "Heading" | "Button" | "Badge" | "Link" | "MenuButton" | "ToggleButton" => {
            Some("label")
        }
        _ => None,
    }
}

/// Child-prop mapping for the component instance called `component_name`.
pub fn get_child_prop_mapping_for_component_name(
    metadata: &ComponentMetadata,
    component_name: &str,
) -> Option<&'static str> {
    metadata
        .component_name_to_type_map
        .get(component_name)
        .and_then(|component_type| child_prop_mapping(component_type))
}

/// State on a prop rendered as children is tracked under `children`.
pub fn resolve_state_reference(metadata: &ComponentMetadata, reference: &StateReference) -> StateReference {
    match get_child_prop_mapping_for_component_name(metadata, &reference.component_name) {
        Some(mapping) if mapping == reference.property => {
            StateReference::new(&reference.component_name, "children")
        }
        _ => reference.clone(),
    }
}

/// `{Button, color}` -> `buttonColor`.
pub fn get_state_name(reference: &StateReference) -> String {
    format!(
        "{}{}",
        lower_case_first(&sanitize_name(&reference.component_name)),
        capitalize_first_letter(&reference.property)
    )
}

/// `{Button, color}` -> `setButtonColor`.
pub fn get_set_state_name(reference: &StateReference) -> String {
    format!("set{}", capitalize_first_letter(&get_state_name(reference)))
}

/// Build the expression that evaluates a component property at runtime.
pub fn property_to_expression(
    metadata: &ComponentMetadata,
    property: &StudioComponentProperty,
) -> Result<Expr, InvalidInputError> {
    let expr = match property {
        StudioComponentProperty::Fixed(fixed) => {
            fixed_value_to_expression(&fixed.value, fixed.value_type.as_deref())
        }
        StudioComponentProperty::Bound(bound) => {
            let reference = &bound.binding_properties;
            let value = binding_access(Expr::ident(&reference.property), reference.field.as_deref());
            with_default(value, bound.default_value.as_deref())
        }
        StudioComponentProperty::CollectionBound(bound) => {
            let reference = &bound.collection_binding_properties;
            let value = binding_access(Expr::ident(COLLECTION_ITEM), reference.field.as_deref());
            with_default(value, bound.default_value.as_deref())
        }
        StudioComponentProperty::Concat(concat) => {
            let mut parts = Vec::with_capacity(concat.concat.len());
            for part in &concat.concat {
                match part {
                    StudioComponentProperty::Fixed(fixed) if fixed.value.is_string() => {
                        let text = fixed.value.as_str().unwrap_or_default();
                        parts.push(TemplatePart::Text(text.to_string()));
                    }
                    other => parts.push(TemplatePart::Expr(property_to_expression(metadata, other)?)),
                }
            }
            Expr::Template(parts)
        }
        StudioComponentProperty::Conditional(conditional) => {
            conditional_to_expression(metadata, &conditional.condition)?
        }
        StudioComponentProperty::Auth(auth) => {
            Expr::ident(AUTH_ATTRIBUTES).index(Expr::string(&auth.user_attribute))
        }
        StudioComponentProperty::State(reference) => {
            Expr::ident(get_state_name(&resolve_state_reference(metadata, reference)))
        }
    };
    Ok(expr)
}

/// `property` or `property?.field`.
fn binding_access(base: Expr, field: Option<&str>) -> Expr {
    match field {
        Some(field) => base.optional_member(field),
        None => base,
    }
}

fn with_default(value: Expr, default: Option<&str>) -> Expr {
    match default {
        Some(default) => Expr::binary(value, BinaryOp::Nullish, Expr::string(default)),
        None => value,
    }
}

/// Fixed values may carry their real type next to a stringified value.
fn fixed_value_to_expression(value: &serde_json::Value, value_type: Option<&str>) -> Expr {
    let Some(text) = value.as_str() else {
        return Expr::from_json(value);
    };
    match value_type {
        Some("Number") => text.parse().map(Expr::Num).unwrap_or_else(|_| Expr::string(text)),
        Some("Boolean") => match text {
            "true" => Expr::Bool(true),
            "false" => Expr::Bool(false),
            _ => Expr::string(text),
        },
        Some("Object") | Some("Array") => serde_json::from_str(text)
            .map(|parsed| Expr::from_json(&parsed))
            .unwrap_or_else(|_| Expr::string(text)),
        _ => Expr::string(text),
    }
}

fn conditional_to_expression(
    metadata: &ComponentMetadata,
    condition: &PropertyCondition,
) -> Result<Expr, InvalidInputError> {
    let subject = binding_access(Expr::ident(&condition.property), condition.field.as_deref());
    let operand = operand_to_expression(&condition.operand, condition.operand_type.as_deref());

    let test = match condition.operator.as_str() {
        "contains" => Expr::call(subject.optional_member("includes"), [operand]),
        operator => {
            let op = match operator {
                "eq" => BinaryOp::StrictEq,
                "ne" => BinaryOp::StrictNe,
                "lt" => BinaryOp::Lt,
                "gt" => BinaryOp::Gt,
                "le" => BinaryOp::Le,
                "ge" => BinaryOp::Ge,
                _ => {
                    return Err(InvalidInputError::InvalidSchema {
                        location: condition.property.clone(),
                        reason: format!("unknown condition operator '{}'", operator),
                    })
                }
            };
            Expr::binary(subject, op, operand)
        }
    };

    Ok(Expr::conditional(
        test,
        property_to_expression(metadata, &condition.then)?,
        property_to_expression(metadata, &condition.else_)?,
    ))
}

fn operand_to_expression(operand: &serde_json::Value, operand_type: Option<&str>) -> Expr {
    match (operand.as_str(), operand_type) {
        (Some(text), Some("Int" | "Float" | "Number")) => {
            text.parse().map(Expr::Num).unwrap_or_else(|_| Expr::string(text))
        }
        (Some("true"), Some("Boolean")) => Expr::Bool(true),
        (Some("false"), Some("Boolean")) => Expr::Bool(false),
        _ => Expr::from_json(operand),
    }
}
