//! React component renderer.
//!
//! Runs the full pipeline for one component schema: validation, metadata
//! collection, statement building, JSX tree construction, and printing.

use crate::ast::{
    BinaryOp, Expr, FunctionDecl, JsxAttribute, JsxChild, JsxElement, ObjectMember, Pattern, Stmt,
};
use crate::collection::{build_collection_statements, collection_prop_alias};
use crate::config::RenderConfig;
use crate::helpers::{
    child_prop_mapping, compute_component_metadata, get_set_state_name, get_state_name,
    property_to_expression, ComponentMetadata, AUTH_ATTRIBUTES, COLLECTION_ITEM,
};
use crate::hooks::HookName;
use crate::printer::Printer;
use crate::variants::{build_variant_statements, overrides_prop_alias};
use crate::workflow::{build_use_action_statement, get_action_identifier, get_component_actions};
use convert_case::{Case, Casing};
use studio_core::{
    capitalize_first_letter, sanitize_name, validate_component, walk_components, ComponentNode,
    InvalidInputError, Result, StateReference, StudioComponent, StudioComponentEvent,
    StudioComponentProperty,
};
use tracing::debug;

const PROPS: &str = "props";
const OVERRIDES: &str = "overrides";
const REST: &str = "rest";

/// Generated source for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedComponent {
    /// Exported function name.
    pub name: String,
    pub file_name: String,
    pub text: String,
}

/// Renders Studio component schemas as React function components.
#[derive(Debug, Clone, Default)]
pub struct ReactStudioRenderer {
    config: RenderConfig,
}

impl ReactStudioRenderer {
    /// Create a renderer with the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Parse a component from JSON and render it.
    pub fn render_json(&self, json: &str) -> Result<RenderedComponent> {
        self.render(&StudioComponent::from_json(json)?)
    }

    /// Render a component.
    pub fn render(&self, component: &StudioComponent) -> Result<RenderedComponent> {
        validate_component(component)?;
        let name = component_function_name(&component.name);
        debug!(
            component = %name,
            collection = component.has_collection_properties(),
            variants = component.has_variants(),
            breakpoints = component.has_breakpoints(),
            "rendering component"
        );

        let metadata = compute_component_metadata(component);

        let mut body = vec![props_statement(component)];
        body.extend(build_variant_statements(component, PROPS, OVERRIDES));
        if metadata.has_auth_bindings {
            body.push(auth_attributes_statement());
        }
        for reference in &metadata.state_references {
            body.push(state_hook_statement(&metadata, component, reference)?);
        }
        for action in get_component_actions(component) {
            body.push(build_use_action_statement(
                &metadata,
                action.action,
                &action.identifier,
            )?);
        }
        body.extend(build_collection_statements(
            component,
            self.config.nested_query_schema(),
        ));

        let element = build_root_element(&metadata, component)?;
        body.push(Stmt::Return(Expr::Jsx(Box::new(element))));

        let function = Stmt::Function(FunctionDecl {
            name: name.clone(),
            params: vec![PROPS.to_string()],
            body,
            export_default: true,
        });
        let text = Printer::new(self.config.indent_width).print_module(&[function]);

        debug!(component = %name, bytes = text.len(), "component rendered");
        Ok(RenderedComponent {
            file_name: format!("{name}.jsx"),
            name,
            text,
        })
    }
}

/// `my profile card` -> `MyProfileCard`.
pub fn component_function_name(name: &str) -> String {
    sanitize_name(&name.to_case(Case::Pascal))
}

/// `const { user, items: itemsProp, overrides, ...rest } = props;`
///
/// With variants the caller's overrides become `overridesProp`, since
/// `overrides` is computed from the variants.
fn props_statement(component: &StudioComponent) -> Stmt {
    let collections = component.collection_properties.as_ref();
    let is_collection_key = |key: &str| collections.is_some_and(|c| c.contains_key(key));

    let mut bindings: Vec<(String, Option<String>)> = component
        .binding_properties
        .keys()
        .filter(|key| !is_collection_key(key))
        .map(|key| (key.clone(), None))
        .collect();
    for key in collections.into_iter().flat_map(|c| c.keys()) {
        bindings.push((key.clone(), Some(collection_prop_alias(key))));
    }
    let overrides_alias = component
        .has_variants()
        .then(|| overrides_prop_alias(OVERRIDES));
    bindings.push((OVERRIDES.to_string(), overrides_alias));

    Stmt::Const {
        pattern: Pattern::Object {
            bindings,
            rest: Some(REST.to_string()),
        },
        init: Expr::ident(PROPS),
    }
}

/// `const authAttributes = useAuth().user?.attributes ?? {};`
fn auth_attributes_statement() -> Stmt {
    let attributes = Expr::call(Expr::ident(HookName::UseAuth.as_str()), Vec::new())
        .member("user")
        .optional_member("attributes");
    Stmt::const_decl(
        AUTH_ATTRIBUTES,
        Expr::binary(attributes, BinaryOp::Nullish, Expr::object(Vec::<ObjectMember>::new())),
    )
}

/// `const [titleChildren, setTitleChildren] = useStateMutationAction(initial);`
///
/// The initial value is whatever the referenced element sets the property to,
/// or `undefined` when it does not set it or sets it from other state.
fn state_hook_statement(
    metadata: &ComponentMetadata,
    component: &StudioComponent,
    reference: &StateReference,
) -> Result<Stmt> {
    let initial = match find_node(component, &reference.component_name) {
        Some(node) => {
            let key = if reference.property == "children" {
                child_prop_mapping(node.component_type()).unwrap_or("children")
            } else {
                reference.property.as_str()
            };
            match node.properties().get(key) {
                Some(StudioComponentProperty::State(_)) | None => Expr::ident("undefined"),
                Some(property) => property_to_expression(metadata, property)?,
            }
        }
        None => Expr::ident("undefined"),
    };

    Ok(Stmt::Const {
        pattern: Pattern::Array(vec![get_state_name(reference), get_set_state_name(reference)]),
        init: Expr::call(Expr::ident(HookName::UseStateMutationAction.as_str()), [initial]),
    })
}

fn find_node<'a>(root: &'a dyn ComponentNode, name: &str) -> Option<&'a dyn ComponentNode> {
    let mut found = None;
    walk_components(root, &mut |node| {
        if found.is_none() && node.name() == name {
            found = Some(node);
        }
    });
    found
}

/// The root element also receives the remaining props and, for collections,
/// the items and a render function for each item.
fn build_root_element(metadata: &ComponentMetadata, component: &StudioComponent) -> Result<JsxElement> {
    let mut element = JsxElement::new(&component.component_type);
    element.attributes = node_attributes(metadata, component)?;

    match &component.collection_properties {
        Some(collections) => {
            for key in collections.keys() {
                element = element.attribute(
                    key,
                    Expr::binary(Expr::ident(key), BinaryOp::Or, Expr::Array(Vec::new())),
                );
            }
            match component.children.as_slice() {
                [] => {}
                [item] => {
                    let mut template = build_element(metadata, item)?;
                    template.attributes.insert(
                        0,
                        JsxAttribute::Named {
                            name: "key".to_string(),
                            value: Expr::ident(COLLECTION_ITEM).member("id"),
                        },
                    );
                    element = element.child(JsxChild::Expr(Expr::arrow(
                        [COLLECTION_ITEM, "index"],
                        Expr::Jsx(Box::new(template)),
                    )));
                }
                _ => {
                    return Err(InvalidInputError::InvalidSchema {
                        location: component.name.clone(),
                        reason: "a collection must have a single item template child".to_string(),
                    }
                    .into())
                }
            }
        }
        None => {
            for child in &component.children {
                element = element.child(JsxChild::Element(build_element(metadata, child)?));
            }
        }
    }

    Ok(element
        .spread(Expr::ident(REST))
        .spread(override_props(component.name())))
}

fn build_element(metadata: &ComponentMetadata, node: &dyn ComponentNode) -> Result<JsxElement> {
    let mut element = JsxElement::new(node.component_type());
    element.attributes = node_attributes(metadata, node)?;
    for child in node.children() {
        element = element.child(JsxChild::Element(build_element(metadata, child)?));
    }
    Ok(element.spread(override_props(node.name())))
}

/// Properties, state-backed props, and event handlers of one element.
fn node_attributes(metadata: &ComponentMetadata, node: &dyn ComponentNode) -> Result<Vec<JsxAttribute>> {
    let mapping = child_prop_mapping(node.component_type());
    let mut attributes = Vec::new();
    let mut emitted: Vec<String> = Vec::new();

    for (key, property) in node.properties() {
        let name = if mapping == Some(key.as_str()) {
            "children"
        } else {
            key.as_str()
        };
        let reference = StateReference::new(node.name(), name);
        let value = if metadata.state_references.contains(&reference) {
            Expr::ident(get_state_name(&reference))
        } else {
            property_to_expression(metadata, property)?
        };
        attributes.push(JsxAttribute::Named {
            name: name.to_string(),
            value,
        });
        emitted.push(name.to_string());
    }

    // State set by actions on props the element does not declare itself.
    for reference in &metadata.state_references {
        if reference.component_name == node.name() && !emitted.contains(&reference.property) {
            attributes.push(JsxAttribute::Named {
                name: reference.property.clone(),
                value: Expr::ident(get_state_name(reference)),
            });
            emitted.push(reference.property.clone());
        }
    }

    for (event, value) in node.events() {
        let handler = match value {
            StudioComponentEvent::Action(_) => get_action_identifier(node.name(), event),
            StudioComponentEvent::Binding(binding) => binding.binding_event.clone(),
        };
        attributes.push(JsxAttribute::Named {
            name: format!("on{}", capitalize_first_letter(event)),
            value: Expr::ident(handler),
        });
    }

    Ok(attributes)
}

/// `getOverrideProps(overrides, "Name")`
fn override_props(name: &str) -> Expr {
    Expr::call(
        Expr::ident(HookName::GetOverrideProps.as_str()),
        [Expr::ident(OVERRIDES), Expr::string(name)],
    )
}
