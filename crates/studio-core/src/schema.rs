//! Component schema types, as exported by the design tool.
//!
//! Every map is an [`IndexMap`] so that generated code follows the order the
//! designer authored properties and events in.

use crate::errors::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A top-level component definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub component_type: String,
    #[serde(default)]
    pub properties: IndexMap<String, StudioComponentProperty>,
    /// Props the generated component accepts from its parent.
    #[serde(default)]
    pub binding_properties: IndexMap<String, StudioComponentPropertyBinding>,
    /// Data queries backing a collection component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_properties: Option<IndexMap<String, StudioComponentDataConfiguration>>,
    #[serde(default)]
    pub children: Vec<StudioComponentChild>,
    #[serde(default)]
    pub events: IndexMap<String, StudioComponentEvent>,
    #[serde(default)]
    pub variants: Vec<StudioComponentVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}

impl StudioComponent {
    /// Parse a component from the design tool's JSON export.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether collection properties are present.
    pub fn has_collection_properties(&self) -> bool {
        self.collection_properties.is_some()
    }

    /// Whether the component declares at least one variant.
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Whether any variant is keyed on a responsive breakpoint.
    pub fn has_breakpoints(&self) -> bool {
        !self.breakpoints().is_empty()
    }

    /// Breakpoints the variants are keyed on, smallest first.
    pub fn breakpoints(&self) -> Vec<BreakpointSize> {
        BreakpointSize::ALL
            .into_iter()
            .filter(|size| {
                self.variants.iter().any(|variant| {
                    variant.variant_values.get("breakpoint").map(String::as_str) == Some(size.as_str())
                })
            })
            .collect()
    }
}

/// A nested child element of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioComponentChild {
    pub name: String,
    pub component_type: String,
    #[serde(default)]
    pub properties: IndexMap<String, StudioComponentProperty>,
    #[serde(default)]
    pub children: Vec<StudioComponentChild>,
    #[serde(default)]
    pub events: IndexMap<String, StudioComponentEvent>,
}

impl StudioComponentChild {
    /// Create a child with no properties, events, or children.
    pub fn new(name: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            component_type: component_type.into(),
            properties: IndexMap::new(),
            children: Vec::new(),
            events: IndexMap::new(),
        }
    }

    /// Add an event.
    pub fn with_event(mut self, event: impl Into<String>, value: StudioComponentEvent) -> Self {
        self.events.insert(event.into(), value);
        self
    }

    /// Add a child element.
    pub fn with_child(mut self, child: StudioComponentChild) -> Self {
        self.children.push(child);
        self
    }
}

/// Read access shared by components and their children.
pub trait ComponentNode {
    fn name(&self) -> &str;
    fn component_type(&self) -> &str;
    fn properties(&self) -> &IndexMap<String, StudioComponentProperty>;
    fn events(&self) -> &IndexMap<String, StudioComponentEvent>;
    fn children(&self) -> &[StudioComponentChild];
}

impl ComponentNode for StudioComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn component_type(&self) -> &str {
        &self.component_type
    }

    fn properties(&self) -> &IndexMap<String, StudioComponentProperty> {
        &self.properties
    }

    fn events(&self) -> &IndexMap<String, StudioComponentEvent> {
        &self.events
    }

    fn children(&self) -> &[StudioComponentChild] {
        &self.children
    }
}

impl ComponentNode for StudioComponentChild {
    fn name(&self) -> &str {
        &self.name
    }

    fn component_type(&self) -> &str {
        &self.component_type
    }

    fn properties(&self) -> &IndexMap<String, StudioComponentProperty> {
        &self.properties
    }

    fn events(&self) -> &IndexMap<String, StudioComponentEvent> {
        &self.events
    }

    fn children(&self) -> &[StudioComponentChild] {
        &self.children
    }
}

/// Visit `node` and all of its descendants depth-first, parents before children.
pub fn walk_components<'a>(node: &'a dyn ComponentNode, visit: &mut dyn FnMut(&'a dyn ComponentNode)) {
    visit(node);
    for child in node.children() {
        walk_components(child, visit);
    }
}

/// A property value on a component.
///
/// Deserialized untagged: each variant is recognized by its distinguishing
/// key, so the order below matters. `Fixed` comes last since it is keyed on
/// the generic `value` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudioComponentProperty {
    Bound(BoundProperty),
    CollectionBound(CollectionBoundProperty),
    Concat(ConcatProperty),
    Conditional(ConditionalProperty),
    Auth(AuthProperty),
    State(StateReference),
    Fixed(FixedProperty),
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedProperty {
    pub value: serde_json::Value,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

/// Reference to a prop (and optionally a field of it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBindingReference {
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundProperty {
    pub binding_properties: PropertyBindingReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// A value read from the current collection item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionBoundProperty {
    pub collection_binding_properties: PropertyBindingReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcatProperty {
    pub concat: Vec<StudioComponentProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalProperty {
    pub condition: PropertyCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyCondition {
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub operator: String,
    pub operand: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand_type: Option<String>,
    pub then: Box<StudioComponentProperty>,
    #[serde(rename = "else")]
    pub else_: Box<StudioComponentProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProperty {
    pub user_attribute: String,
}

/// Points at a piece of component state: a property of a named element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReference {
    pub component_name: String,
    pub property: String,
}

impl StateReference {
    pub fn new(component_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            property: property.into(),
        }
    }
}

/// A prop declared on a top-level component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum StudioComponentPropertyBinding {
    Data {
        binding_properties: DataBindingProperties,
    },
    Boolean {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Date {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default_value: Option<String>,
    },
    Event,
    #[serde(rename = "Amplify.Slot")]
    Slot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBindingProperties {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<serde_json::Value>,
}

/// Query configuration for one collection property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudioComponentDataConfiguration {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<serde_json::Value>,
}

/// What happens when an element fires an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StudioComponentEvent {
    Action(ActionStudioComponentEvent),
    Binding(BindingStudioComponentEvent),
}

impl StudioComponentEvent {
    /// The workflow action, if this event triggers one.
    pub fn as_action(&self) -> Option<&ActionStudioComponentEvent> {
        match self {
            Self::Action(action) => Some(action),
            Self::Binding(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStudioComponentEvent {
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, ActionParameter>>,
}

impl ActionStudioComponentEvent {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            parameters: None,
        }
    }

    /// The `state` parameter of a mutation action.
    pub fn mutation_state(&self) -> Option<&MutationState> {
        self.parameters.as_ref()?.values().find_map(|value| match value {
            ActionParameter::MutationState(state) => Some(state),
            _ => None,
        })
    }
}

/// Forwards the event to a prop of the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingStudioComponentEvent {
    pub binding_event: String,
}

/// A single action parameter value.
///
/// Untagged: a mutation state must be tried before the generic property,
/// which would otherwise accept it as a plain state reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionParameter {
    Literal(String),
    MutationState(MutationState),
    Property(StudioComponentProperty),
    Fields(IndexMap<String, StudioComponentProperty>),
}

/// Target and new value of a state mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationState {
    pub component_name: String,
    pub property: String,
    pub set: StudioComponentProperty,
}

impl MutationState {
    pub fn state_reference(&self) -> StateReference {
        StateReference::new(&self.component_name, &self.property)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioComponentVariant {
    pub variant_values: IndexMap<String, String>,
    #[serde(default)]
    pub overrides: IndexMap<String, serde_json::Value>,
}

/// Responsive breakpoint names understood by the target framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakpointSize {
    Base,
    Small,
    Medium,
    Large,
    Xl,
    Xxl,
}

impl BreakpointSize {
    pub const ALL: [BreakpointSize; 6] = [
        Self::Base,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Xl,
        Self::Xxl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Xl => "xl",
            Self::Xxl => "xxl",
        }
    }
}

impl FromStr for BreakpointSize {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|size| size.as_str() == s).ok_or(())
    }
}

impl fmt::Display for BreakpointSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
