//! Component actions and the hook statements that implement them.

use crate::ast::{Expr, ObjectMember, Stmt};
use crate::helpers::{
    get_set_state_name, property_to_expression, resolve_state_reference, ComponentMetadata,
};
use crate::hooks::HookName;
use std::fmt;
use std::str::FromStr;
use studio_core::{
    capitalize_first_letter, lower_case_first, sanitize_name, walk_components, ActionParameter,
    ActionStudioComponentEvent, ComponentNode, InvalidInputError,
};
use tracing::debug;

/// Name of the data schema identifier passed to data-store actions.
const SCHEMA: &str = "schema";

/// Workflow actions an event can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Navigation,
    DataStoreCreateItem,
    DataStoreUpdateItem,
    DataStoreDeleteItem,
    AuthSignOut,
    Mutation,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Self::Navigation,
        Self::DataStoreCreateItem,
        Self::DataStoreUpdateItem,
        Self::DataStoreDeleteItem,
        Self::AuthSignOut,
        Self::Mutation,
    ];

    /// Schema name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigation => "Amplify.Navigation",
            Self::DataStoreCreateItem => "Amplify.DataStoreCreateItemAction",
            Self::DataStoreUpdateItem => "Amplify.DataStoreUpdateItemAction",
            Self::DataStoreDeleteItem => "Amplify.DataStoreDeleteItemAction",
            Self::AuthSignOut => "Amplify.AuthSignOut",
            Self::Mutation => "Amplify.Mutation",
        }
    }

    /// Runtime hook implementing the action.
    pub fn hook_name(&self) -> HookName {
        match self {
            Self::Navigation => HookName::UseNavigateAction,
            Self::DataStoreCreateItem => HookName::UseDataStoreCreateAction,
            Self::DataStoreUpdateItem => HookName::UseDataStoreUpdateAction,
            Self::DataStoreDeleteItem => HookName::UseDataStoreDeleteAction,
            Self::AuthSignOut => HookName::UseAuthSignOutAction,
            Self::Mutation => HookName::UseStateMutationAction,
        }
    }

    /// Data-store actions need the data schema as an extra argument.
    pub fn is_data_store_action(&self) -> bool {
        matches!(
            self,
            Self::DataStoreCreateItem | Self::DataStoreUpdateItem | Self::DataStoreDeleteItem
        )
    }
}

impl FromStr for Action {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| InvalidInputError::UnknownAction {
                action: s.to_string(),
            })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hook implementing the action named `action` in the schema.
pub fn get_action_hook_name(action: &str) -> Result<HookName, InvalidInputError> {
    Ok(action.parse::<Action>()?.hook_name())
}

/// An action found on an element, with the identifier its hook result is
/// bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentAction<'a> {
    pub action: &'a ActionStudioComponentEvent,
    pub identifier: String,
}

/// Every action in the tree rooted at `node`, depth-first: an element's own
/// events before those of its children.
pub fn get_component_actions(node: &dyn ComponentNode) -> Vec<ComponentAction<'_>> {
    let mut actions = Vec::new();
    walk_components(node, &mut |node| {
        for (event, value) in node.events() {
            if let Some(action) = value.as_action() {
                actions.push(ComponentAction {
                    action,
                    identifier: get_action_identifier(node.name(), event),
                });
            }
        }
    });
    actions
}

/// `("MyButton", "click")` -> `myButtonClick`.
pub fn get_action_identifier(component_name: &str, event: &str) -> String {
    format!(
        "{}{}",
        lower_case_first(&sanitize_name(component_name)),
        capitalize_first_letter(event)
    )
}

/// `const <identifier> = <hook>(<arguments>);`
pub fn build_use_action_statement(
    metadata: &ComponentMetadata,
    action: &ActionStudioComponentEvent,
    identifier: &str,
) -> Result<Stmt, InvalidInputError> {
    let kind: Action = action.action.parse()?;
    if kind == Action::Mutation {
        return build_mutation_action_statement(metadata, action, identifier);
    }

    debug!(action = %kind, identifier, "building action hook");
    let arguments = build_action_arguments(metadata, kind, action)?;
    Ok(Stmt::const_decl(
        identifier,
        Expr::call(Expr::ident(kind.hook_name().as_str()), arguments),
    ))
}

/// `const <identifier> = () => { set<State>(<value>); };`
pub fn build_mutation_action_statement(
    metadata: &ComponentMetadata,
    action: &ActionStudioComponentEvent,
    identifier: &str,
) -> Result<Stmt, InvalidInputError> {
    let state = action
        .mutation_state()
        .ok_or_else(|| InvalidInputError::InvalidSchema {
            location: identifier.to_string(),
            reason: "mutation action has no state parameter".to_string(),
        })?;

    let reference = resolve_state_reference(metadata, &state.state_reference());
    let setter = get_set_state_name(&reference);
    let value = property_to_expression(metadata, &state.set)?;

    Ok(Stmt::const_decl(
        identifier,
        Expr::arrow_block(
            Vec::<String>::new(),
            vec![Stmt::Expr(Expr::call(Expr::ident(setter), [value]))],
        ),
    ))
}

/// The single object argument of an action hook, if the action has parameters.
pub fn build_action_arguments(
    metadata: &ComponentMetadata,
    kind: Action,
    action: &ActionStudioComponentEvent,
) -> Result<Option<Expr>, InvalidInputError> {
    let Some(parameters) = &action.parameters else {
        return Ok(None);
    };

    let mut members = Vec::with_capacity(parameters.len() + 1);
    for (key, value) in parameters {
        members.push(ObjectMember::property(
            key,
            get_action_parameter_value(metadata, key, value)?,
        ));
    }
    if kind.is_data_store_action() {
        members.push(ObjectMember::property(SCHEMA, Expr::ident(SCHEMA)));
    }
    Ok(Some(Expr::object(members)))
}

/// Expression for one action parameter.
///
/// `model` names a model class and becomes an identifier; `fields` becomes a
/// nested object; everything else is an ordinary component property.
pub fn get_action_parameter_value(
    metadata: &ComponentMetadata,
    key: &str,
    value: &ActionParameter,
) -> Result<Expr, InvalidInputError> {
    match value {
        ActionParameter::Literal(name) if key == "model" => Ok(Expr::ident(sanitize_name(name))),
        ActionParameter::Literal(text) => Ok(Expr::string(text)),
        ActionParameter::Fields(fields) => {
            let mut members = Vec::with_capacity(fields.len());
            for (field, property) in fields {
                members.push(ObjectMember::property(field, property_to_expression(metadata, property)?));
            }
            Ok(Expr::object(members))
        }
        ActionParameter::Property(property) => property_to_expression(metadata, property),
        ActionParameter::MutationState(_) => Err(InvalidInputError::InvalidSchema {
            location: key.to_string(),
            reason: "state parameters are only valid on Amplify.Mutation".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::compute_component_metadata;
    use crate::printer::Printer;
    use serde_json::json;
    use studio_core::StudioComponent;

    fn component(value: serde_json::Value) -> StudioComponent {
        serde_json::from_value(value).unwrap()
    }

    fn print(stmt: &Stmt) -> String {
        Printer::default().print_stmt(stmt)
    }

    #[test]
    fn test_hook_mapping() {
        let expected = [
            ("Amplify.Navigation", "useNavigateAction"),
            ("Amplify.DataStoreCreateItemAction", "useDataStoreCreateAction"),
            ("Amplify.DataStoreUpdateItemAction", "useDataStoreUpdateAction"),
            ("Amplify.DataStoreDeleteItemAction", "useDataStoreDeleteAction"),
            ("Amplify.AuthSignOut", "useAuthSignOutAction"),
            ("Amplify.Mutation", "useStateMutationAction"),
        ];
        for (action, hook) in expected {
            assert_eq!(get_action_hook_name(action).unwrap().as_str(), hook);
        }
        assert_eq!(Action::ALL.len(), expected.len());
    }

    #[test]
    fn test_unknown_action() {
        let err = get_action_hook_name("Amplify.Teleport").unwrap_err();
        assert_eq!(err.to_string(), "Amplify.Teleport is not a valid action.");
    }

    #[test]
    fn test_action_identifier() {
        assert_eq!(get_action_identifier("MyButton", "click"), "myButtonClick");
        assert_eq!(get_action_identifier("Save Button", "mouseEnter"), "saveButtonMouseEnter");
    }

    #[test]
    fn test_component_actions_depth_first() {
        let comp = component(json!({
            "name": "Card",
            "componentType": "Flex",
            "events": { "click": { "action": "Amplify.AuthSignOut" } },
            "children": [
                {
                    "name": "Body",
                    "componentType": "View",
                    "events": { "hover": { "bindingEvent": "onHover" } },
                    "children": [
                        { "name": "Link", "componentType": "Button", "events": { "click": { "action": "Amplify.Navigation" } } }
                    ]
                },
                { "name": "Footer", "componentType": "Button", "events": { "click": { "action": "Amplify.Navigation" } } }
            ]
        }));

        let identifiers: Vec<_> = get_component_actions(&comp)
            .into_iter()
            .map(|a| a.identifier)
            .collect();
        assert_eq!(identifiers, ["cardClick", "linkClick", "footerClick"]);
    }

    #[test]
    fn test_navigation_statement() {
        let comp = component(json!({
            "name": "Nav",
            "componentType": "Button",
            "events": {
                "click": {
                    "action": "Amplify.Navigation",
                    "parameters": {
                        "type": { "value": "url" },
                        "url": { "value": "https://example.com" }
                    }
                }
            }
        }));
        let metadata = compute_component_metadata(&comp);
        let action = comp.events["click"].as_action().unwrap();

        let stmt = build_use_action_statement(&metadata, action, "navClick").unwrap();
        assert_eq!(
            print(&stmt),
            r#"const navClick = useNavigateAction({ type: "url", url: "https://example.com" });"#
        );
    }

    #[test]
    fn test_data_store_statement_adds_schema() {
        let comp = component(json!({
            "name": "Save",
            "componentType": "Button",
            "events": {
                "click": {
                    "action": "Amplify.DataStoreCreateItemAction",
                    "parameters": {
                        "model": "Author",
                        "fields": {
                            "name": { "value": "Ann" },
                            "email": { "userAttribute": "email" }
                        }
                    }
                }
            }
        }));
        let metadata = compute_component_metadata(&comp);
        let action = comp.events["click"].as_action().unwrap();

        let stmt = build_use_action_statement(&metadata, action, "saveClick").unwrap();
        assert_eq!(
            print(&stmt),
            r#"const saveClick = useDataStoreCreateAction({ model: Author, fields: { name: "Ann", email: authAttributes["email"] }, schema: schema });"#
        );
    }

    #[test]
    fn test_action_without_parameters() {
        let action = ActionStudioComponentEvent::new("Amplify.AuthSignOut");
        let stmt = build_use_action_statement(&ComponentMetadata::default(), &action, "signOut").unwrap();
        assert_eq!(print(&stmt), "const signOut = useAuthSignOutAction();");
    }

    #[test]
    fn test_mutation_statement_maps_children() {
        let comp = component(json!({
            "name": "Panel",
            "componentType": "Flex",
            "children": [
                { "name": "Title", "componentType": "Heading" },
                {
                    "name": "Toggle",
                    "componentType": "Button",
                    "events": {
                        "click": {
                            "action": "Amplify.Mutation",
                            "parameters": {
                                "state": { "componentName": "Title", "property": "label", "set": { "value": "done" } }
                            }
                        }
                    }
                }
            ]
        }));
        let metadata = compute_component_metadata(&comp);
        let actions = get_component_actions(&comp);
        assert_eq!(actions.len(), 1);

        let stmt = build_use_action_statement(&metadata, actions[0].action, &actions[0].identifier).unwrap();
        assert_eq!(
            print(&stmt),
            "const toggleClick = () => {\n  setTitleChildren(\"done\");\n};"
        );
    }

    #[test]
    fn test_mutation_without_state() {
        let action = ActionStudioComponentEvent::new("Amplify.Mutation");
        let err = build_mutation_action_statement(&ComponentMetadata::default(), &action, "x").unwrap_err();
        assert!(matches!(err, InvalidInputError::InvalidSchema { .. }));
    }

    #[test]
    fn test_unknown_action_statement() {
        let action = ActionStudioComponentEvent::new("Amplify.Teleport");
        let err = build_use_action_statement(&ComponentMetadata::default(), &action, "x").unwrap_err();
        assert_eq!(
            err,
            InvalidInputError::UnknownAction {
                action: "Amplify.Teleport".to_string()
            }
        );
    }
}
