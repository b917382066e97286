//! Event workflows: actions fired by component events.

pub mod action;

pub use action::{
    build_action_arguments, build_mutation_action_statement, build_use_action_statement,
    get_action_hook_name, get_action_identifier, get_action_parameter_value, get_component_actions,
    Action, ComponentAction,
};
