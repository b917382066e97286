//! Form code generation.

pub mod form_state;

pub use form_state::{build_nested_state_set, get_set_name_identifier, set_field_state, split_key_path, KeyPath};
