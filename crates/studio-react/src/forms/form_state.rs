//! Immutable state updates for form fields bound to nested records.
//!
//! Setting `bio.favoriteAnimal.genus` copies every record on the way down:
//!
//! ```text
//! setBio({ ...bio, favoriteAnimal: { ...bio.favoriteAnimal, genus: value } })
//! ```

use crate::ast::{Expr, ObjectMember};
use smallvec::SmallVec;
use studio_core::{capitalize_first_letter, sanitize_name, InvalidInputError};
use tracing::trace;

/// Field names leading from a state variable to a nested value.
pub type KeyPath = SmallVec<[String; 4]>;

/// Split a dotted field name into its key path.
pub fn split_key_path(name: &str) -> KeyPath {
    name.split('.').map(str::to_string).collect()
}

/// `bio` -> `setBio`. Characters that cannot appear in an identifier are
/// dropped.
pub fn get_set_name_identifier(name: &str) -> Expr {
    Expr::ident(format!("set{}", capitalize_first_letter(&sanitize_name(name))))
}

/// Build the copy-on-write object that replaces the value at the end of
/// `key_path`.
///
/// `state_prefix` is the part of `key_path` the state variable already
/// addresses; one spread level is produced for every remaining segment.
/// Each level spreads the current record and overrides exactly one field.
pub fn build_nested_state_set<S: AsRef<str>>(
    key_path: &[S],
    state_prefix: &[S],
    value: Expr,
) -> Result<Expr, InvalidInputError> {
    if key_path.len() < 2 {
        return Err(InvalidInputError::InvalidPathLength {
            path: to_owned(key_path),
        });
    }
    let depth = state_prefix.len();
    let Some((root, prefix_rest)) = state_prefix.split_first().filter(|_| depth < key_path.len()) else {
        return Err(InvalidInputError::InvalidStatePrefix {
            prefix: to_owned(state_prefix),
            path: to_owned(key_path),
        });
    };

    let mut current = value;
    for level in (depth..key_path.len()).rev() {
        let segments: Vec<&str> = prefix_rest
            .iter()
            .chain(&key_path[depth..level])
            .map(|segment| segment.as_ref())
            .collect();
        let source = Expr::path(root.as_ref(), &segments);
        current = Expr::object([
            ObjectMember::spread(source),
            ObjectMember::property(key_path[level].as_ref(), current),
        ]);
    }

    trace!(levels = key_path.len() - depth, "nested state set built");
    Ok(current)
}

/// Build the setter call that assigns `value` to the form field `name`.
///
/// A plain name yields `setName(value)`; a dotted name yields a setter on the
/// first segment wrapping a nested update.
pub fn set_field_state(name: &str, value: Expr) -> Result<Expr, InvalidInputError> {
    let key_path = split_key_path(name);
    let setter = get_set_name_identifier(&key_path[0]);

    let argument = if key_path.len() > 1 {
        build_nested_state_set(&key_path[..], &key_path[..1], value)?
    } else {
        value
    };
    Ok(Expr::call(setter, [argument]))
}

fn to_owned<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    segments.iter().map(|s| s.as_ref().to_string()).collect()
}
