//! React code generation for Studio components.
//!
//! This crate turns component schemas from `studio-core` into React function
//! components.
//!
//! # Architecture
//!
//! 1. **Metadata**: one walk over the component tree collects auth usage,
//!    state references, and data models
//! 2. **Statements**: props, variant overrides, state hooks, action hooks,
//!    and collection bindings are built as a syntax tree
//! 3. **Printing**: the tree is printed deterministically as TypeScript/JSX
//!
//! Form state updates go through [`set_field_state`], which compiles a dotted
//! field path into a copy-on-write setter call.
//!
//! # Example
//!
//! ```ignore
//! use studio_react::{ReactStudioRenderer, RenderConfig};
//!
//! let renderer = ReactStudioRenderer::new(RenderConfig::default());
//! let rendered = renderer.render_json(schema_json)?;
//! println!("{}:\n{}", rendered.file_name, rendered.text);
//! ```

pub mod ast;
pub mod collection;
pub mod config;
pub mod forms;
pub mod helpers;
pub mod hooks;
pub mod printer;
pub mod renderer;
pub mod variants;
pub mod workflow;

pub use ast::{Expr, ObjectMember, Stmt};
pub use collection::{build_collection_statements, get_nested_queries, NestedQuery};
pub use config::RenderConfig;
pub use forms::{build_nested_state_set, set_field_state, KeyPath};
pub use helpers::{compute_component_metadata, ComponentMetadata};
pub use hooks::HookName;
pub use printer::{print_expr, Printer};
pub use renderer::{ReactStudioRenderer, RenderedComponent};
pub use variants::build_variant_statements;
pub use workflow::{get_action_hook_name, Action};
