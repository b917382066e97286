//! Core types for the Studio component code generator.
//!
//! This crate provides the foundational types used by the framework generators:
//! - Component schema types as exported by the design tool
//! - Backend data-model types and the form-support check
//! - Schema validation
//! - Error types

pub mod data;
pub mod errors;
pub mod naming;
pub mod schema;
pub mod validate;

pub use data::*;
pub use errors::*;
pub use naming::*;
pub use schema::*;
pub use validate::*;
