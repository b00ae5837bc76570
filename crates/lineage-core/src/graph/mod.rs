//! Graph-level rules and projections over the person/relationship store.
//!
//! ## Submodules
//!
//! - [`validate`] — admission rules for proposed parent-child edges.
//! - [`ancestry`] — transitive ancestor closure and cycle prediction.
//! - [`tree`] — the descendant-tree projection.

pub mod ancestry;
pub mod tree;
pub mod validate;
