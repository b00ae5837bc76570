//! lineage-core library: genealogical graph model, storage, and validation.
//!
//! # Conventions
//!
//! - **Errors**: domain rejections travel as [`LineageError::Rejected`] with a
//!   taxonomy kind the caller can branch on; unexpected storage faults travel
//!   as [`LineageError::Store`] and are never disguised as rejections.
//!   Plumbing uses `anyhow::Result` with context.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod store;

pub use error::{LineageError, Rejection, RejectionKind};
pub use graph::tree::{TreeNode, build_descendant_tree};
pub use graph::validate::propose_relationship;
pub use model::{NewPerson, Person, Relationship};
pub use store::{GraphStore, SqliteStore};
