//! Persisted aggregates: person records and parent-child relationship edges.

pub mod person;
pub mod relationship;

pub use person::{NewPerson, Person};
pub use relationship::Relationship;
