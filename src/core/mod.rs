//! Core domain model and graph operations for entity-relationship diagrams

#[cfg(feature = "cli")]
pub mod config;
mod diagram;
mod error;
mod graph_ops;
mod schema;
#[cfg(test)]
mod tests;
pub mod validation;

#[cfg(feature = "cli")]
pub use config::Config;
pub use diagram::*;
pub use error::*;
pub use graph_ops::NEW_TABLE_POSITION;
pub use schema::*;
