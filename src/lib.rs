//! erbuilder - Entity-Relationship Diagram Builder
//!
//! Headless core of an interactive ER diagram editor: tables and columns as graph
//! nodes, relationships as edges with automatically derived foreign-key columns,
//! and the gesture state machine a canvas front end drives.

pub mod core;
pub mod ui;
