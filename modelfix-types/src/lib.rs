//! Shared DTOs for the modelfix workspace: the in-memory build descriptor.
//!
//! # Design constraints
//! - These types are the hand-off format between a host's descriptor reader and the
//!   customization engine, and they are also read from and written to disk by the CLI.
//! - Field names follow the descriptor's own camelCase vocabulary (`groupId`, `artifactId`).
//! - Prefer adding optional fields over changing semantics.

pub mod config;
pub mod coordinate;
pub mod model;

pub use config::ConfigNode;
pub use coordinate::Coordinate;
pub use model::{Build, Dependency, Extension, Extra, Model, Plugin, PluginExecution};
