//! CLI module graph.

pub mod command;
pub mod diagnostic;
pub mod registry;
