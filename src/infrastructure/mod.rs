//! Infrastructure layer.
//!
//! Technical concerns that support the dispatcher without containing
//! operation logic.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation

pub mod config;
