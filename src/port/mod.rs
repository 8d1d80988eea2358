//! Trait definitions (hexagonal ports).
//!
//! Ports define the extension points between the dispatcher and the outside
//! world. Adapters implement them; tests substitute fakes.
//!
//! # Available Ports
//!
//! - [`ProcessRunner`] - Spawning external programs and waiting for them

mod process;

pub use process::{Invocation, ProcessRunner};
