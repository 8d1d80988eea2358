//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`runner`] — [`RecordingRunner`](runner::RecordingRunner), a
//!   [`ProcessRunner`](crate::port::ProcessRunner) that records invocations
//!   instead of spawning them.
//! - [`output`] — [`SharedBuffer`](output::SharedBuffer) for capturing
//!   dispatcher output.

pub mod output;
pub mod runner;
