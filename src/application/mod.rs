//! Application services (use cases).
//!
//! The dispatcher and its handlers, plus the helpers they share.

pub mod dispatch;
pub mod wallet;
pub mod workdir;
