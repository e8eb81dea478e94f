//! Git operations using system git commands for maximum compatibility
//!
//! ## Sub-modules
//!
//! - [`runner`]: [`GitRunner`], the single place git processes are spawned,
//!   awaited and mapped to errors (honoring pretend, quiet and timeout)
//! - [`args`]: argument vectors for every git invocation a deploy makes
//! - [`common`]: [`Logger`] for consistent console output

pub mod args;
pub mod common;
pub mod runner;

pub use args::PushFlags;
pub use common::Logger;
pub use runner::{GitOutput, GitRunner};
