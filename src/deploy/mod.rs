//! The deploy pipeline
//!
//! ## Sub-modules
//!
//! - [`plan`]: derive the ordered steps of a run from the config and the
//!   state of the staging directory
//! - [`pipeline`]: execute a plan with a [`GitRunner`](crate::git::GitRunner)
//! - [`staging`]: guard that cleans the staging area on every exit path
//! - [`ignore`]: generate the `.gitignore` written into the staging area
//! - [`force_add`]: stage paths the ignore file excludes

pub mod force_add;
pub mod ignore;
pub mod pipeline;
pub mod plan;
pub mod staging;

pub use ignore::IgnoreFileBuilder;
pub use pipeline::{Pipeline, deploy};
pub use plan::{Cleanup, FailurePolicy, PipelineStep, Plan, StagingState};
pub use staging::StagingArea;
