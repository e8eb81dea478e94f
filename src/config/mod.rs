//! Configuration management module
//!
//! Options flow through three layers: [`DeployOptions`] as supplied by the
//! caller (config file and command line), [`DeployOptions::merge`] to layer
//! them, and [`resolve`] to validate and produce the immutable
//! [`DeployConfig`] a pipeline run consumes.

pub mod builder;
pub mod loader;
pub mod options;
pub mod resolver;

pub use builder::DeployOptionsBuilder;
pub use options::{DeployOptions, GitUser};
pub use resolver::{DeployConfig, DeployMode, resolve};
