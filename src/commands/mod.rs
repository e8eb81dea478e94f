//! Command implementations

pub mod base;
pub mod deploy;
pub mod init;
pub mod plan;

pub use base::{Command, CommandContext};
pub use deploy::DeployCommand;
pub use init::InitCommand;
pub use plan::PlanCommand;
