//! Building and running external tool invocations.

pub mod builder;
pub mod runner;
pub mod target_env;

pub use builder::{build, CommandSpec, OutputTarget};
pub use runner::{CommandFailure, ToolRunner};
pub use target_env::{extract, target_env_value};
