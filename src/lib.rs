//! SPIR-V Playground - shader tool pipeline service
//!
//! This library exposes the tool registry, command construction and the
//! pipeline executor behind the HTTP handlers, so they can be tested and
//! embedded without the server binary.

pub mod command;
pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod state;
pub mod tools;

// Re-export key types for convenience
pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::{
    compile_handler, disassemble_handler, health_handler, ready_handler, tools_handler,
    validate_handler,
};
pub use pipeline::{Pipeline, PipelineRequest, PipelineResult};
pub use state::AppState;
pub use tools::{ToolOverrides, ToolRegistry};
