pub mod compile;
pub mod disassemble;
pub mod health;
pub mod tools;
pub mod validate;

pub use compile::compile_handler;
pub use disassemble::disassemble_handler;
pub use health::{health_handler, ready_handler};
pub use tools::tools_handler;
pub use validate::validate_handler;

use crate::error::{AppError, Result};
use crate::state::AppState;
use std::time::Duration;
use tokio::sync::SemaphorePermit;

/// Wait for a pipeline slot (503 if the service stays overloaded).
async fn acquire_permit(state: &AppState) -> Result<SemaphorePermit<'_>> {
    let wait = Duration::from_secs(state.config.queue_timeout_secs);
    tokio::time::timeout(wait, state.semaphore.acquire())
        .await
        .map_err(|_| {
            AppError::ResourceError("Service temporarily overloaded, please retry".to_string())
        })?
        .map_err(|_| AppError::ResourceError("Semaphore closed".to_string()))
}
