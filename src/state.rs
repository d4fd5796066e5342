use crate::command::ToolRunner;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::tools::ToolRegistry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Application state shared across all request handlers.
/// The registry is fixed after discovery; handlers only read it.
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub semaphore: Arc<Semaphore>,
    /// Set once discovery completed and at least one tool can be selected.
    pub ready: AtomicBool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Discover tools and build the state.
    ///
    /// Fails if an explicitly configured tool path does not exist.
    pub fn new(config: Config) -> Result<Self> {
        let registry = ToolRegistry::discover(&config.tools)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Build the state around an already discovered registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        let available = registry.list_public();
        if available.is_empty() {
            tracing::warn!("No public tools available, every compile will fail");
        } else {
            tracing::info!(tools = ?available, "Tools available");
        }
        let ready = !available.is_empty();

        let pipeline = Pipeline::new(
            Arc::new(registry),
            ToolRunner::new(config.tool_timeout()),
            config.scratch_dir.clone(),
        );

        Self {
            pipeline: Arc::new(pipeline),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_compiles.max(1))),
            ready: AtomicBool::new(ready),
            config: Arc::new(config),
        }
    }

    /// Check if the service is ready to handle requests.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}
