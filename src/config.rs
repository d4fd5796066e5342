use crate::tools::{ToolOverrides, CATALOG};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    /// Request body limit. SPIR-V disassembly gets very large.
    pub max_body_bytes: usize,
    /// Concurrent pipeline runs. Each run owns its scratch file, so this
    /// only bounds how many tool processes are alive at once.
    pub max_concurrent_compiles: usize,
    /// How long a request waits for a permit before giving up with a 503.
    pub queue_timeout_secs: u64,
    /// Optional limit per tool process. `None` waits forever.
    pub tool_timeout_secs: Option<u64>,
    /// Where scratch files are created. System temp dir if unset.
    pub scratch_dir: Option<PathBuf>,
    /// Optional directory with the browser front end.
    pub static_dir: Option<PathBuf>,
    /// Explicit tool locations, resolved once at startup.
    pub tools: ToolOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9000,
            shutdown_timeout_secs: 5,
            max_body_bytes: 50 * 1024 * 1024,
            max_concurrent_compiles: default_concurrency(),
            queue_timeout_secs: 30,
            tool_timeout_secs: None,
            scratch_dir: None,
            static_dir: None,
            tools: ToolOverrides::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Tool paths come from one variable per tool (see the catalogue, e.g.
    /// `DXC_PATH`) plus `SPIRV_TOOLS_DIR` for the whole SPIRV-Tools suite.
    /// Whether those paths exist is checked during discovery, not here.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let mut tools = ToolOverrides {
            spirv_tools_dir: env::var_os("SPIRV_TOOLS_DIR").map(PathBuf::from),
            ..Default::default()
        };
        for spec in CATALOG {
            if let Some(path) = env::var_os(spec.env_var) {
                tools.paths.insert(spec.name.to_string(), PathBuf::from(path));
            }
        }

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", defaults.port)?,
            shutdown_timeout_secs: parse_or("SHUTDOWN_TIMEOUT", defaults.shutdown_timeout_secs)?,
            max_body_bytes: parse_or("MAX_BODY_BYTES", defaults.max_body_bytes)?,
            max_concurrent_compiles: parse_or(
                "MAX_CONCURRENT_COMPILES",
                defaults.max_concurrent_compiles,
            )?
            .max(1),
            queue_timeout_secs: parse_or("QUEUE_TIMEOUT_SECS", defaults.queue_timeout_secs)?,
            tool_timeout_secs: env::var("TOOL_TIMEOUT_SECS")
                .ok()
                .map(|s| s.parse::<u64>())
                .transpose()?,
            scratch_dir: env::var_os("SCRATCH_DIR").map(PathBuf::from),
            static_dir: env::var_os("STATIC_DIR").map(PathBuf::from),
            tools,
        })
    }

    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}={:?}: {}", key, value, e)),
        Err(_) => Ok(default),
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
