use crate::command::CommandFailure;
use crate::pipeline::request::MAX_STAGES;
use crate::pipeline::result::ErrorReport;
use crate::tools::LookupError;
use thiserror::Error;

/// Everything that can stop a pipeline. Always reported in-band.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no tool was requested")]
    NoStages,

    #[error("stage {stage} was supplied without stage {}", .stage - 1)]
    MissingStage { stage: usize },

    #[error("at most {} stages can be chained", MAX_STAGES)]
    TooManyStages,

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0} is not available on this server")]
    Unavailable(String),

    #[error("{from} cannot be followed by {to}: {reason}")]
    Incompatible {
        from: String,
        to: String,
        reason: &'static str,
    },

    #[error(transparent)]
    Command(#[from] CommandFailure),

    #[error("scratch file error: {0}")]
    Scratch(#[from] std::io::Error),
}

impl PipelineError {
    pub(crate) fn lookup(name: &str, err: LookupError) -> Self {
        match err {
            LookupError::NotFound => PipelineError::UnknownTool(name.to_string()),
            LookupError::Unavailable => PipelineError::Unavailable(name.to_string()),
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::NoStages
            | PipelineError::MissingStage { .. }
            | PipelineError::TooManyStages => "request",
            PipelineError::UnknownTool(_) | PipelineError::Unavailable(_) => "tool",
            PipelineError::Incompatible { .. } => "incompatible",
            PipelineError::Command(_) => "command",
            PipelineError::Scratch(_) => "scratch",
        }
    }
}

impl From<PipelineError> for ErrorReport {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Command(failure) => ErrorReport {
                cmd: failure.cmd,
                stdout: failure.stdout,
                stderr: failure.stderr,
            },
            other => ErrorReport {
                stderr: other.to_string(),
                ..Default::default()
            },
        }
    }
}
