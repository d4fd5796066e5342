//! Tool pipeline orchestration.

pub mod error;
pub mod executor;
pub mod request;
pub mod result;
pub mod scratch;

pub use error::PipelineError;
pub use executor::{Pipeline, PlannedStage};
pub use request::{PipelineRequest, Stage, MAX_STAGES};
pub use result::{
    DisassembleResult, ErrorReport, PipelineResult, ValidateResult, ValidateSteps,
    SCRATCH_PLACEHOLDER, VALID_OUTPUT,
};
pub use scratch::Scratch;
