//! Response payloads and scratch path scrubbing.

use crate::command::builder::shell_quote;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Stands in for the scratch file path in anything sent to a client.
pub const SCRATCH_PLACEHOLDER: &str = "<source>";

/// Output of a successful run whose last tool only reports pass/fail.
pub const VALID_OUTPUT: &str = "VALID SPIR-V";

/// Fallback message for a failed disassembly with nothing on stderr.
pub const DISASSEMBLY_FAILED: &str = "could not disassemble SPIR-V";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub cmd: String,
    pub stdout: String,
    pub stderr: String,
}

/// Result of `POST /compile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub success: bool,
    pub output: String,
    pub error: ErrorReport,
}

impl PipelineResult {
    pub fn success(output: String) -> Self {
        Self {
            success: true,
            output,
            error: ErrorReport::default(),
        }
    }

    pub fn failure(error: impl Into<ErrorReport>) -> Self {
        Self {
            success: false,
            output: String::new(),
            error: error.into(),
        }
    }

    pub fn scrubbed(self, scrubber: &Scrubber) -> Self {
        Self {
            success: self.success,
            output: scrubber.scrub(self.output),
            error: scrubber.scrub_report(self.error),
        }
    }
}

/// Result of `POST /dissemble`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisassembleResult {
    pub success: bool,
    pub data: String,
}

/// Which steps of the validation chain completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateSteps {
    #[serde(rename = "as")]
    pub assemble: bool,
    pub val: bool,
    pub opt: bool,
    pub dis: bool,
}

/// Result of `POST /validate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResult {
    pub success: bool,
    pub spirv: String,
    pub commands: ValidateSteps,
    pub error: ErrorReport,
}

/// Replaces a scratch file path with [`SCRATCH_PLACEHOLDER`].
///
/// Commands are rendered shell-quoted, so the quoted spelling of the path
/// is replaced before the raw one.
#[derive(Debug, Clone)]
pub struct Scrubber {
    needles: Vec<String>,
}

impl Scrubber {
    pub fn new(path: &Path) -> Self {
        let raw = path.to_string_lossy().into_owned();
        let mut needles = Vec::with_capacity(2);
        if !raw.is_empty() {
            let quoted = shell_quote(&raw);
            if quoted != raw {
                needles.push(quoted);
            }
            needles.push(raw);
        }
        Self { needles }
    }

    pub fn scrub(&self, text: String) -> String {
        self.needles.iter().fold(text, |text, needle| {
            if text.contains(needle.as_str()) {
                text.replace(needle.as_str(), SCRATCH_PLACEHOLDER)
            } else {
                text
            }
        })
    }

    pub fn scrub_report(&self, report: ErrorReport) -> ErrorReport {
        ErrorReport {
            cmd: self.scrub(report.cmd),
            stdout: self.scrub(report.stdout),
            stderr: self.scrub(report.stderr),
        }
    }
}
