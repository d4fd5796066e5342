//! Runs a chain of tools over a per-request scratch file.
//!
//! # Flow
//! 1. Plan: resolve every requested tool and check each adjacent pair
//!    against the compatibility table. Nothing is spawned for a bad plan.
//! 2. Stage the source text.
//! 3. For each stage: assemble first if the tool takes SPIR-V, run the
//!    tool, then disassemble if it wrote a binary module. The resulting
//!    text is restaged for the next tool.
//! 4. The first failure ends the run; paths are scrubbed from the result.

use crate::command::{self, target_env, CommandSpec, ToolRunner};
use crate::pipeline::error::PipelineError;
use crate::pipeline::request::PipelineRequest;
use crate::pipeline::result::{
    DisassembleResult, ErrorReport, PipelineResult, Scrubber, ValidateResult, ValidateSteps,
    DISASSEMBLY_FAILED, VALID_OUTPUT,
};
use crate::pipeline::scratch::Scratch;
use crate::tools::catalog::{SPIRV_AS, SPIRV_DIS, SPIRV_OPT, SPIRV_VAL};
use crate::tools::{link, ArtifactKind, Link, ToolDescriptor, ToolRegistry};
use std::path::PathBuf;
use std::sync::Arc;

/// A resolved stage, ready to run.
#[derive(Debug, Clone, Copy)]
pub struct PlannedStage<'a> {
    pub tool: &'a ToolDescriptor,
    pub flags: &'a str,
}

pub struct Pipeline {
    registry: Arc<ToolRegistry>,
    runner: ToolRunner,
    scratch_dir: Option<PathBuf>,
}

impl Pipeline {
    pub fn new(registry: Arc<ToolRegistry>, runner: ToolRunner, scratch_dir: Option<PathBuf>) -> Self {
        Self {
            registry,
            runner,
            scratch_dir,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Resolve the requested tools and validate how they chain.
    ///
    /// Each stage is checked against the stage right before it, never
    /// against the original source.
    pub fn plan<'a>(
        &'a self,
        request: &'a PipelineRequest,
    ) -> Result<Vec<PlannedStage<'a>>, PipelineError> {
        let mut plan: Vec<PlannedStage<'a>> = Vec::with_capacity(request.stages().len());

        for stage in request.stages() {
            let tool = self
                .registry
                .selectable(&stage.tool)
                .map_err(|e| PipelineError::lookup(&stage.tool, e))?;

            if let Some(previous) = plan.last() {
                if let Link::Rejected(reason) = link(previous.tool.output(), tool.input()) {
                    return Err(PipelineError::Incompatible {
                        from: previous.tool.name().to_string(),
                        to: tool.name().to_string(),
                        reason,
                    });
                }
            }

            plan.push(PlannedStage {
                tool,
                flags: &stage.flags,
            });
        }

        Ok(plan)
    }

    /// Execute a compile request. Failures are reported in the result.
    pub async fn compile(&self, request: &PipelineRequest) -> PipelineResult {
        let plan = match self.plan(request) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected pipeline request");
                return PipelineResult::failure(e);
            }
        };

        let scratch = match Scratch::create(self.scratch_dir.as_deref()) {
            Ok(scratch) => scratch,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create scratch file");
                return PipelineResult::failure(PipelineError::Scratch(e));
            }
        };
        let scrubber = Scrubber::new(scratch.path());

        let result = match self.run_plan(&plan, &request.source, &scratch).await {
            Ok(output) => PipelineResult::success(output),
            Err(e) => {
                tracing::info!(error = %e, kind = e.kind(), "Pipeline failed");
                PipelineResult::failure(e)
            }
        };

        result.scrubbed(&scrubber)
    }

    async fn run_plan(
        &self,
        plan: &[PlannedStage<'_>],
        source: &str,
        scratch: &Scratch,
    ) -> Result<String, PipelineError> {
        scratch.stage(source).await?;

        let mut output = String::new();
        for (index, stage) in plan.iter().enumerate() {
            if stage.tool.input() == ArtifactKind::Spirv {
                self.assemble(scratch, stage.flags).await?;
            }

            let cmd = self.command_for(stage.tool, stage.flags, scratch)?;
            let stdout = self.runner.run(&cmd).await?;

            let text = if cmd.writes_file() {
                self.disassemble_scratch(scratch).await?
            } else {
                stdout
            };

            output = match stage.tool.output() {
                ArtifactKind::Status => VALID_OUTPUT.to_string(),
                ArtifactKind::Text | ArtifactKind::Spirv => text,
            };

            tracing::debug!(stage = index + 1, tool = stage.tool.name(), "Stage completed");

            if index + 1 < plan.len() {
                scratch.stage(&output).await?;
            }
        }

        Ok(output)
    }

    /// Assemble the staged SPIR-V text in place, passing on the target env
    /// found in `stage_flags`.
    async fn assemble(&self, scratch: &Scratch, stage_flags: &str) -> Result<(), PipelineError> {
        let assembler = self.plumbing(SPIRV_AS)?;
        let flags = target_env::extract(stage_flags);
        let cmd = self.command_for(assembler, &flags, scratch)?;
        self.runner.run(&cmd).await?;
        Ok(())
    }

    /// Disassemble the binary module in the scratch file.
    async fn disassemble_scratch(&self, scratch: &Scratch) -> Result<String, PipelineError> {
        let disassembler = self.plumbing(SPIRV_DIS)?;
        let cmd = self.command_for(disassembler, "", scratch)?;
        Ok(self.runner.run(&cmd).await?)
    }

    fn plumbing(&self, name: &str) -> Result<&ToolDescriptor, PipelineError> {
        self.registry
            .runnable(name)
            .map_err(|e| PipelineError::lookup(name, e))
    }

    fn command_for(
        &self,
        tool: &ToolDescriptor,
        flags: &str,
        scratch: &Scratch,
    ) -> Result<CommandSpec, PipelineError> {
        command::build(tool, flags, scratch.path()).map_err(|e| PipelineError::lookup(tool.name(), e))
    }

    /// Turn an uploaded SPIR-V binary into text. No chaining, no bridging.
    pub async fn disassemble(&self, binary: &[u8]) -> DisassembleResult {
        let scratch = match Scratch::create(self.scratch_dir.as_deref()) {
            Ok(scratch) => scratch,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create scratch file");
                return DisassembleResult {
                    success: false,
                    data: PipelineError::Scratch(e).to_string(),
                };
            }
        };
        let scrubber = Scrubber::new(scratch.path());

        let outcome = match scratch.stage(binary).await {
            Ok(()) => self.disassemble_scratch(&scratch).await,
            Err(e) => Err(PipelineError::Scratch(e)),
        };

        match outcome {
            Ok(text) => DisassembleResult {
                success: true,
                data: scrubber.scrub(text),
            },
            Err(e) => {
                let report = ErrorReport::from(e);
                let data = if report.stderr.is_empty() {
                    DISASSEMBLY_FAILED.to_string()
                } else {
                    scrubber.scrub(report.stderr)
                };
                DisassembleResult {
                    success: false,
                    data,
                }
            }
        }
    }

    /// Assemble, validate, optimize and disassemble SPIR-V text.
    ///
    /// `commands` in the result records every step that completed, so a
    /// caller can tell which one failed.
    pub async fn validate(&self, spirv: &str, env: Option<&str>) -> ValidateResult {
        let flags = env
            .and_then(|env| env.split_whitespace().next())
            .map(|env| format!("{} {}", target_env::TARGET_ENV, env))
            .unwrap_or_default();

        let mut steps = ValidateSteps::default();

        let outcome = match Scratch::create(self.scratch_dir.as_deref()) {
            Ok(scratch) => {
                let scrubber = Scrubber::new(scratch.path());
                self.run_validation(&scratch, spirv, &flags, &mut steps)
                    .await
                    .map(|text| scrubber.scrub(text))
                    .map_err(|e| scrubber.scrub_report(e.into()))
            }
            Err(e) => Err(PipelineError::Scratch(e).into()),
        };

        match outcome {
            Ok(spirv) => ValidateResult {
                success: true,
                spirv,
                commands: steps,
                error: ErrorReport::default(),
            },
            Err(error) => ValidateResult {
                success: false,
                spirv: String::new(),
                commands: steps,
                error,
            },
        }
    }

    async fn run_validation(
        &self,
        scratch: &Scratch,
        spirv: &str,
        flags: &str,
        steps: &mut ValidateSteps,
    ) -> Result<String, PipelineError> {
        scratch.stage(spirv).await?;

        self.assemble(scratch, flags).await?;
        steps.assemble = true;

        let validator = self.plumbing(SPIRV_VAL)?;
        self.runner
            .run(&self.command_for(validator, flags, scratch)?)
            .await?;
        steps.val = true;

        let optimizer = self.plumbing(SPIRV_OPT)?;
        self.runner
            .run(&self.command_for(optimizer, flags, scratch)?)
            .await?;
        steps.opt = true;

        let text = self.disassemble_scratch(scratch).await?;
        steps.dis = true;

        Ok(text)
    }
}
