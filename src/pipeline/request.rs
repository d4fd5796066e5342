//! Shape of a pipeline request: source text plus one to three stages.

use crate::pipeline::error::PipelineError;

pub const MAX_STAGES: usize = 3;

/// One requested tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub tool: String,
    pub flags: String,
}

impl Stage {
    pub fn new(tool: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            flags: flags.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub source: String,
    stages: Vec<Stage>,
}

impl PipelineRequest {
    pub fn new(source: impl Into<String>, stages: Vec<Stage>) -> Result<Self, PipelineError> {
        if stages.is_empty() {
            return Err(PipelineError::NoStages);
        }
        if stages.len() > MAX_STAGES {
            return Err(PipelineError::TooManyStages);
        }
        Ok(Self {
            source: source.into(),
            stages,
        })
    }

    /// Build from positional `(tool, flags)` slots as sent by the client.
    ///
    /// An empty or missing tool name ends the chain; a later filled slot is
    /// a gap and rejected.
    pub fn from_slots(
        source: impl Into<String>,
        slots: [(Option<String>, Option<String>); MAX_STAGES],
    ) -> Result<Self, PipelineError> {
        let mut stages = Vec::with_capacity(MAX_STAGES);
        let mut ended = false;

        for (index, (tool, flags)) in slots.into_iter().enumerate() {
            match tool.filter(|name| !name.trim().is_empty()) {
                Some(_) if ended => {
                    return Err(PipelineError::MissingStage { stage: index + 1 });
                }
                Some(name) => stages.push(Stage::new(name.trim(), flags.unwrap_or_default())),
                None => ended = true,
            }
        }

        Self::new(source, stages)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(tool: &str, flags: &str) -> (Option<String>, Option<String>) {
        (Some(tool.to_string()), Some(flags.to_string()))
    }

    const EMPTY: (Option<String>, Option<String>) = (None, None);

    #[test]
    fn test_single_stage() {
        let req = PipelineRequest::from_slots("src", [slot("dxc", "-spirv"), EMPTY, EMPTY]).unwrap();
        assert_eq!(req.stages(), &[Stage::new("dxc", "-spirv")]);
    }

    #[test]
    fn test_three_stages_in_order() {
        let req = PipelineRequest::from_slots(
            "src",
            [slot("dxc", "-spirv"), slot("spirv-opt", "-O"), slot("spirv-cross", "")],
        )
        .unwrap();
        let tools: Vec<_> = req.stages().iter().map(|s| s.tool.as_str()).collect();
        assert_eq!(tools, vec!["dxc", "spirv-opt", "spirv-cross"]);
    }

    #[test]
    fn test_gap_rejected() {
        let err = PipelineRequest::from_slots("src", [slot("dxc", ""), EMPTY, slot("spirv-cross", "")])
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingStage { stage: 3 }));
        assert_eq!(err.to_string(), "stage 3 was supplied without stage 2");
    }

    #[test]
    fn test_blank_tool_counts_as_absent() {
        let req = PipelineRequest::from_slots(
            "src",
            [slot("dxc", ""), (Some("  ".to_string()), Some("-O".to_string())), EMPTY],
        )
        .unwrap();
        assert_eq!(req.stages().len(), 1);
    }

    #[test]
    fn test_missing_flags_default_empty() {
        let req = PipelineRequest::from_slots("src", [(Some("dxc".to_string()), None), EMPTY, EMPTY])
            .unwrap();
        assert_eq!(req.stages()[0].flags, "");
    }

    #[test]
    fn test_no_stages_rejected() {
        let err = PipelineRequest::from_slots("src", [EMPTY, EMPTY, EMPTY]).unwrap_err();
        assert!(matches!(err, PipelineError::NoStages));
    }

    #[test]
    fn test_too_many_stages_rejected() {
        let stages = vec![Stage::new("spirv-opt", ""); 4];
        assert!(matches!(
            PipelineRequest::new("src", stages).unwrap_err(),
            PipelineError::TooManyStages
        ));
    }
}
