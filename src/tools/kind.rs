//! Artifact kinds and the rules for chaining tools together.

use std::fmt;

/// What a tool consumes or produces at the pipeline boundary.
///
/// SPIR-V always crosses a stage boundary as assembly text; turning it into
/// a binary module (and back) is the pipeline's job, not the tool's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Shading language source or any other human readable text.
    Text,
    /// SPIR-V, exchanged as its textual assembly form.
    Spirv,
    /// Pass/fail only, nothing to chain from.
    Status,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Text => f.write_str("text"),
            ArtifactKind::Spirv => f.write_str("SPIR-V"),
            ArtifactKind::Status => f.write_str("a pass/fail status"),
        }
    }
}

/// Where a tool leaves its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Printed on stdout.
    Stdout,
    /// Written as a binary module over the scratch file (`-o <scratch>`).
    ScratchFile,
}

/// Argument order a tool expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgLayout {
    /// `<exe> <flags> <scratch> [-o <scratch>]`
    Standard,
    /// `<exe> <scratch> [-o <scratch>] <flags>`
    ScratchFirst,
}

/// How a tool wants `--target-env` spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagStyle {
    /// Flags are passed through untouched.
    Verbatim,
    /// `--target-env <value>` must be rewritten to `--target-env=<value>`.
    JoinedTargetEnv,
}

/// Outcome of feeding one stage's output into the next stage's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Allowed,
    Rejected(&'static str),
}

/// Every `(produced, expected)` pair the pipeline knows about.
const LINKS: &[(ArtifactKind, ArtifactKind, Link)] = &[
    (ArtifactKind::Text, ArtifactKind::Text, Link::Allowed),
    (
        ArtifactKind::Text,
        ArtifactKind::Spirv,
        Link::Rejected("plain text cannot be assembled into SPIR-V"),
    ),
    (ArtifactKind::Spirv, ArtifactKind::Spirv, Link::Allowed),
    (
        ArtifactKind::Spirv,
        ArtifactKind::Text,
        Link::Rejected("SPIR-V cannot be fed to a tool that expects source text"),
    ),
    (
        ArtifactKind::Status,
        ArtifactKind::Text,
        Link::Rejected("a validator produces no output to chain from"),
    ),
    (
        ArtifactKind::Status,
        ArtifactKind::Spirv,
        Link::Rejected("a validator produces no output to chain from"),
    ),
];

/// Look up whether output of kind `produced` may feed input of kind `expected`.
pub fn link(produced: ArtifactKind, expected: ArtifactKind) -> Link {
    LINKS
        .iter()
        .find(|(from, to, _)| *from == produced && *to == expected)
        .map(|(_, _, link)| *link)
        .unwrap_or(Link::Rejected("no tool accepts this kind of input"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spirv_chains_into_spirv() {
        assert_eq!(link(ArtifactKind::Spirv, ArtifactKind::Spirv), Link::Allowed);
    }

    #[test]
    fn test_text_chains_into_text() {
        assert_eq!(link(ArtifactKind::Text, ArtifactKind::Text), Link::Allowed);
    }

    #[test]
    fn test_nothing_chains_after_status() {
        for expected in [ArtifactKind::Text, ArtifactKind::Spirv, ArtifactKind::Status] {
            assert!(matches!(
                link(ArtifactKind::Status, expected),
                Link::Rejected(_)
            ));
        }
    }

    #[test]
    fn test_spirv_into_text_rejected() {
        assert!(matches!(
            link(ArtifactKind::Spirv, ArtifactKind::Text),
            Link::Rejected(_)
        ));
    }

    #[test]
    fn test_text_into_spirv_rejected() {
        assert!(matches!(
            link(ArtifactKind::Text, ArtifactKind::Spirv),
            Link::Rejected(_)
        ));
    }
}
