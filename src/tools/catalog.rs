//! The fixed catalogue of tools this server knows how to drive.

use crate::tools::kind::{ArgLayout, ArtifactKind, Emission, FlagStyle};

/// Upstream project a tool ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Project {
    DirectXShaderCompiler,
    Glslang,
    Slang,
    SpirvCross,
    /// All members can be relocated together with `SPIRV_TOOLS_DIR`.
    SpirvTools,
}

/// Static description of a known tool, before discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    /// Command looked up on `PATH` when no override is configured.
    /// `None` means the tool is only usable when explicitly configured.
    pub default_exe: Option<&'static str>,
    /// Environment variable holding an explicit executable path.
    pub env_var: &'static str,
    pub project: Project,
    pub input: ArtifactKind,
    pub output: ArtifactKind,
    pub emission: Emission,
    pub layout: ArgLayout,
    pub flag_style: FlagStyle,
    /// Advertised to clients. Plumbing tools are not selectable.
    pub public: bool,
}

pub const SPIRV_AS: &str = "spirv-as";
pub const SPIRV_DIS: &str = "spirv-dis";
pub const SPIRV_VAL: &str = "spirv-val";
pub const SPIRV_OPT: &str = "spirv-opt";

/// Known tools in discovery and listing order.
pub const CATALOG: &[ToolSpec] = &[
    ToolSpec {
        name: "dxc",
        default_exe: Some("dxc"),
        env_var: "DXC_PATH",
        project: Project::DirectXShaderCompiler,
        input: ArtifactKind::Text,
        output: ArtifactKind::Spirv,
        emission: Emission::Stdout,
        layout: ArgLayout::Standard,
        flag_style: FlagStyle::Verbatim,
        public: true,
    },
    ToolSpec {
        name: "glslangValidator",
        default_exe: Some("glslangValidator"),
        env_var: "GLSLANG_VALIDATOR_PATH",
        project: Project::Glslang,
        input: ArtifactKind::Text,
        output: ArtifactKind::Spirv,
        emission: Emission::ScratchFile,
        layout: ArgLayout::Standard,
        flag_style: FlagStyle::Verbatim,
        public: true,
    },
    ToolSpec {
        name: "slangc",
        default_exe: Some("slangc"),
        env_var: "SLANGC_PATH",
        project: Project::Slang,
        input: ArtifactKind::Text,
        output: ArtifactKind::Spirv,
        emission: Emission::Stdout,
        layout: ArgLayout::Standard,
        flag_style: FlagStyle::Verbatim,
        public: true,
    },
    ToolSpec {
        name: "spirv-cross",
        default_exe: Some("spirv-cross"),
        env_var: "SPIRV_CROSS_PATH",
        project: Project::SpirvCross,
        input: ArtifactKind::Spirv,
        output: ArtifactKind::Text,
        emission: Emission::Stdout,
        layout: ArgLayout::Standard,
        flag_style: FlagStyle::Verbatim,
        public: true,
    },
    ToolSpec {
        name: SPIRV_VAL,
        default_exe: Some(SPIRV_VAL),
        env_var: "SPIRV_VAL_PATH",
        project: Project::SpirvTools,
        input: ArtifactKind::Spirv,
        output: ArtifactKind::Status,
        emission: Emission::Stdout,
        layout: ArgLayout::Standard,
        flag_style: FlagStyle::Verbatim,
        public: true,
    },
    ToolSpec {
        name: SPIRV_OPT,
        default_exe: Some(SPIRV_OPT),
        env_var: "SPIRV_OPT_PATH",
        project: Project::SpirvTools,
        input: ArtifactKind::Spirv,
        output: ArtifactKind::Spirv,
        emission: Emission::ScratchFile,
        layout: ArgLayout::Standard,
        flag_style: FlagStyle::JoinedTargetEnv,
        public: true,
    },
    ToolSpec {
        name: SPIRV_AS,
        default_exe: Some(SPIRV_AS),
        env_var: "SPIRV_AS_PATH",
        project: Project::SpirvTools,
        input: ArtifactKind::Spirv,
        output: ArtifactKind::Spirv,
        emission: Emission::ScratchFile,
        layout: ArgLayout::ScratchFirst,
        flag_style: FlagStyle::Verbatim,
        public: false,
    },
    ToolSpec {
        name: SPIRV_DIS,
        default_exe: Some(SPIRV_DIS),
        env_var: "SPIRV_DIS_PATH",
        project: Project::SpirvTools,
        input: ArtifactKind::Spirv,
        output: ArtifactKind::Spirv,
        emission: Emission::Stdout,
        layout: ArgLayout::Standard,
        flag_style: FlagStyle::Verbatim,
        public: false,
    },
];
