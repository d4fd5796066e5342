//! Tool registry built once at startup and shared read-only afterwards.

use crate::error::Result;
use crate::tools::catalog::{ToolSpec, CATALOG};
use crate::tools::discovery::{self, ToolOverrides};
use crate::tools::kind::{ArgLayout, ArtifactKind, Emission, FlagStyle};
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A catalogued tool together with the outcome of discovery.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    spec: ToolSpec,
    /// Always non-empty when present.
    executable: Option<PathBuf>,
}

impl ToolDescriptor {
    pub fn new(spec: ToolSpec, executable: Option<PathBuf>) -> Self {
        let executable = executable.filter(|path| !path.as_os_str().is_empty());
        Self { spec, executable }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn input(&self) -> ArtifactKind {
        self.spec.input
    }

    pub fn output(&self) -> ArtifactKind {
        self.spec.output
    }

    pub fn emission(&self) -> Emission {
        self.spec.emission
    }

    pub fn layout(&self) -> ArgLayout {
        self.spec.layout
    }

    pub fn flag_style(&self) -> FlagStyle {
        self.spec.flag_style
    }

    pub fn is_public(&self) -> bool {
        self.spec.public
    }

    pub fn is_discovered(&self) -> bool {
        self.executable.is_some()
    }

    /// Resolved executable, `None` if discovery did not find the tool.
    pub fn executable(&self) -> Option<&Path> {
        self.executable.as_deref()
    }
}

/// Why a name could not be turned into a runnable tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    NotFound,
    Unavailable,
}

/// Every known tool, in catalogue order.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Build a registry from already resolved descriptors.
    pub fn from_descriptors(tools: Vec<ToolDescriptor>) -> Self {
        Self { tools }
    }

    /// Discover the built-in catalogue against the process `PATH`.
    pub fn discover(overrides: &ToolOverrides) -> Result<Self> {
        let search_path = env::var_os("PATH");
        Self::discover_catalog(CATALOG, overrides, search_path.as_deref())
    }

    /// Resolve each tool of `catalog` in order.
    ///
    /// Fails fast on the first explicitly configured path that does not
    /// exist. Tools that are merely missing are kept as undiscovered.
    pub fn discover_catalog(
        catalog: &[ToolSpec],
        overrides: &ToolOverrides,
        search_path: Option<&OsStr>,
    ) -> Result<Self> {
        let mut tools = Vec::with_capacity(catalog.len());

        for spec in catalog {
            let executable = discovery::resolve(spec, overrides, search_path)?;

            match (&executable, spec.default_exe) {
                (Some(path), _) => {
                    tracing::info!(tool = spec.name, path = %path.display(), "Tool found");
                }
                (None, Some(exe)) => {
                    tracing::warn!(tool = spec.name, exe, "Could not find tool in PATH");
                }
                // Nothing to look for, absence is expected.
                (None, None) => {}
            }

            tools.push(ToolDescriptor::new(*spec, executable));
        }

        Ok(Self { tools })
    }

    /// Find any known tool by name, including plumbing tools.
    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    /// Find a discovered tool, whether or not it is public.
    pub fn runnable(&self, name: &str) -> std::result::Result<&ToolDescriptor, LookupError> {
        match self.lookup(name) {
            Some(tool) if tool.is_discovered() => Ok(tool),
            Some(_) => Err(LookupError::Unavailable),
            None => Err(LookupError::NotFound),
        }
    }

    /// Find a tool a client is allowed to request as a pipeline stage.
    pub fn selectable(&self, name: &str) -> std::result::Result<&ToolDescriptor, LookupError> {
        match self.lookup(name) {
            Some(tool) if !tool.is_public() => Err(LookupError::NotFound),
            Some(tool) if !tool.is_discovered() => Err(LookupError::Unavailable),
            Some(tool) => Ok(tool),
            None => Err(LookupError::NotFound),
        }
    }

    /// Names of discovered public tools, in catalogue order.
    pub fn list_public(&self) -> Vec<&'static str> {
        self.tools
            .iter()
            .filter(|tool| tool.is_public() && tool.is_discovered())
            .map(ToolDescriptor::name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(found: &[&str]) -> ToolRegistry {
        let tools = CATALOG
            .iter()
            .map(|spec| {
                let exe = found
                    .contains(&spec.name)
                    .then(|| PathBuf::from(spec.name));
                ToolDescriptor::new(*spec, exe)
            })
            .collect();
        ToolRegistry::from_descriptors(tools)
    }

    #[test]
    fn test_list_public_skips_plumbing_and_missing() {
        let registry = registry_with(&["spirv-opt", "dxc", "spirv-as", "spirv-dis"]);
        assert_eq!(registry.list_public(), vec!["dxc", "spirv-opt"]);
    }

    #[test]
    fn test_list_public_keeps_catalog_order() {
        let all: Vec<_> = CATALOG.iter().map(|t| t.name).collect();
        let registry = registry_with(&all);
        assert_eq!(
            registry.list_public(),
            vec![
                "dxc",
                "glslangValidator",
                "slangc",
                "spirv-cross",
                "spirv-val",
                "spirv-opt"
            ]
        );
    }

    #[test]
    fn test_selectable_rejects_plumbing() {
        let registry = registry_with(&["spirv-as"]);
        assert_eq!(
            registry.selectable("spirv-as").unwrap_err(),
            LookupError::NotFound
        );
        assert!(registry.runnable("spirv-as").is_ok());
    }

    #[test]
    fn test_selectable_reports_unavailable() {
        let registry = registry_with(&[]);
        assert_eq!(
            registry.selectable("dxc").unwrap_err(),
            LookupError::Unavailable
        );
        assert_eq!(
            registry.selectable("fxc").unwrap_err(),
            LookupError::NotFound
        );
    }

    #[test]
    fn test_empty_executable_is_not_discovered() {
        let tool = ToolDescriptor::new(CATALOG[0], Some(PathBuf::new()));
        assert!(!tool.is_discovered());
    }

    #[test]
    fn test_discover_without_path_marks_missing() {
        let registry =
            ToolRegistry::discover_catalog(CATALOG, &ToolOverrides::default(), None).unwrap();
        assert!(registry.tools.iter().all(|tool| !tool.is_discovered()));
        assert!(registry.list_public().is_empty());
    }

    #[test]
    fn test_discover_tool_without_default_stays_missing() {
        let mut spec = CATALOG[0];
        spec.default_exe = None;
        let dir = tempfile::tempdir().unwrap();
        let search = dir.path().as_os_str();

        let registry =
            ToolRegistry::discover_catalog(&[spec], &ToolOverrides::default(), Some(search))
                .unwrap();
        assert!(!registry.lookup("dxc").unwrap().is_discovered());
    }
}
