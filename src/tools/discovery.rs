//! Executable resolution for catalogued tools.
//!
//! Precedence: an explicit per-tool path, then `SPIRV_TOOLS_DIR` for
//! SPIRV-Tools members, then the `PATH` search list. Explicitly configured
//! locations must exist; a bad one is a configuration error, not a warning.

use crate::error::{AppError, Result};
use crate::tools::catalog::{Project, ToolSpec};
use std::collections::BTreeMap;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Operator supplied executable locations.
#[derive(Debug, Clone, Default)]
pub struct ToolOverrides {
    /// Tool name -> executable path.
    pub paths: BTreeMap<String, PathBuf>,
    /// Directory containing every SPIRV-Tools binary.
    pub spirv_tools_dir: Option<PathBuf>,
}

impl ToolOverrides {
    pub fn with_path(mut self, tool: &str, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(tool.to_string(), path.into());
        self
    }
}

/// Resolve the executable for `spec`.
///
/// Returns `Ok(None)` when the tool is simply not installed. Tools found on
/// the search path keep their bare command name so logged commands stay
/// copyable.
pub fn resolve(
    spec: &ToolSpec,
    overrides: &ToolOverrides,
    search_path: Option<&OsStr>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = overrides.paths.get(spec.name) {
        return require_file(spec, path).map(Some);
    }

    if spec.project == Project::SpirvTools {
        if let Some(dir) = &overrides.spirv_tools_dir {
            let path = dir.join(format!("{}{}", spec.name, env::consts::EXE_SUFFIX));
            return require_file(spec, &path).map(Some);
        }
    }

    let Some(exe) = spec.default_exe else {
        return Ok(None);
    };

    Ok(search_path
        .filter(|paths| find_in_path(exe, paths).is_some())
        .map(|_| PathBuf::from(exe)))
}

fn require_file(spec: &ToolSpec, path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(AppError::ConfigError(format!(
            "{} was configured at {}, which is not an existing file",
            spec.name,
            path.display()
        )))
    }
}

/// Find `exe` in a `PATH`-style list of directories.
pub fn find_in_path(exe: &str, paths: &OsStr) -> Option<PathBuf> {
    env::split_paths(paths)
        .map(|dir| dir.join(format!("{}{}", exe, env::consts::EXE_SUFFIX)))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
