//! Typed command construction for tool invocations.
//!
//! A [`CommandSpec`] is a program plus an argument vector. It is only turned
//! into a shell-looking string for logs and error reports, never executed
//! through a shell.

use crate::command::target_env::join_target_env;
use crate::tools::{ArgLayout, Emission, FlagStyle, LookupError, ToolDescriptor};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the tool's artifact ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// The tool overwrites this file with a binary module.
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub tool: &'static str,
    pub program: PathBuf,
    pub args: Vec<String>,
    pub output: OutputTarget,
}

impl CommandSpec {
    pub fn writes_file(&self) -> bool {
        matches!(self.output, OutputTarget::File(_))
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Build the invocation of `tool` on `scratch` with the user's `flags`.
///
/// Pure: identical inputs give identical commands.
pub fn build(
    tool: &ToolDescriptor,
    flags: &str,
    scratch: &Path,
) -> Result<CommandSpec, LookupError> {
    let program = tool
        .executable()
        .ok_or(LookupError::Unavailable)?
        .to_path_buf();

    let tokens = flags.split_whitespace();
    let flags: Vec<String> = match tool.flag_style() {
        FlagStyle::Verbatim => tokens.map(str::to_string).collect(),
        FlagStyle::JoinedTargetEnv => join_target_env(tokens),
    };

    let scratch_arg = scratch.to_string_lossy().into_owned();
    let (output, output_args) = match tool.emission() {
        Emission::Stdout => (OutputTarget::Stdout, Vec::new()),
        Emission::ScratchFile => (
            OutputTarget::File(scratch.to_path_buf()),
            vec!["-o".to_string(), scratch_arg.clone()],
        ),
    };

    let mut args = Vec::with_capacity(flags.len() + 3);
    match tool.layout() {
        ArgLayout::Standard => {
            args.extend(flags);
            args.push(scratch_arg);
            args.extend(output_args);
        }
        ArgLayout::ScratchFirst => {
            args.push(scratch_arg);
            args.extend(output_args);
            args.extend(flags);
        }
    }

    Ok(CommandSpec {
        tool: tool.name(),
        program,
        args,
        output,
    })
}

/// Quote `arg` for display in a POSIX shell if it needs it.
pub(crate) fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_=./,:+@".contains(c));

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::CATALOG;

    fn tool(name: &str) -> ToolDescriptor {
        let spec = *CATALOG.iter().find(|t| t.name == name).unwrap();
        ToolDescriptor::new(spec, Some(PathBuf::from(name)))
    }

    const SCRATCH: &str = "/tmp/xyz123";

    #[test]
    fn test_stdout_tool_has_no_output_flag() {
        let cmd = build(&tool("dxc"), "-spirv -T ps_6_5 -E main", Path::new(SCRATCH)).unwrap();
        assert_eq!(cmd.to_string(), "dxc -spirv -T ps_6_5 -E main /tmp/xyz123");
        assert_eq!(cmd.output, OutputTarget::Stdout);
    }

    #[test]
    fn test_binary_tool_writes_scratch_in_place() {
        let cmd = build(
            &tool("glslangValidator"),
            "-S comp --target-env vulkan1.2",
            Path::new(SCRATCH),
        )
        .unwrap();
        assert_eq!(
            cmd.to_string(),
            "glslangValidator -S comp --target-env vulkan1.2 /tmp/xyz123 -o /tmp/xyz123"
        );
        assert!(cmd.writes_file());
    }

    #[test]
    fn test_spirv_opt_joins_target_env() {
        let cmd = build(&tool("spirv-opt"), "-O --target-env vulkan1.2", Path::new(SCRATCH)).unwrap();
        assert_eq!(
            cmd.args,
            vec!["-O", "--target-env=vulkan1.2", SCRATCH, "-o", SCRATCH]
        );
    }

    #[test]
    fn test_spirv_as_puts_scratch_first() {
        let cmd = build(&tool("spirv-as"), "--target-env vulkan1.1", Path::new(SCRATCH)).unwrap();
        assert_eq!(
            cmd.to_string(),
            "spirv-as /tmp/xyz123 -o /tmp/xyz123 --target-env vulkan1.1"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let t = tool("spirv-opt");
        let a = build(&t, "-O --target-env vulkan1.2", Path::new(SCRATCH)).unwrap();
        let b = build(&t, "-O --target-env vulkan1.2", Path::new(SCRATCH)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_undiscovered_tool_cannot_be_built() {
        let spec = *CATALOG.iter().find(|t| t.name == "dxc").unwrap();
        let missing = ToolDescriptor::new(spec, None);
        assert_eq!(
            build(&missing, "", Path::new(SCRATCH)).unwrap_err(),
            LookupError::Unavailable
        );
    }

    #[test]
    fn test_display_quotes_shell_metacharacters() {
        let cmd = build(&tool("spirv-cross"), "--rename-entry-point 'a b' $(rm)", Path::new(SCRATCH)).unwrap();
        // Flags are whitespace split, nothing is interpreted.
        assert_eq!(cmd.args[0], "--rename-entry-point");
        assert_eq!(cmd.args[1], "'a");
        assert_eq!(
            cmd.to_string(),
            r"spirv-cross --rename-entry-point ''\''a' 'b'\''' '$(rm)' /tmp/xyz123"
        );
    }

    #[test]
    fn test_display_quotes_redirections() {
        let cmd = build(&tool("dxc"), "-D X>1 -D Y<2 -D Z=a^b%c", Path::new(SCRATCH)).unwrap();
        assert_eq!(cmd.args[1], "X>1");
        assert_eq!(
            cmd.to_string(),
            "dxc -D 'X>1' -D 'Y<2' -D 'Z=a^b%c' /tmp/xyz123"
        );
    }
}
