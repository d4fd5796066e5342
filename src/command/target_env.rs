//! `--target-env` handling for free-form flag strings.
//!
//! Users write either `--target-env vulkan1.2` or `--target-env=vulkan1.2`.
//! The first occurrence of either spelling wins.

pub const TARGET_ENV: &str = "--target-env";

/// Value of the first `--target-env` found in `flags`, if any.
pub fn target_env_value(flags: &str) -> Option<&str> {
    let mut tokens = flags.split_whitespace();

    while let Some(token) = tokens.next() {
        if token == TARGET_ENV {
            if let Some(value) = tokens.next() {
                return Some(value);
            }
        } else if let Some(value) = token
            .strip_prefix(TARGET_ENV)
            .and_then(|rest| rest.strip_prefix('='))
        {
            if !value.is_empty() {
                return Some(value);
            }
        }
    }

    None
}

/// Normalized `--target-env <value>`, or an empty string when absent.
pub fn extract(flags: &str) -> String {
    target_env_value(flags)
        .map(|value| format!("{} {}", TARGET_ENV, value))
        .unwrap_or_default()
}

/// Rewrite every `--target-env <value>` pair as `--target-env=<value>`.
pub fn join_target_env<'a, I>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::new();
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        if token == TARGET_ENV {
            if let Some(value) = tokens.next() {
                out.push(format!("{}={}", TARGET_ENV, value));
                continue;
            }
        }
        out.push(token.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_spaced_form() {
        assert_eq!(extract("-O --target-env vulkan1.2"), "--target-env vulkan1.2");
    }

    #[test]
    fn test_extract_joined_form() {
        assert_eq!(extract("-O --target-env=vulkan1.1"), "--target-env vulkan1.1");
    }

    #[test]
    fn test_extract_absent() {
        assert_eq!(extract("-O"), "");
        assert_eq!(extract(""), "");
    }

    #[test]
    fn test_extract_tolerates_extra_whitespace() {
        assert_eq!(
            extract("  -O\t--target-env   spv1.5  "),
            "--target-env spv1.5"
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        assert_eq!(
            extract("--target-env=vulkan1.0 --target-env vulkan1.3"),
            "--target-env vulkan1.0"
        );
        assert_eq!(
            extract("--target-env vulkan1.3 --target-env=vulkan1.0"),
            "--target-env vulkan1.3"
        );
    }

    #[test]
    fn test_dangling_flag_has_no_value() {
        assert_eq!(extract("-O --target-env"), "");
        assert_eq!(extract("--target-env= -O"), "");
    }

    #[test]
    fn test_similar_flags_ignored() {
        assert_eq!(extract("-fspv-target-env=vulkan1.2"), "");
        assert_eq!(extract("--target-envx=vulkan1.2"), "");
    }

    #[test]
    fn test_join_rewrites_spaced_pairs() {
        let joined = join_target_env("-O --target-env vulkan1.2 --strip-debug".split_whitespace());
        assert_eq!(joined, vec!["-O", "--target-env=vulkan1.2", "--strip-debug"]);
    }

    #[test]
    fn test_join_keeps_dangling_flag() {
        let joined = join_target_env("-O --target-env".split_whitespace());
        assert_eq!(joined, vec!["-O", "--target-env"]);
    }
}
