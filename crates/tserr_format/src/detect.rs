//! Formatter executable discovery.
//!
//! Resolution order: explicit configuration override, the nearest
//! `node_modules/.bin/prettier` walking up from the working directory,
//! then a plain `PATH` lookup. The result is resolved once per client and
//! cached until `reset`.

use crate::runner::Invocation;
use std::path::PathBuf;
use tserr_options::ResolvedOptions;

const FORMATTER_NAME: &str = "prettier";

/// Resolve the formatter command line, or `None` when no executable can be
/// located.
pub fn detect_formatter(options: &ResolvedOptions) -> Option<Invocation> {
    if let Some(command) = &options.formatter_command {
        return Some(build_invocation(command.clone(), options));
    }

    if let Some(local) = find_local_install() {
        return Some(build_invocation(local.to_string_lossy().into_owned(), options));
    }

    find_in_path(FORMATTER_NAME)
        .map(|path| build_invocation(path.to_string_lossy().into_owned(), options))
}

/// Arguments requesting the TypeScript parser mode and the configured
/// print width.
fn build_invocation(command: String, options: &ResolvedOptions) -> Invocation {
    Invocation::new(
        command,
        vec![
            "--parser".to_string(),
            "typescript".to_string(),
            "--print-width".to_string(),
            options.print_width.to_string(),
        ],
    )
}

/// The nearest `node_modules/.bin/prettier`, walking up from the current
/// working directory.
fn find_local_install() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir
            .join("node_modules")
            .join(".bin")
            .join(FORMATTER_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Search `PATH` for an executable with the given name.
fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_takes_precedence() {
        let options = ResolvedOptions {
            formatter_command: Some("/opt/prettier".to_string()),
            ..ResolvedOptions::default()
        };
        let invocation = detect_formatter(&options).unwrap();
        assert_eq!(invocation.command, "/opt/prettier");
        assert_eq!(
            invocation.args,
            vec!["--parser", "typescript", "--print-width", "80"]
        );
    }

    #[test]
    fn test_print_width_flows_into_arguments() {
        let options = ResolvedOptions {
            formatter_command: Some("prettier".to_string()),
            print_width: 120,
            ..ResolvedOptions::default()
        };
        let invocation = detect_formatter(&options).unwrap();
        assert!(invocation.args.contains(&"120".to_string()));
    }
}
