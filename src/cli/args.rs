//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Usage
//!
//! ```text
//! pipenv-tools-hook --tool <NAME> [--tool-args <ARGS>]... [FILES]...
//! ```
//!
//! `--tool-args` takes one value per occurrence, may start with `-`, and is
//! split on whitespace. pre-commit appends the staged files after the
//! configured `args`, so `--tool-args --fix file1.py` leaves `file1.py` as a
//! file.

use clap::Parser;
use std::path::PathBuf;

use crate::ui::output::Verbosity;

/// Run a linter or formatter once per Pipenv project, inside that project's environment
#[derive(Parser, Debug)]
#[command(name = "pipenv-tools-hook")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
EXAMPLES:
    # Check two files that live in different Pipenv projects
    pipenv-tools-hook --tool ruff service-a/app.py service-b/cli.py

    # Pass arguments to the tool
    pipenv-tools-hook --tool ruff --tool-args \"check --fix\" service-a/app.py

    # .pre-commit-config.yaml
    - id: pipenv-tools
      args: [--tool, mypy, --tool-args, --strict]")]
pub struct Cli {
    /// Tool to run inside each environment (e.g. ruff, black, mypy)
    #[arg(long, value_name = "NAME")]
    pub tool: String,

    /// Arguments passed to the tool before the files (repeatable, split on whitespace)
    #[arg(long = "tool-args", value_name = "ARGS", allow_hyphen_values = true)]
    pub tool_args: Vec<String>,

    /// Directory scanned for manifests [default: enclosing git work tree, else cwd]
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Resolve relative file paths as if started in this directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Only print errors and tool output
    #[arg(short, long)]
    pub quiet: bool,

    /// Files to check
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Tool arguments with each `--tool-args` value split on whitespace.
    pub fn tool_args(&self) -> Vec<String> {
        self.tool_args
            .iter()
            .flat_map(|value| value.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    /// Output verbosity from `--quiet` / `--debug`.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pipenv-tools-hook").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn tool_and_files() {
        let cli = parse(&["--tool", "ruff", "file1.py", "file2.py"]);
        assert_eq!(cli.tool, "ruff");
        assert!(cli.tool_args.is_empty());
        assert_eq!(
            cli.files,
            vec![PathBuf::from("file1.py"), PathBuf::from("file2.py")]
        );
    }

    #[test]
    fn hyphenated_tool_arg_before_files() {
        let cli = parse(&["--tool", "ruff", "--tool-args", "--fix", "file1.py"]);
        assert_eq!(cli.tool_args(), vec!["--fix".to_string()]);
        assert_eq!(cli.files, vec![PathBuf::from("file1.py")]);
    }

    #[test]
    fn tool_args_split_on_whitespace() {
        let cli = parse(&["--tool", "ruff", "--tool-args", "check  --fix", "a.py"]);
        assert_eq!(cli.tool_args(), vec!["check".to_string(), "--fix".to_string()]);
    }

    #[test]
    fn tool_args_repeat() {
        let cli = parse(&[
            "--tool",
            "ruff",
            "--tool-args",
            "check",
            "--tool-args=--fix",
            "a.py",
        ]);
        assert_eq!(cli.tool_args(), vec!["check".to_string(), "--fix".to_string()]);
        assert_eq!(cli.files, vec![PathBuf::from("a.py")]);
    }

    #[test]
    fn flags_tool_args_and_files() {
        let cli = parse(&[
            "--debug",
            "--root",
            "/repo",
            "--tool",
            "black",
            "--tool-args",
            "--check",
            "a.py",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.root, Some(PathBuf::from("/repo")));
        assert_eq!(cli.tool_args(), vec!["--check".to_string()]);
        assert_eq!(cli.files, vec![PathBuf::from("a.py")]);
        assert_eq!(cli.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn no_files_is_accepted_by_the_parser() {
        let cli = parse(&["--tool", "ruff"]);
        assert!(cli.files.is_empty());
    }

    #[test]
    fn tool_is_required() {
        let result = Cli::try_parse_from(["pipenv-tools-hook", "file1.py"]);
        assert!(result.is_err());
    }

    #[test]
    fn verify_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
