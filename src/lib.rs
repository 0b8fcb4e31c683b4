//! pipenv-tools-hook - run a tool once per Pipenv project
//!
//! In a checkout holding several independent Pipenv projects, a linter or
//! formatter must run inside the environment of the project each file
//! belongs to. This crate finds every `Pipfile` under a root, assigns each
//! input file to its nearest enclosing project, and runs the tool once per
//! project through `pipenv run`, folding the results into one exit code.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, prints results)
//! - [`engine`] - Discover -> Group -> Run -> Aggregate
//! - [`core`] - Domain types, path resolution, configuration
//! - [`env`] - Environment manager abstraction (Pipenv, mock)
//! - [`git`] - Work-tree discovery for the default root
//! - [`ui`] - Output utilities
//!
//! # Invariants
//!
//! 1. A file is checked only in its nearest controlling environment
//! 2. Files outside every environment are skipped, never checked elsewhere
//! 3. Empty input and unmanaged-only input fail
//! 4. Launch failures become exit codes, never panics or errors

pub mod cli;
pub mod core;
pub mod engine;
pub mod env;
pub mod git;
pub mod ui;
