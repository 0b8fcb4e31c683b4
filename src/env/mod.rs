//! env
//!
//! Environment manager abstraction.
//!
//! # Modules
//!
//! - [`traits`] - The `EnvManager` trait, process output and launch errors
//! - [`pipenv`] - Pipenv implementation (`pipenv run`)
//! - [`mock`] - Scriptable in-memory manager for tests
//!
//! # Design
//!
//! The tool runner talks to environments only through [`EnvManager`], so
//! the grouping and aggregation logic can be tested without Pipenv
//! installed.

pub mod mock;
pub mod pipenv;
pub mod traits;

pub use pipenv::{Ambient, PipenvManager};
pub use traits::{EnvError, EnvManager, ProcessOutput};
