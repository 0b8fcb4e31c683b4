//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware printing and tool output pass-through
//!
//! # Design
//!
//! Only the CLI layer prints. The engine reports outcomes as values and
//! leaves presentation to this module.

pub mod output;
