//! core
//!
//! Core domain types, path handling, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ManifestLocation, ResolvedFile, ToolSpec
//! - [`paths`] - Path normalization and nearest-manifest lookup
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing keeps raw input paths apart from resolved ones
//! - Resolution takes the working directory as an argument
//! - Nothing here spawns processes

pub mod config;
pub mod paths;
pub mod types;
