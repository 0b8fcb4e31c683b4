//! engine
//!
//! Orchestrates a dispatch: Discover -> Group -> Run -> Aggregate.
//!
//! # Architecture
//!
//! 1. **Discover**: [`registry`] finds every manifest under the root once
//! 2. **Group**: [`grouper`] resolves each input file and assigns it to the
//!    nearest environment root, dropping unmanaged files
//! 3. **Run**: [`runner`] probes for the tool and runs it once per group
//! 4. **Aggregate**: [`dispatch`] folds group outcomes into one exit code
//!
//! # Invariants
//!
//! - A file is never checked in an environment other than its nearest one
//! - Groups run sequentially; a hung tool blocks the dispatch
//! - Nothing below [`Dispatcher`] returns an error; failures are exit codes
//! - The process-wide working directory is never changed
//!
//! # Example
//!
//! ```no_run
//! use pipenv_tools_hook::core::config::Config;
//! use pipenv_tools_hook::core::types::ToolSpec;
//! use pipenv_tools_hook::engine::Dispatcher;
//! use std::path::Path;
//!
//! let root = Path::new("/path/to/checkout");
//! let config = Config::load(root).unwrap();
//! let tool = ToolSpec::new("ruff", vec!["check".to_string()]);
//! let dispatcher = Dispatcher::from_config(&config, tool, root, root);
//!
//! std::process::exit(dispatcher.run(&["service-a/app.py", "service-b/cli.py"]));
//! ```

pub mod dispatch;
pub mod grouper;
pub mod registry;
pub mod runner;

pub use dispatch::{DispatchReport, Dispatcher, GroupReport};
pub use grouper::{group, EnvironmentGroup, Grouping};
pub use registry::EnvironmentRegistry;
pub use runner::{RunOutcome, ToolRunner};
