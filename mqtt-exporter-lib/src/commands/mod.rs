//! Command-line interface and orchestration for mqtt-exporter
//!
//! This module implements the CLI commands and wires the catalog, dispatcher, store and
//! exporter together. It handles argument parsing, configuration loading, and the high-level
//! workflows.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **init**: Generate a default configuration file with commented example metrics
//! - **validate**: Load a configuration file, build the metric catalog and list what it exports
//! - **replay**: Push recorded messages through a fresh store and print the Prometheus text
//!   exposition of what would be exported
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes to the appropriate
//! command handler. Replay follows the same path a live deployment would:
//!
//! 1. Load configuration and build the catalog
//! 2. Create the store and start its background sweeper
//! 3. Feed messages through a dispatcher channel
//! 4. Render the store's live contents
//!
//! The `common` module provides shared functionality like logging setup and failure reporting.

mod common;
mod host;
mod init;
mod replay;
mod run;
mod validate;

pub use common::{ConfigArgs, LogLevel};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use replay::{ReplayArgs, replay_messages};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
