#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for mqtt-exporter
//!
//! This library consolidates all functionality for the mqtt-exporter tool, which turns values
//! published on MQTT topics into Prometheus metrics.
//!
//! # Module Organization
//!
//! - [`catalog`]: Immutable metric definitions built from configuration
//! - [`resolve`]: Extraction of numeric values from payloads and labels from topics
//! - [`store`]: Time-expiring observation store and snapshot collection
//! - [`dispatch`]: Routing of inbound messages to per-metric handlers
//! - [`export`]: Prometheus collector adapter and text exposition
//! - [`config`]: Configuration file loading and validation
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod export;
pub mod resolve;
pub mod store;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub use crate::commands::{Host, run};
