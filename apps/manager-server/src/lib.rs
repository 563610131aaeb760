//! Client manager server
//!
//! Wires the identity and clients modules into one process: layered
//! configuration, tracing, database connection and migrations, and the
//! axum HTTP stack. `main.rs` is only the CLI front end over [`app`].
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app;
pub mod config;
pub mod logging;

pub use config::AppConfig;
