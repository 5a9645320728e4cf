//! Client library for the FileMaker XML publishing interface
//!
//! Compiles structured queries into the server's command-style query strings,
//! sends them over HTTP with Basic authentication, and turns the
//! `fmresultset` XML grammar into typed records.
//!
//! - [`query`] builds and compiles queries
//! - [`model`] parses and materializes result envelopes
//! - [`FmConnector`] runs queries against a server

pub mod error;
pub mod model;
pub mod query;
pub mod transport;

mod client;
mod config;

pub use client::*;
pub use config::*;
pub use error::Error;
pub use model::has_error;
pub use model::materialize;
pub use model::parse;
pub use query::compile;
pub use query::try_compile;
