#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::redundant_pub_crate)]

//! Command-line client for the Battle.net realm directory.
//!
//! Layout:
//! - `cli.rs`: argument parsing and command dispatch
//! - `config.rs`: immutable run configuration, endpoints and credentials
//! - `auth.rs`: OAuth2 client-credentials token exchange
//! - `source.rs`: HTTP realm source and raw body fetches
//! - `commands/`: Lua table generation and JSON passthrough handlers
//! - `client.rs`: shared HTTP client construction and error types
//! - `output.rs`: stdout writer
//! - `main.rs`: thin entrypoint delegating to `run()`

pub(crate) mod auth;
pub(crate) mod cli;
pub(crate) mod client;
pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod output;
pub(crate) mod source;

pub use cli::run;
