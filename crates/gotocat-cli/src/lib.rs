//! `gotocat-cli` crate (library surface).
//!
//! The primary entrypoint for end users is the `gotocat` binary.
//! This library module exists so embedders can reach the engine types and the
//! local backends through the same crate that ships the binary.

pub use gotocat_core as core;
pub use gotocat_local as local;
