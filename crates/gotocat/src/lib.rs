//! Public facade crate for `gotocat`.
//!
//! This crate contains no IO or network logic.
//! It re-exports the backend-agnostic types/traits from `gotocat-core`.

pub use gotocat_core::*;
