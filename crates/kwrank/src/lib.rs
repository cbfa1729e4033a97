//! Public facade crate for `kwrank`.
//!
//! This crate intentionally contains no IO or provider-specific logic.
//! It re-exports the backend-agnostic types/traits from `kwrank-core`.

pub use kwrank_core::*;
