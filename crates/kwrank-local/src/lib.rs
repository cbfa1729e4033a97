//! Local implementation of the kwrank keyword-opportunity pipeline:
//! the deterministic ranking logic plus the DataForSEO provider adapter.
//!
//! The pipeline is pure once the two fetches complete; everything here is
//! safe to call concurrently from independent report runs.

pub mod crossref;
pub mod dataforseo;
pub mod filter;
pub mod intent;
pub mod pipeline;
pub mod rank;
pub mod region;
pub mod seed;

pub use pipeline::{rank_keywords, rank_keywords_from_env};
