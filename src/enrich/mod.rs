//! Player enrichment
//!
//! Batched people lookups and the nationality table used to classify the
//! players they return.

mod batch;
pub mod nationality;

pub use batch::{dedupe_preserving_order, partition, BatchEnricher, BatchFailure, BatchReport};
