// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod combine;
pub mod config;
pub mod dedupe;
pub mod fraud;
pub mod gibberish;
pub mod metrics;
pub mod mismatch;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod spam;
pub mod veracity;
pub mod verdict;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::model::{ClassifierBundle, ModelError, ModelStore};
pub use crate::pipeline::TrustPipeline;
pub use crate::verdict::{PipelineOutcome, TextSample, Verdict};
