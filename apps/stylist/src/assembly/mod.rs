// Outfit assembly engine.
// Implements: item filtering, role partitioning, combination sampling, fitness
// scoring, gap detection, explanation and the orchestration loop around them.
// Pure and synchronous; randomness comes only from the caller's random source.

pub mod catalog_health;
pub mod explanation;
pub mod filter;
pub mod gaps;
pub mod orchestrator;
pub mod partition;
pub mod request;
pub mod sampler;
pub mod scoring;
