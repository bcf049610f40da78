//! Outfit assembly and scoring engine.
//!
//! Turns a wardrobe catalog, a style profile and a situational context into a
//! ranked list of distinct outfits with gaps and a short rationale.

pub mod assembly;
pub mod config;
pub mod errors;
pub mod models;

pub use assembly::orchestrator::{AssemblyOptions, OutfitAssembler};
pub use errors::EngineError;
