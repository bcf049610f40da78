//! Request / response shapes for one assembly call, and the entry point the
//! batch runner uses to serve them.

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assembly::catalog_health::{report_from_buckets, CatalogReport};
use crate::assembly::orchestrator::OutfitAssembler;
use crate::config::Config;
use crate::errors::EngineError;
use crate::models::context::OutfitContext;
use crate::models::outfit::CandidateOutfit;
use crate::models::profile::UserStyleProfile;
use crate::models::wardrobe::WardrobeItem;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembleRequest {
    pub catalog: Vec<WardrobeItem>,
    /// Falls back to `UserStyleProfile::default()` when absent.
    #[serde(default)]
    pub profile: Option<UserStyleProfile>,
    #[serde(default)]
    pub context: OutfitContext,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssembleResponse {
    pub outfits: Vec<CandidateOutfit>,
    /// Seed actually used; replaying the request with it reproduces `outfits`.
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub catalog: CatalogReport,
}

pub fn load_request(path: &Path) -> Result<AssembleRequest, EngineError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Runs one request end to end with a seeded random source.
pub fn handle_assemble(
    config: &Config,
    request: AssembleRequest,
) -> Result<AssembleResponse, EngineError> {
    let AssembleRequest {
        catalog,
        profile,
        context,
        count,
        seed,
    } = request;

    let profile = profile.unwrap_or_default();
    let count = count.unwrap_or(config.default_count);
    let seed = seed.or(config.seed).unwrap_or_else(rand::random);

    let assembler = OutfitAssembler::new(config.assembly_options());
    let buckets = assembler.partition(&catalog, &profile, &context);
    let report = report_from_buckets(catalog.len(), &buckets, &context);
    info!(
        "Assembling for a catalog of {} items (status {:?}, seed {seed})",
        report.total_items, report.status
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let outfits = assembler.assemble_from_buckets(&buckets, &profile, &context, count, &mut rng)?;

    Ok(AssembleResponse {
        outfits,
        seed,
        generated_at: Utc::now(),
        catalog: report,
    })
}
