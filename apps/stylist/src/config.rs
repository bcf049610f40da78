use anyhow::{bail, Context, Result};

use crate::assembly::filter::FormalityPolicy;
use crate::assembly::orchestrator::{AssemblyOptions, DEFAULT_COUNT, MAX_ATTEMPTS};

/// Engine configuration loaded from environment variables.
/// Every variable is optional; unparsable values fail startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub default_count: usize,
    pub attempts_cap: usize,
    pub formality_policy: FormalityPolicy,
    pub seed: Option<u64>,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_count: DEFAULT_COUNT,
            attempts_cap: MAX_ATTEMPTS,
            formality_policy: FormalityPolicy::Strict,
            seed: None,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let default_count = match lookup("STYLIST_DEFAULT_COUNT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("STYLIST_DEFAULT_COUNT must be a positive integer")?,
            None => defaults.default_count,
        };
        if default_count == 0 {
            bail!("STYLIST_DEFAULT_COUNT must be a positive integer");
        }

        let attempts_cap = match lookup("STYLIST_ATTEMPTS_CAP") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("STYLIST_ATTEMPTS_CAP must be a non-negative integer")?,
            None => defaults.attempts_cap,
        };

        let formality_policy = match lookup("STYLIST_FORMALITY_POLICY") {
            Some(raw) => FormalityPolicy::parse(&raw).with_context(|| {
                format!("STYLIST_FORMALITY_POLICY must be 'strict' or 'tolerant', got '{raw}'")
            })?,
            None => defaults.formality_policy,
        };

        let seed = lookup("STYLIST_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .context("STYLIST_SEED must be an unsigned integer")
            })
            .transpose()?;

        Ok(Config {
            default_count,
            attempts_cap,
            formality_policy,
            seed,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            attempts_cap: self.attempts_cap,
            formality_policy: self.formality_policy,
        }
    }
}
