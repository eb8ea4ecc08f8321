//! Lab configuration

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use pf_core::PfResult;

/// Default ceiling on repetitions per request
pub const DEFAULT_MAX_REPETITIONS: u32 = 100;

/// Configuration for selection and success runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    /// Maximum repetitions accepted by repeated selection and fixed-count
    /// success estimation
    pub max_repetitions: u32,

    /// Random seed for reproducibility (None = seeded from the OS)
    pub seed: Option<u64>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            max_repetitions: DEFAULT_MAX_REPETITIONS,
            seed: None,
        }
    }
}

impl LabConfig {
    /// Reproducible config for tests and regression runs
    pub fn deterministic(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// OS-seeded config with the standard repetition ceiling
    pub fn production() -> Self {
        Self::default()
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set repetition ceiling
    pub fn with_max_repetitions(mut self, max: u32) -> Self {
        self.max_repetitions = max;
        self
    }

    /// Create the generator for one top-level operation.
    ///
    /// Call once per request and pass the generator down by `&mut`; nested
    /// selections must never build their own.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> PfResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> PfResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> PfResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
