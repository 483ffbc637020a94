//! Tunable business bounds for exam composition.
//!
//! The grade lookup table and the juz bounds are fixed rules and live in
//! scope.rs. Everything here has a default matching current policy and can
//! be overridden from a JSON file.

use serde::{Deserialize, Serialize};

use crate::types::Year;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeLimits {
    pub year_min:      Year,
    pub year_max:      Year,
    pub questions_min: u32,
    pub questions_max: u32,
    pub duration_min:  u32,
    pub duration_max:  u32,
}

impl Default for ScopeLimits {
    fn default() -> Self {
        Self {
            year_min:      1385,
            year_max:      1404,
            questions_min: 5,
            questions_max: 150,
            duration_min:  5,
            duration_max:  180,
        }
    }
}

/// Per-juz targets for the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuzQuota {
    pub memorization: usize,
    pub concepts:     usize,
}

/// An inclusive year band and the quota that applies to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaBand {
    pub year_from: Year,
    pub year_to:   Year,
    pub quota:     JuzQuota,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Checked in order; first matching band wins.
    pub bands: Vec<QuotaBand>,
    /// Used without a year filter, or for a year no band covers.
    pub default_quota: JuzQuota,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            bands: vec![
                QuotaBand {
                    year_from: 1402,
                    year_to:   1404,
                    quota:     JuzQuota { memorization: 2, concepts: 3 },
                },
                QuotaBand {
                    year_from: 1385,
                    year_to:   1401,
                    quota:     JuzQuota { memorization: 1, concepts: 4 },
                },
            ],
            default_quota: JuzQuota { memorization: 2, concepts: 3 },
        }
    }
}

impl QuotaConfig {
    pub fn quota_for_year(&self, year: Option<Year>) -> JuzQuota {
        let Some(year) = year else {
            return self.default_quota;
        };
        self.bands
            .iter()
            .find(|b| (b.year_from..=b.year_to).contains(&year))
            .map(|b| b.quota)
            .unwrap_or(self.default_quota)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComposerConfig {
    #[serde(default)]
    pub limits: ScopeLimits,
    #[serde(default)]
    pub quota: QuotaConfig,
}

impl ComposerConfig {
    /// Load overrides from a JSON file. Missing sections keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ComposerConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        anyhow::ensure!(
            config.limits.year_min <= config.limits.year_max,
            "{path}: year_min must not exceed year_max"
        );
        anyhow::ensure!(
            config.limits.questions_min <= config.limits.questions_max
                && config.limits.duration_min <= config.limits.duration_max,
            "{path}: min bounds must not exceed max bounds"
        );
        Ok(config)
    }
}
