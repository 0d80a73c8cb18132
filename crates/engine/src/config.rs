use std::path::Path;

use liftlog_core::{DEFAULT_REP_MAX, DEFAULT_REP_MIN, EmptyWeightPolicy, RepRange};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const DEFAULT_PLANNED_SETS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// What a committed set on an equipment exercise stores when the weight
    /// field is blank.
    pub empty_weight: EmptyWeightPolicy,
    pub default_rep_min: u32,
    pub default_rep_max: u32,
    /// Planned sets for routine entries added without an explicit count.
    pub default_planned_sets: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            empty_weight: EmptyWeightPolicy::Zero,
            default_rep_min: DEFAULT_REP_MIN,
            default_rep_max: DEFAULT_REP_MAX,
            default_planned_sets: DEFAULT_PLANNED_SETS,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| EngineError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("failed to read {}: {e}", path.display())))?;
        log::debug!("loaded engine config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    pub fn default_rep_range(&self) -> Result<RepRange, EngineError> {
        RepRange::new(self.default_rep_min, self.default_rep_max)
            .map_err(|e| EngineError::Config(e.to_string()))
    }

    fn validate(&self) -> Result<(), EngineError> {
        self.default_rep_range()?;
        liftlog_core::PlannedSets::new(i64::from(self.default_planned_sets))
            .map_err(|e| EngineError::Config(format!("default_planned_sets: {e}")))?;
        Ok(())
    }
}
