//! Tunable parameters for subsector generation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubsectorError};
use crate::generator::DEFAULT_GAS_GIANT_THRESHOLD;
use crate::grid::Topology;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubsectorConfig {
    /// A cell holds a system when 1d6 >= this value (default: 4, half the cells).
    /// 7 leaves the map empty.
    pub occupancy_threshold: i32,

    /// A system has a gas giant when 1d6 <= this value (default: 9, always).
    pub gas_giant_threshold: i32,

    /// Distance metric used for routes.
    pub topology: Topology,

    /// File named by the trailing include directive.
    pub include: String,
}

impl Default for SubsectorConfig {
    fn default() -> Self {
        Self {
            occupancy_threshold: 4,
            gas_giant_threshold: DEFAULT_GAS_GIANT_THRESHOLD,
            topology: Topology::Square,
            include: "traveller.txt".to_string(),
        }
    }
}

impl SubsectorConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| SubsectorError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=7).contains(&self.occupancy_threshold) {
            return Err(SubsectorError::Config(format!(
                "occupancy_threshold must be 1-7, got {}",
                self.occupancy_threshold
            )));
        }
        if !(0..=12).contains(&self.gas_giant_threshold) {
            return Err(SubsectorError::Config(format!(
                "gas_giant_threshold must be 0-12, got {}",
                self.gas_giant_threshold
            )));
        }
        if self.include.trim().is_empty() {
            return Err(SubsectorError::Config("include must name a file".to_string()));
        }
        Ok(())
    }
}
