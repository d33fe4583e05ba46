//! Kernel configuration

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CORE_RADIUS, SEA_LEVEL_DENSITY};
use crate::error::{AeroError, AeroResult};
use crate::horseshoe::HorseshoeVortex;

/// Parameters shared by every kernel evaluation of a solve
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KernelConfig {
    /// Vortex core radius [m]
    pub core_radius: f64,
    /// Air density [kg/m³]
    pub air_density: f64,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            core_radius: DEFAULT_CORE_RADIUS,
            air_density: SEA_LEVEL_DENSITY,
        }
    }
}

impl KernelConfig {
    /// Parse and validate a RON document
    pub fn from_ron_str(source: &str) -> AeroResult<Self> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AeroResult<()> {
        if !(self.core_radius >= 0.0 && self.core_radius.is_finite()) {
            return Err(AeroError::InvalidParameter(format!(
                "core radius must be finite and non-negative, got {}",
                self.core_radius
            )));
        }
        if !(self.air_density > 0.0 && self.air_density.is_finite()) {
            return Err(AeroError::InvalidParameter(format!(
                "air density must be positive, got {}",
                self.air_density
            )));
        }
        Ok(())
    }

    pub fn induced_velocity(
        &self,
        vortex: &HorseshoeVortex,
        point: DVec3,
        circulation: f64,
    ) -> DVec3 {
        vortex.induced_velocity(point, circulation, self.core_radius)
    }

    pub fn force(&self, vortex: &HorseshoeVortex, circulation: f64, flow_velocity: DVec3) -> DVec3 {
        vortex.force(circulation, flow_velocity, self.air_density)
    }
}
