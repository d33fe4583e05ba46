//! Local flow velocity around a manoeuvring aircraft

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wingmesh_core::rotate_point;

use crate::error::AeroResult;

/// Aerodynamic attitude angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Attitude {
    /// Angle of attack
    pub alpha: f64,
    /// Sideslip
    pub beta: f64,
    /// Bank
    pub gamma: f64,
}

impl Attitude {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    pub fn from_degrees(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self::new(alpha.to_radians(), beta.to_radians(), gamma.to_radians())
    }
}

/// Rigid-body flow field: a uniform stream plus the effect of body rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowField {
    cg_velocity: DVec3,
    rotation_rate: DVec3,
    center: DVec3,
}

impl FlowField {
    /// Uniform flow with no rotation
    pub fn uniform(velocity: DVec3) -> Self {
        Self {
            cg_velocity: velocity,
            rotation_rate: DVec3::ZERO,
            center: DVec3::ZERO,
        }
    }

    /// Flow seen by the aircraft at a flight state
    ///
    /// The stream `(V, 0, 0)` is rotated by −α about Y, then −β about Z,
    /// then −γ about X. `rotation_rate` holds the body rates about X, Y and Z
    /// and `center` is the point the body rotates about.
    pub fn from_flight_state(
        true_airspeed: f64,
        rotation_rate: DVec3,
        attitude: Attitude,
        center: DVec3,
    ) -> AeroResult<Self> {
        let mut cg_velocity = DVec3::new(true_airspeed, 0.0, 0.0);
        cg_velocity = rotate_point(cg_velocity, DVec3::Y, DVec3::ZERO, -attitude.alpha)?;
        cg_velocity = rotate_point(cg_velocity, DVec3::Z, DVec3::ZERO, -attitude.beta)?;
        cg_velocity = rotate_point(cg_velocity, DVec3::X, DVec3::ZERO, -attitude.gamma)?;

        debug!(?cg_velocity, ?rotation_rate, "Flow field from flight state");
        Ok(Self {
            cg_velocity,
            rotation_rate,
            center,
        })
    }

    pub fn cg_velocity(&self) -> DVec3 {
        self.cg_velocity
    }

    pub fn rotation_rate(&self) -> DVec3 {
        self.rotation_rate
    }

    /// Flow velocity at `point`: `v_cg − ω × (point − center)`
    pub fn velocity_at(&self, point: DVec3) -> DVec3 {
        self.cg_velocity - self.rotation_rate.cross(point - self.center)
    }
}
