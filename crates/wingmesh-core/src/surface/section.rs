//! Structural section properties

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TORSION_CENTER;

/// Beam section carried at a surface root or tip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub identifier: String,
    /// Cross-section area [m²]
    pub area: f64,
    /// Second moment of area about the local y axis [m⁴]
    pub iyy: f64,
    /// Second moment of area about the local z axis [m⁴]
    pub izz: f64,
    /// Torsion constant [m⁴]
    pub j: f64,
    /// Shear centre as a fraction of the chord, from the leading edge
    pub shear_center: f64,
}

impl Section {
    pub fn new(
        identifier: impl Into<String>,
        area: f64,
        iyy: f64,
        izz: f64,
        j: f64,
        shear_center: f64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            area,
            iyy,
            izz,
            j,
            shear_center,
        }
    }

    /// Section without stiffness data, only a shear centre position
    pub fn with_shear_center(shear_center: f64) -> Self {
        Self {
            shear_center,
            ..Self::default()
        }
    }
}

impl Default for Section {
    fn default() -> Self {
        Self::new("section", 0.0, 0.0, 0.0, 0.0, DEFAULT_TORSION_CENTER)
    }
}
