//! Normalized point distributions over [0, 1]
//!
//! Distributions place chordwise and spanwise mesh lines. A distribution can
//! be forced to contain an exact fraction (a control surface hinge line), in
//! which case the index of the replaced point is reported.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};

/// Point clustering law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscretizationKind {
    /// Uniform spacing
    #[default]
    Linear,
    /// `cos(θ) + 1` with θ swept from π to π/2, refined towards the start
    #[serde(rename = "cos", alias = "cosine")]
    Cosine,
    /// `sin(θ)` with θ swept from 0 to π/2, refined towards the end
    #[serde(rename = "sin", alias = "sine")]
    Sine,
    /// `cos(θ)/2 + 1/2` with θ swept from π to 0, refined towards both ends
    #[serde(rename = "cos_sim", alias = "cosine_symmetric")]
    CosineSymmetric,
}

impl DiscretizationKind {
    /// Name used in configuration files
    pub fn name(&self) -> &'static str {
        match self {
            DiscretizationKind::Linear => "linear",
            DiscretizationKind::Cosine => "cos",
            DiscretizationKind::Sine => "sin",
            DiscretizationKind::CosineSymmetric => "cos_sim",
        }
    }

    fn point(&self, t: f64) -> f64 {
        match self {
            DiscretizationKind::Linear => t,
            DiscretizationKind::Cosine => (PI + (FRAC_PI_2 - PI) * t).cos() + 1.0,
            DiscretizationKind::Sine => (FRAC_PI_2 * t).sin(),
            DiscretizationKind::CosineSymmetric => (PI - PI * t).cos() / 2.0 + 0.5,
        }
    }
}

impl fmt::Display for DiscretizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiscretizationKind {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(DiscretizationKind::Linear),
            "cos" | "cosine" => Ok(DiscretizationKind::Cosine),
            "sin" | "sine" => Ok(DiscretizationKind::Sine),
            "cos_sim" | "cosine_symmetric" => Ok(DiscretizationKind::CosineSymmetric),
            _ => Err(GeometryError::UnknownDiscretization(s.to_string())),
        }
    }
}

/// Ordered fractions in [0, 1] with an optional forced point
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub points: Vec<f64>,
    /// Index of the point replaced by the forced fraction
    pub forced_index: Option<usize>,
}

impl Distribution {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Replace the interior point closest to `value`
    ///
    /// Both endpoints are kept, so `value` must lie inside (0, 1) to keep the
    /// points ordered. Returns `None` when there is no interior point.
    pub fn force_interior(&mut self, value: f64) -> Option<usize> {
        let n = self.points.len();
        if n < 3 {
            return None;
        }
        let index = 1 + closest_index(&self.points[1..n - 1], value);
        self.points[index] = value;
        self.forced_index = Some(index);
        Some(index)
    }
}

/// Generate `n_points` fractions following `kind`
///
/// When `forced_fraction` is given, the point closest to it (first one on
/// ties) is replaced by the exact value and its index is reported.
pub fn distribute(
    kind: DiscretizationKind,
    n_points: usize,
    forced_fraction: Option<f64>,
) -> GeometryResult<Distribution> {
    if n_points < 2 {
        return Err(GeometryError::TooFewPoints(n_points));
    }

    let last = (n_points - 1) as f64;
    let mut points: Vec<f64> = (0..n_points).map(|i| kind.point(i as f64 / last)).collect();

    // Endpoints are exact regardless of trigonometric round-off
    points[0] = 0.0;
    points[n_points - 1] = 1.0;

    let forced_index = forced_fraction.map(|value| {
        let index = closest_index(&points, value);
        points[index] = value;
        index
    });

    Ok(Distribution {
        points,
        forced_index,
    })
}

/// Index of the entry closest to `value`, the first one on ties
fn closest_index(points: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, point) in points.iter().enumerate() {
        let distance = (point - value).abs();
        if distance < best_distance {
            best = i;
            best_distance = distance;
        }
    }
    best
}
