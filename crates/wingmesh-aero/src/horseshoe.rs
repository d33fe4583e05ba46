//! Horseshoe vortex kernels
//!
//! A horseshoe is a bound segment A→B plus two semi-infinite legs trailing
//! from A and B along +X. Velocities follow the Biot-Savart law in the
//! two-point form given by Drela, Flight Vehicle Aerodynamics. A leg closer
//! than the core radius to the field point induces nothing.
//!
//! These functions run inside the influence-coefficient loops, so they
//! neither allocate nor log.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use wingmesh_core::{Grid, Panel, distance_point_to_line};

/// Velocity induced at `point` by the bound segment `a`→`b`
pub fn bound_segment_velocity(
    a: DVec3,
    b: DVec3,
    point: DVec3,
    circulation: f64,
    core_radius: f64,
) -> DVec3 {
    match distance_point_to_line(a, b, point) {
        Some(distance) if distance > core_radius => {}
        _ => return DVec3::ZERO,
    }

    let ra = point - a;
    let rb = point - b;
    let (na, nb) = (ra.length(), rb.length());

    circulation / (4.0 * PI) * ra.cross(rb) / (na * nb + ra.dot(rb)) * (1.0 / na + 1.0 / nb)
}

/// Velocity induced at `point` by a leg from `start` to infinity along +X
pub fn trailing_leg_velocity(start: DVec3, point: DVec3, circulation: f64, core_radius: f64) -> DVec3 {
    let r = point - start;
    let cross = r.cross(DVec3::X);
    // |r × X| is the distance to the leg's line
    if cross.length() <= core_radius {
        return DVec3::ZERO;
    }

    let nr = r.length();
    circulation / (4.0 * PI) * cross / (nr - r.x) / nr
}

/// Velocity induced at `point` by the horseshoe on `a`→`b`
pub fn induced_velocity(
    a: DVec3,
    b: DVec3,
    point: DVec3,
    circulation: f64,
    core_radius: f64,
) -> DVec3 {
    bound_segment_velocity(a, b, point, circulation, core_radius)
        + trailing_leg_velocity(a, point, circulation, core_radius)
        - trailing_leg_velocity(b, point, circulation, core_radius)
}

/// Kutta-Joukowski force `ρ·(V × (B − A))·Γ` on the bound segment
pub fn force(a: DVec3, b: DVec3, circulation: f64, flow_velocity: DVec3, density: f64) -> DVec3 {
    density * flow_velocity.cross(b - a) * circulation
}

/// Bound segment of a horseshoe filament
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorseshoeVortex {
    pub a: DVec3,
    pub b: DVec3,
}

impl HorseshoeVortex {
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self { a, b }
    }

    /// Horseshoe bound on the quarter-chord line of a panel
    pub fn from_panel(panel: &Panel) -> Self {
        Self::new(panel.l_chord_1_4, panel.r_chord_1_4)
    }

    /// One horseshoe per panel of `grid`, chordwise-major
    pub fn from_grid(grid: &Grid) -> Vec<Vec<Self>> {
        grid.panels()
            .iter()
            .map(|row| row.iter().map(Self::from_panel).collect())
            .collect()
    }

    /// Vector from A to B
    pub fn bound_vector(&self) -> DVec3 {
        self.b - self.a
    }

    pub fn induced_velocity(&self, point: DVec3, circulation: f64, core_radius: f64) -> DVec3 {
        induced_velocity(self.a, self.b, point, circulation, core_radius)
    }

    pub fn force(&self, circulation: f64, flow_velocity: DVec3, density: f64) -> DVec3 {
        force(self.a, self.b, circulation, flow_velocity, density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_CORE_RADIUS, SEA_LEVEL_DENSITY};
    use approx::assert_relative_eq;

    #[test]
    fn test_force() {
        let f = force(
            DVec3::ZERO,
            DVec3::Y,
            5.0,
            DVec3::new(10.0, 0.0, 0.0),
            SEA_LEVEL_DENSITY,
        );
        assert!(f.abs_diff_eq(DVec3::new(0.0, 0.0, 61.25), 1e-12), "got {f:?}");
    }

    #[test]
    fn test_far_field_decays_as_line_vortex() {
        let a = DVec3::new(0.0, -1000.0, 0.0);
        let b = DVec3::new(0.0, 1000.0, 0.0);
        let circulation = 3.0;

        let near = induced_velocity(a, b, DVec3::new(0.0, 0.0, 1.0), circulation, DEFAULT_CORE_RADIUS);
        let far = induced_velocity(a, b, DVec3::new(0.0, 0.0, 2.0), circulation, DEFAULT_CORE_RADIUS);

        assert_relative_eq!(near.length(), circulation / (2.0 * PI), max_relative = 0.01);
        assert_relative_eq!(far.length(), circulation / (4.0 * PI), max_relative = 0.01);
        assert_relative_eq!(near.length() / far.length(), 2.0, max_relative = 0.01);
    }

    #[test]
    fn test_bound_segment_inside_core() {
        let a = DVec3::ZERO;
        let b = DVec3::Y;
        let point = DVec3::new(0.0, 0.5, 0.5 * DEFAULT_CORE_RADIUS);

        let bound = bound_segment_velocity(a, b, point, 1.0, DEFAULT_CORE_RADIUS);
        assert_eq!(bound, DVec3::ZERO);

        // Only the trailing legs contribute
        let total = induced_velocity(a, b, point, 1.0, DEFAULT_CORE_RADIUS);
        let legs = trailing_leg_velocity(a, point, 1.0, DEFAULT_CORE_RADIUS)
            - trailing_leg_velocity(b, point, 1.0, DEFAULT_CORE_RADIUS);
        assert_eq!(total, legs);
        assert!(total.is_finite());
    }

    #[test]
    fn test_points_on_filaments_are_finite() {
        let a = DVec3::ZERO;
        let b = DVec3::Y;
        for point in [a, b, DVec3::new(0.0, 0.5, 0.0), DVec3::new(5.0, 0.0, 0.0)] {
            let v = induced_velocity(a, b, point, 1.0, 0.0);
            assert!(v.is_finite(), "{point:?} gives {v:?}");
        }
        // Straight downstream of A, on the trailing leg itself
        let on_leg = trailing_leg_velocity(a, DVec3::new(3.0, 0.0, 0.0), 1.0, DEFAULT_CORE_RADIUS);
        assert_eq!(on_leg, DVec3::ZERO);
        // Degenerate bound segment
        assert_eq!(bound_segment_velocity(a, a, DVec3::ONE, 1.0, 0.0), DVec3::ZERO);
    }

    #[test]
    fn test_downwash_behind_horseshoe() {
        let vortex = HorseshoeVortex::new(DVec3::new(0.0, -1.0, 0.0), DVec3::new(0.0, 1.0, 0.0));
        let v = vortex.induced_velocity(DVec3::new(1.0, 0.0, 0.0), 2.0, DEFAULT_CORE_RADIUS);
        assert!(v.z < 0.0, "expected downwash, got {v:?}");
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-12);

        // Linear in circulation
        let doubled = vortex.induced_velocity(DVec3::new(1.0, 0.0, 0.0), 4.0, DEFAULT_CORE_RADIUS);
        assert!(doubled.abs_diff_eq(v * 2.0, 1e-12));
    }

    #[test]
    fn test_panel_horseshoe() {
        let grid = Grid::from_fn(3, 3, |i, j| DVec3::new(i as f64 * 0.5, j as f64, 0.0));
        let vortices = HorseshoeVortex::from_grid(&grid);
        assert_eq!(vortices.len(), 2);
        assert_eq!(vortices[0].len(), 2);

        let first = vortices[0][0];
        assert!(first.a.abs_diff_eq(DVec3::new(0.125, 0.0, 0.0), 1e-12));
        assert!(first.b.abs_diff_eq(DVec3::new(0.125, 1.0, 0.0), 1e-12));
        assert!(first.bound_vector().abs_diff_eq(DVec3::Y, 1e-12));

        let panel = Panel::from_grid(&grid, 0, 0);
        let v = first.induced_velocity(panel.collocation_point, 1.0, DEFAULT_CORE_RADIUS);
        assert!(v.dot(panel.normal) < 0.0);
    }
}
