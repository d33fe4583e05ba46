//! Aerodynamic panels and their derived geometry

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// One grid quad with its vortex-lattice reference points
///
/// Corner naming follows the grid cell `(i, j)`:
/// `B = (i, j)` and `C = (i, j+1)` on the leading edge,
/// `A = (i+1, j)` and `D = (i+1, j+1)` on the trailing edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub a: DVec3,
    pub b: DVec3,
    pub c: DVec3,
    pub d: DVec3,
    /// Quarter-chord point of the inboard (B→A) edge
    pub l_chord_1_4: DVec3,
    /// Three-quarter-chord point of the inboard edge
    pub l_chord_3_4: DVec3,
    /// Quarter-chord point of the outboard (C→D) edge
    pub r_chord_1_4: DVec3,
    /// Three-quarter-chord point of the outboard edge
    pub r_chord_3_4: DVec3,
    /// Leading edge midpoint
    pub l_edge_1_2: DVec3,
    /// Trailing edge midpoint
    pub t_edge_1_2: DVec3,
    /// Collocation point at 3/4 chord
    pub collocation_point: DVec3,
    /// Bound vortex point at 1/4 chord
    pub aero_center: DVec3,
    /// Unit normal, zero for degenerate panels
    pub normal: DVec3,
    pub area: f64,
    /// Leading edge projected on the global Y axis
    pub span: f64,
}

impl Panel {
    pub fn new(a: DVec3, b: DVec3, c: DVec3, d: DVec3) -> Self {
        let ac = c - a;
        let bd = d - b;

        let l_chord = a - b;
        let r_chord = d - c;
        let l_edge = c - b;
        let t_edge = d - a;

        let l_edge_1_2 = b + 0.5 * l_edge;
        let t_edge_1_2 = a + 0.5 * t_edge;
        let mid_chord = t_edge_1_2 - l_edge_1_2;

        let diagonal_cross = bd.cross(ac);
        let normal = diagonal_cross.normalize_or_zero();

        Self {
            a,
            b,
            c,
            d,
            l_chord_1_4: b + 0.25 * l_chord,
            l_chord_3_4: b + 0.75 * l_chord,
            r_chord_1_4: c + 0.25 * r_chord,
            r_chord_3_4: c + 0.75 * r_chord,
            l_edge_1_2,
            t_edge_1_2,
            collocation_point: l_edge_1_2 + 0.75 * mid_chord,
            aero_center: l_edge_1_2 + 0.25 * mid_chord,
            normal,
            area: normal.dot(diagonal_cross) / 2.0,
            span: l_edge.dot(DVec3::Y),
        }
    }

    /// Build the panel of grid cell `(i, j)`
    pub fn from_grid(grid: &Grid, i: usize, j: usize) -> Self {
        Self::new(
            grid.get(i + 1, j),
            grid.get(i, j),
            grid.get(i, j + 1),
            grid.get(i + 1, j + 1),
        )
    }

    /// Zero-area panels have no defined normal
    pub fn is_degenerate(&self) -> bool {
        self.normal == DVec3::ZERO
    }
}

impl Grid {
    /// Every panel of the grid, chordwise-major (`[i][j]`)
    pub fn panels(&self) -> Vec<Vec<Panel>> {
        let (n_chord, n_span) = self.shape();
        (0..n_chord.saturating_sub(1))
            .map(|i| {
                (0..n_span.saturating_sub(1))
                    .map(|j| Panel::from_grid(self, i, j))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Panel {
        // x chordwise, y spanwise
        Panel::new(
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_square_panel_geometry() {
        let panel = unit_square();
        assert!(panel.normal.abs_diff_eq(DVec3::Z, 1e-12), "normal {:?}", panel.normal);
        assert_relative_eq!(panel.area, 1.0, epsilon = 1e-12);
        assert_relative_eq!(panel.span, 1.0, epsilon = 1e-12);
        assert!(panel.collocation_point.abs_diff_eq(DVec3::new(0.75, 0.5, 0.0), 1e-12));
        assert!(panel.aero_center.abs_diff_eq(DVec3::new(0.25, 0.5, 0.0), 1e-12));
        assert!(panel.l_chord_1_4.abs_diff_eq(DVec3::new(0.25, 0.0, 0.0), 1e-12));
        assert!(panel.r_chord_1_4.abs_diff_eq(DVec3::new(0.25, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_degenerate_panel() {
        let p = DVec3::new(0.3, 0.2, 0.1);
        let panel = Panel::new(p, p, p, p);
        assert!(panel.is_degenerate());
        assert_eq!(panel.area, 0.0);
        assert!(!unit_square().is_degenerate());
    }

    #[test]
    fn test_grid_panels() {
        let grid = Grid::from_fn(3, 4, |i, j| DVec3::new(i as f64 * 0.5, j as f64 * 2.0, 0.0));
        let panels = grid.panels();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].len(), 3);

        let total: f64 = panels.iter().flatten().map(|p| p.area).sum();
        assert_relative_eq!(total, 1.0 * 6.0, epsilon = 1e-12);
        assert_eq!(panels[1][2].c, grid.get(1, 3));
    }
}
