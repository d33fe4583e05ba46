//! Aerodynamic grid generation for a single surface

use glam::DVec3;
use tracing::{debug, warn};

use super::{Surface, TwistFunction};
use crate::constants::{DEFAULT_TORSION_CENTER, MIN_CHORD_PANELS_WITH_HINGE};
use crate::discretization::{DiscretizationKind, distribute};
use crate::error::GeometryResult;
use crate::grid::{Grid, MirrorPlane};
use crate::transform::rotate_points;

/// Settings for [`Surface::generate_aero_grid`]
#[derive(Debug, Clone)]
pub struct AeroGridOptions {
    pub n_span_panels: usize,
    /// Raised to 2 when the surface has a control surface hinge
    pub n_chord_panels: usize,
    /// Control surface deflection in radians
    pub control_surface_deflection: f64,
    pub chord_discretization: DiscretizationKind,
    pub span_discretization: DiscretizationKind,
    pub apply_twist: bool,
    /// Twist law, the surface's linear law when `None`
    pub twist_function: Option<TwistFunction>,
    /// Chord fraction sections are twisted around
    pub torsion_center: f64,
    /// Put the tip on the negative Y side
    pub mirror: bool,
}

impl Default for AeroGridOptions {
    fn default() -> Self {
        Self {
            n_span_panels: 10,
            n_chord_panels: 4,
            control_surface_deflection: 0.0,
            chord_discretization: DiscretizationKind::Linear,
            span_discretization: DiscretizationKind::Linear,
            apply_twist: true,
            twist_function: None,
            torsion_center: DEFAULT_TORSION_CENTER,
            mirror: false,
        }
    }
}

impl Surface {
    /// Build the panel corner grid of this surface
    ///
    /// The planar grid is deflected aft of the hinge, rotated by the
    /// dihedral about the root chord, twisted section by section and finally
    /// mirrored about the XZ plane when requested.
    pub fn generate_aero_grid(&self, options: &AeroGridOptions) -> GeometryResult<Grid> {
        self.check_torsion_center(options.torsion_center)?;

        let mut n_chord_panels = options.n_chord_panels;
        if self.hinge_position.is_some() && n_chord_panels < MIN_CHORD_PANELS_WITH_HINGE {
            warn!(
                surface = %self.identifier,
                requested = n_chord_panels,
                "Too few chord panels for a control surface, using {MIN_CHORD_PANELS_WITH_HINGE}"
            );
            n_chord_panels = MIN_CHORD_PANELS_WITH_HINGE;
        }

        let mut chord = distribute(
            options.chord_discretization,
            n_chord_panels + 1,
            self.hinge_position,
        )?;
        if let Some(hinge) = self.hinge_position {
            if chord
                .forced_index
                .is_some_and(|index| index == 0 || index + 1 == chord.len())
            {
                // Keep both chord ends and move the closest interior line
                chord = distribute(options.chord_discretization, n_chord_panels + 1, None)?;
                let hinge_index = chord.force_interior(hinge);
                warn!(
                    surface = %self.identifier,
                    hinge,
                    ?hinge_index,
                    "Control surface hinge was closest to a chord end, moved an interior line onto it"
                );
            }
        }
        let span = distribute(options.span_discretization, options.n_span_panels + 1, None)?;

        let tip_x = self.tip_leading_edge_x();
        let mut grid = Grid::from_fn(chord.len(), span.len(), |i, j| {
            let root = chord.points[i] * self.root_chord;
            let tip = chord.points[i] * self.tip_chord + tip_x;
            let t = span.points[j];
            DVec3::new(root + (tip - root) * t, t * self.length, 0.0)
        });

        if let Some(hinge_index) = chord.forced_index {
            grid = self.deflect_control_surface(
                &grid,
                hinge_index,
                chord.points[hinge_index],
                options.control_surface_deflection,
            )?;
        }

        grid = grid.rotate(DVec3::X, DVec3::ZERO, self.dihedral)?;

        if options.apply_twist {
            let twist = options
                .twist_function
                .clone()
                .unwrap_or_else(|| self.default_twist());
            grid = self.apply_twist_to_grid(&grid, options.torsion_center, &twist)?;
        }

        if options.mirror {
            grid = grid.mirror(MirrorPlane::XZ);
        }

        debug!(
            surface = %self.identifier,
            n_chord = grid.n_chord_points(),
            n_span = grid.n_span_points(),
            "Generated aero grid"
        );
        Ok(grid)
    }

    /// Rotate the rows aft of `hinge_index` about the hinge line
    ///
    /// The hinge line joins the hinge points of the planar root and tip
    /// chords, so this must run before the dihedral rotation.
    fn deflect_control_surface(
        &self,
        grid: &Grid,
        hinge_index: usize,
        hinge_fraction: f64,
        deflection: f64,
    ) -> GeometryResult<Grid> {
        let first_aft_row = hinge_index + 1;
        if first_aft_row >= grid.n_chord_points() {
            return Ok(grid.clone());
        }

        let root_hinge_x = hinge_fraction * self.root_chord;
        let tip_hinge_x = hinge_fraction * self.tip_chord + self.tip_leading_edge_x();
        let hinge_axis = DVec3::new(tip_hinge_x - root_hinge_x, self.length, 0.0);
        let hinge_point = DVec3::new(root_hinge_x, 0.0, 0.0);

        let aft = grid
            .rows_from(first_aft_row)?
            .rotate(hinge_axis, hinge_point, deflection)?;

        let mut deflected = grid.clone();
        deflected.splice_rows(first_aft_row, &aft)?;
        Ok(deflected)
    }

    /// Twist every span column of an untranslated grid about the Y axis
    ///
    /// Each column is rotated by the twist angle at its span position around
    /// the point at `torsion_center` of the local chord, measured from the
    /// column's leading edge along its first chordwise segment.
    pub fn apply_twist_to_grid(
        &self,
        grid: &Grid,
        torsion_center: f64,
        twist: &TwistFunction,
    ) -> GeometryResult<Grid> {
        let mut twisted = grid.clone();
        for j in 0..grid.n_span_points() {
            let column = grid.column(j);
            let Some(&leading_edge) = column.first() else {
                break;
            };
            let position = self.span_position(leading_edge.y, leading_edge.z);
            let chord_direction = column
                .get(1)
                .map(|&next| (next - leading_edge).normalize_or_zero())
                .unwrap_or(DVec3::X);
            let center =
                leading_edge + chord_direction * torsion_center * self.local_chord(position);

            let rotated = rotate_points(&column, DVec3::Y, center, twist.angle(position))?;
            twisted.set_column(j, &rotated)?;
        }
        Ok(twisted)
    }
}
