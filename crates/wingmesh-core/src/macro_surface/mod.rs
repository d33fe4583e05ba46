//! Multi-segment lifting surfaces
//!
//! A [`MacroSurface`] chains surfaces root to tip from a root position and
//! incidence. With an XZ symmetry plane the first half of the surface list
//! is the mirrored left side, ordered from the left tip inwards.

mod numbering;

pub use numbering::*;

use std::collections::HashMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::discretization::DiscretizationKind;
use crate::error::{GeometryError, GeometryResult};
use crate::grid::{Grid, MirrorPlane};
use crate::node::OrientedNode;
use crate::surface::{AeroGridOptions, StructureNodeOptions, Surface, TwistFunction};

/// Discretization of every surface of a macro-surface
///
/// Per-surface lists follow the surface list order.
#[derive(Debug, Clone)]
pub struct MacroMeshOptions {
    /// Shared by all surfaces so chordwise lines stay continuous
    pub n_chord_panels: usize,
    pub chord_discretization: DiscretizationKind,
    pub n_span_panels: Vec<usize>,
    pub span_discretization: Vec<DiscretizationKind>,
    pub n_beam_elements: Vec<usize>,
    /// Local twist law per surface, the surface's linear law when `None`
    pub twist_functions: Vec<Option<TwistFunction>>,
    /// Control surface deflections in degrees, keyed by surface identifier
    pub control_surface_deflections: HashMap<String, f64>,
}

impl MacroMeshOptions {
    /// Same discretization for `n_surfaces` surfaces
    pub fn uniform(
        n_surfaces: usize,
        n_chord_panels: usize,
        n_span_panels: usize,
        n_beam_elements: usize,
    ) -> Self {
        Self {
            n_chord_panels,
            chord_discretization: DiscretizationKind::Linear,
            n_span_panels: vec![n_span_panels; n_surfaces],
            span_discretization: vec![DiscretizationKind::Linear; n_surfaces],
            n_beam_elements: vec![n_beam_elements; n_surfaces],
            twist_functions: vec![None; n_surfaces],
            control_surface_deflections: HashMap::new(),
        }
    }

    /// Deflect the control surface of `identifier` by `degrees`
    pub fn with_deflection(mut self, identifier: impl Into<String>, degrees: f64) -> Self {
        self.control_surface_deflections
            .insert(identifier.into(), degrees);
        self
    }

    fn check_lengths(&self, n_surfaces: usize) -> GeometryResult<()> {
        let lengths = [
            ("n_span_panels", self.n_span_panels.len()),
            ("span_discretization", self.span_discretization.len()),
            ("n_beam_elements", self.n_beam_elements.len()),
            ("twist_functions", self.twist_functions.len()),
        ];
        for (what, actual) in lengths {
            if actual != n_surfaces {
                return Err(GeometryError::ListLengthMismatch {
                    what,
                    expected: n_surfaces,
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Grids and node chains of every surface, in surface order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSurfaceMesh {
    pub grids: Vec<Grid>,
    pub nodes: Vec<Vec<OrientedNode>>,
}

impl MacroSurfaceMesh {
    /// One grid spanning all surfaces, shared columns emitted once
    pub fn single_grid(&self, tolerance: f64) -> GeometryResult<Grid> {
        Grid::concat_span(&self.grids, tolerance)
    }

    /// Number the node chains, see [`number_nodes`]
    pub fn number_nodes(&mut self, first_number: usize, tolerance: f64) -> usize {
        number_nodes(&mut self.nodes, first_number, tolerance)
    }

    /// Duplicate-free node list ordered by node number
    pub fn structure_nodes(&self) -> GeometryResult<Vec<OrientedNode>> {
        structure_node_vector(&self.nodes)
    }
}

/// A wing, stabilizer or fin built from one or more surfaces
#[derive(Debug, Clone)]
pub struct MacroSurface {
    position: DVec3,
    incidence: f64,
    surfaces: Vec<Surface>,
    symmetry_plane: Option<MirrorPlane>,
    torsion_center: f64,
    control_surfaces: Vec<String>,
    root_nodes: Vec<OrientedNode>,
    tip_nodes: Vec<OrientedNode>,
}

impl MacroSurface {
    /// Assemble a macro-surface
    ///
    /// `position` is the root leading edge and `incidence` the root section
    /// angle in radians. Surfaces are ordered from left to right.
    pub fn new(
        position: DVec3,
        incidence: f64,
        surfaces: Vec<Surface>,
        symmetry_plane: Option<MirrorPlane>,
        torsion_center: f64,
    ) -> GeometryResult<Self> {
        if surfaces.is_empty() {
            return Err(GeometryError::InvalidSurface(
                "a macro-surface needs at least one surface".to_string(),
            ));
        }
        match symmetry_plane {
            None => {}
            Some(MirrorPlane::XZ) if surfaces.len() % 2 == 0 => {}
            Some(MirrorPlane::XZ) => {
                return Err(GeometryError::OddSymmetricSurfaceCount(surfaces.len()));
            }
            Some(plane) => {
                return Err(GeometryError::UnsupportedSymmetryPlane(plane.to_string()));
            }
        }
        if !(0.0..=1.0).contains(&torsion_center) {
            return Err(GeometryError::InvalidSurface(format!(
                "torsion centre must be inside [0, 1], got {torsion_center}"
            )));
        }

        let control_surfaces = surfaces
            .iter()
            .filter(|s| s.has_control_surface())
            .map(|s| s.identifier().to_string())
            .collect();

        let mut macro_surface = Self {
            position,
            incidence,
            surfaces,
            symmetry_plane,
            torsion_center,
            control_surfaces,
            root_nodes: Vec::new(),
            tip_nodes: Vec::new(),
        };

        // Coarse build, only the chain ends are kept
        let coarse = MacroMeshOptions::uniform(macro_surface.surfaces.len(), 3, 1, 1);
        let mesh = macro_surface.create_grids(&coarse)?;
        for chain in &mesh.nodes {
            if let (Some(root), Some(tip)) = (chain.first(), chain.last()) {
                macro_surface.root_nodes.push(*root);
                macro_surface.tip_nodes.push(*tip);
            }
        }

        Ok(macro_surface)
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn incidence(&self) -> f64 {
        self.incidence
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn symmetry_plane(&self) -> Option<MirrorPlane> {
        self.symmetry_plane
    }

    pub fn is_symmetric(&self) -> bool {
        self.symmetry_plane.is_some()
    }

    pub fn torsion_center(&self) -> f64 {
        self.torsion_center
    }

    /// Identifiers of the surfaces carrying a control surface
    pub fn control_surfaces(&self) -> &[String] {
        &self.control_surfaces
    }

    pub fn ref_area(&self) -> f64 {
        self.surfaces.iter().map(Surface::ref_area).sum()
    }

    pub fn true_area(&self) -> f64 {
        self.surfaces.iter().map(Surface::true_area).sum()
    }

    /// Root chord of the first surface
    pub fn mean_aero_chord(&self) -> f64 {
        self.surfaces[0].root_chord()
    }

    /// Root node of each surface, in place
    pub fn root_nodes(&self) -> &[OrientedNode] {
        &self.root_nodes
    }

    /// Tip node of each surface, in place
    pub fn tip_nodes(&self) -> &[OrientedNode] {
        &self.tip_nodes
    }

    /// Index of the first right-hand surface
    fn middle_index(&self) -> usize {
        if self.is_symmetric() {
            self.surfaces.len() / 2
        } else {
            0
        }
    }

    /// Root position and root incidence of every surface
    ///
    /// Offsets accumulate along the right side only, the left side is its
    /// reflection about the macro-surface root.
    fn placements(&self) -> Vec<(DVec3, f64)> {
        let right_side = &self.surfaces[self.middle_index()..];
        let mut placements = vec![(self.position, self.incidence)];
        for surface in right_side.iter().take(right_side.len().saturating_sub(1)) {
            let (position, incidence) = placements[placements.len() - 1];
            placements.push((
                position + surface.tip_leading_edge(),
                incidence + surface.tip_twist(),
            ));
        }

        if self.is_symmetric() {
            let root_y = self.position.y;
            let mirrored: Vec<_> = placements
                .iter()
                .rev()
                .map(|&(p, incidence)| {
                    (DVec3::new(p.x, root_y - (p.y - root_y).abs(), p.z), incidence)
                })
                .collect();
            placements = mirrored.into_iter().chain(placements).collect();
        }
        placements
    }

    /// Generate every surface grid and node chain in place
    ///
    /// Surfaces are built untwisted at the origin, twisted with their local
    /// law offset by their accumulated incidence and then translated to
    /// their root position. Returned nodes are not numbered.
    pub fn create_grids(&self, options: &MacroMeshOptions) -> GeometryResult<MacroSurfaceMesh> {
        options.check_lengths(self.surfaces.len())?;

        for identifier in options.control_surface_deflections.keys() {
            if !self.control_surfaces.contains(identifier) {
                warn!(
                    surface = %identifier,
                    "Deflection given for a surface without control surface, ignored"
                );
            }
        }

        let middle = self.middle_index();
        let placements = self.placements();
        let mut grids = Vec::with_capacity(self.surfaces.len());
        let mut nodes = Vec::with_capacity(self.surfaces.len());

        for (i, surface) in self.surfaces.iter().enumerate() {
            let mirror = i < middle;
            let (offset, incidence) = placements[i];
            let deflection = options
                .control_surface_deflections
                .get(surface.identifier())
                .copied()
                .unwrap_or(0.0)
                .to_radians();

            let grid = surface.generate_aero_grid(&AeroGridOptions {
                n_span_panels: options.n_span_panels[i],
                n_chord_panels: options.n_chord_panels,
                control_surface_deflection: deflection,
                chord_discretization: options.chord_discretization,
                span_discretization: options.span_discretization[i],
                apply_twist: false,
                twist_function: None,
                torsion_center: self.torsion_center,
                mirror,
            })?;
            let chain = surface.generate_structure_nodes(&StructureNodeOptions {
                n_elements: options.n_beam_elements[i],
                apply_twist: false,
                twist_function: None,
                torsion_center: self.torsion_center,
                mirror,
            })?;

            let twist = options.twist_functions[i]
                .clone()
                .unwrap_or_else(|| surface.default_twist())
                .offset(incidence);

            grids.push(
                surface
                    .apply_twist_to_grid(&grid, self.torsion_center, &twist)?
                    .translate(offset),
            );
            nodes.push(
                surface
                    .apply_twist_to_nodes(&chain, self.torsion_center, &twist)?
                    .iter()
                    .map(|node| node.translate(offset))
                    .collect(),
            );
        }

        debug!(
            n_surfaces = grids.len(),
            n_nodes = nodes.iter().map(Vec::len).sum::<usize>(),
            "Generated macro-surface mesh"
        );
        Ok(MacroSurfaceMesh { grids, nodes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NODE_MERGE_TOLERANCE;
    use crate::surface::Section;
    use approx::assert_relative_eq;

    fn half_wing(identifier: &str) -> Surface {
        Surface::builder(identifier)
            .chords(1.5, 1.0)
            .sections(Section::with_shear_center(0.4))
            .length(4.0)
            .sweep(0.2)
            .dihedral(0.1)
            .tip_twist(-0.05)
            .build()
            .unwrap()
    }

    fn symmetric_wing() -> MacroSurface {
        MacroSurface::new(
            DVec3::new(1.0, 0.5, 0.2),
            0.05,
            vec![half_wing("left"), half_wing("right")],
            Some(MirrorPlane::XZ),
            0.25,
        )
        .unwrap()
    }

    #[test]
    fn test_symmetric_node_chain() {
        let wing = symmetric_wing();
        let mut mesh = wing
            .create_grids(&MacroMeshOptions::uniform(2, 4, 6, 4))
            .unwrap();
        mesh.number_nodes(0, NODE_MERGE_TOLERANCE);
        let nodes = mesh.structure_nodes().unwrap();
        assert_eq!(nodes.len(), 2 * 4 + 1);

        let root_y = wing.position().y;
        let mut offsets: Vec<f64> = nodes.iter().map(|n| n.position().y - root_y).collect();
        offsets.sort_by(f64::total_cmp);
        for k in 0..offsets.len() {
            assert_relative_eq!(offsets[k], -offsets[offsets.len() - 1 - k], epsilon = 1e-12);
        }
        assert_relative_eq!(offsets[4], 0.0, epsilon = 1e-12);
        assert_relative_eq!(offsets[8], 4.0 * 0.1f64.cos(), epsilon = 1e-9);
    }

    #[test]
    fn test_symmetric_single_grid() {
        let wing = symmetric_wing();
        let mesh = wing
            .create_grids(&MacroMeshOptions::uniform(2, 4, 6, 4))
            .unwrap();
        assert!(mesh.grids[0].points().iter().all(|p| p.y <= 0.5 + 1e-12));
        assert!(mesh.grids[1].points().iter().all(|p| p.y >= 0.5 - 1e-12));

        let single = mesh.single_grid(NODE_MERGE_TOLERANCE).unwrap();
        assert_eq!(single.shape(), (5, 2 * 6 + 1));
        let ys: Vec<f64> = single.row(0).iter().map(|p| p.y).collect();
        assert!(ys.windows(2).all(|w| w[0] < w[1]), "{ys:?}");
    }

    #[test]
    fn test_surfaces_are_chained_root_to_tip() {
        let inner = Surface::builder("inner")
            .chords(1.2, 1.0)
            .length(3.0)
            .sweep(0.1)
            .dihedral(0.05)
            .tip_twist(-0.04)
            .build()
            .unwrap();
        let outer = Surface::builder("outer")
            .chords(1.0, 0.6)
            .length(2.0)
            .sweep(0.3)
            .dihedral(0.05)
            .tip_twist(-0.02)
            .build()
            .unwrap();
        let wing = MacroSurface::new(DVec3::ZERO, 0.03, vec![inner, outer], None, 0.25).unwrap();
        let mesh = wing
            .create_grids(&MacroMeshOptions::uniform(2, 3, 4, 2))
            .unwrap();

        // The outer root section meets the inner tip section
        let inner_tip = mesh.grids[0].column(4);
        let outer_root = mesh.grids[1].column(0);
        for (a, b) in inner_tip.iter().zip(&outer_root) {
            assert!(a.abs_diff_eq(*b, 1e-9), "{a:?} != {b:?}");
        }
        assert_eq!(mesh.single_grid(1e-9).unwrap().n_span_points(), 9);

        let mut mesh = mesh;
        assert_eq!(mesh.number_nodes(100, 1e-9), 100 + 5);
        let nodes = mesh.structure_nodes().unwrap();
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0].number(), Some(100));
    }

    #[test]
    fn test_aggregates() {
        let flap = Surface::builder("flap").length(2.0).hinge(0.7).build().unwrap();
        let tip = Surface::builder("tip").chords(1.0, 0.5).length(1.0).build().unwrap();
        let wing = MacroSurface::new(
            DVec3::ZERO,
            0.0,
            vec![tip.clone(), flap.clone(), flap, tip],
            Some(MirrorPlane::XZ),
            0.25,
        )
        .unwrap();

        assert_eq!(wing.control_surfaces(), ["flap".to_string(), "flap".to_string()]);
        assert_relative_eq!(wing.ref_area(), 2.0 * (2.0 + 0.75), epsilon = 1e-12);
        assert_relative_eq!(wing.true_area(), 5.5, epsilon = 1e-12);
        assert_relative_eq!(wing.mean_aero_chord(), 1.0);

        assert_eq!(wing.root_nodes().len(), 4);
        assert_eq!(wing.tip_nodes().len(), 4);
        // Left tip surface runs from y = -2 out to y = -3
        assert_relative_eq!(wing.root_nodes()[0].position().y, -2.0, epsilon = 1e-12);
        assert_relative_eq!(wing.tip_nodes()[0].position().y, -3.0, epsilon = 1e-12);
        assert_relative_eq!(wing.tip_nodes()[3].position().y, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_control_surface_deflection_is_symmetric() {
        let flap = Surface::builder("flap").length(2.0).hinge(0.75).build().unwrap();
        let wing = MacroSurface::new(
            DVec3::ZERO,
            0.0,
            vec![flap.clone(), flap],
            Some(MirrorPlane::XZ),
            0.25,
        )
        .unwrap();
        let options = MacroMeshOptions::uniform(2, 4, 2, 2).with_deflection("flap", 10.0);
        let mesh = wing.create_grids(&options).unwrap();

        let left_trailing_edge = mesh.grids[0].get(4, 0);
        let right_trailing_edge = mesh.grids[1].get(4, 2);
        assert!(left_trailing_edge.z.abs() > 1e-3);
        assert_relative_eq!(left_trailing_edge.z, right_trailing_edge.z, epsilon = 1e-12);
        assert_relative_eq!(left_trailing_edge.y, -right_trailing_edge.y, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_macro_surfaces() {
        let s = Surface::builder("s").build().unwrap();
        assert!(matches!(
            MacroSurface::new(DVec3::ZERO, 0.0, vec![s.clone()], Some(MirrorPlane::XZ), 0.25),
            Err(GeometryError::OddSymmetricSurfaceCount(1))
        ));
        assert!(matches!(
            MacroSurface::new(
                DVec3::ZERO,
                0.0,
                vec![s.clone(), s.clone()],
                Some(MirrorPlane::XY),
                0.25
            ),
            Err(GeometryError::UnsupportedSymmetryPlane(_))
        ));
        assert!(MacroSurface::new(DVec3::ZERO, 0.0, Vec::new(), None, 0.25).is_err());

        let wing = MacroSurface::new(DVec3::ZERO, 0.0, vec![s], None, 0.25).unwrap();
        let mut options = MacroMeshOptions::uniform(1, 2, 2, 2);
        options.n_beam_elements.clear();
        assert!(matches!(
            wing.create_grids(&options),
            Err(GeometryError::ListLengthMismatch { what: "n_beam_elements", .. })
        ));
    }
}
