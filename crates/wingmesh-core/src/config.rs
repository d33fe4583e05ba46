//! Mesh configuration
//!
//! Discretization settings that can be serialized and loaded from RON
//! configuration files.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TORSION_CENTER, NODE_MERGE_TOLERANCE};
use crate::discretization::DiscretizationKind;
use crate::error::{GeometryError, GeometryResult};
use crate::macro_surface::MacroMeshOptions;
use crate::surface::{AeroGridOptions, StructureNodeOptions};

/// Panel and element counts shared by every surface of a model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Chordwise panels per surface
    pub n_chord_panels: usize,
    /// Spanwise panels per surface
    pub n_span_panels: usize,
    /// Beam elements per surface
    pub n_beam_elements: usize,
    pub chord_discretization: DiscretizationKind,
    pub span_discretization: DiscretizationKind,
    /// Chord fraction sections are twisted around
    pub torsion_center: f64,
    /// Distance under which structural nodes are merged
    pub node_merge_tolerance: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            n_chord_panels: 4,
            n_span_panels: 10,
            n_beam_elements: 10,
            chord_discretization: DiscretizationKind::Linear,
            span_discretization: DiscretizationKind::Linear,
            torsion_center: DEFAULT_TORSION_CENTER,
            node_merge_tolerance: NODE_MERGE_TOLERANCE,
        }
    }
}

impl MeshConfig {
    /// Parse and validate a RON document, missing fields take their default
    pub fn from_ron_str(source: &str) -> GeometryResult<Self> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GeometryResult<()> {
        let counts = [
            ("n_chord_panels", self.n_chord_panels),
            ("n_span_panels", self.n_span_panels),
            ("n_beam_elements", self.n_beam_elements),
        ];
        for (name, count) in counts {
            if count == 0 {
                return Err(GeometryError::InvalidConfig(format!(
                    "{name} must be at least 1"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.torsion_center) {
            return Err(GeometryError::InvalidConfig(format!(
                "torsion centre must be inside [0, 1], got {}",
                self.torsion_center
            )));
        }
        if !(self.node_merge_tolerance >= 0.0 && self.node_merge_tolerance.is_finite()) {
            return Err(GeometryError::InvalidConfig(format!(
                "node merge tolerance must be finite and non-negative, got {}",
                self.node_merge_tolerance
            )));
        }
        Ok(())
    }

    /// Options for a single surface grid
    pub fn aero_grid_options(&self) -> AeroGridOptions {
        AeroGridOptions {
            n_span_panels: self.n_span_panels,
            n_chord_panels: self.n_chord_panels,
            chord_discretization: self.chord_discretization,
            span_discretization: self.span_discretization,
            torsion_center: self.torsion_center,
            ..AeroGridOptions::default()
        }
    }

    /// Options for a single surface node chain
    pub fn structure_node_options(&self) -> StructureNodeOptions {
        StructureNodeOptions {
            n_elements: self.n_beam_elements,
            torsion_center: self.torsion_center,
            ..StructureNodeOptions::default()
        }
    }

    /// Options for a macro-surface of `n_surfaces` surfaces
    pub fn macro_mesh_options(&self, n_surfaces: usize) -> MacroMeshOptions {
        let mut options = MacroMeshOptions::uniform(
            n_surfaces,
            self.n_chord_panels,
            self.n_span_panels,
            self.n_beam_elements,
        );
        options.chord_discretization = self.chord_discretization;
        options.span_discretization = vec![self.span_discretization; n_surfaces];
        options
    }
}
