//! Trapezoidal lifting-surface segments
//!
//! A [`Surface`] is defined with its root leading edge at the origin and its
//! tip on the positive Y side. Both the aerodynamic grid and the structural
//! node chain are generated in that frame and can be mirrored to the
//! negative Y side.

mod aero_grid;
mod section;
mod structure;
mod twist;

pub use aero_grid::*;
pub use section::*;
pub use structure::*;
pub use twist::*;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::GEOMETRY_EPSILON;
use crate::error::{GeometryError, GeometryResult};

/// Immutable planform of one wing segment
///
/// Angles are stored in radians. Deserialized surfaces go through
/// [`SurfaceBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurfaceBuilder")]
pub struct Surface {
    identifier: String,
    root_chord: f64,
    root_section: Section,
    tip_chord: f64,
    tip_section: Section,
    length: f64,
    leading_edge_sweep: f64,
    dihedral: f64,
    tip_twist: f64,
    hinge_position: Option<f64>,
}

impl Surface {
    /// Start building a surface
    pub fn builder(identifier: impl Into<String>) -> SurfaceBuilder {
        SurfaceBuilder::new(identifier)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn root_chord(&self) -> f64 {
        self.root_chord
    }

    pub fn tip_chord(&self) -> f64 {
        self.tip_chord
    }

    pub fn root_section(&self) -> &Section {
        &self.root_section
    }

    pub fn tip_section(&self) -> &Section {
        &self.tip_section
    }

    /// Length along the dihedral line [m]
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn leading_edge_sweep(&self) -> f64 {
        self.leading_edge_sweep
    }

    pub fn dihedral(&self) -> f64 {
        self.dihedral
    }

    /// Tip section angle relative to the root
    pub fn tip_twist(&self) -> f64 {
        self.tip_twist
    }

    /// Control surface hinge as a chord fraction, if the surface has one
    pub fn hinge_position(&self) -> Option<f64> {
        self.hinge_position
    }

    pub fn has_control_surface(&self) -> bool {
        self.hinge_position.is_some()
    }

    /// Projection of the length on the XY plane
    pub fn span(&self) -> f64 {
        self.length * self.dihedral.cos()
    }

    pub fn mean_chord(&self) -> f64 {
        (self.root_chord + self.tip_chord) / 2.0
    }

    /// Planform area projected on the XY plane
    pub fn ref_area(&self) -> f64 {
        self.span() * self.mean_chord()
    }

    pub fn true_area(&self) -> f64 {
        self.length * self.mean_chord()
    }

    pub fn taper_ratio(&self) -> f64 {
        self.tip_chord / self.root_chord
    }

    /// `span² / ref_area`, zero for a surface with no projected area
    pub fn aspect_ratio(&self) -> f64 {
        let ref_area = self.ref_area();
        if ref_area.abs() <= GEOMETRY_EPSILON {
            return 0.0;
        }
        self.span().powi(2) / ref_area
    }

    /// Sweep of the quarter-chord line
    pub fn quarter_chord_sweep(&self) -> f64 {
        // Untapered surfaces share the leading edge sweep along the whole chord
        if self.root_chord == self.tip_chord {
            return self.leading_edge_sweep;
        }
        let offset = self.length * self.leading_edge_sweep.tan()
            + 0.25 * (self.tip_chord - self.root_chord);
        (offset / self.length).atan()
    }

    /// Chordwise offset of the tip leading edge
    pub fn tip_leading_edge_x(&self) -> f64 {
        self.length * self.leading_edge_sweep.tan()
    }

    /// Tip leading edge of the untwisted surface, relative to the root
    pub fn tip_leading_edge(&self) -> DVec3 {
        DVec3::new(
            self.tip_leading_edge_x(),
            self.span(),
            self.length * self.dihedral.sin(),
        )
    }

    /// Linearly interpolated chord at a normalized span position
    pub fn local_chord(&self, span_position: f64) -> f64 {
        self.root_chord + span_position * (self.tip_chord - self.root_chord)
    }

    /// Normalized span position of a point of the untranslated surface
    ///
    /// Equals `|y| / span` and stays defined for vertical surfaces, where
    /// the span vanishes.
    pub fn span_position(&self, y: f64, z: f64) -> f64 {
        (y.abs() * self.dihedral.cos() + z * self.dihedral.sin()) / self.length
    }

    /// Twist law used when none is supplied: linear up to the tip twist
    pub fn default_twist(&self) -> TwistFunction {
        TwistFunction::linear(self.tip_twist)
    }

    pub(crate) fn check_torsion_center(&self, torsion_center: f64) -> GeometryResult<()> {
        if !(0.0..=1.0).contains(&torsion_center) {
            return Err(GeometryError::InvalidSurface(format!(
                "{}: torsion centre must be inside [0, 1], got {torsion_center}",
                self.identifier
            )));
        }
        Ok(())
    }
}

/// Builder for [`Surface`] with validation on [`SurfaceBuilder::build`]
#[derive(Debug, Clone, Deserialize)]
pub struct SurfaceBuilder {
    identifier: String,
    root_chord: f64,
    root_section: Section,
    tip_chord: f64,
    tip_section: Section,
    length: f64,
    leading_edge_sweep: f64,
    dihedral: f64,
    tip_twist: f64,
    hinge_position: Option<f64>,
}

impl SurfaceBuilder {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            root_chord: 1.0,
            root_section: Section::default(),
            tip_chord: 1.0,
            tip_section: Section::default(),
            length: 1.0,
            leading_edge_sweep: 0.0,
            dihedral: 0.0,
            tip_twist: 0.0,
            hinge_position: None,
        }
    }

    /// Set root and tip chords
    pub fn chords(mut self, root: f64, tip: f64) -> Self {
        self.root_chord = root;
        self.tip_chord = tip;
        self
    }

    pub fn root_section(mut self, section: Section) -> Self {
        self.root_section = section;
        self
    }

    pub fn tip_section(mut self, section: Section) -> Self {
        self.tip_section = section;
        self
    }

    /// Same section at root and tip
    pub fn sections(mut self, section: Section) -> Self {
        self.root_section = section.clone();
        self.tip_section = section;
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Leading edge sweep in radians
    pub fn sweep(mut self, angle: f64) -> Self {
        self.leading_edge_sweep = angle;
        self
    }

    pub fn sweep_deg(self, degrees: f64) -> Self {
        self.sweep(degrees.to_radians())
    }

    /// Dihedral in radians
    pub fn dihedral(mut self, angle: f64) -> Self {
        self.dihedral = angle;
        self
    }

    pub fn dihedral_deg(self, degrees: f64) -> Self {
        self.dihedral(degrees.to_radians())
    }

    /// Tip twist in radians
    pub fn tip_twist(mut self, angle: f64) -> Self {
        self.tip_twist = angle;
        self
    }

    pub fn tip_twist_deg(self, degrees: f64) -> Self {
        self.tip_twist(degrees.to_radians())
    }

    /// Control surface hinge as a chord fraction in (0, 1)
    pub fn hinge(mut self, position: f64) -> Self {
        self.hinge_position = Some(position);
        self
    }

    pub fn build(self) -> GeometryResult<Surface> {
        let invalid = |message: String| Err(GeometryError::InvalidSurface(message));

        if !(self.root_chord > 0.0) || !(self.tip_chord > 0.0) {
            return invalid(format!(
                "{}: chords must be positive, got {} and {}",
                self.identifier, self.root_chord, self.tip_chord
            ));
        }
        if !(self.length > 0.0) {
            return invalid(format!(
                "{}: length must be positive, got {}",
                self.identifier, self.length
            ));
        }
        if let Some(hinge) = self.hinge_position.filter(|h| !(*h > 0.0 && *h < 1.0)) {
            return invalid(format!(
                "{}: hinge position must be inside (0, 1), got {hinge}",
                self.identifier
            ));
        }
        for section in [&self.root_section, &self.tip_section] {
            if !(0.0..=1.0).contains(&section.shear_center) {
                return invalid(format!(
                    "{}: shear centre of {} must be inside [0, 1], got {}",
                    self.identifier, section.identifier, section.shear_center
                ));
            }
        }

        Ok(Surface {
            identifier: self.identifier,
            root_chord: self.root_chord,
            root_section: self.root_section,
            tip_chord: self.tip_chord,
            tip_section: self.tip_section,
            length: self.length,
            leading_edge_sweep: self.leading_edge_sweep,
            dihedral: self.dihedral,
            tip_twist: self.tip_twist,
            hinge_position: self.hinge_position,
        })
    }
}

impl TryFrom<SurfaceBuilder> for Surface {
    type Error = GeometryError;

    fn try_from(builder: SurfaceBuilder) -> GeometryResult<Self> {
        builder.build()
    }
}
