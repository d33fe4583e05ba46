//! Straight beam members not tied to an aerodynamic planform

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::node::OrientedNode;
use crate::surface::Section;
use crate::transform::angle_between;

/// A straight structural member between two points
///
/// The orientation vector fixes the roll of the member: node y axes are the
/// part of it perpendicular to the beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BeamFields")]
pub struct Beam {
    identifier: String,
    root: DVec3,
    tip: DVec3,
    orientation_vector: DVec3,
    section: Section,
}

impl Beam {
    pub fn new(
        identifier: impl Into<String>,
        root: DVec3,
        tip: DVec3,
        orientation_vector: DVec3,
    ) -> GeometryResult<Self> {
        let direction = (tip - root)
            .try_normalize()
            .ok_or(GeometryError::DegenerateAxis((tip - root).to_array()))?;
        if direction.cross(orientation_vector).try_normalize().is_none() {
            return Err(GeometryError::ParallelOrientation);
        }

        Ok(Self {
            identifier: identifier.into(),
            root,
            tip,
            orientation_vector,
            section: Section::default(),
        })
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn root(&self) -> DVec3 {
        self.root
    }

    pub fn tip(&self) -> DVec3 {
        self.tip
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn length(&self) -> f64 {
        self.root.distance(self.tip)
    }

    /// Unit vector from root to tip
    pub fn direction(&self) -> DVec3 {
        (self.tip - self.root).normalize()
    }

    /// Orientation shared by every node of the beam
    ///
    /// The first rotation takes global X onto the beam, the second rolls
    /// about the beam until local z is `x × orientation_vector`.
    pub fn orientation(&self) -> GeometryResult<DQuat> {
        let x_axis = self.direction();
        let align = rotation_between(DVec3::X, x_axis, DVec3::Z);

        let z_target = x_axis
            .cross(self.orientation_vector)
            .try_normalize()
            .ok_or(GeometryError::ParallelOrientation)?;
        let roll = rotation_between(align * DVec3::Z, z_target, x_axis);

        Ok((roll * align).normalize())
    }

    /// `n_elements + 1` nodes from root to tip
    pub fn create_grid(&self, n_elements: usize) -> GeometryResult<Vec<OrientedNode>> {
        if n_elements == 0 {
            return Err(GeometryError::TooFewPoints(1));
        }
        let orientation = self.orientation()?;
        OrientedNode::interpolate(
            &OrientedNode::new(self.root, orientation),
            &OrientedNode::new(self.tip, orientation),
            n_elements + 1,
        )
    }
}

/// Unchecked field set, validated through [`Beam::new`] on load
#[derive(Deserialize)]
struct BeamFields {
    identifier: String,
    root: DVec3,
    tip: DVec3,
    orientation_vector: DVec3,
    #[serde(default)]
    section: Section,
}

impl TryFrom<BeamFields> for Beam {
    type Error = GeometryError;

    fn try_from(fields: BeamFields) -> GeometryResult<Self> {
        Ok(Beam::new(fields.identifier, fields.root, fields.tip, fields.orientation_vector)?
            .with_section(fields.section))
    }
}

/// Shortest rotation taking `from` onto `to`
///
/// Parallel or opposite vectors have no defined cross product, `fallback`
/// is used as the rotation axis instead.
fn rotation_between(from: DVec3, to: DVec3, fallback: DVec3) -> DQuat {
    let angle = angle_between(from, to);
    let axis = from.cross(to).try_normalize().unwrap_or(fallback);
    DQuat::from_axis_angle(axis, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_vertical_beam() {
        let beam = Beam::new("strut", DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0), DVec3::X).unwrap();
        let nodes = beam.create_grid(4).unwrap();

        assert_eq!(nodes.len(), 5);
        assert!(nodes[2].position().abs_diff_eq(DVec3::new(0.0, 0.0, 1.0), 1e-12));
        for node in &nodes {
            assert!(node.x_axis().abs_diff_eq(DVec3::Z, 1e-12));
            assert!(node.y_axis().abs_diff_eq(DVec3::X, 1e-12), "{:?}", node.y_axis());
            assert!(node.z_axis().abs_diff_eq(DVec3::Y, 1e-12));
        }
    }

    #[test]
    fn test_orientation_vector_sets_roll() {
        let beam = Beam::new(
            "spar",
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 5.0, 0.0),
            DVec3::new(2.0, 0.0, 2.0),
        )
        .unwrap();
        let nodes = beam.create_grid(1).unwrap();
        let y_expected = DVec3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2);
        assert!(nodes[0].x_axis().abs_diff_eq(DVec3::Y, 1e-12));
        assert!(nodes[0].y_axis().abs_diff_eq(y_expected, 1e-12), "{:?}", nodes[0].y_axis());
    }

    #[test]
    fn test_beam_opposite_to_global_x() {
        let beam = Beam::new("tail", DVec3::ZERO, DVec3::new(-3.0, 0.0, 0.0), DVec3::Y).unwrap();
        let orientation = beam.orientation().unwrap();
        assert!((orientation * DVec3::X).abs_diff_eq(-DVec3::X, 1e-12));
        assert!((orientation * DVec3::Y).abs_diff_eq(DVec3::Y, 1e-12));
        assert!((orientation * DVec3::Z).abs_diff_eq(-DVec3::Z, 1e-12));
    }

    #[test]
    fn test_invalid_beams() {
        assert!(matches!(
            Beam::new("a", DVec3::ONE, DVec3::ONE, DVec3::Z),
            Err(GeometryError::DegenerateAxis(_))
        ));
        assert!(matches!(
            Beam::new("b", DVec3::ZERO, DVec3::X, DVec3::new(-2.0, 0.0, 0.0)),
            Err(GeometryError::ParallelOrientation)
        ));
        let beam = Beam::new("c", DVec3::ZERO, DVec3::X, DVec3::Z).unwrap();
        assert!(beam.create_grid(0).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let beam: Beam = ron::from_str(
            "(identifier: \"strut\", root: (0.0, 0.0, 0.0), tip: (0.0, 0.0, 2.0), orientation_vector: (1.0, 0.0, 0.0))",
        )
        .unwrap();
        assert_eq!(beam.length(), 2.0);
        assert_eq!(beam.section(), &Section::default());

        let collapsed = ron::from_str::<Beam>(
            "(identifier: \"strut\", root: (1.0, 1.0, 1.0), tip: (1.0, 1.0, 1.0), orientation_vector: (0.0, 0.0, 1.0))",
        );
        assert!(collapsed.is_err());

        let parallel = ron::from_str::<Beam>(
            "(identifier: \"strut\", root: (0.0, 0.0, 0.0), tip: (1.0, 0.0, 0.0), orientation_vector: (3.0, 0.0, 0.0))",
        );
        assert!(parallel.is_err());
    }
}
