//! Oriented structural nodes
//!
//! A node is a position plus a unit quaternion orientation. Nodes are value
//! types: every transform returns a new node. The `number` is assigned by a
//! numbering pass and used to merge nodes shared by adjacent surfaces.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, GeometryResult};
use crate::transform::cos_between;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedNode {
    position: DVec3,
    orientation: DQuat,
    number: Option<usize>,
}

impl OrientedNode {
    /// Create an unnumbered node, normalizing the orientation
    pub fn new(position: DVec3, orientation: DQuat) -> Self {
        Self {
            position,
            orientation: orientation.normalize(),
            number: None,
        }
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn orientation(&self) -> DQuat {
        self.orientation
    }

    pub fn number(&self) -> Option<usize> {
        self.number
    }

    /// Copy of this node carrying `number`
    pub fn with_number(self, number: usize) -> Self {
        Self {
            number: Some(number),
            ..self
        }
    }

    /// Local x axis in global coordinates
    pub fn x_axis(&self) -> DVec3 {
        self.orientation * DVec3::X
    }

    /// Local y axis in global coordinates
    pub fn y_axis(&self) -> DVec3 {
        self.orientation * DVec3::Y
    }

    /// Local z axis in global coordinates
    pub fn z_axis(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Cosines between each local axis and the matching global axis
    pub fn direction_cosines(&self) -> DVec3 {
        DVec3::new(
            cos_between(DVec3::X, self.x_axis()),
            cos_between(DVec3::Y, self.y_axis()),
            cos_between(DVec3::Z, self.z_axis()),
        )
    }

    pub fn translate(&self, translation: DVec3) -> Self {
        Self {
            position: self.position + translation,
            ..*self
        }
    }

    /// Rotate about `center` in the global frame
    ///
    /// Both the position and the orientation are rotated; the new orientation
    /// is `rotation * orientation`.
    pub fn rotate(&self, rotation: DQuat, center: DVec3) -> Self {
        Self {
            position: rotation * (self.position - center) + center,
            orientation: (rotation * self.orientation).normalize(),
            number: self.number,
        }
    }

    /// `n_nodes` nodes from `start` to `end`, both included
    ///
    /// Positions are interpolated linearly and orientations along the
    /// shortest arc.
    pub fn interpolate(start: &Self, end: &Self, n_nodes: usize) -> GeometryResult<Vec<Self>> {
        if n_nodes < 2 {
            return Err(GeometryError::TooFewPoints(n_nodes));
        }

        let last = (n_nodes - 1) as f64;
        let step = (end.position - start.position) / last;
        Ok((0..n_nodes)
            .map(|i| {
                let t = i as f64 / last;
                OrientedNode::new(
                    start.position + step * i as f64,
                    start.orientation.slerp(end.orientation, t),
                )
            })
            .collect())
    }
}

impl Default for OrientedNode {
    fn default() -> Self {
        Self::new(DVec3::ZERO, DQuat::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_orientation_is_normalized() {
        let node = OrientedNode::new(DVec3::ZERO, DQuat::from_xyzw(0.0, 0.0, 2.0, 2.0));
        assert!(node.orientation().is_normalized());
        assert!(node.number().is_none());
    }

    #[test]
    fn test_local_axes() {
        let node = OrientedNode::new(DVec3::ZERO, DQuat::from_rotation_z(FRAC_PI_2));
        assert!(node.x_axis().abs_diff_eq(DVec3::Y, 1e-12));
        assert!(node.y_axis().abs_diff_eq(-DVec3::X, 1e-12));
        assert!(node.z_axis().abs_diff_eq(DVec3::Z, 1e-12));

        let cosines = node.direction_cosines();
        assert_relative_eq!(cosines.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cosines.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(cosines.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_translate_keeps_orientation_and_number() {
        let node = OrientedNode::new(DVec3::X, DQuat::from_rotation_y(0.4)).with_number(7);
        let moved = node.translate(DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(moved.position(), DVec3::new(1.0, 2.0, 0.0));
        assert_eq!(moved.orientation(), node.orientation());
        assert_eq!(moved.number(), Some(7));
        // The original value is untouched
        assert_eq!(node.position(), DVec3::X);
    }

    #[test]
    fn test_rotate_is_global_frame() {
        // Local x along global Y; a global quarter turn about X sends it to +Z,
        // composing in the local frame would leave it along Y
        let node = OrientedNode::new(DVec3::new(1.0, 0.0, 0.0), DQuat::from_rotation_z(FRAC_PI_2));
        let rotated = node.rotate(DQuat::from_rotation_x(FRAC_PI_2), DVec3::ZERO);
        assert!(rotated.x_axis().abs_diff_eq(DVec3::Z, 1e-12), "x axis {:?}", rotated.x_axis());
        assert!(rotated.position().abs_diff_eq(DVec3::X, 1e-12));
    }

    #[test]
    fn test_rotate_about_center() {
        let node = OrientedNode::new(DVec3::new(2.0, 0.0, 0.0), DQuat::IDENTITY);
        let rotated = node.rotate(DQuat::from_rotation_z(PI), DVec3::new(1.0, 0.0, 0.0));
        assert!(rotated.position().abs_diff_eq(DVec3::ZERO, 1e-12));
        assert!(rotated.x_axis().abs_diff_eq(-DVec3::X, 1e-12));
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let start = OrientedNode::new(DVec3::ZERO, DQuat::IDENTITY);
        let end = OrientedNode::new(DVec3::new(0.0, 4.0, 0.0), DQuat::from_rotation_y(FRAC_PI_2));
        let nodes = OrientedNode::interpolate(&start, &end, 5).unwrap();

        assert_eq!(nodes.len(), 5);
        assert!(nodes[0].position().abs_diff_eq(start.position(), 1e-12));
        assert!(nodes[4].position().abs_diff_eq(end.position(), 1e-12));
        assert!(nodes[4].orientation().abs_diff_eq(end.orientation(), 1e-12));
        assert!(nodes[2].position().abs_diff_eq(DVec3::new(0.0, 2.0, 0.0), 1e-12));

        let (axis, angle) = nodes[2].orientation().to_axis_angle();
        assert!(axis.abs_diff_eq(DVec3::Y, 1e-9));
        assert_relative_eq!(angle, FRAC_PI_2 / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_interpolate_takes_shortest_arc() {
        let start = OrientedNode::new(DVec3::ZERO, DQuat::from_rotation_z(0.1));
        // Same rotation as +0.3 but with the opposite quaternion sign
        let end = OrientedNode::new(DVec3::X, -DQuat::from_rotation_z(0.3));
        let nodes = OrientedNode::interpolate(&start, &end, 3).unwrap();
        let (_, angle) = nodes[1].orientation().to_axis_angle();
        assert_relative_eq!(angle, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn test_interpolate_needs_two_nodes() {
        let node = OrientedNode::default();
        assert!(OrientedNode::interpolate(&node, &node, 1).is_err());
    }
}
