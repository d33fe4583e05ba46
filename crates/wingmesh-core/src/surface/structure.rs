//! Structural node chains along a surface's shear-centre line

use std::f64::consts::FRAC_PI_2;

use glam::{DQuat, DVec3};
use tracing::debug;

use super::{Surface, TwistFunction};
use crate::constants::DEFAULT_TORSION_CENTER;
use crate::error::{GeometryError, GeometryResult};
use crate::node::OrientedNode;
use crate::transform::decompose_rotation;

/// Settings for [`Surface::generate_structure_nodes`]
#[derive(Debug, Clone)]
pub struct StructureNodeOptions {
    /// Beam elements, the chain has one more node
    pub n_elements: usize,
    pub apply_twist: bool,
    /// Twist law, the surface's linear law when `None`
    pub twist_function: Option<TwistFunction>,
    pub torsion_center: f64,
    pub mirror: bool,
}

impl Default for StructureNodeOptions {
    fn default() -> Self {
        Self {
            n_elements: 10,
            apply_twist: true,
            twist_function: None,
            torsion_center: DEFAULT_TORSION_CENTER,
            mirror: false,
        }
    }
}

impl Surface {
    /// Build the root-to-tip node chain of this surface
    ///
    /// Nodes sit on the line joining the root and tip shear centres. Their
    /// local x axis points from root to tip and their local y axis runs
    /// along the chord.
    pub fn generate_structure_nodes(
        &self,
        options: &StructureNodeOptions,
    ) -> GeometryResult<Vec<OrientedNode>> {
        if options.n_elements == 0 {
            return Err(GeometryError::TooFewPoints(1));
        }
        self.check_torsion_center(options.torsion_center)?;
        let side = if options.mirror { -1.0 } else { 1.0 };

        let root = DVec3::new(self.root_chord * self.root_section.shear_center, 0.0, 0.0);
        let tip = DVec3::new(
            self.tip_leading_edge_x() + self.tip_chord * self.tip_section.shear_center,
            side * self.length,
            0.0,
        );

        // Align the local x axis with the swept root-to-tip line
        let sweep_rotation = side * (FRAC_PI_2 - (tip.x - root.x).atan2(self.length));
        let orientation = DQuat::from_rotation_z(sweep_rotation);
        let dihedral = DQuat::from_rotation_x(side * self.dihedral);

        let root_node = OrientedNode::new(root, orientation).rotate(dihedral, DVec3::ZERO);
        let tip_node = OrientedNode::new(tip, orientation).rotate(dihedral, DVec3::ZERO);

        let mut nodes = OrientedNode::interpolate(&root_node, &tip_node, options.n_elements + 1)?;

        if options.apply_twist {
            let twist = options
                .twist_function
                .clone()
                .unwrap_or_else(|| self.default_twist());
            nodes = self.apply_twist_to_nodes(&nodes, options.torsion_center, &twist)?;
        }

        debug!(surface = %self.identifier, n_nodes = nodes.len(), "Generated structure nodes");
        Ok(nodes)
    }

    /// Twist nodes of an untranslated chain about the Y axis
    ///
    /// Positions rotate about the torsion centre of the local chord. The
    /// orientation only takes the roll part of the twist, expressed in the
    /// node's own frame, so the local x axis keeps following the chain.
    pub fn apply_twist_to_nodes(
        &self,
        nodes: &[OrientedNode],
        torsion_center: f64,
        twist: &TwistFunction,
    ) -> GeometryResult<Vec<OrientedNode>> {
        nodes
            .iter()
            .map(|node| {
                let p = node.position();
                let position = self.span_position(p.y, p.z);
                let angle = twist.angle(position);

                let center = DVec3::new(
                    position * self.tip_leading_edge_x()
                        + self.local_chord(position) * torsion_center,
                    p.y,
                    position * self.length * self.dihedral.sin(),
                );
                let moved = node.rotate(DQuat::from_axis_angle(DVec3::Y, angle), center);

                let (_, _, roll) = decompose_rotation(
                    DVec3::Y,
                    angle,
                    node.x_axis(),
                    node.y_axis(),
                    node.z_axis(),
                )?;
                let rolled = node.rotate(DQuat::from_axis_angle(node.x_axis(), roll), p);

                Ok(rolled.translate(moved.position() - p))
            })
            .collect()
    }
}
