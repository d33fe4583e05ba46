//! Global node numbering and de-duplication of node chains

use tracing::debug;

use crate::error::{GeometryError, GeometryResult};
use crate::node::OrientedNode;

/// Number every node of `chains` in order, starting at `first_number`
///
/// A node closer than `tolerance` to an already numbered node reuses that
/// node's number, so chains sharing an end point share its number. Returns
/// the next free number.
pub fn number_nodes(chains: &mut [Vec<OrientedNode>], first_number: usize, tolerance: f64) -> usize {
    let mut numbered: Vec<OrientedNode> = Vec::new();
    let mut next = first_number;

    for node in chains.iter_mut().flatten() {
        let existing = numbered
            .iter()
            .find(|other| other.position().distance(node.position()) <= tolerance)
            .and_then(|other| other.number());

        let number = existing.unwrap_or_else(|| {
            let number = next;
            next += 1;
            number
        });
        *node = node.with_number(number);
        numbered.push(*node);
    }

    next
}

/// Flatten chains into one list sorted by node number, one entry per number
///
/// The first node seen with a given number is kept.
pub fn structure_node_vector(chains: &[Vec<OrientedNode>]) -> GeometryResult<Vec<OrientedNode>> {
    let mut nodes: Vec<(usize, OrientedNode)> = chains
        .iter()
        .flatten()
        .map(|node| {
            node.number()
                .map(|number| (number, *node))
                .ok_or(GeometryError::UnnumberedNode(node.position().to_array()))
        })
        .collect::<GeometryResult<_>>()?;

    let total = nodes.len();
    nodes.sort_by_key(|(number, _)| *number);
    nodes.dedup_by_key(|(number, _)| *number);

    debug!(total, unique = nodes.len(), "Merged shared structure nodes");
    Ok(nodes.into_iter().map(|(_, node)| node).collect())
}
