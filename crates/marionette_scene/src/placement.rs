//! Placement Pass
//!
//! Computes absolute transforms for a node tree, top-down. Works on the
//! node arena alone so callers can borrow the rest of their state freely.
//!
//! Placement always follows tree order from the root. Draw order may
//! interleave unrelated subtrees and must not be used here.

use glam::IVec2;
use slotmap::SlotMap;

use crate::NodeKey;
use crate::node::SceneNode;

/// Place `root` and all of its descendants.
///
/// Uses an explicit stack rather than recursion. A node is always placed
/// before any of its children are popped, so each child sees its parent's
/// final transform.
pub fn place_subtree(
    nodes: &mut SlotMap<NodeKey, SceneNode>,
    root: NodeKey,
    offset: IVec2,
    rotation: f64,
) {
    // (node, parent placed position, parent placed rotation)
    let mut stack: Vec<(NodeKey, IVec2, f64)> = Vec::with_capacity(16);
    stack.push((root, offset, rotation));

    while let Some((key, parent_position, parent_rotation)) = stack.pop() {
        let Some(node) = nodes.get_mut(key) else {
            log::warn!("Placement skipped missing node {key:?}");
            continue;
        };

        node.place(parent_position, parent_rotation);
        log::trace!(
            "Placed '{}' at {} rot {:.4}",
            node.name(),
            node.placed_position(),
            node.placed_rotation()
        );

        let position = node.placed_position();
        let rotation = node.placed_rotation();
        for &child in node.children.iter().rev() {
            stack.push((child, position, rotation));
        }
    }
}

/// Keys of `root` and its descendants in pre-order.
#[must_use]
pub fn subtree(nodes: &SlotMap<NodeKey, SceneNode>, root: NodeKey) -> Vec<NodeKey> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(key) = stack.pop() {
        let Some(node) = nodes.get(key) else {
            continue;
        };
        out.push(key);
        stack.extend(node.children.iter().rev().copied());
    }
    out
}

/// True if `ancestor` is `node` itself or lies on the path from `node` up
/// to its root.
#[must_use]
pub fn is_ancestor(nodes: &SlotMap<NodeKey, SceneNode>, ancestor: NodeKey, node: NodeKey) -> bool {
    let mut current = Some(node);
    while let Some(key) = current {
        if key == ancestor {
            return true;
        }
        current = nodes.get(key).and_then(SceneNode::parent);
    }
    false
}
