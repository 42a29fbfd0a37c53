use crate::node::SceneNode;

/// Turns placed scene nodes into pixels.
///
/// Called once per node in draw order, after the owning actor's placement
/// pass. The node supplies its placed transform and its [`Part`](crate::Part);
/// everything else is up to the implementation.
pub trait PartRenderer {
    fn draw_part(&mut self, node: &SceneNode);
}

impl<F: FnMut(&SceneNode)> PartRenderer for F {
    fn draw_part(&mut self, node: &SceneNode) {
        self(node);
    }
}
