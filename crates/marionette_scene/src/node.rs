use glam::{DVec2, IVec2};
use marionette_animation::AngleChannel;
use smallvec::SmallVec;

use crate::part::Part;
use crate::transform::{rotate, rotate_point};
use crate::{ActorKey, NodeKey};

/// One visually independent part of an actor.
///
/// # Hierarchy
///
/// Nodes live in their actor's arena and form a tree through keys:
/// - `parent`: handle of the parent node (`None` for the root and for
///   nodes not yet attached)
/// - `children`: handles of the child nodes, in attachment order
///
/// Use [`Actor::add_child`](crate::Actor::add_child) to link nodes; it keeps
/// both sides in sync and rejects cycles.
///
/// # Transform
///
/// `position` and `rotation` are relative to the parent (or to the actor
/// anchor for the root). The placed transform is absolute and is rewritten
/// by every placement pass.
#[derive(Debug, Clone)]
pub struct SceneNode {
    name: String,

    // === Local transform ===
    position: IVec2,
    rotation: f64,

    /// Animates `rotation`.
    channel: AngleChannel,

    // === Hierarchy ===
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: SmallVec<[NodeKey; 4]>,
    pub(crate) actor: Option<ActorKey>,

    // === Placed (absolute) transform ===
    placed_position: IVec2,
    placed_rotation: f64,

    pub part: Part,
}

impl SceneNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            channel: AngleChannel::new(name.clone()),
            name,
            position: IVec2::ZERO,
            rotation: 0.0,
            parent: None,
            children: SmallVec::new(),
            actor: None,
            placed_position: IVec2::ZERO,
            placed_rotation: 0.0,
            part: Part::Empty,
        }
    }

    #[must_use]
    pub fn with_part(mut self, part: Part) -> Self {
        self.part = part;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: IVec2) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    /// Local rotation in radians.
    #[inline]
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    #[inline]
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }

    /// The actor this node belongs to, once that actor has joined a scene.
    #[inline]
    #[must_use]
    pub fn actor(&self) -> Option<ActorKey> {
        self.actor
    }

    #[inline]
    #[must_use]
    pub fn placed_position(&self) -> IVec2 {
        self.placed_position
    }

    #[inline]
    #[must_use]
    pub fn placed_rotation(&self) -> f64 {
        self.placed_rotation
    }

    #[inline]
    #[must_use]
    pub fn angle_channel(&self) -> &AngleChannel {
        &self.channel
    }

    #[inline]
    pub fn angle_channel_mut(&mut self) -> &mut AngleChannel {
        &mut self.channel
    }

    /// Name the rotation channel after the owning actor: `"Actor:Node"`.
    pub(crate) fn adopt(&mut self, actor_name: &str) {
        self.channel.set_name(format!("{actor_name}:{}", self.name));
    }

    // ========================================================================
    // Transform
    // ========================================================================

    /// Compose this node's absolute transform from its parent's.
    ///
    /// Rotation is applied before the offset is combined, so the local
    /// position is expressed in the parent's rotated frame.
    pub fn place(&mut self, offset: IVec2, rotation: f64) {
        self.placed_position = offset + rotate_point(self.position, rotation);
        self.placed_rotation = self.rotation + rotation;
    }

    /// Drag the node by a screen-space `delta`.
    ///
    /// With a parent the delta is first un-rotated by the parent's placed
    /// rotation, so the node follows the pointer however the parent is
    /// turned.
    pub fn move_by(&mut self, delta: IVec2, parent_rotation: Option<f64>) {
        self.position += match parent_rotation {
            Some(rotation) => rotate_point(delta, -rotation),
            None => delta,
        };
    }

    /// Map a point in part coordinates (image pixels, polygon vertices) to
    /// the screen using the placed transform.
    #[must_use]
    pub fn to_screen(&self, local: IVec2) -> IVec2 {
        rotate_point(local - self.part.origin(), self.placed_rotation) + self.placed_position
    }

    /// Map a screen point into node-local coordinates (origin on the node).
    #[must_use]
    pub fn to_local(&self, screen: IVec2) -> DVec2 {
        rotate((screen - self.placed_position).as_dvec2(), -self.placed_rotation)
    }

    /// Polygon outline in screen coordinates. Empty for other parts.
    #[must_use]
    pub fn placed_outline(&self) -> Vec<IVec2> {
        match &self.part {
            Part::Polygon { points, .. } => points
                .iter()
                .map(|&p| rotate_point(p, self.placed_rotation) + self.placed_position)
                .collect(),
            Part::Empty | Part::Image { .. } => Vec::new(),
        }
    }

    /// Whether a screen point hits this node's part at its placed transform.
    #[must_use]
    pub fn hit_test(&self, point: IVec2) -> bool {
        self.part.contains(self.to_local(point))
    }

    // ========================================================================
    // Keyframes
    // ========================================================================

    /// Record the current rotation at the channel's current frame.
    pub fn set_keyframe(&mut self) {
        self.channel.set_keyframe(self.rotation);
    }

    /// Pull the animated rotation, if the channel has any keyframes.
    pub fn get_keyframe(&mut self) {
        if let Some(angle) = self.channel.angle() {
            self.rotation = angle;
        }
    }
}
