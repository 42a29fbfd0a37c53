use glam::IVec2;
use marionette_animation::{AnimChannel, PositionChannel};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::errors::{Result, SceneError};
use crate::node::SceneNode;
use crate::placement::{is_ancestor, place_subtree, subtree};
use crate::render::PartRenderer;
use crate::{ActorKey, NodeKey};

/// An independently animated character or object.
///
/// An actor owns every one of its nodes in a single arena. Two views index
/// into that arena:
/// - the tree (`root` plus each node's parent/children), used for placement
/// - the draw order, used for drawing and, reversed, for hit testing
///
/// The two orders are independent. A node only gets drawn once it is added
/// to the draw order with [`Actor::add_drawable`].
#[derive(Debug)]
pub struct Actor {
    name: String,
    position: IVec2,
    enabled: bool,
    clickable: bool,

    /// Animates `position`.
    channel: PositionChannel,

    nodes: SlotMap<NodeKey, SceneNode>,
    draw_order: Vec<NodeKey>,
    root: Option<NodeKey>,
    by_name: FxHashMap<String, NodeKey>,

    /// Set while the actor belongs to a scene.
    key: Option<ActorKey>,
}

impl Actor {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            channel: PositionChannel::new(name.clone()),
            name,
            position: IVec2::ZERO,
            enabled: true,
            clickable: true,
            nodes: SlotMap::with_key(),
            draw_order: Vec::new(),
            root: None,
            by_name: FxHashMap::default(),
            key: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Anchor position. The root node is placed relative to it.
    #[inline]
    #[must_use]
    pub fn position(&self) -> IVec2 {
        self.position
    }

    #[inline]
    pub fn set_position(&mut self, position: IVec2) {
        self.position = position;
    }

    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// A disabled actor is neither drawn nor hit.
    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    #[must_use]
    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    #[inline]
    pub fn set_clickable(&mut self, clickable: bool) {
        self.clickable = clickable;
    }

    #[inline]
    #[must_use]
    pub fn position_channel(&self) -> &PositionChannel {
        &self.channel
    }

    #[inline]
    pub fn position_channel_mut(&mut self) -> &mut PositionChannel {
        &mut self.channel
    }

    /// The key of this actor in its scene, if it has joined one.
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<ActorKey> {
        self.key
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Take ownership of a node. It is not drawn and not attached to
    /// anything yet.
    ///
    /// The node's channel is unbound from any timeline. If this actor is
    /// already in a scene, the channel starts on the actor's current frame;
    /// [`Scene::register_channels`](crate::Scene::register_channels) still
    /// has to run before the timeline drives it.
    pub fn add_node(&mut self, mut node: SceneNode) -> NodeKey {
        node.adopt(&self.name);
        node.actor = self.key;
        node.parent = None;
        node.children.clear();

        let channel = node.angle_channel_mut();
        channel.bind_timeline(None);
        if self.key.is_some() {
            channel.set_frame(self.channel.frame());
        }

        let name = node.name().to_string();
        let key = self.nodes.insert(node);
        if let Some(previous) = self.by_name.insert(name, key) {
            log::warn!(
                "Actor '{}': node name reused, lookups now find {key:?} instead of {previous:?}",
                self.name
            );
        }
        key
    }

    /// Append a node to the draw order.
    pub fn add_drawable(&mut self, key: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(key) {
            return Err(SceneError::NodeNotFound(key));
        }
        if self.draw_order.contains(&key) {
            return Err(SceneError::DuplicateDrawable(key));
        }
        self.draw_order.push(key);
        Ok(())
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return Err(SceneError::SelfAttach(child));
        }
        for key in [parent, child] {
            if !self.nodes.contains_key(key) {
                return Err(SceneError::NodeNotFound(key));
            }
        }
        if self.root == Some(child) {
            return Err(SceneError::RootHasParent(child));
        }
        if is_ancestor(&self.nodes, child, parent) {
            return Err(SceneError::HierarchyCycle { child, parent });
        }

        // 1. Detach from old
        if let Some(old) = self.nodes[child].parent
            && let Some(old) = self.nodes.get_mut(old)
        {
            old.children.retain(|k| *k != child);
        }

        // 2. Attach to new
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
        Ok(())
    }

    /// Choose the node placement starts from. It must not have a parent.
    pub fn set_root(&mut self, key: NodeKey) -> Result<()> {
        let node = self.nodes.get(key).ok_or(SceneError::NodeNotFound(key))?;
        if node.parent.is_some() {
            return Err(SceneError::RootHasParent(key));
        }
        self.root = Some(key);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn node(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    #[must_use]
    pub fn find_node(&self, name: &str) -> Option<NodeKey> {
        self.by_name.get(name).copied()
    }

    /// All nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &SceneNode)> {
        self.nodes.iter()
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn draw_order(&self) -> &[NodeKey] {
        &self.draw_order
    }

    // ========================================================================
    // Placement, drawing, picking
    // ========================================================================

    /// Recompute every placed transform from the root, starting at the
    /// anchor with no rotation.
    pub fn place(&mut self) {
        if let Some(root) = self.root {
            place_subtree(&mut self.nodes, root, self.position, 0.0);
        }
    }

    /// Place, then hand each node to the renderer in draw order.
    /// Does nothing while disabled.
    pub fn draw<R: PartRenderer + ?Sized>(&mut self, renderer: &mut R) {
        if !self.enabled {
            return;
        }
        self.place();
        for key in &self.draw_order {
            if let Some(node) = self.nodes.get(*key) {
                renderer.draw_part(node);
            }
        }
    }

    /// The topmost node under `point`, using the transforms of the last
    /// placement. Disabled or unclickable actors are never hit.
    #[must_use]
    pub fn hit_test(&self, point: IVec2) -> Option<NodeKey> {
        if !self.clickable || !self.enabled {
            return None;
        }
        self.draw_order
            .iter()
            .rev()
            .copied()
            .find(|&key| self.nodes.get(key).is_some_and(|node| node.hit_test(point)))
    }

    /// Drag a node by a screen-space delta.
    pub fn move_node(&mut self, key: NodeKey, delta: IVec2) -> Result<()> {
        let parent = self.nodes.get(key).ok_or(SceneError::NodeNotFound(key))?.parent;
        let parent_rotation = parent
            .and_then(|p| self.nodes.get(p))
            .map(SceneNode::placed_rotation);
        self.nodes[key].move_by(delta, parent_rotation);
        Ok(())
    }

    // ========================================================================
    // Keyframes
    // ========================================================================

    /// Record the anchor position and every node's rotation at the current
    /// frame.
    pub fn set_keyframe(&mut self) {
        self.channel.set_keyframe(self.position);
        for node in self.nodes.values_mut() {
            node.set_keyframe();
        }
    }

    /// Pull animated values into the anchor and every node. Channels without
    /// keyframes leave their value alone.
    pub fn get_keyframe(&mut self) {
        if let Some(position) = self.channel.position() {
            self.position = position;
        }
        for node in self.nodes.values_mut() {
            node.get_keyframe();
        }
    }

    /// Record rotations for `key` and everything below it.
    pub fn set_subtree_keyframe(&mut self, key: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(key) {
            return Err(SceneError::NodeNotFound(key));
        }
        for k in subtree(&self.nodes, key) {
            self.nodes[k].set_keyframe();
        }
        Ok(())
    }

    /// Pull rotations for `key` and everything below it.
    pub fn get_subtree_keyframe(&mut self, key: NodeKey) -> Result<()> {
        if !self.nodes.contains_key(key) {
            return Err(SceneError::NodeNotFound(key));
        }
        for k in subtree(&self.nodes, key) {
            self.nodes[k].get_keyframe();
        }
        Ok(())
    }

    // ========================================================================
    // Scene membership
    // ========================================================================

    pub(crate) fn bind_key(&mut self, key: Option<ActorKey>) {
        self.key = key;
        for node in self.nodes.values_mut() {
            node.actor = key;
        }
    }

    /// Node keys whose channels a scene registers: draw order first, then
    /// nodes that are never drawn.
    pub(crate) fn channel_nodes(&self) -> Vec<NodeKey> {
        let mut keys = self.draw_order.clone();
        keys.extend(
            self.nodes
                .keys()
                .filter(|k| !self.draw_order.contains(k)),
        );
        keys
    }

    pub(crate) fn channel_mut(&mut self, node: Option<NodeKey>) -> Option<&mut dyn AnimChannel> {
        match node {
            None => Some(&mut self.channel as &mut dyn AnimChannel),
            Some(key) => self
                .nodes
                .get_mut(key)
                .map(|n| n.angle_channel_mut() as &mut dyn AnimChannel),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    fn body_with_arm() -> (Actor, NodeKey, NodeKey) {
        let mut actor = Actor::new("Harold");
        let body = actor.add_node(SceneNode::new("Body").with_position(IVec2::new(0, -100)));
        let arm = actor.add_node(SceneNode::new("Arm").with_position(IVec2::new(40, 0)));
        actor.set_root(body).unwrap();
        actor.add_child(body, arm).unwrap();
        (actor, body, arm)
    }

    #[test]
    fn defaults() {
        let actor = Actor::new("Jimbo");
        assert_eq!(actor.name(), "Jimbo");
        assert!(actor.is_enabled());
        assert!(actor.is_clickable());
        assert_eq!(actor.position(), IVec2::ZERO);
        assert!(actor.key().is_none());
    }

    #[test]
    fn channel_names_follow_actor() {
        let (actor, _, arm) = body_with_arm();
        assert_eq!(actor.node(arm).unwrap().angle_channel().name(), "Harold:Arm");
        assert_eq!(actor.position_channel().name(), "Harold");
        assert_eq!(actor.find_node("Arm"), Some(arm));
    }

    #[test]
    fn reparenting_detaches() {
        let (mut actor, body, arm) = body_with_arm();
        let hand = actor.add_node(SceneNode::new("Hand"));
        actor.add_child(arm, hand).unwrap();
        actor.add_child(body, hand).unwrap();

        assert!(actor.node(arm).unwrap().children().is_empty());
        assert_eq!(actor.node(body).unwrap().children(), &[arm, hand]);
        assert_eq!(actor.node(hand).unwrap().parent(), Some(body));
    }

    #[test]
    fn structural_misuse_is_rejected() {
        let (mut actor, body, arm) = body_with_arm();
        assert_eq!(actor.add_child(arm, arm), Err(SceneError::SelfAttach(arm)));
        assert_eq!(actor.add_child(arm, body), Err(SceneError::RootHasParent(body)));
        assert_eq!(actor.set_root(arm), Err(SceneError::RootHasParent(arm)));

        let hand = actor.add_node(SceneNode::new("Hand"));
        actor.add_child(arm, hand).unwrap();
        assert_eq!(
            actor.add_child(hand, arm),
            Err(SceneError::HierarchyCycle { child: arm, parent: hand })
        );

        actor.add_drawable(arm).unwrap();
        assert_eq!(actor.add_drawable(arm), Err(SceneError::DuplicateDrawable(arm)));
    }

    #[test]
    fn move_node_uses_parent_rotation() {
        let (mut actor, body, arm) = body_with_arm();
        actor.node_mut(body).unwrap().set_rotation(FRAC_PI_2);
        actor.place();

        actor.move_node(arm, IVec2::new(0, -10)).unwrap();
        // Screen "up" under a quarter-turned parent is local +x
        assert_eq!(actor.node(arm).unwrap().position(), IVec2::new(50, 0));
    }

    #[test]
    fn disabled_actor_is_not_drawn() {
        let (mut actor, body, arm) = body_with_arm();
        actor.add_drawable(arm).unwrap();
        actor.add_drawable(body).unwrap();

        let mut drawn = Vec::new();
        actor.draw(&mut |node: &SceneNode| drawn.push(node.name().to_string()));
        assert_eq!(drawn, vec!["Arm", "Body"]);

        actor.set_enabled(false);
        drawn.clear();
        actor.draw(&mut |node: &SceneNode| drawn.push(node.name().to_string()));
        assert!(drawn.is_empty());
    }

    #[test]
    fn subtree_keyframes_leave_siblings_alone() {
        let (mut actor, body, arm) = body_with_arm();
        actor.node_mut(body).unwrap().set_rotation(0.1);
        actor.node_mut(arm).unwrap().set_rotation(0.2);

        actor.set_subtree_keyframe(arm).unwrap();
        assert!(!actor.node(body).unwrap().angle_channel().is_valid());
        assert!(actor.node(arm).unwrap().angle_channel().is_valid());

        actor.node_mut(arm).unwrap().set_rotation(1.0);
        actor.get_subtree_keyframe(body).unwrap();
        assert_eq!(actor.node(arm).unwrap().rotation(), 0.2);
        assert_eq!(actor.node(body).unwrap().rotation(), 0.1);
    }
}
