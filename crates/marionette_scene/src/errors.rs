//! Error Types
//!
//! Structural mistakes made while assembling actors or wiring them into a
//! scene. Reading an unanimated node or scrubbing past the end of the
//! timeline are not errors; they fall back to the current or clamped value.

use glam::UVec2;
use marionette_animation::AnimationError;
use thiserror::Error;

use crate::actor::Actor;
use crate::{ActorKey, NodeKey};

/// The error type for actor assembly and scene operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    // ========================================================================
    // Hierarchy
    // ========================================================================
    /// The key does not name a node of this actor.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeKey),

    /// A node cannot be its own child.
    #[error("Cannot attach node {0:?} to itself")]
    SelfAttach(NodeKey),

    /// Attaching would make a node its own ancestor.
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle {
        /// Node being attached
        child: NodeKey,
        /// Requested parent, currently a descendant of `child`
        parent: NodeKey,
    },

    /// The actor root must not have a parent.
    #[error("Root node {0:?} must not have a parent")]
    RootHasParent(NodeKey),

    /// Each node appears at most once in the draw order.
    #[error("Node {0:?} is already in the draw order")]
    DuplicateDrawable(NodeKey),

    // ========================================================================
    // Scene
    // ========================================================================
    #[error("Actor not found: {0:?}")]
    ActorNotFound(ActorKey),

    #[error("Invalid scene size: {0} (both dimensions must be non-zero)")]
    InvalidSize(UVec2),

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Returned by [`Scene::add_actor`](crate::Scene::add_actor) when the actor
/// cannot join. Nothing of the actor is left in the scene, and it is handed
/// back unchanged apart from its channel bindings.
#[derive(Error, Debug)]
#[error("Actor '{}' could not join the scene: {source}", .actor.name())]
pub struct AddActorError {
    pub actor: Box<Actor>,
    pub source: SceneError,
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
