//! Actors, scene nodes and hierarchical 2D placement.
//!
//! - [`SceneNode`]: one part of an actor, with a local transform and a
//!   rotation channel
//! - [`Actor`]: a named aggregate of nodes with an animated anchor
//! - [`Scene`]: owns the timeline and the actors it drives

pub mod actor;
pub mod errors;
pub mod node;
pub mod part;
pub mod placement;
pub mod render;
pub mod scene;
pub mod settings;
pub mod transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct ActorKey;
    pub struct NodeKey;
    pub struct ObserverKey;
}

pub use actor::Actor;
pub use errors::{AddActorError, Result, SceneError};
pub use node::SceneNode;
pub use part::{Part, Rgb};
pub use render::PartRenderer;
pub use scene::{ChannelHandle, Scene, SceneEvent, SceneObserver};
pub use settings::SceneSettings;
