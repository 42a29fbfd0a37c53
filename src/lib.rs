//! Marionette: a 2D keyframe animation engine.
//!
//! Channels hold keyframes and resolve one value per frame. A timeline
//! pushes frames to every registered channel. Actors pull the resolved
//! values into their nodes, and a placement pass composes the node tree
//! into absolute screen transforms.
//!
//! ```
//! use marionette::{Actor, IVec2, Scene, SceneNode};
//!
//! let mut scene = Scene::new();
//! let mut actor = Actor::new("Bob");
//! let body = actor.add_node(SceneNode::new("Body"));
//! actor.set_root(body).unwrap();
//! let bob = scene.add_actor(actor).unwrap();
//!
//! scene.set_animation_time(1.0);
//! let actor = scene.actor_mut(bob).unwrap();
//! actor.set_position(IVec2::new(100, 200));
//! actor.set_keyframe();
//!
//! scene.set_animation_time(0.0);
//! assert_eq!(scene.actor(bob).unwrap().position(), IVec2::new(100, 200));
//! ```

pub use marionette_animation as animation;
pub use marionette_scene as scene;

pub use glam::{DVec2, IVec2, UVec2};

pub use animation::{
    AnimChannel, AngleChannel, AnimationError, Channel, ChannelRegistry, Interpolatable, Keyframe,
    PositionChannel, Timeline, TimelineId, TimelineSettings,
};
pub use scene::{
    Actor, ActorKey, AddActorError, ChannelHandle, NodeKey, ObserverKey, Part, PartRenderer, Rgb,
    Scene, SceneError, SceneEvent, SceneNode, SceneObserver, SceneSettings,
};
