//! Scene
//!
//! The container that owns one timeline and the actors it animates.
//!
//! Channels stay inside their actors and nodes. The timeline refers to them
//! through [`ChannelHandle`]s, which the scene's cast resolves on demand.
//! This keeps the timeline and the actors in separate fields, so a time
//! change can borrow both mutably at once.

use std::fmt;

use glam::{IVec2, UVec2};
use marionette_animation::{AnimChannel, ChannelRegistry, Timeline};
use slotmap::SlotMap;

use crate::actor::Actor;
use crate::errors::{AddActorError, Result, SceneError};
use crate::render::PartRenderer;
use crate::settings::SceneSettings;
use crate::{ActorKey, NodeKey, ObserverKey};

/// Names one channel owned by an actor in a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelHandle {
    /// The actor's anchor position channel.
    Anchor(ActorKey),
    /// A node's rotation channel.
    Node(ActorKey, NodeKey),
}

impl ChannelHandle {
    #[inline]
    #[must_use]
    pub fn actor(self) -> ActorKey {
        match self {
            ChannelHandle::Anchor(actor) | ChannelHandle::Node(actor, _) => actor,
        }
    }
}

/// What changed in a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// Animation time moved; carries the new time in seconds.
    TimeChanged(f64),
    /// Frame count or frame rate changed.
    TimelineChanged,
    ActorAdded(ActorKey),
    ActorRemoved(ActorKey),
    /// Anything else worth a redraw.
    Modified,
}

/// Receives scene change notifications, typically to trigger a repaint.
pub trait SceneObserver {
    fn update_observer(&mut self, event: &SceneEvent);
}

impl<F: FnMut(&SceneEvent)> SceneObserver for F {
    fn update_observer(&mut self, event: &SceneEvent) {
        self(event);
    }
}

/// Actors in insertion order.
#[derive(Debug, Default)]
struct Cast {
    actors: SlotMap<ActorKey, Actor>,
    order: Vec<ActorKey>,
}

impl ChannelRegistry<ChannelHandle> for Cast {
    fn channel_mut(&mut self, handle: ChannelHandle) -> Option<&mut dyn AnimChannel> {
        match handle {
            ChannelHandle::Anchor(actor) => self.actors.get_mut(actor)?.channel_mut(None),
            ChannelHandle::Node(actor, node) => self.actors.get_mut(actor)?.channel_mut(Some(node)),
        }
    }
}

pub struct Scene {
    size: UVec2,
    timeline: Timeline<ChannelHandle>,
    cast: Cast,
    observers: SlotMap<ObserverKey, Box<dyn SceneObserver>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("size", &self.size)
            .field("timeline", &self.timeline)
            .field("actors", &self.cast.order.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Scene {
    /// An empty 1500x800 scene with a 300 frame, 30 fps timeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            size: SceneSettings::default().size,
            timeline: Timeline::new(),
            cast: Cast::default(),
            observers: SlotMap::with_key(),
        }
    }

    pub fn with_settings(settings: SceneSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            size: settings.size,
            timeline: Timeline::with_settings(settings.timeline)?,
            cast: Cast::default(),
            observers: SlotMap::with_key(),
        })
    }

    #[must_use]
    pub fn settings(&self) -> SceneSettings {
        SceneSettings {
            size: self.size,
            timeline: self.timeline.settings(),
        }
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn set_size(&mut self, size: UVec2) -> Result<()> {
        if size.x == 0 || size.y == 0 {
            return Err(SceneError::InvalidSize(size));
        }
        self.size = size;
        self.update_observers(SceneEvent::Modified);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn timeline(&self) -> &Timeline<ChannelHandle> {
        &self.timeline
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Move the animation to `time` seconds and pose every actor for it.
    pub fn set_animation_time(&mut self, time: f64) {
        self.sync_to(time);
        self.update_observers(SceneEvent::TimeChanged(self.timeline.current_time()));
    }

    pub fn set_frame_count(&mut self, frame_count: u32) -> Result<()> {
        self.timeline.set_frame_count(frame_count)?;
        self.sync_to(self.timeline.current_time());
        self.update_observers(SceneEvent::TimelineChanged);
        Ok(())
    }

    /// Change the frame rate. The current time in seconds is kept, so
    /// channels see a new frame.
    pub fn set_frame_rate(&mut self, frame_rate: u32) -> Result<()> {
        self.timeline.set_frame_rate(frame_rate)?;
        self.sync_to(self.timeline.current_time());
        self.update_observers(SceneEvent::TimelineChanged);
        Ok(())
    }

    fn sync_to(&mut self, time: f64) {
        self.timeline.set_current_time(time, &mut self.cast);
        for key in &self.cast.order {
            if let Some(actor) = self.cast.actors.get_mut(*key) {
                actor.get_keyframe();
            }
        }
    }

    // ========================================================================
    // Actors
    // ========================================================================

    /// Add an actor and register its anchor channel and every node channel
    /// with the timeline.
    ///
    /// On failure the scene is left as it was, observers hear nothing, and
    /// the actor comes back inside the error.
    pub fn add_actor(&mut self, actor: Actor) -> std::result::Result<ActorKey, AddActorError> {
        let key = self.cast.actors.insert(actor);
        self.cast.order.push(key);
        self.cast.actors[key].bind_key(Some(key));

        if let Err(source) = self.register_channels(key) {
            let Some(actor) = self.take_actor(key) else {
                unreachable!("actor {key:?} was inserted above");
            };
            log::warn!("Actor '{}' could not join the scene: {source}", actor.name());
            return Err(AddActorError {
                actor: Box::new(actor),
                source,
            });
        }

        self.cast.actors[key].get_keyframe();
        log::debug!(
            "Added actor '{}' with {} channels",
            self.cast.actors[key].name(),
            self.cast.actors[key].node_count() + 1
        );
        self.update_observers(SceneEvent::ActorAdded(key));
        Ok(key)
    }

    /// Register channels of nodes added to an actor after it joined the
    /// scene. Channels that are already registered are left alone.
    pub fn register_channels(&mut self, key: ActorKey) -> Result<()> {
        let actor = self.cast.actors.get(key).ok_or(SceneError::ActorNotFound(key))?;

        let handles: Vec<ChannelHandle> = std::iter::once(ChannelHandle::Anchor(key))
            .chain(actor.channel_nodes().into_iter().map(|n| ChannelHandle::Node(key, n)))
            .filter(|h| !self.timeline.channels().contains(h))
            .collect();

        for handle in handles {
            self.timeline.add_channel(handle, &mut self.cast)?;
        }
        Ok(())
    }

    /// Remove an actor, unregistering all of its channels.
    pub fn remove_actor(&mut self, key: ActorKey) -> Option<Actor> {
        let actor = self.take_actor(key)?;
        self.update_observers(SceneEvent::ActorRemoved(key));
        Some(actor)
    }

    /// Unregister and detach an actor without notifying observers.
    fn take_actor(&mut self, key: ActorKey) -> Option<Actor> {
        if !self.cast.actors.contains_key(key) {
            return None;
        }

        let handles: Vec<ChannelHandle> = self
            .timeline
            .channels()
            .iter()
            .copied()
            .filter(|h| h.actor() == key)
            .collect();
        for handle in handles {
            self.timeline.remove_channel(handle, &mut self.cast);
        }

        self.cast.order.retain(|k| *k != key);
        let mut actor = self.cast.actors.remove(key)?;
        actor.bind_key(None);
        Some(actor)
    }

    #[inline]
    #[must_use]
    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.cast.actors.get(key)
    }

    #[inline]
    pub fn actor_mut(&mut self, key: ActorKey) -> Option<&mut Actor> {
        self.cast.actors.get_mut(key)
    }

    #[must_use]
    pub fn find_actor(&self, name: &str) -> Option<ActorKey> {
        self.iter().find(|(_, a)| a.name() == name).map(|(k, _)| k)
    }

    /// Actors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ActorKey, &Actor)> {
        self.cast
            .order
            .iter()
            .filter_map(|&k| self.cast.actors.get(k).map(|a| (k, a)))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cast.order.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cast.order.is_empty()
    }

    // ========================================================================
    // Drawing and picking
    // ========================================================================

    /// Draw every actor in insertion order, so later actors end up on top.
    pub fn draw<R: PartRenderer + ?Sized>(&mut self, renderer: &mut R) {
        for key in &self.cast.order {
            if let Some(actor) = self.cast.actors.get_mut(*key) {
                actor.draw(renderer);
            }
        }
    }

    /// The topmost node under `point`, testing the last drawn actor first.
    #[must_use]
    pub fn hit_test(&self, point: IVec2) -> Option<(ActorKey, NodeKey)> {
        self.cast.order.iter().rev().find_map(|&key| {
            let node = self.cast.actors.get(key)?.hit_test(point)?;
            Some((key, node))
        })
    }

    // ========================================================================
    // Observers
    // ========================================================================

    pub fn add_observer(&mut self, observer: Box<dyn SceneObserver>) -> ObserverKey {
        self.observers.insert(observer)
    }

    pub fn remove_observer(&mut self, key: ObserverKey) -> bool {
        self.observers.remove(key).is_some()
    }

    #[inline]
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Tell every observer about `event`.
    pub fn update_observers(&mut self, event: SceneEvent) {
        for observer in self.observers.values_mut() {
            observer.update_observer(&event);
        }
    }
}
