//! Timeline
//!
//! Owns the global animation clock and fans every time change out to the
//! channels registered with it.
//!
//! The timeline never owns channels. It keeps opaque handles and resolves
//! them through a [`ChannelRegistry`] supplied by the caller at the moment
//! of use, so channels can live wherever their owners keep them (inside
//! actors, scene nodes, a plain arena) and an owner that disappears only
//! leaves a stale handle behind, never a dangling pointer.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU32, Ordering};

use slotmap::{Key, SlotMap};

use crate::channel::AnimChannel;
use crate::errors::{AnimationError, Result};
use crate::settings::TimelineSettings;

static NEXT_TIMELINE_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of a timeline, stored as the back-reference in each channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimelineId(u32);

/// Resolves channel handles to the channels they name.
pub trait ChannelRegistry<H> {
    /// The channel behind `handle`, or `None` if it no longer exists.
    fn channel_mut(&mut self, handle: H) -> Option<&mut dyn AnimChannel>;
}

/// A slot map of channels is the simplest registry: handles are its keys.
impl<K: Key, C: AnimChannel> ChannelRegistry<K> for SlotMap<K, C> {
    fn channel_mut(&mut self, handle: K) -> Option<&mut dyn AnimChannel> {
        self.get_mut(handle).map(|c| c as &mut dyn AnimChannel)
    }
}

/// Global animation time plus the list of channels it drives.
///
/// `H` is the handle type the owner uses to name channels.
#[derive(Debug)]
pub struct Timeline<H> {
    id: TimelineId,
    frame_count: u32,
    frame_rate: u32,
    current_time: f64,
    channels: Vec<H>,
}

impl<H: Copy + PartialEq + Debug> Default for Timeline<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Copy + PartialEq + Debug> Timeline<H> {
    /// A timeline with default settings (300 frames at 30 fps).
    #[must_use]
    pub fn new() -> Self {
        let settings = TimelineSettings::default();
        Self {
            id: TimelineId(NEXT_TIMELINE_ID.fetch_add(1, Ordering::Relaxed)),
            frame_count: settings.frame_count,
            frame_rate: settings.frame_rate,
            current_time: 0.0,
            channels: Vec::new(),
        }
    }

    pub fn with_settings(settings: TimelineSettings) -> Result<Self> {
        settings.validate()?;
        let mut timeline = Self::new();
        timeline.frame_count = settings.frame_count;
        timeline.frame_rate = settings.frame_rate;
        Ok(timeline)
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> TimelineId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> TimelineSettings {
        TimelineSettings {
            frame_count: self.frame_count,
            frame_rate: self.frame_rate,
        }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn set_frame_count(&mut self, frame_count: u32) -> Result<()> {
        if frame_count == 0 {
            return Err(AnimationError::InvalidFrameCount(frame_count));
        }
        self.frame_count = frame_count;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, frame_rate: u32) -> Result<()> {
        if frame_rate == 0 {
            return Err(AnimationError::InvalidFrameRate(frame_rate));
        }
        self.frame_rate = frame_rate;
        Ok(())
    }

    /// Length of the animation in seconds.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f64 {
        f64::from(self.frame_count) / f64::from(self.frame_rate)
    }

    /// Current animation time in seconds.
    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// The whole frame for the current time.
    #[inline]
    #[must_use]
    pub fn current_frame(&self) -> u32 {
        self.frame_position().floor() as u32
    }

    /// The current time measured in (fractional) frames.
    #[inline]
    #[must_use]
    pub fn frame_position(&self) -> f64 {
        self.current_time * f64::from(self.frame_rate)
    }

    /// Registered handles, in registration order.
    #[inline]
    #[must_use]
    pub fn channels(&self) -> &[H] {
        &self.channels
    }

    // ========================================================================
    // Time
    // ========================================================================

    /// Set the current time and push the resulting frame to every channel.
    ///
    /// Negative or non-finite times become 0. There is no upper clamp:
    /// channels clamp at their last keyframe on their own.
    pub fn set_current_time<R>(&mut self, time: f64, registry: &mut R)
    where
        R: ChannelRegistry<H> + ?Sized,
    {
        self.current_time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        let position = self.frame_position();
        log::debug!(
            "Timeline {:?}: time {:.3}s (frame {})",
            self.id,
            self.current_time,
            self.current_frame()
        );

        for &handle in &self.channels {
            match registry.channel_mut(handle) {
                Some(channel) => channel.set_frame_position(position),
                None => log::warn!("Timeline {:?}: stale channel handle {handle:?}", self.id),
            }
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register a channel and point its back-reference at this timeline.
    ///
    /// The channel is synced to the current frame right away. Registering a
    /// handle twice is a no-op; a channel bound to a different timeline is
    /// rejected.
    pub fn add_channel<R>(&mut self, handle: H, registry: &mut R) -> Result<()>
    where
        R: ChannelRegistry<H> + ?Sized,
    {
        let position = self.frame_position();
        let Some(channel) = registry.channel_mut(handle) else {
            return Err(AnimationError::ChannelNotFound(format!("{handle:?}")));
        };

        match channel.timeline() {
            Some(bound) if bound != self.id => {
                return Err(AnimationError::ChannelAlreadyBound {
                    name: channel.name().to_string(),
                    bound,
                });
            }
            Some(_) if self.channels.contains(&handle) => {
                log::warn!("Channel '{}' is already registered, ignoring", channel.name());
                return Ok(());
            }
            _ => {}
        }

        channel.bind_timeline(Some(self.id));
        channel.set_frame_position(position);
        self.channels.push(handle);
        Ok(())
    }

    /// Unregister a channel and clear its back-reference.
    /// Returns `false` if the handle was not registered.
    pub fn remove_channel<R>(&mut self, handle: H, registry: &mut R) -> bool
    where
        R: ChannelRegistry<H> + ?Sized,
    {
        let Some(pos) = self.channels.iter().position(|&h| h == handle) else {
            return false;
        };
        self.channels.remove(pos);

        if let Some(channel) = registry.channel_mut(handle)
            && channel.timeline() == Some(self.id)
        {
            channel.bind_timeline(None);
        }
        true
    }
}
