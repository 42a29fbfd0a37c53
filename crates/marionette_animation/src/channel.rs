// src/channel.rs
use glam::IVec2;

use crate::timeline::TimelineId;
use crate::values::Interpolatable;

const MAX_SCAN_OFFSET: usize = 3;

/// A recorded value at a specific frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<V> {
    pub frame: u32,
    pub value: V,
}

/// The keyframes (by index) that supplied the most recently resolved value.
///
/// Only meaningful between a frame push and the next structural change to
/// the channel; any insertion or removal drops it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// One keyframe supplies the value: the only key, an exact hit, or a
    /// clamp before the first / after the last key.
    Only(usize),
    /// Two frame-adjacent keyframes surround the playback frame.
    Between(usize, usize),
}

impl Bracket {
    #[inline]
    fn first(self) -> usize {
        match self {
            Bracket::Only(i) | Bracket::Between(i, _) => i,
        }
    }
}

/// The part of a channel a [`Timeline`](crate::Timeline) talks to.
///
/// Object safe so a timeline can drive channels of every value kind through
/// one registration list.
pub trait AnimChannel {
    fn name(&self) -> &str;

    /// True once at least one keyframe exists.
    fn is_valid(&self) -> bool;

    /// The timeline this channel is registered with, if any.
    fn timeline(&self) -> Option<TimelineId>;

    /// Set or clear the timeline back-reference. Called by the timeline
    /// during (un)registration.
    fn bind_timeline(&mut self, timeline: Option<TimelineId>);

    /// Resolve the value at a possibly fractional frame position.
    fn set_frame_position(&mut self, position: f64);

    /// Resolve the value at a whole frame.
    fn set_frame(&mut self, frame: u32) {
        self.set_frame_position(f64::from(frame));
    }
}

/// An animated parameter track: ordered keyframes plus the value resolved
/// for the current frame.
///
/// Keyframes are kept sorted by frame with at most one keyframe per frame.
#[derive(Debug, Clone, Default)]
pub struct Channel<V: Interpolatable> {
    name: String,
    keyframes: Vec<Keyframe<V>>,
    bracket: Option<Bracket>,
    value: V,
    frame: u32,
    timeline: Option<TimelineId>,
}

/// Channel animating a rotation in radians.
pub type AngleChannel = Channel<f64>;

/// Channel animating an integer 2D position.
pub type PositionChannel = Channel<IVec2>;

impl<V: Interpolatable> Channel<V> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyframes: Vec::new(),
            bracket: None,
            value: V::default(),
            frame: 0,
            timeline: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// True once at least one keyframe exists. Only a valid channel has a
    /// value to report.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.keyframes.is_empty()
    }

    /// Keyframes in frame order.
    #[inline]
    #[must_use]
    pub fn keyframes(&self) -> &[Keyframe<V>] {
        &self.keyframes
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// The whole frame most recently pushed to this channel. New keyframes
    /// recorded through [`Channel::set_keyframe`] land here.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> u32 {
        self.frame
    }

    #[inline]
    #[must_use]
    pub fn bracket(&self) -> Option<Bracket> {
        self.bracket
    }

    #[inline]
    #[must_use]
    pub fn timeline(&self) -> Option<TimelineId> {
        self.timeline
    }

    /// The resolved value, or `None` while the channel has no keyframes.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<V> {
        self.is_valid().then_some(self.value)
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Insert a keyframe. A keyframe already at `frame` is replaced.
    pub fn insert_keyframe(&mut self, frame: u32, value: V) {
        match self.keyframes.binary_search_by_key(&frame, |k| k.frame) {
            Ok(index) => self.keyframes[index].value = value,
            Err(index) => self.keyframes.insert(index, Keyframe { frame, value }),
        }
        self.bracket = None;
        log::debug!("Channel '{}': keyframe at frame {frame} = {value:?}", self.name);
    }

    /// Record whatever value the channel currently holds at `frame`.
    pub fn capture_keyframe(&mut self, frame: u32) {
        self.insert_keyframe(frame, self.value);
    }

    /// Make `value` the current value and record it at the current frame.
    pub fn set_keyframe(&mut self, value: V) {
        self.value = value;
        self.insert_keyframe(self.frame, value);
    }

    /// Remove the keyframe at `frame`, if there is one.
    pub fn remove_keyframe(&mut self, frame: u32) -> Option<Keyframe<V>> {
        let index = self
            .keyframes
            .binary_search_by_key(&frame, |k| k.frame)
            .ok()?;
        self.bracket = None;
        Some(self.keyframes.remove(index))
    }

    /// Drop every keyframe. The channel becomes invalid; the last resolved
    /// value is kept.
    pub fn clear(&mut self) {
        self.keyframes.clear();
        self.bracket = None;
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Resolve the value at a whole frame.
    pub fn set_frame(&mut self, frame: u32) {
        self.set_frame_position(f64::from(frame));
    }

    /// Resolve the value at a frame position such as `time * frame_rate`.
    ///
    /// The bracket and the exact-hit check use the whole frame
    /// `floor(position)`; only the tween parameter `t` uses the fractional
    /// position. A position in `[k, k + 1)` after keyframe `k` therefore
    /// holds `k`'s value, and the tween starts at `k + 1`.
    /// Frames before the first keyframe or after the last clamp to that
    /// keyframe's value. With no keyframes nothing changes.
    pub fn set_frame_position(&mut self, position: f64) {
        let position = if position.is_finite() { position.max(0.0) } else { 0.0 };
        let frame = position.floor() as u32;
        self.frame = frame;

        if self.keyframes.is_empty() {
            self.bracket = None;
            return;
        }

        let bracket = self.locate(frame);
        self.bracket = Some(bracket);

        self.value = match bracket {
            Bracket::Only(index) => self.keyframes[index].value,
            Bracket::Between(a, b) => {
                let k1 = self.keyframes[a];
                let k2 = self.keyframes[b];
                let span = f64::from(k2.frame - k1.frame);
                let t = ((position - f64::from(k1.frame)) / span).clamp(0.0, 1.0);
                V::interpolate_linear(k1.value, k2.value, t)
            }
        };
    }

    /// Find the bracket for `frame`, starting the search at the previous
    /// bracket.
    fn locate(&self, frame: u32) -> Bracket {
        let len = self.keyframes.len();

        if len == 1 || frame <= self.keyframes[0].frame {
            return Bracket::Only(0);
        }
        if frame >= self.keyframes[len - 1].frame {
            return Bracket::Only(len - 1);
        }

        // first.frame < frame < last.frame: some segment [i, i+1) holds it.
        let hint = self.bracket.map_or(0, Bracket::first).min(len - 2);
        let index = self.scan_from(hint, frame).unwrap_or_else(|| {
            // Large jump (scrubbing): binary search.
            self.keyframes.partition_point(|k| k.frame <= frame) - 1
        });

        if self.keyframes[index].frame == frame {
            Bracket::Only(index)
        } else {
            Bracket::Between(index, index + 1)
        }
    }

    /// Short linear scan around `hint` for the segment holding `frame`.
    /// Playback usually moves by a frame or two, so this hits most of the
    /// time.
    fn scan_from(&self, hint: usize, frame: u32) -> Option<usize> {
        let keys = &self.keyframes;
        if keys[hint].frame <= frame {
            let end = (hint + MAX_SCAN_OFFSET + 1).min(keys.len() - 1);
            (hint..end).find(|&idx| frame < keys[idx + 1].frame)
        } else {
            let start = hint.saturating_sub(MAX_SCAN_OFFSET);
            (start..hint).rev().find(|&idx| keys[idx].frame <= frame)
        }
    }
}

impl Channel<f64> {
    /// The resolved angle in radians, or `None` while invalid.
    #[inline]
    #[must_use]
    pub fn angle(&self) -> Option<f64> {
        self.value()
    }
}

impl Channel<IVec2> {
    /// The resolved position, or `None` while invalid.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Option<IVec2> {
        self.value()
    }
}

impl<V: Interpolatable> AnimChannel for Channel<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        Channel::is_valid(self)
    }

    fn timeline(&self) -> Option<TimelineId> {
        self.timeline
    }

    fn bind_timeline(&mut self, timeline: Option<TimelineId>) {
        self.timeline = timeline;
    }

    fn set_frame_position(&mut self, position: f64) {
        Channel::set_frame_position(self, position);
    }
}
