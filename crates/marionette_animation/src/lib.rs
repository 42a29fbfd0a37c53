//! Keyframe animation primitives.
//!
//! - [`Channel`]: an ordered keyframe track resolving one value per frame
//! - [`Timeline`]: the global clock that pushes frames to its channels

pub mod channel;
pub mod errors;
pub mod settings;
pub mod timeline;
mod values;

pub use channel::{AnimChannel, AngleChannel, Bracket, Channel, Keyframe, PositionChannel};
pub use errors::{AnimationError, Result};
pub use settings::TimelineSettings;
pub use timeline::{ChannelRegistry, Timeline, TimelineId};
pub use values::Interpolatable;
