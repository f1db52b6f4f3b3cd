pub mod animation;
pub mod completion;
pub mod config;
pub mod driver;
pub mod easing;
pub mod error;
pub mod scheduler;
pub mod timing;

pub use animation::{
    AnimationController, AnimationOptions, AnimationStatus, Control, PlaybackState, TickOutcome,
};
pub use completion::Completion;
pub use config::{AnimationConfig, AppConfig};
pub use driver::FrameLoop;
pub use easing::Easing;
pub use error::{Error, Result};
pub use scheduler::{FrameQueue, FrameScheduler};
pub use timing::{Clock, ManualClock, MonotonicClock};
