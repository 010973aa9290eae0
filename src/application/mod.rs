//! Application layer: session state and presentation helpers
//!
//! This layer drives the domain algorithms and owns all mutable view state.

pub mod error;
pub mod playback;
pub mod session;
pub mod view;

pub use error::{ApplicationError, ApplicationResult};
pub use playback::{PlaybackStep, TraversalPlayback};
pub use session::{Mode, TreeSession};
pub use view::{RenderOptions, ViewState};
