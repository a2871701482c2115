//! State machine engines for lofidoro.
//!
//! - `timer`: work/break countdown with phase-flip transitions
//! - `playback`: playlist navigation, play/pause and volume control
//!
//! The two engines are independent: neither reads or writes the other's
//! state. Both report changes through unbounded event channels consumed by
//! the application loop.

pub mod playback;
pub mod timer;

pub use playback::{PlaybackEngine, PlayerEvent};
pub use timer::{TimerEngine, TimerEvent};
