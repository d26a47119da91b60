//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, pointer)
//! - Frame timing
//!
//! Storage lives in `persistence`, drawing in `renderer`.

pub mod input;
pub mod time;

pub use input::{InputEvent, InputState, Key};
pub use time::FrameClock;
