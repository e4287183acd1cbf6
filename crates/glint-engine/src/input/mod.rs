//! Input events.
//!
//! The public API is platform-agnostic: no window-system types appear here.
//! Window integration code translates platform events into [`InputEvent`]s.

mod types;

pub use types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, MouseWheelDelta};
