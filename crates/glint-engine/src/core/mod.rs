//! Application lifecycle.
//!
//! A window layer owns the platform loop; this module defines what it calls
//! into. [`FrameDriver`] holds the [`Renderer`](crate::renderer::Renderer)
//! and the [`App`], polls for shader changes once per frame and hands each
//! callback an explicit [`FrameCtx`].

mod app;
mod ctx;
mod driver;

pub use app::{App, AppControl};
pub use ctx::{CanvasSize, FrameCtx};
pub use driver::FrameDriver;
