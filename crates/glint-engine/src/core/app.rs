use crate::backend::GraphicsApi;
use crate::fs::{DiskFs, FileSystem};
use crate::input::InputEvent;
use crate::renderer::Renderer;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`FrameDriver`](super::FrameDriver).
pub trait App<B: GraphicsApi, F: FileSystem = DiskFs> {
    /// Creates the app's resources. Called once, before any event or frame.
    fn setup(&mut self, renderer: &mut Renderer<B, F>) -> anyhow::Result<()>;

    /// Called for every dispatched input event.
    fn on_event(&mut self, ctx: &mut FrameCtx<'_, B, F>, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called once per frame, after live-reload polling.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, B, F>) -> AppControl;
}
