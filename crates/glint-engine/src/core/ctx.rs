use crate::backend::GraphicsApi;
use crate::fs::FileSystem;
use crate::renderer::Renderer;
use crate::time::FrameTime;

/// Drawable area size in pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for a zero-height canvas.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Full-canvas viewport in the signed form GL expects.
    pub fn viewport(&self) -> (i32, i32, i32, i32) {
        (0, 0, self.width as i32, self.height as i32)
    }
}

/// Context passed to [`App`](super::App) callbacks.
///
/// Event callbacks see the time of the most recent frame (dt 0 before the
/// first one).
pub struct FrameCtx<'a, B: GraphicsApi, F: FileSystem> {
    pub renderer: &'a mut Renderer<B, F>,
    pub time: FrameTime,
    pub canvas: CanvasSize,
}

impl<B: GraphicsApi, F: FileSystem> FrameCtx<'_, B, F> {
    /// Binds the default framebuffer with a full-canvas viewport.
    pub fn bind_canvas(&mut self) {
        let (x, y, w, h) = self.canvas.viewport();
        self.renderer.set_default_framebuffer();
        self.renderer.set_viewport(x, y, w, h);
    }
}
