use std::time::Instant;

use anyhow::Context as _;
use log::debug;

use crate::backend::GraphicsApi;
use crate::fs::{DiskFs, FileSystem};
use crate::input::InputEvent;
use crate::renderer::{ReloadReport, Renderer};
use crate::time::{FrameClock, FrameTime};

use super::app::{App, AppControl};
use super::ctx::{CanvasSize, FrameCtx};

/// Owns a [`Renderer`] and an [`App`] and runs the app's callbacks.
///
/// The window layer feeds it translated [`InputEvent`]s through
/// [`dispatch`](Self::dispatch) and calls [`frame`](Self::frame) once per
/// presented frame. Nothing is stored globally; every callback receives an
/// explicit [`FrameCtx`].
pub struct FrameDriver<A, B, F = DiskFs>
where
    A: App<B, F>,
    B: GraphicsApi,
    F: FileSystem,
{
    app: A,
    renderer: Renderer<B, F>,
    clock: FrameClock,
    time: FrameTime,
    canvas: CanvasSize,
    last_reload: ReloadReport,
}

impl<A, B, F> FrameDriver<A, B, F>
where
    A: App<B, F>,
    B: GraphicsApi,
    F: FileSystem,
{
    /// Runs `app.setup` against `renderer` and starts the frame clock.
    pub fn new(
        mut app: A,
        mut renderer: Renderer<B, F>,
        canvas: CanvasSize,
    ) -> anyhow::Result<Self> {
        app.setup(&mut renderer).context("application setup failed")?;
        debug!(
            "app ready: {} shaders, {} textures, {} meshes",
            renderer.shader_count(),
            renderer.texture_count(),
            renderer.mesh_count()
        );

        Ok(Self {
            app,
            renderer,
            clock: FrameClock::new(),
            time: FrameTime { dt: 0.0, now: Instant::now(), frame_index: 0 },
            canvas,
            last_reload: ReloadReport::default(),
        })
    }

    /// Routes one input event to the app. `Resized` updates the canvas first.
    pub fn dispatch(&mut self, event: &InputEvent) -> AppControl {
        if let InputEvent::Resized { width, height } = *event {
            self.canvas = CanvasSize::new(width, height);
        }
        let mut ctx = FrameCtx {
            renderer: &mut self.renderer,
            time: self.time,
            canvas: self.canvas,
        };
        self.app.on_event(&mut ctx, event)
    }

    /// Polls for shader changes once, then runs the app's frame callback.
    pub fn frame(&mut self) -> AppControl {
        self.last_reload = self.renderer.poll_live_reload();
        self.time = self.clock.tick();
        let mut ctx = FrameCtx {
            renderer: &mut self.renderer,
            time: self.time,
            canvas: self.canvas,
        };
        self.app.on_frame(&mut ctx)
    }

    /// What the most recent [`frame`](Self::frame) reloaded.
    pub fn last_reload(&self) -> &ReloadReport {
        &self.last_reload
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn renderer(&self) -> &Renderer<B, F> {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer<B, F> {
        &mut self.renderer
    }

    /// Tears the driver apart; dropping the renderer releases GPU objects.
    pub fn into_parts(self) -> (A, Renderer<B, F>) {
        (self.app, self.renderer)
    }
}
