//! The renderer: resource tables, creation, binding and draw calls, and
//! shader live reload.
//!
//! Everything is addressed by typed handles. A handle never changes meaning
//! while the renderer lives; live reload swaps the program behind a shader
//! handle and bumps its generation instead.
//!
//! # Frame contract
//!
//! Call [`Renderer::poll_live_reload`] once per frame before drawing.
//! [`FrameDriver`](crate::core::FrameDriver) does this for you.

mod config;
mod create;
mod draw;
mod live_reload;

use std::collections::BTreeMap;

use crate::backend::{BufferTarget, GraphicsApi};
use crate::error::{RenderError, Result};
use crate::fs::{DiskFs, FileSystem};
use crate::resources::{
    Arena,
    Framebuffer,
    Mesh,
    MeshHandle,
    Renderbuffer,
    ShaderHandle,
    ShaderProgram,
    Texture,
    TextureHandle,
    kind,
};

pub use config::{CubemapMips, RendererConfig};
pub use live_reload::{ReloadReport, ShaderTrackingInfo};

/// Corner indices of the two screen-quad triangles, stored as floats.
const QUAD_CORNERS: [f32; 6] = [0.0, 1.0, 2.0, 0.0, 2.0, 3.0];

/// Upper bound on flags drained by one `clear_errors`; a lost context keeps
/// reporting forever.
const MAX_STALE_ERRORS: usize = 16;

pub struct Renderer<B: GraphicsApi, F: FileSystem = DiskFs> {
    api: B,
    fs: F,
    config: RendererConfig,

    textures: Arena<kind::Texture, Texture<B>>,
    shaders: Arena<kind::Shader, ShaderProgram<B>>,
    meshes: Arena<kind::Mesh, Mesh<B>>,
    framebuffers: Arena<kind::Framebuffer, Framebuffer<B>>,
    renderbuffers: Arena<kind::Renderbuffer, Renderbuffer<B>>,

    tracked: BTreeMap<ShaderHandle, ShaderTrackingInfo>,
    current_shader: Option<ShaderHandle>,
    quad_buffer: B::Buffer,
}

impl<B: GraphicsApi> Renderer<B, DiskFs> {
    /// Renderer reading assets from disk with default configuration.
    pub fn with_defaults(api: B) -> Result<Self> {
        Self::new(api, DiskFs, RendererConfig::default())
    }
}

impl<B: GraphicsApi, F: FileSystem> Renderer<B, F> {
    /// Creates the renderer and its static screen-quad buffer.
    pub fn new(mut api: B, fs: F, config: RendererConfig) -> Result<Self> {
        let quad_buffer = api
            .create_buffer()
            .map_err(|m| RenderError::native("create_buffer", m))?;
        api.bind_buffer(BufferTarget::Vertex, Some(quad_buffer));
        api.buffer_data(BufferTarget::Vertex, bytemuck::cast_slice(&QUAD_CORNERS));
        api.bind_buffer(BufferTarget::Vertex, None);

        log::debug!("renderer created ({config:?})");

        Ok(Self {
            api,
            fs,
            config,
            textures: Arena::new(),
            shaders: Arena::new(),
            meshes: Arena::new(),
            framebuffers: Arena::new(),
            renderbuffers: Arena::new(),
            tracked: BTreeMap::new(),
            current_shader: None,
            quad_buffer,
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.api
    }

    /// For native state the renderer does not model (depth test, clears).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.api
    }

    pub fn file_system_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[track_caller]
    pub fn texture(&self, handle: TextureHandle) -> &Texture<B> {
        self.textures.get(handle)
    }

    #[track_caller]
    pub fn shader(&self, handle: ShaderHandle) -> &ShaderProgram<B> {
        self.shaders.get(handle)
    }

    #[track_caller]
    pub fn mesh(&self, handle: MeshHandle) -> &Mesh<B> {
        self.meshes.get(handle)
    }

    /// Number of hot-swaps the shader has gone through.
    #[track_caller]
    pub fn shader_generation(&self, handle: ShaderHandle) -> u32 {
        self.shaders.generation(handle)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn shader_count(&self) -> usize {
        self.shaders.len()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn current_shader(&self) -> Option<ShaderHandle> {
        self.current_shader
    }

    /// Discards flags raised by earlier unchecked calls (draws, uniform
    /// uploads) so the next [`check`](Self::check) only sees its own.
    fn clear_errors(&mut self) {
        if !self.config.check_errors {
            return;
        }
        for _ in 0..MAX_STALE_ERRORS {
            let Some(code) = self.api.take_error() else { return };
            log::warn!("discarding stale GL error: {code}");
        }
    }

    /// Turns a raised native error flag into an error for `op`.
    fn check(&mut self, op: &'static str) -> Result<()> {
        if !self.config.check_errors {
            return Ok(());
        }
        match self.api.take_error() {
            Some(code) => Err(RenderError::GlError { op, code }),
            None => Ok(()),
        }
    }

    /// Like [`check`](Self::check), deleting `object` when the flag is raised.
    fn check_or_delete<T>(
        &mut self,
        op: &'static str,
        object: T,
        delete: impl FnOnce(&mut B, T),
    ) -> Result<T> {
        match self.check(op) {
            Ok(()) => Ok(object),
            Err(e) => {
                delete(&mut self.api, object);
                Err(e)
            }
        }
    }
}

impl<B: GraphicsApi, F: FileSystem> Drop for Renderer<B, F> {
    fn drop(&mut self) {
        let counts = (
            self.textures.len(),
            self.shaders.len(),
            self.meshes.len(),
            self.framebuffers.len(),
            self.renderbuffers.len(),
        );

        self.api.use_program(None);
        for t in self.textures.drain() {
            self.api.delete_texture(t.native);
        }
        for s in self.shaders.drain() {
            self.api.delete_program(s.native);
        }
        for m in self.meshes.drain() {
            self.api.delete_buffer(m.vertex_buffer);
            self.api.delete_buffer(m.index_buffer);
        }
        for f in self.framebuffers.drain() {
            self.api.delete_framebuffer(f.native);
        }
        for r in self.renderbuffers.drain() {
            self.api.delete_renderbuffer(r.native);
        }
        self.api.delete_buffer(self.quad_buffer);
        self.tracked.clear();

        log::debug!(
            "renderer teardown: {} texture(s), {} shader(s), {} mesh(es), \
             {} framebuffer(s), {} renderbuffer(s)",
            counts.0,
            counts.1,
            counts.2,
            counts.3,
            counts.4
        );
    }
}
