//! Glint engine crate.
//!
//! Owns GPU resources (textures, cubemaps, shader programs, meshes,
//! framebuffers) behind stable typed handles, draws with them, and rebuilds
//! file-backed shaders in place when their sources change on disk.
//!
//! The [`Renderer`] drives any [`GraphicsApi`]; [`GlowBackend`] is the OpenGL
//! one. Window creation is left to the host, which forwards input and frame
//! ticks to a [`FrameDriver`].

pub mod assets;
pub mod backend;
pub mod core;
pub mod error;
pub mod fs;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod resources;
pub mod shader;
pub mod time;

pub use backend::{GlowBackend, GraphicsApi};
pub use self::core::{App, AppControl, CanvasSize, FrameCtx, FrameDriver};
pub use error::{ErrorKind, RenderError, Result, UsageError};
pub use fs::{DiskFs, FileSystem, MemoryFs};
pub use renderer::{CubemapMips, ReloadReport, Renderer, RendererConfig};
pub use resources::{
    FramebufferHandle, MeshHandle, PixelFormat, PixelType, RenderbufferFormat,
    RenderbufferHandle, ShaderHandle, TextureHandle,
};
