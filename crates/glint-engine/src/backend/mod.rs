//! Native graphics API surface.
//!
//! The renderer never talks to GL directly; it drives a [`GraphicsApi`]
//! implementation. [`GlowBackend`] is the OpenGL implementation. Tests use a
//! recording double.
//!
//! Methods mirror the GL object model closely (create, bind, upload, delete)
//! so the renderer's call sequence is visible and testable.

mod gl;
#[cfg(test)]
pub(crate) mod recording;

use std::fmt;

use crate::resources::{PixelFormat, PixelType};

pub use self::gl::GlowBackend;

/// Shader stage kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Texture binding target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TextureKind {
    Texture2d,
    Cubemap,
}

/// Destination of a single image upload.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ImageTarget {
    Texture2d,
    /// Cube face `0..6` in `+X, -X, +Y, -Y, +Z, -Z` order.
    CubeFace(u8),
}

/// One `glTexImage2D`-style upload into the currently bound texture.
#[derive(Debug, Copy, Clone)]
pub struct ImageUpload<'a> {
    pub target: ImageTarget,
    pub level: u32,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub ty: PixelType,
    /// Tightly packed rows. `None` allocates storage only.
    pub pixels: Option<&'a [u8]>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Filter {
    Linear,
    LinearMipmapLinear,
}

/// Sampling state applied to the currently bound texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Sampling {
    pub min: Filter,
    pub mag: Filter,
    /// Clamp-to-edge on every axis the target has.
    pub clamp_to_edge: bool,
}

impl Sampling {
    pub const LINEAR_CLAMP: Sampling = Sampling {
        min: Filter::Linear,
        mag: Filter::Linear,
        clamp_to_edge: true,
    };

    pub const TRILINEAR_CLAMP: Sampling = Sampling {
        min: Filter::LinearMipmapLinear,
        mag: Filter::Linear,
        clamp_to_edge: true,
    };
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferTarget {
    Vertex,
    Index,
}

/// Value passed to a uniform location. Slices hold `count × components`
/// floats; matrices are column-major.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue<'a> {
    Int(i32),
    Float(f32),
    Vec2(&'a [f32]),
    Vec3(&'a [f32]),
    Vec4(&'a [f32]),
    Mat4(&'a [f32]),
}

/// Result of a framebuffer completeness check.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FramebufferStatus {
    Complete,
    Incomplete(u32),
}

/// Native error flag value.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GlErrorCode {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    InvalidFramebufferOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    Unknown(u32),
}

impl fmt::Display for GlErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlErrorCode::InvalidEnum => f.write_str("invalid enum"),
            GlErrorCode::InvalidValue => f.write_str("invalid value"),
            GlErrorCode::InvalidOperation => f.write_str("invalid operation"),
            GlErrorCode::InvalidFramebufferOperation => {
                f.write_str("invalid framebuffer operation")
            }
            GlErrorCode::StackOverflow => f.write_str("stack overflow"),
            GlErrorCode::StackUnderflow => f.write_str("stack underflow"),
            GlErrorCode::OutOfMemory => f.write_str("out of memory"),
            GlErrorCode::Unknown(code) => write!(f, "unknown (0x{code:04x})"),
        }
    }
}

/// The native graphics API consumed by the renderer.
///
/// Object-creating methods return `Err(message)` when the driver refuses;
/// stage compilation and linking return the info log on failure.
pub trait GraphicsApi {
    type Texture: Copy + fmt::Debug;
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type Framebuffer: Copy + fmt::Debug;
    type Renderbuffer: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&mut self) -> Result<Self::Texture, String>;
    fn delete_texture(&mut self, texture: Self::Texture);
    /// Activates texture `unit` and binds `texture` to the `kind` target.
    fn bind_texture(&mut self, unit: u32, kind: TextureKind, texture: Option<Self::Texture>);
    fn upload_image(&mut self, upload: &ImageUpload<'_>);
    fn set_sampling(&mut self, kind: TextureKind, sampling: Sampling);
    fn generate_mipmaps(&mut self, kind: TextureKind);
    fn enable_seamless_cubemaps(&mut self);

    // ── shaders ───────────────────────────────────────────────────────────

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;
    fn delete_shader(&mut self, shader: Self::Shader);
    fn create_program(&mut self) -> Result<Self::Program, String>;
    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader);
    fn bind_attribute_location(&mut self, program: Self::Program, index: u32, name: &str);
    fn link_program(&mut self, program: Self::Program) -> Result<(), String>;
    fn uniform_location(
        &mut self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;
    fn use_program(&mut self, program: Option<Self::Program>);
    fn set_uniform(&mut self, location: &Self::UniformLocation, value: UniformValue<'_>);
    fn delete_program(&mut self, program: Self::Program);

    // ── buffers & draws ───────────────────────────────────────────────────

    fn create_buffer(&mut self) -> Result<Self::Buffer, String>;
    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Self::Buffer>);
    /// Uploads static data into the buffer bound to `target`.
    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]);
    fn delete_buffer(&mut self, buffer: Self::Buffer);
    fn enable_vertex_attribute(&mut self, index: u32);
    fn disable_vertex_attribute(&mut self, index: u32);
    /// Float attribute with `components` floats, `stride` and `offset` in bytes.
    fn vertex_attribute_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32);
    /// Indexed triangle list with `u32` indices from the bound index buffer.
    fn draw_indexed_u32(&mut self, count: i32);
    fn draw_triangles(&mut self, first: i32, count: i32);
    fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32);

    // ── framebuffers ──────────────────────────────────────────────────────

    fn create_framebuffer(&mut self) -> Result<Self::Framebuffer, String>;
    fn bind_framebuffer(&mut self, framebuffer: Option<Self::Framebuffer>);
    fn attach_color_texture(&mut self, texture: Self::Texture);
    fn attach_depth_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer);
    fn framebuffer_status(&mut self) -> FramebufferStatus;
    fn delete_framebuffer(&mut self, framebuffer: Self::Framebuffer);
    fn create_renderbuffer(&mut self) -> Result<Self::Renderbuffer, String>;
    /// Binds `renderbuffer` and allocates 16-bit depth storage for it.
    fn depth16_storage(&mut self, renderbuffer: Self::Renderbuffer, width: i32, height: i32);
    fn delete_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer);

    // ── diagnostics ───────────────────────────────────────────────────────

    /// Takes the pending native error flag, if any.
    fn take_error(&mut self) -> Option<GlErrorCode>;
}
