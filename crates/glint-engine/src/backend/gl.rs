use glow::HasContext;

use crate::error::{RenderError, Result};
use crate::resources::{PixelFormat, PixelType};

use super::{
    BufferTarget,
    Filter,
    FramebufferStatus,
    GlErrorCode,
    GraphicsApi,
    ImageTarget,
    ImageUpload,
    Sampling,
    ShaderStage,
    TextureKind,
    UniformValue,
};

/// [`GraphicsApi`] over an OpenGL (ES) context loaded by `glow`.
///
/// The caller owns context creation and must keep the context current on
/// the thread that drives the renderer.
pub struct GlowBackend {
    gl: glow::Context,
    vertex_array: <glow::Context as HasContext>::VertexArray,
}

impl GlowBackend {
    /// Takes over `gl` and sets the state the renderer relies on: a bound
    /// vertex array (required by core profiles) and byte-aligned unpacking.
    pub fn new(gl: glow::Context) -> Result<Self> {
        // SAFETY: `gl` is a loaded context that the caller keeps current.
        let vertex_array = unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|m| RenderError::native("create_vertex_array", m))?;
            gl.bind_vertex_array(Some(vao));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            vao
        };
        log::debug!("GL backend ready ({:?})", gl.version());
        Ok(Self { gl, vertex_array })
    }

    /// Direct access for state the renderer does not model (depth test,
    /// culling, clears).
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }
}

impl Drop for GlowBackend {
    fn drop(&mut self) {
        unsafe {
            self.gl.bind_vertex_array(None);
            self.gl.delete_vertex_array(self.vertex_array);
        }
    }
}

fn texture_target(kind: TextureKind) -> u32 {
    match kind {
        TextureKind::Texture2d => glow::TEXTURE_2D,
        TextureKind::Cubemap => glow::TEXTURE_CUBE_MAP,
    }
}

fn image_target(target: ImageTarget) -> u32 {
    match target {
        ImageTarget::Texture2d => glow::TEXTURE_2D,
        ImageTarget::CubeFace(face) => glow::TEXTURE_CUBE_MAP_POSITIVE_X + face as u32,
    }
}

fn buffer_target(target: BufferTarget) -> u32 {
    match target {
        BufferTarget::Vertex => glow::ARRAY_BUFFER,
        BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
    }
}

fn filter(filter: Filter) -> i32 {
    match filter {
        Filter::Linear => glow::LINEAR as i32,
        Filter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR as i32,
    }
}

/// `(internal format, format, type)` for an upload. Internal formats are
/// always sized so float textures keep their precision.
fn pixel_formats(format: PixelFormat, ty: PixelType) -> (u32, u32, u32) {
    let (internal, external) = match (format, ty) {
        (PixelFormat::R, PixelType::Ubyte) => (glow::R8, glow::RED),
        (PixelFormat::R, PixelType::Float) => (glow::R32F, glow::RED),
        (PixelFormat::Rgb, PixelType::Ubyte) => (glow::RGB8, glow::RGB),
        (PixelFormat::Rgb, PixelType::Float) => (glow::RGB32F, glow::RGB),
        (PixelFormat::Rgba, PixelType::Ubyte) => (glow::RGBA8, glow::RGBA),
        (PixelFormat::Rgba, PixelType::Float) => (glow::RGBA32F, glow::RGBA),
    };
    let ty = match ty {
        PixelType::Ubyte => glow::UNSIGNED_BYTE,
        PixelType::Float => glow::FLOAT,
    };
    (internal, external, ty)
}

fn error_code(code: u32) -> GlErrorCode {
    match code {
        glow::INVALID_ENUM => GlErrorCode::InvalidEnum,
        glow::INVALID_VALUE => GlErrorCode::InvalidValue,
        glow::INVALID_OPERATION => GlErrorCode::InvalidOperation,
        glow::INVALID_FRAMEBUFFER_OPERATION => GlErrorCode::InvalidFramebufferOperation,
        glow::STACK_OVERFLOW => GlErrorCode::StackOverflow,
        glow::STACK_UNDERFLOW => GlErrorCode::StackUnderflow,
        glow::OUT_OF_MEMORY => GlErrorCode::OutOfMemory,
        other => GlErrorCode::Unknown(other),
    }
}

// SAFETY (all methods below): every call is a plain GL entry point on the
// context owned by `self`, with object names produced by that same context.
impl GraphicsApi for GlowBackend {
    type Texture = <glow::Context as HasContext>::Texture;
    type Shader = <glow::Context as HasContext>::Shader;
    type Program = <glow::Context as HasContext>::Program;
    type Buffer = <glow::Context as HasContext>::Buffer;
    type Framebuffer = <glow::Context as HasContext>::Framebuffer;
    type Renderbuffer = <glow::Context as HasContext>::Renderbuffer;
    type UniformLocation = <glow::Context as HasContext>::UniformLocation;

    fn create_texture(&mut self) -> std::result::Result<Self::Texture, String> {
        unsafe { self.gl.create_texture() }
    }

    fn delete_texture(&mut self, texture: Self::Texture) {
        unsafe { self.gl.delete_texture(texture) }
    }

    fn bind_texture(&mut self, unit: u32, kind: TextureKind, texture: Option<Self::Texture>) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(texture_target(kind), texture);
        }
    }

    fn upload_image(&mut self, upload: &ImageUpload<'_>) {
        let (internal, format, ty) = pixel_formats(upload.format, upload.ty);
        unsafe {
            self.gl.tex_image_2d(
                image_target(upload.target),
                upload.level as i32,
                internal as i32,
                upload.width as i32,
                upload.height as i32,
                0,
                format,
                ty,
                glow::PixelUnpackData::Slice(upload.pixels),
            );
        }
    }

    fn set_sampling(&mut self, kind: TextureKind, sampling: Sampling) {
        let target = texture_target(kind);
        unsafe {
            self.gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, filter(sampling.min));
            self.gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, filter(sampling.mag));
            if sampling.clamp_to_edge {
                let clamp = glow::CLAMP_TO_EDGE as i32;
                self.gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, clamp);
                self.gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, clamp);
                if kind == TextureKind::Cubemap {
                    self.gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_R, clamp);
                }
            }
        }
    }

    fn generate_mipmaps(&mut self, kind: TextureKind) {
        unsafe { self.gl.generate_mipmap(texture_target(kind)) }
    }

    fn enable_seamless_cubemaps(&mut self) {
        unsafe { self.gl.enable(glow::TEXTURE_CUBE_MAP_SEAMLESS) }
    }

    fn compile_shader(
        &mut self,
        stage: ShaderStage,
        source: &str,
    ) -> std::result::Result<Self::Shader, String> {
        let kind = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = self.gl.create_shader(kind)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if self.gl.get_shader_compile_status(shader) {
                Ok(shader)
            } else {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                Err(log)
            }
        }
    }

    fn delete_shader(&mut self, shader: Self::Shader) {
        unsafe { self.gl.delete_shader(shader) }
    }

    fn create_program(&mut self) -> std::result::Result<Self::Program, String> {
        unsafe { self.gl.create_program() }
    }

    fn attach_shader(&mut self, program: Self::Program, shader: Self::Shader) {
        unsafe { self.gl.attach_shader(program, shader) }
    }

    fn bind_attribute_location(&mut self, program: Self::Program, index: u32, name: &str) {
        unsafe { self.gl.bind_attrib_location(program, index, name) }
    }

    fn link_program(&mut self, program: Self::Program) -> std::result::Result<(), String> {
        unsafe {
            self.gl.link_program(program);
            if self.gl.get_program_link_status(program) {
                Ok(())
            } else {
                Err(self.gl.get_program_info_log(program))
            }
        }
    }

    fn uniform_location(
        &mut self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn use_program(&mut self, program: Option<Self::Program>) {
        unsafe { self.gl.use_program(program) }
    }

    fn set_uniform(&mut self, location: &Self::UniformLocation, value: UniformValue<'_>) {
        let loc = Some(location);
        unsafe {
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(loc, v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(loc, v),
                UniformValue::Vec2(v) => self.gl.uniform_2_f32_slice(loc, v),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32_slice(loc, v),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32_slice(loc, v),
                UniformValue::Mat4(v) => self.gl.uniform_matrix_4_f32_slice(loc, false, v),
            }
        }
    }

    fn delete_program(&mut self, program: Self::Program) {
        unsafe { self.gl.delete_program(program) }
    }

    fn create_buffer(&mut self) -> std::result::Result<Self::Buffer, String> {
        unsafe { self.gl.create_buffer() }
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<Self::Buffer>) {
        unsafe { self.gl.bind_buffer(buffer_target(target), buffer) }
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        unsafe {
            self.gl
                .buffer_data_u8_slice(buffer_target(target), data, glow::STATIC_DRAW)
        }
    }

    fn delete_buffer(&mut self, buffer: Self::Buffer) {
        unsafe { self.gl.delete_buffer(buffer) }
    }

    fn enable_vertex_attribute(&mut self, index: u32) {
        unsafe { self.gl.enable_vertex_attrib_array(index) }
    }

    fn disable_vertex_attribute(&mut self, index: u32) {
        unsafe { self.gl.disable_vertex_attrib_array(index) }
    }

    fn vertex_attribute_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(index, components, glow::FLOAT, false, stride, offset)
        }
    }

    fn draw_indexed_u32(&mut self, count: i32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, count, glow::UNSIGNED_INT, 0)
        }
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, first, count) }
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn create_framebuffer(&mut self) -> std::result::Result<Self::Framebuffer, String> {
        unsafe { self.gl.create_framebuffer() }
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<Self::Framebuffer>) {
        unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, framebuffer) }
    }

    fn attach_color_texture(&mut self, texture: Self::Texture) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );
        }
    }

    fn attach_depth_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::DEPTH_ATTACHMENT,
                glow::RENDERBUFFER,
                Some(renderbuffer),
            );
        }
    }

    fn framebuffer_status(&mut self) -> FramebufferStatus {
        match unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) } {
            glow::FRAMEBUFFER_COMPLETE => FramebufferStatus::Complete,
            other => FramebufferStatus::Incomplete(other),
        }
    }

    fn delete_framebuffer(&mut self, framebuffer: Self::Framebuffer) {
        unsafe { self.gl.delete_framebuffer(framebuffer) }
    }

    fn create_renderbuffer(&mut self) -> std::result::Result<Self::Renderbuffer, String> {
        unsafe { self.gl.create_renderbuffer() }
    }

    fn depth16_storage(&mut self, renderbuffer: Self::Renderbuffer, width: i32, height: i32) {
        unsafe {
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, Some(renderbuffer));
            self.gl
                .renderbuffer_storage(glow::RENDERBUFFER, glow::DEPTH_COMPONENT16, width, height);
        }
    }

    fn delete_renderbuffer(&mut self, renderbuffer: Self::Renderbuffer) {
        unsafe { self.gl.delete_renderbuffer(renderbuffer) }
    }

    fn take_error(&mut self) -> Option<GlErrorCode> {
        match unsafe { self.gl.get_error() } {
            glow::NO_ERROR => None,
            code => Some(error_code(code)),
        }
    }
}
