//! In-memory [`GraphicsApi`] that records every call.
//!
//! State lives behind an `Rc` so a test can keep a clone after the renderer
//! that owns the backend has been dropped.
//!
//! Behavior knobs:
//! - a stage whose source contains `syntax_error` fails to compile;
//! - [`fail_next_link`](RecordingBackend::fail_next_link) fails one link;
//! - [`optimize_out`](RecordingBackend::optimize_out) hides a uniform's location;
//! - [`raise_on_upload`](RecordingBackend::raise_on_upload) sets the error flag on image uploads;
//! - [`raise_on_attach`](RecordingBackend::raise_on_attach) sets it on the next attachment;
//! - [`raise`](RecordingBackend::raise) sets it right away, like an earlier unchecked draw;
//! - [`refuse_textures`](RecordingBackend::refuse_textures) makes texture creation fail.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::resources::{PixelFormat, PixelType};

use super::{
    BufferTarget,
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

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Int(i32),
    Float(f32),
    Floats { components: u8, data: Vec<f32> },
}

impl From<UniformValue<'_>> for Recorded {
    fn from(v: UniformValue<'_>) -> Self {
        let floats =
            |components, data: &[f32]| Recorded::Floats { components, data: data.to_vec() };
        match v {
            UniformValue::Int(i) => Recorded::Int(i),
            UniformValue::Float(f) => Recorded::Float(f),
            UniformValue::Vec2(d) => floats(2, d),
            UniformValue::Vec3(d) => floats(3, d),
            UniformValue::Vec4(d) => floats(4, d),
            UniformValue::Mat4(d) => floats(16, d),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateTexture(u32),
    DeleteTexture(u32),
    BindTexture { unit: u32, kind: TextureKind, texture: Option<u32> },
    UploadImage {
        target: ImageTarget,
        level: u32,
        width: u32,
        height: u32,
        format: PixelFormat,
        ty: PixelType,
        bytes: Option<usize>,
    },
    SetSampling { kind: TextureKind, sampling: Sampling },
    GenerateMipmaps(TextureKind),
    EnableSeamlessCubemaps,

    CompileShader { stage: ShaderStage, shader: u32 },
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader { program: u32, shader: u32 },
    BindAttribute { program: u32, index: u32, name: String },
    LinkProgram(u32),
    UseProgram(Option<u32>),
    SetUniform { program: u32, name: String, value: Recorded },
    DeleteProgram(u32),

    CreateBuffer(u32),
    BindBuffer { target: BufferTarget, buffer: Option<u32> },
    BufferData { target: BufferTarget, len: usize },
    DeleteBuffer(u32),
    EnableAttribute(u32),
    DisableAttribute(u32),
    AttributeF32 { index: u32, components: i32, stride: i32, offset: i32 },
    DrawIndexed(i32),
    DrawTriangles { first: i32, count: i32 },
    Viewport { x: i32, y: i32, width: i32, height: i32 },

    CreateFramebuffer(u32),
    BindFramebuffer(Option<u32>),
    AttachColor(u32),
    AttachDepth(u32),
    DeleteFramebuffer(u32),
    CreateRenderbuffer(u32),
    Depth16Storage { renderbuffer: u32, width: i32, height: i32 },
    DeleteRenderbuffer(u32),
}

/// A uniform location: the owning program plus the name it was queried by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Location {
    pub program: u32,
    pub name: String,
}

#[derive(Default)]
pub(crate) struct State {
    next_id: u32,
    pub calls: Vec<Call>,
    pub textures: HashSet<u32>,
    pub shaders: HashSet<u32>,
    pub programs: HashSet<u32>,
    pub buffers: HashSet<u32>,
    pub framebuffers: HashSet<u32>,
    pub renderbuffers: HashSet<u32>,
    pub current_program: Option<u32>,
    pub uniforms: HashMap<Location, Recorded>,
    sources: HashMap<u32, String>,
    optimized_out: HashSet<String>,
    fail_link: Option<String>,
    upload_error: Option<GlErrorCode>,
    attach_error: Option<GlErrorCode>,
    refuse_textures: bool,
    pending_error: Option<GlErrorCode>,
    incomplete_framebuffers: bool,
}

impl State {
    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingBackend {
    state: Rc<RefCell<State>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, State> {
        self.state.borrow()
    }

    fn state_mut(&self) -> RefMut<'_, State> {
        self.state.borrow_mut()
    }

    fn record(&self, call: Call) {
        self.state_mut().calls.push(call);
    }

    fn attach_raises(&self) {
        let mut s = self.state_mut();
        if let Some(code) = s.attach_error.take() {
            s.pending_error = Some(code);
        }
    }

    // ── knobs ─────────────────────────────────────────────────────────────

    pub fn fail_next_link(&self, log: &str) {
        self.state_mut().fail_link = Some(log.to_owned());
    }

    pub fn optimize_out(&self, name: &str) {
        self.state_mut().optimized_out.insert(name.to_owned());
    }

    pub fn raise_on_upload(&self, code: GlErrorCode) {
        self.state_mut().upload_error = Some(code);
    }

    pub fn raise_on_attach(&self, code: GlErrorCode) {
        self.state_mut().attach_error = Some(code);
    }

    pub fn refuse_textures(&self, refuse: bool) {
        self.state_mut().refuse_textures = refuse;
    }

    pub fn raise(&self, code: GlErrorCode) {
        self.state_mut().pending_error = Some(code);
    }

    pub fn report_incomplete_framebuffers(&self) {
        self.state_mut().incomplete_framebuffers = true;
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn pending_error(&self) -> Option<GlErrorCode> {
        self.state().pending_error
    }

    pub fn clear_calls(&self) {
        self.state_mut().calls.clear();
    }

    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.state().calls.iter().position(pred)
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn live_textures(&self) -> usize {
        self.state().textures.len()
    }

    pub fn live_shaders(&self) -> usize {
        self.state().shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.state().programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.state().buffers.len()
    }

    pub fn live_framebuffers(&self) -> usize {
        self.state().framebuffers.len()
    }

    pub fn live_renderbuffers(&self) -> usize {
        self.state().renderbuffers.len()
    }

    pub fn current_program(&self) -> Option<u32> {
        self.state().current_program
    }

    pub fn uniform(&self, program: u32, name: &str) -> Option<Recorded> {
        let key = Location { program, name: name.to_owned() };
        self.state().uniforms.get(&key).cloned()
    }

    /// Fragment or vertex text last compiled into `shader`.
    pub fn source_of(&self, shader: u32) -> Option<String> {
        self.state().sources.get(&shader).cloned()
    }
}

impl GraphicsApi for RecordingBackend {
    type Texture = u32;
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type Framebuffer = u32;
    type Renderbuffer = u32;
    type UniformLocation = Location;

    fn create_texture(&mut self) -> Result<u32, String> {
        let mut s = self.state_mut();
        if s.refuse_textures {
            return Err("texture names exhausted".into());
        }
        let id = s.next();
        s.textures.insert(id);
        s.calls.push(Call::CreateTexture(id));
        Ok(id)
    }

    fn delete_texture(&mut self, texture: u32) {
        self.state_mut().textures.remove(&texture);
        self.record(Call::DeleteTexture(texture));
    }

    fn bind_texture(&mut self, unit: u32, kind: TextureKind, texture: Option<u32>) {
        self.record(Call::BindTexture { unit, kind, texture });
    }

    fn upload_image(&mut self, upload: &ImageUpload<'_>) {
        let mut s = self.state_mut();
        if let Some(code) = s.upload_error {
            s.pending_error = Some(code);
        }
        s.calls.push(Call::UploadImage {
            target: upload.target,
            level: upload.level,
            width: upload.width,
            height: upload.height,
            format: upload.format,
            ty: upload.ty,
            bytes: upload.pixels.map(<[u8]>::len),
        });
    }

    fn set_sampling(&mut self, kind: TextureKind, sampling: Sampling) {
        self.record(Call::SetSampling { kind, sampling });
    }

    fn generate_mipmaps(&mut self, kind: TextureKind) {
        self.record(Call::GenerateMipmaps(kind));
    }

    fn enable_seamless_cubemaps(&mut self) {
        self.record(Call::EnableSeamlessCubemaps);
    }

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<u32, String> {
        if let Some(line) = source.lines().position(|l| l.contains("syntax_error")) {
            return Err(format!("0:{}: error: syntax_error", line + 1));
        }
        let mut s = self.state_mut();
        let id = s.next();
        s.shaders.insert(id);
        s.sources.insert(id, source.to_owned());
        s.calls.push(Call::CompileShader { stage, shader: id });
        Ok(id)
    }

    fn delete_shader(&mut self, shader: u32) {
        self.state_mut().shaders.remove(&shader);
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&mut self) -> Result<u32, String> {
        let mut s = self.state_mut();
        let id = s.next();
        s.programs.insert(id);
        s.calls.push(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        self.record(Call::AttachShader { program, shader });
    }

    fn bind_attribute_location(&mut self, program: u32, index: u32, name: &str) {
        self.record(Call::BindAttribute { program, index, name: name.to_owned() });
    }

    fn link_program(&mut self, program: u32) -> Result<(), String> {
        let mut s = self.state_mut();
        s.calls.push(Call::LinkProgram(program));
        match s.fail_link.take() {
            Some(log) => Err(log),
            None => Ok(()),
        }
    }

    fn uniform_location(&mut self, program: u32, name: &str) -> Option<Location> {
        if self.state().optimized_out.contains(name) {
            return None;
        }
        Some(Location { program, name: name.to_owned() })
    }

    fn use_program(&mut self, program: Option<u32>) {
        let mut s = self.state_mut();
        s.current_program = program;
        s.calls.push(Call::UseProgram(program));
    }

    fn set_uniform(&mut self, location: &Location, value: UniformValue<'_>) {
        let value = Recorded::from(value);
        let mut s = self.state_mut();
        s.uniforms.insert(location.clone(), value.clone());
        s.calls.push(Call::SetUniform {
            program: location.program,
            name: location.name.clone(),
            value,
        });
    }

    fn delete_program(&mut self, program: u32) {
        let mut s = self.state_mut();
        s.programs.remove(&program);
        s.uniforms.retain(|loc, _| loc.program != program);
        if s.current_program == Some(program) {
            s.current_program = None;
        }
        s.calls.push(Call::DeleteProgram(program));
    }

    fn create_buffer(&mut self) -> Result<u32, String> {
        let mut s = self.state_mut();
        let id = s.next();
        s.buffers.insert(id);
        s.calls.push(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&mut self, target: BufferTarget, buffer: Option<u32>) {
        self.record(Call::BindBuffer { target, buffer });
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[u8]) {
        self.record(Call::BufferData { target, len: data.len() });
    }

    fn delete_buffer(&mut self, buffer: u32) {
        self.state_mut().buffers.remove(&buffer);
        self.record(Call::DeleteBuffer(buffer));
    }

    fn enable_vertex_attribute(&mut self, index: u32) {
        self.record(Call::EnableAttribute(index));
    }

    fn disable_vertex_attribute(&mut self, index: u32) {
        self.record(Call::DisableAttribute(index));
    }

    fn vertex_attribute_f32(&mut self, index: u32, components: i32, stride: i32, offset: i32) {
        self.record(Call::AttributeF32 { index, components, stride, offset });
    }

    fn draw_indexed_u32(&mut self, count: i32) {
        self.record(Call::DrawIndexed(count));
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        self.record(Call::DrawTriangles { first, count });
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport { x, y, width, height });
    }

    fn create_framebuffer(&mut self) -> Result<u32, String> {
        let mut s = self.state_mut();
        let id = s.next();
        s.framebuffers.insert(id);
        s.calls.push(Call::CreateFramebuffer(id));
        Ok(id)
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<u32>) {
        self.record(Call::BindFramebuffer(framebuffer));
    }

    fn attach_color_texture(&mut self, texture: u32) {
        self.record(Call::AttachColor(texture));
        self.attach_raises();
    }

    fn attach_depth_renderbuffer(&mut self, renderbuffer: u32) {
        self.record(Call::AttachDepth(renderbuffer));
        self.attach_raises();
    }

    fn framebuffer_status(&mut self) -> FramebufferStatus {
        if self.state().incomplete_framebuffers {
            // GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT
            FramebufferStatus::Incomplete(0x8CD7)
        } else {
            FramebufferStatus::Complete
        }
    }

    fn delete_framebuffer(&mut self, framebuffer: u32) {
        self.state_mut().framebuffers.remove(&framebuffer);
        self.record(Call::DeleteFramebuffer(framebuffer));
    }

    fn create_renderbuffer(&mut self) -> Result<u32, String> {
        let mut s = self.state_mut();
        let id = s.next();
        s.renderbuffers.insert(id);
        s.calls.push(Call::CreateRenderbuffer(id));
        Ok(id)
    }

    fn depth16_storage(&mut self, renderbuffer: u32, width: i32, height: i32) {
        self.record(Call::Depth16Storage { renderbuffer, width, height });
    }

    fn delete_renderbuffer(&mut self, renderbuffer: u32) {
        self.state_mut().renderbuffers.remove(&renderbuffer);
        self.record(Call::DeleteRenderbuffer(renderbuffer));
    }

    fn take_error(&mut self) -> Option<GlErrorCode> {
        self.state_mut().pending_error.take()
    }
}
