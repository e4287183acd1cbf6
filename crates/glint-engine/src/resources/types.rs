use std::collections::HashMap;
use std::fmt;

use crate::backend::GraphicsApi;

/// Channel layout of texture data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    R,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn channels(self) -> u8 {
        match self {
            PixelFormat::R => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Component type of texture data.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PixelType {
    Ubyte,
    Float,
}

impl PixelType {
    /// Size of one component in bytes.
    pub fn size(self) -> usize {
        match self {
            PixelType::Ubyte => 1,
            PixelType::Float => 4,
        }
    }
}

/// Storage format of a renderbuffer. Only depth is used.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RenderbufferFormat {
    Depth16,
}

/// 2D texture or cubemap.
pub struct Texture<B: GraphicsApi> {
    pub native: B::Texture,
    pub width: u32,
    pub height: u32,
    pub cubemap: bool,
    pub format: PixelFormat,
    pub ty: PixelType,
}

/// A linked program and the bind locations of its declared uniforms.
pub struct ShaderProgram<B: GraphicsApi> {
    pub native: B::Program,
    pub(crate) uniforms: HashMap<String, B::UniformLocation>,
    /// Attribute names; position in the list is the bound location.
    pub attributes: Vec<String>,
}

impl<B: GraphicsApi> ShaderProgram<B> {
    pub fn location(&self, name: &str) -> Option<&B::UniformLocation> {
        self.uniforms.get(name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    /// Declared uniform names, sorted.
    pub fn uniform_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.uniforms.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Uploaded indexed triangle mesh.
pub struct Mesh<B: GraphicsApi> {
    pub vertex_buffer: B::Buffer,
    pub index_buffer: B::Buffer,
    pub vertex_count: u32,
    pub index_count: u32,
}

pub struct Framebuffer<B: GraphicsApi> {
    pub native: B::Framebuffer,
}

pub struct Renderbuffer<B: GraphicsApi> {
    pub native: B::Renderbuffer,
    pub width: u32,
    pub height: u32,
    pub format: RenderbufferFormat,
}
