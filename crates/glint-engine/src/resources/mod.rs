//! Handle-indexed resource tables.
//!
//! Every GPU object the renderer creates lives in one [`Arena`] per kind and
//! is addressed by a typed [`Handle`]. Payload types are generic over the
//! [`GraphicsApi`](crate::backend::GraphicsApi) so they carry the backend's
//! native ids.

mod arena;
mod types;

pub use arena::{Arena, Handle, Resource};
pub use types::{
    Framebuffer,
    Mesh,
    PixelFormat,
    PixelType,
    Renderbuffer,
    RenderbufferFormat,
    ShaderProgram,
    Texture,
};

/// Kind markers used to type handles and tables.
pub mod kind {
    use super::Resource;

    pub enum Texture {}
    pub enum Shader {}
    pub enum Mesh {}
    pub enum Framebuffer {}
    pub enum Renderbuffer {}

    impl Resource for Texture {
        const KIND: &'static str = "texture";
    }
    impl Resource for Shader {
        const KIND: &'static str = "shader";
    }
    impl Resource for Mesh {
        const KIND: &'static str = "mesh";
    }
    impl Resource for Framebuffer {
        const KIND: &'static str = "framebuffer";
    }
    impl Resource for Renderbuffer {
        const KIND: &'static str = "renderbuffer";
    }
}

pub type TextureHandle = Handle<kind::Texture>;
pub type ShaderHandle = Handle<kind::Shader>;
pub type MeshHandle = Handle<kind::Mesh>;
pub type FramebufferHandle = Handle<kind::Framebuffer>;
pub type RenderbufferHandle = Handle<kind::Renderbuffer>;
