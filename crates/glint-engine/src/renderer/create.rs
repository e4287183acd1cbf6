use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::assets::{MeshData, decode_image, decode_mesh, face_paths};
use crate::backend::{
    BufferTarget,
    FramebufferStatus,
    GraphicsApi,
    ImageTarget,
    ImageUpload,
    Sampling,
    TextureKind,
};
use crate::error::{RenderError, Result};
use crate::fs::FileSystem;
use crate::resources::{
    Framebuffer,
    FramebufferHandle,
    Mesh,
    MeshHandle,
    PixelFormat,
    PixelType,
    Renderbuffer,
    RenderbufferFormat,
    RenderbufferHandle,
    ShaderHandle,
    ShaderProgram,
    Texture,
    TextureHandle,
};
use crate::shader::{StageSources, assemble_stage, build_program};

use super::config::CubemapMips;
use super::live_reload::{ShaderTrackingInfo, latest_modification};
use super::Renderer;

fn stage_list(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(" ")
}

impl<B: GraphicsApi, F: FileSystem> Renderer<B, F> {
    // ── textures ──────────────────────────────────────────────────────────

    /// Loads an image file as a 2D texture.
    ///
    /// The file must have exactly `format.channels()` channels. Sampling is
    /// linear with clamp-to-edge.
    pub fn create_texture(
        &mut self,
        path: impl AsRef<Path>,
        format: PixelFormat,
        ty: PixelType,
    ) -> Result<TextureHandle> {
        let path = path.as_ref();
        info!("uploading texture: {}", path.display());

        let bytes = self.fs.read(path).map_err(|e| RenderError::io(path, e))?;
        let image = decode_image(path, &bytes, format, ty)?;

        self.clear_errors();
        let native = self.new_texture(TextureKind::Texture2d)?;
        self.api.upload_image(&ImageUpload {
            target: ImageTarget::Texture2d,
            level: 0,
            width: image.width,
            height: image.height,
            format,
            ty,
            pixels: Some(&image.pixels),
        });
        self.api.set_sampling(TextureKind::Texture2d, Sampling::LINEAR_CLAMP);
        let native = self.check_or_delete("create_texture", native, B::delete_texture)?;

        Ok(self.textures.insert(Texture {
            native,
            width: image.width,
            height: image.height,
            cubemap: false,
            format,
            ty,
        }))
    }

    /// Allocates an uninitialized 2D texture, typically a render target.
    pub fn create_empty_texture(
        &mut self,
        width: u32,
        height: u32,
        format: PixelFormat,
        ty: PixelType,
    ) -> Result<TextureHandle> {
        self.clear_errors();
        let native = self.new_texture(TextureKind::Texture2d)?;
        self.api.upload_image(&ImageUpload {
            target: ImageTarget::Texture2d,
            level: 0,
            width,
            height,
            format,
            ty,
            pixels: None,
        });
        self.api.set_sampling(TextureKind::Texture2d, Sampling::LINEAR_CLAMP);
        let native = self.check_or_delete("create_empty_texture", native, B::delete_texture)?;

        Ok(self.textures.insert(Texture {
            native,
            width,
            height,
            cubemap: false,
            format,
            ty,
        }))
    }

    /// Loads the 36-file cubemap set rooted at `base`
    /// (see [`face_path`](crate::assets::face_path)).
    ///
    /// Every file is read and decoded before any native object exists, so a
    /// missing or bad face leaves no texture behind.
    pub fn create_cubemap(
        &mut self,
        base: &str,
        format: PixelFormat,
        ty: PixelType,
    ) -> Result<TextureHandle> {
        let mut faces = Vec::with_capacity(36);
        for (mip, face, path) in face_paths(base) {
            let bytes = match self.fs.read(&path) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Err(RenderError::MissingCubemapFace { path });
                }
                Err(e) => return Err(RenderError::io(&path, e)),
            };
            let image = decode_image(&path, &bytes, format, ty)?;
            faces.push((mip, face, image));
        }

        let (width, height) = (faces[0].2.width, faces[0].2.height);
        info!("uploading cubemap: {base} ({width}x{height}, {} images)", faces.len());

        self.clear_errors();
        self.api.enable_seamless_cubemaps();
        let native = self.new_texture(TextureKind::Cubemap)?;
        for (mip, face, image) in &faces {
            self.api.upload_image(&ImageUpload {
                target: ImageTarget::CubeFace(*face),
                level: *mip as u32,
                width: image.width,
                height: image.height,
                format,
                ty,
                pixels: Some(&image.pixels),
            });
        }
        self.api.set_sampling(TextureKind::Cubemap, Sampling::TRILINEAR_CLAMP);
        if self.config.cubemap_mips == CubemapMips::ExplicitThenGenerate {
            self.api.generate_mipmaps(TextureKind::Cubemap);
        }
        let native = self.check_or_delete("create_cubemap", native, B::delete_texture)?;

        Ok(self.textures.insert(Texture {
            native,
            width,
            height,
            cubemap: true,
            format,
            ty,
        }))
    }

    fn new_texture(&mut self, kind: TextureKind) -> Result<B::Texture> {
        let native = self
            .api
            .create_texture()
            .map_err(|m| RenderError::native("create_texture", m))?;
        self.api.bind_texture(0, kind, Some(native));
        Ok(native)
    }

    // ── shaders ───────────────────────────────────────────────────────────

    /// Builds a program from in-memory stage sources.
    ///
    /// An empty `vertex` selects the default screen-quad stage. The fragment
    /// stage gets the precision header prepended. Source-built shaders are
    /// never live-reloaded.
    pub fn create_shader_from_source(
        &mut self,
        vertex: &str,
        fragment: &str,
    ) -> Result<ShaderHandle> {
        let sources = StageSources::new(vertex, fragment)?;
        let program = self.link_sources(&sources)?;
        Ok(self.shaders.insert(program))
    }

    /// Builds a program from stage files and tracks them for live reload.
    ///
    /// Each stage is the concatenation of its files, each followed by a
    /// newline, so shared snippets can be listed ahead of the main file.
    pub fn create_shader<P: AsRef<Path>>(
        &mut self,
        vertex_files: &[P],
        fragment_files: &[P],
    ) -> Result<ShaderHandle> {
        let vertex: Vec<PathBuf> =
            vertex_files.iter().map(|p| p.as_ref().to_path_buf()).collect();
        let fragment: Vec<PathBuf> =
            fragment_files.iter().map(|p| p.as_ref().to_path_buf()).collect();

        // Stat before reading so an edit saved mid-compile is seen as newer.
        let last_modified = latest_modification(&self.fs, vertex.iter().chain(&fragment))
            .map_err(|(path, e)| RenderError::io(&path, e))?;
        let program = self.compile_files(&vertex, &fragment)?;

        let handle = self.shaders.insert(program);
        self.tracked.insert(
            handle,
            ShaderTrackingInfo { vertex, fragment, last_modified },
        );
        Ok(handle)
    }

    /// Reads, assembles and links stage files. Does not register tracking,
    /// which keeps live reload from growing the tracked set.
    pub(super) fn compile_files(
        &mut self,
        vertex: &[PathBuf],
        fragment: &[PathBuf],
    ) -> Result<ShaderProgram<B>> {
        info!("uploading shaders: {} + {}", stage_list(vertex), stage_list(fragment));
        let vs = assemble_stage(&self.fs, vertex)?;
        let fs = assemble_stage(&self.fs, fragment)?;
        self.link_sources(&StageSources::new(&vs, &fs)?)
    }

    fn link_sources(&mut self, sources: &StageSources) -> Result<ShaderProgram<B>> {
        self.clear_errors();
        let program = build_program(&mut self.api, sources)?;
        if let Err(e) = self.check("create_shader") {
            self.api.delete_program(program.native);
            return Err(e);
        }
        Ok(program)
    }

    // ── meshes ────────────────────────────────────────────────────────────

    /// Loads a raw mesh file.
    pub fn create_mesh(&mut self, path: impl AsRef<Path>) -> Result<MeshHandle> {
        let path = path.as_ref();
        info!("uploading mesh: {}", path.display());

        let bytes = self.fs.read(path).map_err(|e| RenderError::io(path, e))?;
        let data = decode_mesh(&bytes).map_err(|source| RenderError::Mesh {
            path: path.to_path_buf(),
            source,
        })?;
        info!("vertices: {}, indices: {}", data.vertices.len(), data.indices.len());

        self.create_mesh_from_data(&data)
    }

    /// Uploads already decoded mesh data.
    pub fn create_mesh_from_data(&mut self, data: &MeshData) -> Result<MeshHandle> {
        self.clear_errors();
        let vertex_buffer =
            self.upload_buffer(BufferTarget::Vertex, bytemuck::cast_slice(&data.vertices))?;
        let index_buffer =
            match self.upload_buffer(BufferTarget::Index, bytemuck::cast_slice(&data.indices)) {
                Ok(b) => b,
                Err(e) => {
                    self.api.delete_buffer(vertex_buffer);
                    return Err(e);
                }
            };

        if let Err(e) = self.check("create_mesh") {
            self.api.delete_buffer(vertex_buffer);
            self.api.delete_buffer(index_buffer);
            return Err(e);
        }

        Ok(self.meshes.insert(Mesh {
            vertex_buffer,
            index_buffer,
            vertex_count: data.vertices.len() as u32,
            index_count: data.indices.len() as u32,
        }))
    }

    fn upload_buffer(&mut self, target: BufferTarget, data: &[u8]) -> Result<B::Buffer> {
        let buffer = self
            .api
            .create_buffer()
            .map_err(|m| RenderError::native("create_buffer", m))?;
        self.api.bind_buffer(target, Some(buffer));
        self.api.buffer_data(target, data);
        self.api.bind_buffer(target, None);
        Ok(buffer)
    }

    // ── framebuffers ──────────────────────────────────────────────────────

    pub fn create_framebuffer(&mut self) -> Result<FramebufferHandle> {
        self.clear_errors();
        let native = self
            .api
            .create_framebuffer()
            .map_err(|m| RenderError::native("create_framebuffer", m))?;
        let native = self.check_or_delete("create_framebuffer", native, B::delete_framebuffer)?;
        Ok(self.framebuffers.insert(Framebuffer { native }))
    }

    pub fn create_renderbuffer(
        &mut self,
        width: u32,
        height: u32,
        format: RenderbufferFormat,
    ) -> Result<RenderbufferHandle> {
        self.clear_errors();
        let native = self
            .api
            .create_renderbuffer()
            .map_err(|m| RenderError::native("create_renderbuffer", m))?;
        match format {
            RenderbufferFormat::Depth16 => {
                self.api.depth16_storage(native, width as i32, height as i32)
            }
        }
        let native =
            self.check_or_delete("create_renderbuffer", native, B::delete_renderbuffer)?;
        Ok(self.renderbuffers.insert(Renderbuffer { native, width, height, format }))
    }

    /// Attaches `texture` as color attachment 0. Leaves the framebuffer bound.
    ///
    /// An incomplete framebuffer is logged, not treated as an error: it may
    /// become complete once the depth attachment is added.
    #[track_caller]
    pub fn attach_texture_to_framebuffer(
        &mut self,
        framebuffer: FramebufferHandle,
        texture: TextureHandle,
    ) -> Result<()> {
        let fb = self.framebuffers.get(framebuffer).native;
        let tex = self.textures.get(texture).native;
        self.clear_errors();
        self.api.bind_framebuffer(Some(fb));
        self.api.attach_color_texture(tex);
        self.warn_if_incomplete("color texture");
        self.check("attach_texture_to_framebuffer")
    }

    /// Attaches `renderbuffer` as the depth attachment. Leaves the framebuffer bound.
    #[track_caller]
    pub fn attach_renderbuffer_to_framebuffer(
        &mut self,
        framebuffer: FramebufferHandle,
        renderbuffer: RenderbufferHandle,
    ) -> Result<()> {
        let fb = self.framebuffers.get(framebuffer).native;
        let rb = self.renderbuffers.get(renderbuffer).native;
        self.clear_errors();
        self.api.bind_framebuffer(Some(fb));
        self.api.attach_depth_renderbuffer(rb);
        self.warn_if_incomplete("depth buffer");
        self.check("attach_renderbuffer_to_framebuffer")
    }

    fn warn_if_incomplete(&mut self, what: &str) {
        if let FramebufferStatus::Incomplete(status) = self.api.framebuffer_status() {
            warn!("framebuffer incomplete after attaching a {what} (status 0x{status:04x})");
        }
    }
}
