use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::assets::VERTEX_SIZE;
use crate::backend::{BufferTarget, GraphicsApi, TextureKind, UniformValue};
use crate::error::UsageError;
use crate::fs::FileSystem;
use crate::resources::{FramebufferHandle, MeshHandle, ShaderHandle, TextureHandle};

use super::{QUAD_CORNERS, Renderer};

/// Screen-quad corner coordinates, indexed by the quad's corner attribute.
const QUAD_UV: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

const POSITION: u32 = 0;
const NORMAL: u32 = 1;

impl<B: GraphicsApi, F: FileSystem> Renderer<B, F> {
    /// Binds a shader for subsequent uniform uploads and draws.
    #[track_caller]
    pub fn set_shader(&mut self, handle: ShaderHandle) {
        let native = self.shaders.get(handle).native;
        self.api.use_program(Some(native));
        self.current_shader = Some(handle);
    }

    // ── uniforms ──────────────────────────────────────────────────────────
    //
    // Every setter panics with a usage error when no shader is bound or the
    // bound shader does not declare `name`.

    #[track_caller]
    pub fn set_uniform_i32(&mut self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    #[track_caller]
    pub fn set_uniform_f32(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    #[track_caller]
    pub fn set_uniform_vec2(&mut self, name: &str, values: &[Vec2]) {
        self.set_uniform(name, UniformValue::Vec2(bytemuck::cast_slice(values)));
    }

    #[track_caller]
    pub fn set_uniform_vec3(&mut self, name: &str, values: &[Vec3]) {
        self.set_uniform(name, UniformValue::Vec3(bytemuck::cast_slice(values)));
    }

    #[track_caller]
    pub fn set_uniform_vec4(&mut self, name: &str, values: &[Vec4]) {
        self.set_uniform(name, UniformValue::Vec4(bytemuck::cast_slice(values)));
    }

    /// Column-major, uploaded without transposition.
    #[track_caller]
    pub fn set_uniform_mat4(&mut self, name: &str, values: &[Mat4]) {
        self.set_uniform(name, UniformValue::Mat4(bytemuck::cast_slice(values)));
    }

    #[track_caller]
    fn set_uniform(&mut self, name: &str, value: UniformValue<'_>) {
        let Some(current) = self.current_shader else {
            UsageError::NoShaderBound { name: name.to_owned() }.raise()
        };
        let Some(location) = self.shaders.get(current).location(name).cloned() else {
            UsageError::UnknownUniform { name: name.to_owned() }.raise()
        };
        self.api.set_uniform(&location, value);
    }

    // ── binding ───────────────────────────────────────────────────────────

    /// Binds `handle` on texture `unit`, to the cube target for cubemaps.
    #[track_caller]
    pub fn set_texture(&mut self, unit: u32, handle: TextureHandle) {
        let texture = self.textures.get(handle);
        let kind = if texture.cubemap { TextureKind::Cubemap } else { TextureKind::Texture2d };
        let native = texture.native;
        self.api.bind_texture(unit, kind, Some(native));
    }

    #[track_caller]
    pub fn set_framebuffer(&mut self, handle: FramebufferHandle) {
        let native = self.framebuffers.get(handle).native;
        self.api.bind_framebuffer(Some(native));
    }

    pub fn set_default_framebuffer(&mut self) {
        self.api.bind_framebuffer(None);
    }

    pub fn set_viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.api.set_viewport(x, y, width, height);
    }

    // ── draws ─────────────────────────────────────────────────────────────

    /// Draws an indexed triangle list. Attribute 0 is the position,
    /// attribute 1 the normal.
    #[track_caller]
    pub fn draw_mesh(&mut self, handle: MeshHandle) {
        let mesh = self.meshes.get(handle);
        let (vb, ib, count) = (mesh.vertex_buffer, mesh.index_buffer, mesh.index_count);
        let stride = VERTEX_SIZE as i32;

        self.api.bind_buffer(BufferTarget::Index, Some(ib));
        self.api.bind_buffer(BufferTarget::Vertex, Some(vb));
        self.api.enable_vertex_attribute(POSITION);
        self.api.enable_vertex_attribute(NORMAL);
        self.api.vertex_attribute_f32(POSITION, 3, stride, 0);
        self.api.vertex_attribute_f32(NORMAL, 3, stride, 12);
        self.api.draw_indexed_u32(count as i32);
        self.api.disable_vertex_attribute(POSITION);
        self.api.disable_vertex_attribute(NORMAL);
    }

    /// Draws two triangles covering the viewport.
    ///
    /// The bound shader must declare `uniform vec2 uv[4]` and take the
    /// corner index as attribute 0, as the default vertex stage does.
    #[track_caller]
    pub fn draw_screen_quad(&mut self) {
        self.set_uniform_vec2("uv", &QUAD_UV);
        self.api.bind_buffer(BufferTarget::Vertex, Some(self.quad_buffer));
        self.api.bind_buffer(BufferTarget::Index, None);
        self.api.enable_vertex_attribute(0);
        self.api.vertex_attribute_f32(0, 1, std::mem::size_of::<f32>() as i32, 0);
        self.api.draw_triangles(0, QUAD_CORNERS.len() as i32);
        self.api.disable_vertex_attribute(0);
        self.api.bind_buffer(BufferTarget::Vertex, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{MeshData, Vertex};
    use crate::backend::recording::{Call, Recorded, RecordingBackend};
    use crate::fs::MemoryFs;
    use crate::renderer::test_support::*;
    use crate::resources::{PixelFormat, PixelType};

    const FS: &str = "uniform float roughness;\n\
                      uniform vec3 whs[30];\n\
                      uniform mat4 mvp;\n\
                      void main(){}";

    fn with_shader() -> (TestRenderer, RecordingBackend, ShaderHandle) {
        let (mut r, api) = renderer(MemoryFs::new());
        let h = r.create_shader_from_source("", FS).unwrap();
        r.set_shader(h);
        (r, api, h)
    }

    #[test]
    fn declared_uniform_is_uploaded() {
        let (mut r, api, h) = with_shader();
        r.set_uniform_f32("roughness", 0.05);
        let program = r.shader(h).native;
        assert_eq!(api.uniform(program, "roughness"), Some(Recorded::Float(0.05)));
    }

    #[test]
    fn vector_arrays_are_flattened() {
        let (mut r, api, h) = with_shader();
        r.set_uniform_vec3("whs", &[Vec3::X, Vec3::new(1.0, 2.0, 3.0)]);
        let program = r.shader(h).native;
        assert_eq!(
            api.uniform(program, "whs"),
            Some(Recorded::Floats { components: 3, data: vec![1.0, 0.0, 0.0, 1.0, 2.0, 3.0] })
        );
    }

    #[test]
    fn matrices_are_column_major() {
        let (mut r, api, h) = with_shader();
        let m = Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0));
        r.set_uniform_mat4("mvp", &[m]);
        let Some(Recorded::Floats { components: 16, data }) = api.uniform(r.shader(h).native, "mvp")
        else {
            panic!("mvp not uploaded");
        };
        assert_eq!(&data[12..15], &[5.0, 6.0, 7.0]);
    }

    #[test]
    #[should_panic(expected = "usage error: uniform `lod` is not declared by the bound shader")]
    fn undeclared_uniform_panics() {
        let (mut r, _api, _h) = with_shader();
        r.set_uniform_f32("lod", 0.5);
    }

    #[test]
    #[should_panic(expected = "usage error: uniform `gamma` set with no shader bound")]
    fn uniform_without_shader_panics() {
        let (mut r, _api) = renderer(MemoryFs::new());
        r.set_uniform_f32("gamma", 1.0);
    }

    #[test]
    #[should_panic(expected = "usage error: shader handle 3 out of range (table has 1)")]
    fn bad_shader_handle_panics() {
        let (mut r, _api, _h) = with_shader();
        r.set_shader(crate::resources::Handle::new(3));
    }

    #[test]
    fn mesh_draw_issues_index_count() {
        let n = [0.0, 1.0, 0.0];
        let data = MeshData {
            vertices: vec![Vertex::new([0.0; 3], n); 4],
            indices: vec![0, 1, 2, 0, 2, 3],
        };
        let (mut r, api) = renderer(MemoryFs::new());
        let h = r.create_mesh_from_data(&data).unwrap();
        api.clear_calls();

        r.draw_mesh(h);
        let m = r.mesh(h);
        assert_eq!(
            api.calls(),
            vec![
                Call::BindBuffer { target: BufferTarget::Index, buffer: Some(m.index_buffer) },
                Call::BindBuffer { target: BufferTarget::Vertex, buffer: Some(m.vertex_buffer) },
                Call::EnableAttribute(0),
                Call::EnableAttribute(1),
                Call::AttributeF32 { index: 0, components: 3, stride: 24, offset: 0 },
                Call::AttributeF32 { index: 1, components: 3, stride: 24, offset: 12 },
                Call::DrawIndexed(6),
                Call::DisableAttribute(0),
                Call::DisableAttribute(1),
            ]
        );
    }

    #[test]
    fn screen_quad_sets_corners_and_draws_six() {
        let (mut r, api, h) = with_shader();
        r.draw_screen_quad();

        assert_eq!(
            api.uniform(r.shader(h).native, "uv"),
            Some(Recorded::Floats {
                components: 2,
                data: vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
            })
        );
        let calls = api.calls();
        assert!(calls.contains(&Call::AttributeF32 {
            index: 0,
            components: 1,
            stride: 4,
            offset: 0,
        }));
        assert!(calls.contains(&Call::DrawTriangles { first: 0, count: 6 }));
    }

    #[test]
    #[should_panic(expected = "uniform `uv` is not declared")]
    fn screen_quad_needs_uv() {
        let (mut r, _api) = renderer(MemoryFs::new());
        let h = r
            .create_shader_from_source("attribute vec3 position;\nvoid main(){}", "void main(){}")
            .unwrap();
        r.set_shader(h);
        r.draw_screen_quad();
    }

    #[test]
    fn flat_texture_binds_2d_target() {
        let (mut r, api) = renderer(MemoryFs::new());
        let flat = r.create_empty_texture(2, 2, PixelFormat::Rgba, PixelType::Ubyte).unwrap();
        api.clear_calls();
        r.set_texture(3, flat);
        assert_eq!(
            api.calls(),
            vec![Call::BindTexture {
                unit: 3,
                kind: TextureKind::Texture2d,
                texture: Some(r.texture(flat).native),
            }]
        );
    }

    #[test]
    fn default_framebuffer_unbinds() {
        let (mut r, api) = renderer(MemoryFs::new());
        let fb = r.create_framebuffer().unwrap();
        r.set_framebuffer(fb);
        r.set_default_framebuffer();
        r.set_viewport(0, 0, 640, 480);
        let calls = api.calls();
        assert_eq!(calls.last(), Some(&Call::Viewport { x: 0, y: 0, width: 640, height: 480 }));
        assert_eq!(calls[calls.len() - 2], Call::BindFramebuffer(None));
    }
}
