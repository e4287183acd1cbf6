use std::collections::HashMap;

use glint_glsl::Reflection;

use crate::backend::{GraphicsApi, ShaderStage};
use crate::error::{RenderError, Result};
use crate::resources::ShaderProgram;

use super::source::StageSources;

/// Compiles both stages, links them and resolves every declared uniform.
///
/// Stage objects never outlive this call. On any failure the partially built
/// program is deleted, so nothing leaks into the backend.
pub(crate) fn build_program<B: GraphicsApi>(
    api: &mut B,
    sources: &StageSources,
) -> Result<ShaderProgram<B>> {
    let vert = compile(api, ShaderStage::Vertex, &sources.vertex)?;
    let frag = match compile(api, ShaderStage::Fragment, &sources.fragment) {
        Ok(frag) => frag,
        Err(e) => {
            api.delete_shader(vert);
            return Err(e);
        }
    };

    let result = link(api, vert, frag, sources.reflect());
    api.delete_shader(vert);
    api.delete_shader(frag);
    result
}

fn compile<B: GraphicsApi>(api: &mut B, stage: ShaderStage, source: &str) -> Result<B::Shader> {
    api.compile_shader(stage, source)
        .map_err(|log| RenderError::ShaderCompile { stage, log })
}

fn link<B: GraphicsApi>(
    api: &mut B,
    vert: B::Shader,
    frag: B::Shader,
    reflection: Reflection,
) -> Result<ShaderProgram<B>> {
    let program = api
        .create_program()
        .map_err(|m| RenderError::native("create_program", m))?;
    api.attach_shader(program, vert);
    api.attach_shader(program, frag);

    // Must precede linking to take effect.
    for (index, name) in reflection.attributes.iter().enumerate() {
        api.bind_attribute_location(program, index as u32, name);
    }

    if let Err(log) = api.link_program(program) {
        api.delete_program(program);
        return Err(RenderError::ProgramLink { log });
    }

    let mut uniforms = HashMap::with_capacity(reflection.uniforms.len());
    for name in reflection.uniforms {
        match api.uniform_location(program, &name) {
            Some(location) => {
                uniforms.insert(name, location);
            }
            None => {
                api.delete_program(program);
                return Err(RenderError::UnresolvedUniform { name });
            }
        }
    }

    Ok(ShaderProgram {
        native: program,
        uniforms,
        attributes: reflection.attributes,
    })
}
