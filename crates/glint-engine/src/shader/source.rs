use std::path::PathBuf;

use glint_glsl::Reflection;

use crate::error::{RenderError, Result};
use crate::fs::FileSystem;

/// Vertex stage used when the caller passes an empty one. Maps the 4-entry
/// `uv` uniform onto a full-screen quad driven by a float corner index.
pub const DEFAULT_VERTEX_SOURCE: &str = "attribute float index;\n\
uniform vec2 uv[4];\n\
varying vec2 vuv;\n\
void main(){\n\
int iindex = int(index);\n\
vuv = uv[iindex];\n\
gl_Position = vec4(vuv*2.0-1.0, 0.5, 1.0);}";

/// Prepended to every fragment stage.
pub const FRAGMENT_HEADER: &str = "#if GL_ES\n\
#ifdef GL_FRAGMENT_PRECISION_HIGH\n\
precision highp float;\n\
#else\n\
precision mediump float;\n\
#endif\n\
#endif\n";

/// Final vertex/fragment text handed to the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSources {
    pub vertex: String,
    pub fragment: String,
}

impl StageSources {
    /// Applies the default vertex stage and the fragment header.
    pub fn new(vertex: &str, fragment: &str) -> Result<Self> {
        if fragment.is_empty() {
            return Err(RenderError::EmptyFragmentSource);
        }
        let vertex = if vertex.is_empty() { DEFAULT_VERTEX_SOURCE } else { vertex };
        Ok(Self {
            vertex: vertex.to_owned(),
            fragment: format!("{FRAGMENT_HEADER}{fragment}"),
        })
    }

    /// Uniform and attribute names, vertex stage first.
    pub fn reflect(&self) -> Reflection {
        let mut r = Reflection::of(&self.vertex);
        r.scan(&self.fragment);
        r
    }
}

/// Concatenates `paths` in order, each followed by a newline.
pub fn assemble_stage(fs: &impl FileSystem, paths: &[PathBuf]) -> Result<String> {
    let mut out = String::new();
    for path in paths {
        let text = fs.read_to_string(path).map_err(|source| RenderError::io(path, source))?;
        out.push_str(&text);
        out.push('\n');
    }
    Ok(out)
}
