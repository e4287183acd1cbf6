//! Shader program assembly.
//!
//! Stage sources are normalized (default vertex stage, fragment precision
//! header), compiled and linked through the [`GraphicsApi`](crate::backend::GraphicsApi),
//! and the declared uniform/attribute names are extracted with the
//! `glint-glsl` word scanner.

mod compiler;
mod source;

pub(crate) use compiler::build_program;
pub use source::{DEFAULT_VERTEX_SOURCE, FRAGMENT_HEADER, StageSources, assemble_stage};
