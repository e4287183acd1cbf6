//! Error types.
//!
//! Two families:
//! - [`RenderError`] is returned from fallible operations (resource creation,
//!   native API failures). Callers may recover from it.
//! - [`UsageError`] describes a call-site bug (bad handle, unknown uniform).
//!   It is never returned; the renderer panics with its message.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assets::MeshDecodeError;
use crate::backend::{GlErrorCode, ShaderStage};

pub type Result<T> = std::result::Result<T, RenderError>;

/// Coarse classification of a [`RenderError`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// A file, image, mesh or shader could not be turned into a resource.
    ResourceCreation,
    /// The native graphics API refused an operation or raised its error flag.
    Environment,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{path} has {found} channel(s), expected {expected}")]
    ChannelMismatch {
        path: PathBuf,
        expected: u8,
        found: u8,
    },

    #[error("{path} has an unsupported pixel layout ({channels} channel(s))")]
    UnsupportedImageLayout { path: PathBuf, channels: u8 },

    #[error("invalid mesh {path}: {source}")]
    Mesh {
        path: PathBuf,
        #[source]
        source: MeshDecodeError,
    },

    #[error("missing cubemap face {path}")]
    MissingCubemapFace { path: PathBuf },

    #[error("fragment shader source is empty")]
    EmptyFragmentSource,

    #[error("failed to compile {stage} shader:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("failed to link program:\n{log}")]
    ProgramLink { log: String },

    #[error("uniform `{name}` was declared but has no location after linking")]
    UnresolvedUniform { name: String },

    #[error("{op}: {message}")]
    Native { op: &'static str, message: String },

    #[error("{op}: GL error {code}")]
    GlError { op: &'static str, code: GlErrorCode },
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::Native { .. } | RenderError::GlError { .. } => ErrorKind::Environment,
            _ => ErrorKind::ResourceCreation,
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        RenderError::Io { path: path.to_path_buf(), source }
    }

    pub(crate) fn native(op: &'static str, message: impl Into<String>) -> Self {
        RenderError::Native { op, message: message.into() }
    }
}

/// A call-site bug. Raised as a panic, see [`UsageError::raise`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("{kind} handle {index} out of range (table has {len})")]
    HandleOutOfRange {
        kind: &'static str,
        index: u32,
        len: usize,
    },

    #[error("uniform `{name}` is not declared by the bound shader")]
    UnknownUniform { name: String },

    #[error("uniform `{name}` set with no shader bound")]
    NoShaderBound { name: String },
}

impl UsageError {
    #[track_caller]
    pub fn raise(self) -> ! {
        panic!("usage error: {self}")
    }
}
