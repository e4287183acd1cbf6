//! Raw mesh format.
//!
//! ```text
//! i32 vertex_count
//! i32 index_count
//! Vertex × vertex_count   (6 × f32: position, normal)
//! u32    × index_count
//! ```
//!
//! All fields little-endian. There is no magic number or version, so the
//! decoder is strict about length: any byte count other than the exact
//! layout size is rejected.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use thiserror::Error;

/// Interleaved vertex as stored in the file and in the vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

pub const HEADER_SIZE: usize = 8;
pub const VERTEX_SIZE: usize = std::mem::size_of::<Vertex>();
const INDEX_SIZE: usize = 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshDecodeError {
    #[error("file is {len} byte(s), shorter than the 8-byte header")]
    TruncatedHeader { len: usize },

    #[error("negative count in header (vertices {vertices}, indices {indices})")]
    NegativeCount { vertices: i32, indices: i32 },

    #[error("expected {expected} bytes for the declared counts, found {found}")]
    LengthMismatch { expected: u64, found: usize },

    #[error("index #{position} is {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: u32,
    },
}

/// Decoded mesh contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Axis-aligned bounds of all vertex positions.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

fn read_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

pub fn decode_mesh(bytes: &[u8]) -> Result<MeshData, MeshDecodeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(MeshDecodeError::TruncatedHeader { len: bytes.len() });
    }

    let nv = read_i32(bytes, 0);
    let ni = read_i32(bytes, 4);
    if nv < 0 || ni < 0 {
        return Err(MeshDecodeError::NegativeCount { vertices: nv, indices: ni });
    }
    let (nv, ni) = (nv as u32, ni as u32);

    let expected =
        HEADER_SIZE as u64 + nv as u64 * VERTEX_SIZE as u64 + ni as u64 * INDEX_SIZE as u64;
    if bytes.len() as u64 != expected {
        return Err(MeshDecodeError::LengthMismatch { expected, found: bytes.len() });
    }

    let mut vertices = Vec::with_capacity(nv as usize);
    let mut at = HEADER_SIZE;
    for _ in 0..nv {
        let f = |k: usize| read_f32(bytes, at + 4 * k);
        vertices.push(Vertex::new([f(0), f(1), f(2)], [f(3), f(4), f(5)]));
        at += VERTEX_SIZE;
    }

    let mut indices = Vec::with_capacity(ni as usize);
    for position in 0..ni as usize {
        let index = read_u32(bytes, at);
        if index >= nv {
            return Err(MeshDecodeError::IndexOutOfRange { position, index, vertex_count: nv });
        }
        indices.push(index);
        at += INDEX_SIZE;
    }

    Ok(MeshData { vertices, indices })
}

/// Writes `vertices` and `indices` in the raw mesh layout.
pub fn encode_mesh(vertices: &[Vertex], indices: &[u32]) -> Vec<u8> {
    let mut out =
        Vec::with_capacity(HEADER_SIZE + vertices.len() * VERTEX_SIZE + indices.len() * INDEX_SIZE);
    out.extend_from_slice(&(vertices.len() as i32).to_le_bytes());
    out.extend_from_slice(&(indices.len() as i32).to_le_bytes());
    for v in vertices {
        for c in v.position.iter().chain(v.normal.iter()) {
            out.extend_from_slice(&c.to_le_bytes());
        }
    }
    for i in indices {
        out.extend_from_slice(&i.to_le_bytes());
    }
    out
}
