//! CPU-side asset decoding.
//!
//! Nothing here touches the graphics API: decoders turn bytes into validated
//! data that the renderer then uploads.

mod cubemap;
mod texture;
mod mesh;

pub use cubemap::{CUBE_FACES, CUBE_MIPS, face_path, face_paths, missing_faces};
pub use texture::{DecodedImage, decode_image};
pub use mesh::{
    HEADER_SIZE,
    MeshData,
    MeshDecodeError,
    VERTEX_SIZE,
    Vertex,
    decode_mesh,
    encode_mesh,
};

#[cfg(test)]
pub(crate) use texture::tests as texture_tests;
