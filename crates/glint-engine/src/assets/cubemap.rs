//! Cubemap file-set naming.
//!
//! A cubemap is stored as 36 PNG files, one per face per mip level:
//! `{base}_m0{mip}_c0{face}.png` with `mip, face ∈ 0..6`. Faces follow the
//! `+X, -X, +Y, -Y, +Z, -Z` order.

use std::path::PathBuf;

use crate::fs::FileSystem;

pub const CUBE_FACES: u8 = 6;
pub const CUBE_MIPS: u8 = 6;

pub fn face_path(base: &str, mip: u8, face: u8) -> PathBuf {
    PathBuf::from(format!("{base}_m0{mip}_c0{face}.png"))
}

/// All `(mip, face, path)` triples, mip-major.
pub fn face_paths(base: &str) -> impl Iterator<Item = (u8, u8, PathBuf)> + '_ {
    (0..CUBE_MIPS).flat_map(move |m| (0..CUBE_FACES).map(move |f| (m, f, face_path(base, m, f))))
}

/// Paths of the set that `fs` does not have, in load order.
pub fn missing_faces(fs: &impl FileSystem, base: &str) -> Vec<PathBuf> {
    face_paths(base).map(|(_, _, p)| p).filter(|p| !fs.exists(p)).collect()
}
