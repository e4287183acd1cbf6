//! Best-effort reflection for legacy GLSL (`attribute` / `uniform` style).
//!
//! This crate is intentionally dependency-free so offline tooling can inspect
//! shader sources without a GL context.
//!
//! # What it does
//!
//! Sources are split on whitespace. Scanning stops at the first word that is
//! `main` (or starts with `main(`). Every `uniform <type> <name>` and
//! `attribute <type> <name>` triple seen before that point is recorded, with
//! the name cut at the first `[`, space or `;`.
//!
//! # What it does not do
//!
//! This is a word scanner, not a parser:
//! - comments are not skipped, so a commented-out declaration is still recorded;
//! - preprocessor conditionals are ignored, so both branches are recorded;
//! - `uniform float a, b;` records `a,` and never sees `b` (commas do not cut);
//! - precision qualifiers shift the triple: `uniform highp vec3 x;` records `vec3`.
//!
//! Callers resolve every recorded uniform after linking, so a false positive
//! surfaces as a resolution failure rather than silently.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`lexer`] | `Lexer`, `Word` |
//! | [`reflect`] | `Reflection`, `Declaration`, `declarations` |
//!
//! # Quick start
//!
//! ```rust
//! use glint_glsl::Reflection;
//!
//! let vs = "attribute vec3 position;\nuniform mat4 mvp;\nvoid main() {}";
//! let fs = "uniform vec3 whs[30];\nvoid main() {}";
//!
//! let mut r = Reflection::of(vs);
//! r.scan(fs);
//! assert_eq!(r.attributes, ["position"]);
//! assert_eq!(r.uniforms, ["mvp", "whs"]);
//! ```

pub mod lexer;
pub mod reflect;

pub use reflect::{DeclKind, Declaration, Reflection, declarations};
