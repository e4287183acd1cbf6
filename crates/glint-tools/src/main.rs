//! Offline inspection of glint assets: meshes, shader reflection and
//! cubemap file sets. Needs no GL context.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use log::debug;

use glint_engine::assets::{CUBE_FACES, CUBE_MIPS, decode_mesh, missing_faces};
use glint_engine::fs::{DiskFs, FileSystem};
use glint_engine::logging::{LoggingConfig, init_logging};
use glint_engine::shader::{StageSources, assemble_stage};
use glint_glsl::Reflection;

const USAGE: &str = "usage:
  glint-tools mesh-info <file>
  glint-tools reflect <vs-file> <fs-file>
  glint-tools cubemap-check <base>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    MeshInfo(PathBuf),
    Reflect { vertex: PathBuf, fragment: PathBuf },
    CubemapCheck(String),
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        Ok(match args.as_slice() {
            ["mesh-info", file] => Command::MeshInfo(file.into()),
            ["reflect", vs, fs] => Command::Reflect { vertex: vs.into(), fragment: fs.into() },
            ["cubemap-check", base] => Command::CubemapCheck((*base).to_owned()),
            _ => bail!("{USAGE}"),
        })
    }
}

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = Command::parse(&args).and_then(|cmd| run(&DiskFs, cmd));
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Runs `cmd` and prints its report. `Ok(false)` means the check ran but
/// failed.
fn run(fs: &impl FileSystem, cmd: Command) -> Result<bool> {
    debug!("running {cmd:?}");
    let report = match cmd {
        Command::MeshInfo(path) => mesh_info(fs, &path)?,
        Command::Reflect { vertex, fragment } => reflect(fs, vertex, fragment)?,
        Command::CubemapCheck(base) => {
            let missing = missing_faces(fs, &base);
            print!("{}", cubemap_report(&base, &missing));
            return Ok(missing.is_empty());
        }
    };
    print!("{report}");
    Ok(true)
}

fn mesh_info(fs: &impl FileSystem, path: &Path) -> Result<String> {
    let bytes = fs.read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mesh = decode_mesh(&bytes).with_context(|| format!("invalid mesh {}", path.display()))?;

    let mut out = format!(
        "{}\n  vertices: {}\n  indices:  {}\n  triangles: {}\n",
        path.display(),
        mesh.vertices.len(),
        mesh.indices.len(),
        mesh.indices.len() / 3
    );
    match mesh.bounds() {
        Some((min, max)) => out.push_str(&format!("  bounds:   {min} .. {max}\n")),
        None => out.push_str("  bounds:   (empty)\n"),
    }
    Ok(out)
}

fn reflect(fs: &impl FileSystem, vertex: PathBuf, fragment: PathBuf) -> Result<String> {
    let vs = assemble_stage(fs, &[vertex]).context("vertex stage")?;
    let fs_src = assemble_stage(fs, &[fragment]).context("fragment stage")?;
    let sources = StageSources::new(&vs, &fs_src)?;
    Ok(reflection_report(&sources.reflect()))
}

fn reflection_report(r: &Reflection) -> String {
    let mut out = String::from("attributes (bind order):\n");
    for (i, name) in r.attributes.iter().enumerate() {
        out.push_str(&format!("  {i}: {name}\n"));
    }
    out.push_str("uniforms:\n");
    for name in &r.uniforms {
        out.push_str(&format!("  {name}\n"));
    }
    out
}

fn cubemap_report(base: &str, missing: &[PathBuf]) -> String {
    let total = CUBE_MIPS as usize * CUBE_FACES as usize;
    let mut out = format!("{base}: {}/{total} faces present\n", total - missing.len());
    for path in missing {
        out.push_str(&format!("  missing {}\n", path.display()));
    }
    out
}
