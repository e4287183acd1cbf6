use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use log::{error, info, warn};

use crate::backend::GraphicsApi;
use crate::fs::FileSystem;
use crate::resources::{ShaderHandle, ShaderProgram};

use super::Renderer;

/// Source files behind a file-built shader and the newest modification
/// time seen across them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderTrackingInfo {
    pub vertex: Vec<PathBuf>,
    pub fragment: Vec<PathBuf>,
    pub last_modified: SystemTime,
}

impl ShaderTrackingInfo {
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.vertex.iter().chain(&self.fragment)
    }
}

/// Outcome of one [`Renderer::poll_live_reload`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadReport {
    /// Shaders whose program was swapped.
    pub recompiled: Vec<ShaderHandle>,
    /// Shaders whose files changed but failed to rebuild; they keep their
    /// previous program.
    pub failed: Vec<ShaderHandle>,
}

impl ReloadReport {
    pub fn is_empty(&self) -> bool {
        self.recompiled.is_empty() && self.failed.is_empty()
    }
}

/// Newest modification time across `paths`, or the first path that could
/// not be queried.
pub(super) fn latest_modification<'p>(
    fs: &impl FileSystem,
    paths: impl IntoIterator<Item = &'p PathBuf>,
) -> Result<SystemTime, (PathBuf, io::Error)> {
    let mut latest = SystemTime::UNIX_EPOCH;
    for path in paths {
        let t = fs.modified(path).map_err(|e| (path.clone(), e))?;
        latest = latest.max(t);
    }
    Ok(latest)
}

impl<B: GraphicsApi, F: FileSystem> Renderer<B, F> {
    /// Number of shaders watched for changes.
    pub fn tracked_shader_count(&self) -> usize {
        self.tracked.len()
    }

    pub fn tracked_shader(&self, handle: ShaderHandle) -> Option<&ShaderTrackingInfo> {
        self.tracked.get(&handle)
    }

    /// Rebuilds every tracked shader whose files changed since the last poll.
    ///
    /// Call once per frame. A successful rebuild replaces the program behind
    /// the same handle; uniform values set on the old program are lost. A
    /// failed rebuild is logged and the old program stays in place until the
    /// files change again.
    pub fn poll_live_reload(&mut self) -> ReloadReport {
        let mut report = ReloadReport::default();
        if !self.config.live_reload {
            return report;
        }

        let handles: Vec<ShaderHandle> = self.tracked.keys().copied().collect();
        for handle in handles {
            let Some(info) = self.tracked.get(&handle) else { continue };
            let latest = match latest_modification(&self.fs, info.files()) {
                Ok(t) => t,
                Err((path, e)) => {
                    warn!("cannot stat {} for {handle:?}, skipping: {e}", path.display());
                    continue;
                }
            };
            if latest <= info.last_modified {
                continue;
            }

            let (vertex, fragment) = (info.vertex.clone(), info.fragment.clone());
            if let Some(info) = self.tracked.get_mut(&handle) {
                info.last_modified = latest;
            }

            match self.compile_files(&vertex, &fragment) {
                Ok(program) => {
                    self.swap_program(handle, program);
                    info!("reloaded {handle:?} (generation {})", self.shaders.generation(handle));
                    report.recompiled.push(handle);
                }
                Err(e) => {
                    error!("reloading {handle:?} failed, keeping previous program: {e}");
                    report.failed.push(handle);
                }
            }
        }
        report
    }

    /// Installs `program` behind `handle` and destroys the previous one,
    /// rebinding if `handle` is the current shader.
    fn swap_program(&mut self, handle: ShaderHandle, program: ShaderProgram<B>) {
        let native = program.native;
        let old = self.shaders.replace(handle, program);
        if self.current_shader == Some(handle) {
            self.api.use_program(Some(native));
        }
        self.api.delete_program(old.native);
    }
}
