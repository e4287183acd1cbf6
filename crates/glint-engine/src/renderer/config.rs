/// What happens to a cubemap's mip chain after the explicit levels are uploaded.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CubemapMips {
    /// Use only the six uploaded levels.
    ExplicitOnly,
    /// Upload the six levels, then let the driver regenerate the chain.
    ExplicitThenGenerate,
}

/// Renderer construction parameters.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Poll tracked shader files and hot-swap programs on change.
    ///
    /// Disable on targets without a writable file system.
    pub live_reload: bool,

    pub cubemap_mips: CubemapMips,

    /// Query the native error flag after creation and attachment calls and
    /// fail the operation when it is raised.
    pub check_errors: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            live_reload: true,
            cubemap_mips: CubemapMips::ExplicitThenGenerate,
            check_errors: true,
        }
    }
}
