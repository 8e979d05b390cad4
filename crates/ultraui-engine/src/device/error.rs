/// Outcome of handling a `wgpu::SurfaceError`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated; the surface has been configured again.
    Reconfigured,
    /// Timeout or other transient failure. Drop this frame.
    SkipFrame,
    /// Out of memory. The app should exit.
    Fatal,
}
