//! Host window and package-registry trait abstractions

use crate::HostResult;

/// Window attribute the bridge can set or clear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFlag {
    /// Blocks screenshots and screen recording of the window surface
    Secure,
    /// Prevents the screen from sleeping while the window is showing
    KeepAwake,
}

/// Visibility of the host content view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Invisible,
}

/// Foreground/background transition observed by the host shell.
///
/// The bridge assumes nothing about call frequency or ordering beyond
/// "a transition was observed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Foreground,
    Background,
}

/// Per-candidate outcome of a registry lookup. `NotFound` is an expected
/// value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageLookup {
    Found,
    NotFound,
}

/// Window-management primitives consumed by the bridge
pub trait HostWindow: Send {
    /// Set a single window flag
    fn set_flag(&mut self, flag: WindowFlag) -> HostResult<()>;

    /// Clear a single window flag
    fn clear_flag(&mut self, flag: WindowFlag) -> HostResult<()>;

    /// Set several flags in one host call; no intermediate state is
    /// observable between them
    fn set_flags(&mut self, flags: &[WindowFlag]) -> HostResult<()>;

    /// Set the content view's visibility
    fn set_visibility(&mut self, visibility: Visibility) -> HostResult<()>;
}

/// Installed-package metadata lookup
pub trait PackageRegistry: Send {
    /// Query package metadata by exact identifier match
    fn lookup(&self, identifier: &str) -> HostResult<PackageLookup>;
}
