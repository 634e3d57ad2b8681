//! In-memory host backend
//!
//! Used by tests and headless embedding: the bridge owns one handle while
//! the embedder keeps a clone of the same window/registry for inspection
//! and for mutating the installed-package set.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::{HostResult, HostWindow, PackageLookup, PackageRegistry, Visibility, WindowFlag};

/// Observable state of the in-memory window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub secure: bool,
    pub keep_awake: bool,
    pub visibility: Visibility,
    /// Number of visibility writes the window has received
    pub visibility_writes: u64,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            secure: false,
            keep_awake: false,
            visibility: Visibility::Visible,
            visibility_writes: 0,
        }
    }
}

/// Cloneable in-memory window; all clones share one state
#[derive(Debug, Clone, Default)]
pub struct MemoryWindow {
    inner: Arc<Mutex<WindowState>>,
}

impl MemoryWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current window state
    pub fn snapshot(&self) -> WindowState {
        self.inner.lock().clone()
    }
}

impl HostWindow for MemoryWindow {
    fn set_flag(&mut self, flag: WindowFlag) -> HostResult<()> {
        self.set_flags(&[flag])
    }

    fn clear_flag(&mut self, flag: WindowFlag) -> HostResult<()> {
        let mut state = self.inner.lock();
        match flag {
            WindowFlag::Secure => state.secure = false,
            WindowFlag::KeepAwake => state.keep_awake = false,
        }
        trace!(?flag, "flag cleared");
        Ok(())
    }

    fn set_flags(&mut self, flags: &[WindowFlag]) -> HostResult<()> {
        // One lock acquisition covers the whole batch, so no intermediate
        // flag combination is observable through another handle.
        let mut state = self.inner.lock();
        for flag in flags {
            match flag {
                WindowFlag::Secure => state.secure = true,
                WindowFlag::KeepAwake => state.keep_awake = true,
            }
        }
        trace!(?flags, "flags set");
        Ok(())
    }

    fn set_visibility(&mut self, visibility: Visibility) -> HostResult<()> {
        let mut state = self.inner.lock();
        state.visibility = visibility;
        state.visibility_writes += 1;
        trace!(?visibility, "visibility written");
        Ok(())
    }
}

/// Cloneable in-memory package registry; all clones share one package set
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    installed: Arc<Mutex<HashSet<String>>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a package identifier as installed
    pub fn install(&self, identifier: impl Into<String>) {
        self.installed.lock().insert(identifier.into());
    }

    /// Remove a package identifier
    pub fn uninstall(&self, identifier: &str) {
        self.installed.lock().remove(identifier);
    }
}

impl PackageRegistry for MemoryRegistry {
    fn lookup(&self, identifier: &str) -> HostResult<PackageLookup> {
        if self.installed.lock().contains(identifier) {
            Ok(PackageLookup::Found)
        } else {
            Ok(PackageLookup::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_flags_set_and_clear() {
        let mut window = MemoryWindow::new();

        window.set_flag(WindowFlag::Secure).unwrap();
        assert!(window.snapshot().secure);
        assert!(!window.snapshot().keep_awake);

        window.clear_flag(WindowFlag::Secure).unwrap();
        assert!(!window.snapshot().secure);
    }

    #[test]
    fn test_flag_batch_sets_both() {
        let mut window = MemoryWindow::new();
        window
            .set_flags(&[WindowFlag::Secure, WindowFlag::KeepAwake])
            .unwrap();

        let state = window.snapshot();
        assert!(state.secure);
        assert!(state.keep_awake);
    }

    #[test]
    fn test_visibility_writes_are_counted() {
        let mut window = MemoryWindow::new();
        assert_eq!(window.snapshot().visibility_writes, 0);

        window.set_visibility(Visibility::Invisible).unwrap();
        window.set_visibility(Visibility::Invisible).unwrap();

        let state = window.snapshot();
        assert_eq!(state.visibility, Visibility::Invisible);
        assert_eq!(state.visibility_writes, 2);
    }

    #[test]
    fn test_clones_share_state() {
        let window = MemoryWindow::new();
        let mut working_copy = window.clone();

        working_copy.set_flag(WindowFlag::KeepAwake).unwrap();
        assert!(window.snapshot().keep_awake);
    }

    #[test]
    fn test_registry_lookup() {
        let registry = MemoryRegistry::new();
        registry.install("com.malware.overlay");

        assert_eq!(
            registry.lookup("com.malware.overlay").unwrap(),
            PackageLookup::Found
        );
        assert_eq!(
            registry.lookup("com.benign.app").unwrap(),
            PackageLookup::NotFound
        );

        registry.uninstall("com.malware.overlay");
        assert_eq!(
            registry.lookup("com.malware.overlay").unwrap(),
            PackageLookup::NotFound
        );
    }
}
