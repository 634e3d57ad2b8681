//! Capture-protection toggles
//!
//! Thin mapping from the `secure` channel's flag operations onto the host
//! window primitives. The flags themselves live in the host window; there
//! is no bridge-side state here.

use platform_host::{HostResult, HostWindow, WindowFlag};
use tracing::debug;

/// Block screenshots and screen recording of the window surface
pub fn enable_secure(window: &mut dyn HostWindow) -> HostResult<()> {
    window.set_flag(WindowFlag::Secure)?;
    debug!("secure flag set");
    Ok(())
}

/// Re-allow capture of the window surface
pub fn disable_secure(window: &mut dyn HostWindow) -> HostResult<()> {
    window.clear_flag(WindowFlag::Secure)?;
    debug!("secure flag cleared");
    Ok(())
}

/// Suppress task-switcher previews: the secure and keep-awake flags are
/// applied in a single host call so no intermediate state is observable.
pub fn prevent_background_preview(window: &mut dyn HostWindow) -> HostResult<()> {
    window.set_flags(&[WindowFlag::Secure, WindowFlag::KeepAwake])?;
    debug!("background preview suppressed");
    Ok(())
}
