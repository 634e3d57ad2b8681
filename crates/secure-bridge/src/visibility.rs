//! Content visibility state machine

use platform_host::{HostResult, HostWindow, Visibility};
use tracing::debug;

/// Tracks whether rendered content is hidden and applies transitions to
/// the host window idempotently.
///
/// Hiding persists across a backgrounding round-trip: lifecycle hooks
/// reassert the hidden state but never transition back to visible. Only an
/// explicit [`show`](VisibilityGuard::show) does.
#[derive(Debug, Default)]
pub struct VisibilityGuard {
    hidden: bool,
}

impl VisibilityGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Hide content. Returns whether a transition happened; repeated calls
    /// produce no further host writes.
    pub fn hide(&mut self, window: &mut dyn HostWindow) -> HostResult<bool> {
        if self.hidden {
            return Ok(false);
        }
        window.set_visibility(Visibility::Invisible)?;
        self.hidden = true;
        debug!("content hidden");
        Ok(true)
    }

    /// Show content. Returns whether a transition happened.
    pub fn show(&mut self, window: &mut dyn HostWindow) -> HostResult<bool> {
        if !self.hidden {
            return Ok(false);
        }
        window.set_visibility(Visibility::Visible)?;
        self.hidden = false;
        debug!("content shown");
        Ok(true)
    }

    /// Re-apply the current hidden state on a lifecycle transition. A
    /// no-op while visible; state is never changed here.
    pub fn reassert(&self, window: &mut dyn HostWindow) -> HostResult<()> {
        if self.hidden {
            window.set_visibility(Visibility::Invisible)?;
            debug!("hidden state reasserted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_host::MemoryWindow;

    #[test]
    fn test_final_state_follows_last_transition() {
        let mut window = MemoryWindow::new();
        let mut guard = VisibilityGuard::new();

        guard.hide(&mut window).unwrap();
        guard.show(&mut window).unwrap();
        guard.hide(&mut window).unwrap();

        assert!(guard.is_hidden());
        assert_eq!(window.snapshot().visibility, Visibility::Invisible);

        guard.show(&mut window).unwrap();
        assert!(!guard.is_hidden());
        assert_eq!(window.snapshot().visibility, Visibility::Visible);
    }

    #[test]
    fn test_hide_twice_writes_once() {
        let mut window = MemoryWindow::new();
        let mut guard = VisibilityGuard::new();

        assert!(guard.hide(&mut window).unwrap());
        assert!(!guard.hide(&mut window).unwrap());

        assert_eq!(window.snapshot().visibility_writes, 1);
    }

    #[test]
    fn test_show_while_visible_is_a_no_op() {
        let mut window = MemoryWindow::new();
        let mut guard = VisibilityGuard::new();

        assert!(!guard.show(&mut window).unwrap());
        assert_eq!(window.snapshot().visibility_writes, 0);
    }

    #[test]
    fn test_reassert_keeps_hidden_state() {
        let mut window = MemoryWindow::new();
        let mut guard = VisibilityGuard::new();

        guard.hide(&mut window).unwrap();
        guard.reassert(&mut window).unwrap();
        guard.reassert(&mut window).unwrap();

        // State never transitions back to visible, and each reassert
        // rewrites the hidden visibility.
        assert!(guard.is_hidden());
        assert_eq!(window.snapshot().visibility, Visibility::Invisible);
        assert_eq!(window.snapshot().visibility_writes, 3);
    }

    #[test]
    fn test_reassert_while_visible_is_side_effect_free() {
        let mut window = MemoryWindow::new();
        let guard = VisibilityGuard::new();

        guard.reassert(&mut window).unwrap();

        assert_eq!(window.snapshot().visibility, Visibility::Visible);
        assert_eq!(window.snapshot().visibility_writes, 0);
    }
}
