//! Capability invoker - the bridge's sole entry point

use bridge_protocol::{
    Channel, CheckerOp, FailureCode, OperationCall, OperationReply, ProtocolError, SecureOp,
};
use platform_host::{HostError, HostResult, HostWindow, LifecycleEvent, PackageRegistry};
use tracing::debug;

use crate::visibility::VisibilityGuard;
use crate::{scanner, shield};

/// Dispatches operation calls to the visibility state machine, the capture
/// shield, and the blocklist scanner. Owns all mutable bridge state; every
/// operation runs synchronously under `&mut self`, so a single bridge is a
/// single logical actor.
pub struct SecurityBridge {
    window: Box<dyn HostWindow>,
    registry: Box<dyn PackageRegistry>,
    visibility: VisibilityGuard,
}

impl SecurityBridge {
    pub fn new(window: Box<dyn HostWindow>, registry: Box<dyn PackageRegistry>) -> Self {
        Self {
            window,
            registry,
            visibility: VisibilityGuard::new(),
        }
    }

    pub fn is_content_hidden(&self) -> bool {
        self.visibility.is_hidden()
    }

    /// Handle one operation call and produce its reply.
    ///
    /// Unrecognized channels and operation names reply `NotImplemented`;
    /// argument problems reply `INVALID_ARGUMENT`; host primitive errors
    /// reply `HOST_FAILURE`. Nothing here panics the bridge.
    pub fn handle(&mut self, call: &OperationCall) -> OperationReply {
        debug!(channel = %call.channel, operation = %call.name, "dispatching operation");

        match Channel::parse(&call.channel) {
            Some(Channel::Secure) => self.handle_secure(call),
            Some(Channel::SecurityChecker) => self.handle_checker(call),
            None => {
                debug!(channel = %call.channel, "unrecognized channel");
                OperationReply::NotImplemented
            }
        }
    }

    /// Forward a host lifecycle transition to the visibility machine.
    /// While hidden, content stays invisible across both directions until
    /// an explicit `showContent`.
    pub fn lifecycle(&mut self, event: LifecycleEvent) -> HostResult<()> {
        debug!(?event, "lifecycle transition");
        self.visibility.reassert(self.window.as_mut())
    }

    fn handle_secure(&mut self, call: &OperationCall) -> OperationReply {
        let Some(op) = SecureOp::parse(&call.name) else {
            debug!(operation = %call.name, "unrecognized secure operation");
            return OperationReply::NotImplemented;
        };

        let window = self.window.as_mut();
        let outcome = match op {
            SecureOp::EnableSecure => shield::enable_secure(window),
            SecureOp::DisableSecure => shield::disable_secure(window),
            SecureOp::PreventBackgroundPreview => shield::prevent_background_preview(window),
            SecureOp::HideContent => self.visibility.hide(window).map(|_| ()),
            SecureOp::ShowContent => self.visibility.show(window).map(|_| ()),
        };

        match outcome {
            Ok(()) => OperationReply::acknowledged(),
            Err(err) => host_failure(err),
        }
    }

    fn handle_checker(&mut self, call: &OperationCall) -> OperationReply {
        let Some(op) = CheckerOp::parse(&call.name) else {
            debug!(operation = %call.name, "unrecognized checker operation");
            return OperationReply::NotImplemented;
        };

        match op {
            CheckerOp::CheckMaliciousApps => {
                let packages = match call.require_string_list("packages") {
                    Ok(packages) => packages,
                    Err(ProtocolError::MissingArgument(_)) => {
                        return OperationReply::failure(
                            FailureCode::InvalidArgument,
                            "package list is null",
                        );
                    }
                    Err(err) => {
                        return OperationReply::failure(
                            FailureCode::InvalidArgument,
                            err.to_string(),
                        );
                    }
                };

                match scanner::scan(self.registry.as_ref(), &packages) {
                    Ok(found) => OperationReply::success(found),
                    Err(err) => host_failure(err),
                }
            }
        }
    }
}

fn host_failure(err: HostError) -> OperationReply {
    OperationReply::failure(FailureCode::HostFailure, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_protocol::{ArgValue, CHANNEL_SECURE, CHANNEL_SECURITY_CHECKER};
    use platform_host::{MemoryRegistry, MemoryWindow, Visibility};

    fn bridge_with_host() -> (SecurityBridge, MemoryWindow, MemoryRegistry) {
        let window = MemoryWindow::new();
        let registry = MemoryRegistry::new();
        let bridge = SecurityBridge::new(Box::new(window.clone()), Box::new(registry.clone()));
        (bridge, window, registry)
    }

    fn secure(name: &str) -> OperationCall {
        OperationCall::new(CHANNEL_SECURE, name)
    }

    fn check(packages: Vec<String>) -> OperationCall {
        OperationCall::new(CHANNEL_SECURITY_CHECKER, "checkMaliciousApps")
            .with_arg("packages", packages)
    }

    #[test]
    fn test_enable_then_check_end_to_end() {
        let (mut bridge, window, registry) = bridge_with_host();
        registry.install("known.installed.pkg");

        assert_eq!(
            bridge.handle(&secure("enableSecure")),
            OperationReply::acknowledged()
        );
        assert!(window.snapshot().secure);

        assert_eq!(
            bridge.handle(&check(vec!["known.installed.pkg".to_string()])),
            OperationReply::success(true)
        );
        assert_eq!(
            bridge.handle(&check(vec!["not.installed.pkg".to_string()])),
            OperationReply::success(false)
        );
    }

    #[test]
    fn test_missing_package_list_is_invalid_argument() {
        let (mut bridge, _, _) = bridge_with_host();

        let call = OperationCall::new(CHANNEL_SECURITY_CHECKER, "checkMaliciousApps");
        assert_eq!(
            bridge.handle(&call),
            OperationReply::failure(FailureCode::InvalidArgument, "package list is null")
        );

        let null = call.with_arg("packages", ArgValue::Null);
        assert_eq!(
            bridge.handle(&null),
            OperationReply::failure(FailureCode::InvalidArgument, "package list is null")
        );
    }

    #[test]
    fn test_wrong_shape_package_list_is_invalid_argument() {
        let (mut bridge, _, _) = bridge_with_host();

        let call = OperationCall::new(CHANNEL_SECURITY_CHECKER, "checkMaliciousApps")
            .with_arg("packages", "pkg.a");
        match bridge.handle(&call) {
            OperationReply::Failure { code, .. } => {
                assert_eq!(code, FailureCode::InvalidArgument);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operation_is_not_implemented() {
        let (mut bridge, _, _) = bridge_with_host();

        assert_eq!(
            bridge.handle(&secure("takeScreenshot")),
            OperationReply::NotImplemented
        );
        assert_eq!(
            bridge.handle(&OperationCall::new(CHANNEL_SECURITY_CHECKER, "scanEverything")),
            OperationReply::NotImplemented
        );
        assert_eq!(
            bridge.handle(&OperationCall::new("telemetry", "enableSecure")),
            OperationReply::NotImplemented
        );
    }

    #[test]
    fn test_channel_namespaces_do_not_leak() {
        let (mut bridge, _, _) = bridge_with_host();

        assert_eq!(
            bridge.handle(&secure("checkMaliciousApps")),
            OperationReply::NotImplemented
        );
        assert_eq!(
            bridge.handle(&OperationCall::new(CHANNEL_SECURITY_CHECKER, "hideContent")),
            OperationReply::NotImplemented
        );
    }

    #[test]
    fn test_prevent_background_preview_sets_both_flags() {
        let (mut bridge, window, _) = bridge_with_host();

        assert_eq!(
            bridge.handle(&secure("preventBackgroundPreview")),
            OperationReply::acknowledged()
        );

        let state = window.snapshot();
        assert!(state.secure);
        assert!(state.keep_awake);
    }

    #[test]
    fn test_hidden_state_survives_lifecycle_round_trip() {
        let (mut bridge, window, _) = bridge_with_host();

        bridge.handle(&secure("hideContent"));
        bridge.lifecycle(LifecycleEvent::Background).unwrap();
        bridge.lifecycle(LifecycleEvent::Foreground).unwrap();

        assert!(bridge.is_content_hidden());
        assert_eq!(window.snapshot().visibility, Visibility::Invisible);

        bridge.handle(&secure("showContent"));
        assert!(!bridge.is_content_hidden());
        assert_eq!(window.snapshot().visibility, Visibility::Visible);
    }

    #[test]
    fn test_lifecycle_while_visible_writes_nothing() {
        let (mut bridge, window, _) = bridge_with_host();

        bridge.lifecycle(LifecycleEvent::Background).unwrap();
        bridge.lifecycle(LifecycleEvent::Foreground).unwrap();

        assert_eq!(window.snapshot().visibility_writes, 0);
    }
}
