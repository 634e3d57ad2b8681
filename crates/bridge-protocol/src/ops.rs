//! Channel and operation namespaces
//!
//! Each channel is a closed namespace: an operation name valid on one
//! channel parses as unknown on the other, and an unknown name maps to the
//! `NotImplemented` reply, never a failure.

use crate::{CHANNEL_SECURE, CHANNEL_SECURITY_CHECKER};

/// Logical channel exposed by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Capture protection and content visibility
    Secure,
    /// Malicious-package screening
    SecurityChecker,
}

impl Channel {
    /// Parse a wire channel name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            CHANNEL_SECURE => Some(Channel::Secure),
            CHANNEL_SECURITY_CHECKER => Some(Channel::SecurityChecker),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Secure => CHANNEL_SECURE,
            Channel::SecurityChecker => CHANNEL_SECURITY_CHECKER,
        }
    }
}

/// Operations on the `secure` channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureOp {
    EnableSecure,
    DisableSecure,
    PreventBackgroundPreview,
    HideContent,
    ShowContent,
}

impl SecureOp {
    /// Parse a wire operation name within the `secure` namespace
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "enableSecure" => Some(SecureOp::EnableSecure),
            "disableSecure" => Some(SecureOp::DisableSecure),
            "preventBackgroundPreview" => Some(SecureOp::PreventBackgroundPreview),
            "hideContent" => Some(SecureOp::HideContent),
            "showContent" => Some(SecureOp::ShowContent),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SecureOp::EnableSecure => "enableSecure",
            SecureOp::DisableSecure => "disableSecure",
            SecureOp::PreventBackgroundPreview => "preventBackgroundPreview",
            SecureOp::HideContent => "hideContent",
            SecureOp::ShowContent => "showContent",
        }
    }
}

/// Operations on the `security_checker` channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerOp {
    CheckMaliciousApps,
}

impl CheckerOp {
    /// Parse a wire operation name within the `security_checker` namespace
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "checkMaliciousApps" => Some(CheckerOp::CheckMaliciousApps),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CheckerOp::CheckMaliciousApps => "checkMaliciousApps",
        }
    }
}
