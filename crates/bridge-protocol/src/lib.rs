//! Shared Protocol Definitions for Shroud
//!
//! This crate contains the operation call/reply envelopes, channel
//! namespaces, and argument value model spoken between a front-end and the
//! security guard bridge.

mod call;
mod error;
mod ops;
mod value;

pub use call::*;
pub use error::*;
pub use ops::*;
pub use value::*;

/// Wire name of the capture-protection and content-visibility channel
pub const CHANNEL_SECURE: &str = "secure";

/// Wire name of the malicious-package screening channel
pub const CHANNEL_SECURITY_CHECKER: &str = "security_checker";
