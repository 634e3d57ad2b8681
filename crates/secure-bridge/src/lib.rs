//! Security Guard Bridge for Shroud
//!
//! Couples the capability invoker to the content-visibility state machine,
//! the capture-protection shield, and the blocklist scanner, all behind
//! the host facade traits. `SecurityBridge` is the sole entry point;
//! `BridgeHandle` runs it on a single-consumer dispatch loop for
//! multi-threaded hosts.

mod bridge;
mod dispatch;
pub mod scanner;
pub mod shield;
mod visibility;

pub use bridge::*;
pub use dispatch::*;
pub use visibility::*;
