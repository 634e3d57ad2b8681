//! Blocklist package scanner

use platform_host::{HostResult, PackageLookup, PackageRegistry};
use tracing::{debug, warn};

/// Screen `candidates` against the host package registry, in order.
///
/// Returns `true` on the first installed candidate without checking the
/// rest; `false` once the list is exhausted (including the empty list).
/// A candidate that is not installed is an expected outcome and never
/// aborts the scan. The verdict is never memoized: every call re-queries
/// the registry.
pub fn scan(registry: &dyn PackageRegistry, candidates: &[String]) -> HostResult<bool> {
    debug!(candidates = candidates.len(), "scanning package blocklist");

    for identifier in candidates {
        if registry.lookup(identifier)? == PackageLookup::Found {
            warn!(package = %identifier, "blocklisted package is installed");
            return Ok(true);
        }
    }

    Ok(false)
}
