//! Host framework availability
//!
//! The wrapper and the host interface only exist when the `host` feature is
//! compiled in. Callers that register models dynamically check here first.

use crate::error::{BridgeError, Result};

/// Whether the host framework interface was compiled in
pub const HOST_SUPPORT_ENABLED: bool = cfg!(feature = "host");

/// Message reported when the host interface is missing
pub const HOST_UNAVAILABLE_MESSAGE: &str = "LlmClientWrapper requires the host framework \
     interface, which this build does not include. Rebuild with the `host` feature enabled:\n\
     `cargo build --features host`";

/// Ensure the host framework interface is available
///
/// # Errors
///
/// Returns [`BridgeError::HostUnavailable`] when the crate was built without
/// the `host` feature
pub fn ensure_host_support() -> Result<()> {
    if HOST_SUPPORT_ENABLED {
        Ok(())
    } else {
        Err(BridgeError::HostUnavailable(HOST_UNAVAILABLE_MESSAGE.to_string()))
    }
}
