//! Domain layer constants
//!
//! Fixed values that are part of the resolution rules themselves. Tunables
//! that operators may override live in `wiring_infrastructure::constants`.

// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Message used when a producer panics with a payload that is not a string
pub const OPAQUE_PANIC_MESSAGE: &str = "producer panicked with a non-string payload";
