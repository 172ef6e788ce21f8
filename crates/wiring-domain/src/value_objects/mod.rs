//! Domain Value Objects
//!
//! Immutable identities used as keys by the registry. All of them compare
//! by [`std::any::TypeId`]; the captured type name is for diagnostics only.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`CapabilityKey`] | Lookup key for "what a caller needs" |
//! | [`ProducerId`] | Identity of a producer callable |
//! | [`DependencySlot`] | One declared input of a producer |

/// Capability lookup keys
pub mod capability;
/// Producer identities and their declared inputs
pub mod producer;

pub use capability::CapabilityKey;
pub use producer::{DependencyKind, DependencySlot, ProducerId};
