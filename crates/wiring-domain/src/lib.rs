//! # Wiring Domain
//!
//! Core types shared by every layer of the wiring registry.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Binding, resolution and workspace error taxonomy |
//! | [`value_objects`] | Capability and producer identities |
//! | [`capability`] | The [`Provides`] conformance trait and [`provides!`] macro |
//! | [`constants`] | Domain constants |
//!
//! This crate has no knowledge of how producers are stored or invoked;
//! the registry engine lives in `wiring-application`.

pub mod capability;
pub mod constants;
pub mod error;
pub mod value_objects;

pub use capability::Provides;
pub use error::{BindingError, BoxError, Error, ResolutionError, Result};
pub use value_objects::{CapabilityKey, DependencyKind, DependencySlot, ProducerId};
