//! # Wiring
//!
//! A process-local registry that maps capability types ("what a caller
//! needs") to producer functions ("how to build one") and lazily builds and
//! caches the resulting object graph.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wiring::{Registry, provides};
//!
//! // Capabilities held inside cached instances must be thread-safe
//! trait NameGiver: Send + Sync {
//!     fn give_name(&self) -> String;
//! }
//!
//! struct Dano;
//! struct Joe;
//! struct Composition {
//!     givers: Vec<Arc<dyn NameGiver>>,
//! }
//!
//! impl NameGiver for Dano {
//!     fn give_name(&self) -> String { "Dano".into() }
//! }
//! impl NameGiver for Joe {
//!     fn give_name(&self) -> String { "Joe".into() }
//! }
//! impl Composition {
//!     fn names(&self) -> Vec<String> {
//!         self.givers.iter().map(|g| g.give_name()).collect()
//!     }
//! }
//!
//! provides!(Dano => dyn NameGiver);
//! provides!(Joe => dyn NameGiver);
//!
//! fn new_dano() -> Arc<Dano> { Arc::new(Dano) }
//! fn new_joe() -> Arc<Joe> { Arc::new(Joe) }
//! fn new_composition(givers: Vec<Arc<dyn NameGiver>>) -> Arc<Composition> {
//!     Arc::new(Composition { givers })
//! }
//!
//! let mut registry = Registry::new();
//! registry.bind::<dyn NameGiver, _, _>(new_dano)?;
//! registry.bind::<dyn NameGiver, _, _>(new_joe)?;
//! registry.bind::<Composition, _, _>(new_composition)?;
//!
//! let composition = registry.resolve::<Composition>()?;
//! assert_eq!(composition.names(), ["Dano", "Joe"]);
//! # Ok::<(), wiring::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - identities, the [`Provides`] conformance trait, errors
//! - `application` - the [`Registry`] engine
//! - `infrastructure` - configuration and logging
//! - [`global`] - the process-wide default registry
//! - [`must`] - abort-on-error adapters

/// Domain layer - identities, conformance and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use wiring_domain::*;
}

/// Application layer - the registry engine
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use wiring_application::*;
}

/// Infrastructure layer - configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use wiring_infrastructure::*;
}

pub mod global;
pub mod must;

pub use wiring_application::{
    Dependency, IntoProduced, Producer, Registry, ResolutionPolicy, SharedProducer,
};
pub use wiring_domain::{
    BindingError, CapabilityKey, DependencyKind, DependencySlot, Error, ProducerId, Provides,
    ResolutionError, Result, provides,
};
pub use wiring_infrastructure::{AppConfig, ConfigLoader, LoggingConfig, RegistryConfig};

pub use global::{
    bind, bind_instance, bootstrap, configure_global, empty, empty_instance, is_bound, resolve,
    resolve_all, resolve_all_instance, resolve_instance, with_global,
};
pub use must::{
    must_bind, must_bind_instance, must_resolve, must_resolve_all, must_resolve_all_instance,
    must_resolve_instance,
};
