//! Application Layer - Wiring Registry Engine
//!
//! The binding table, the instance cache, and the recursive algorithm that
//! resolves a producer's inputs before invoking it.
//!
//! ## Flow
//!
//! ```text
//! bind::<dyn Cap, _, _>(producer)
//!          │
//!          ▼
//! ┌──────────────────────────────┐
//! │ bindings: Cap → [Binding..]  │  ← insertion order, re-bind moves to end
//! └──────────────────────────────┘
//!          │  resolve_all::<dyn Cap>()
//!          ▼
//! ┌──────────────────────────────┐
//! │ Resolution (in-progress set) │  ← cycle + depth guard
//! │   inputs first, recursively  │
//! │   catch_unwind around call   │
//! └──────────────────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────┐
//! │ instances: ProducerId → Arc  │  ← filled once, shared by every capability
//! └──────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wiring_application::Registry;
//! use wiring_domain::provides;
//!
//! trait NameGiver: Send + Sync {
//!     fn give_name(&self) -> String;
//! }
//!
//! struct Dano;
//! struct Joe;
//!
//! impl NameGiver for Dano {
//!     fn give_name(&self) -> String { "Dano".into() }
//! }
//! impl NameGiver for Joe {
//!     fn give_name(&self) -> String { "Joe".into() }
//! }
//!
//! provides!(Dano => dyn NameGiver);
//! provides!(Joe => dyn NameGiver);
//!
//! fn new_dano() -> Arc<Dano> { Arc::new(Dano) }
//! fn new_joe() -> Arc<Joe> { Arc::new(Joe) }
//!
//! let mut registry = Registry::new();
//! registry.bind::<dyn NameGiver, _, _>(new_dano).unwrap();
//! registry.bind::<dyn NameGiver, _, _>(new_joe).unwrap();
//!
//! let names: Vec<String> = registry
//!     .resolve_all::<dyn NameGiver>()
//!     .unwrap()
//!     .iter()
//!     .map(|giver| giver.give_name())
//!     .collect();
//! assert_eq!(names, ["Dano", "Joe"]);
//! assert_eq!(registry.resolve::<dyn NameGiver>().unwrap().give_name(), "Joe");
//! ```
//!
//! ## Concurrency
//!
//! All operations are synchronous. Mutation goes through `&mut Registry`, so
//! sharing one registry between threads needs external mutual exclusion;
//! the `wiring` facade provides that for its process-wide default registry.

pub mod dependency;
pub mod policy;
pub mod producer;
pub mod registry;
pub mod resolution;

pub use dependency::Dependency;
pub use policy::ResolutionPolicy;
pub use producer::{IntoProduced, Producer, SharedProducer};
pub use registry::Registry;
pub use resolution::Resolution;
