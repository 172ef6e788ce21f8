//! Capability conformance
//!
//! A concrete type declares which capability types it satisfies by
//! implementing [`Provides`]. The upcast inside each impl is an unsizing
//! coercion, so declaring a capability the type does not implement is a
//! compile error rather than a runtime binding failure.
//!
//! ```rust
//! use std::sync::Arc;
//! use wiring_domain::{Provides, provides};
//!
//! trait NameGiver {
//!     fn give_name(&self) -> String;
//! }
//!
//! struct Dano;
//!
//! impl NameGiver for Dano {
//!     fn give_name(&self) -> String {
//!         "Dano".to_string()
//!     }
//! }
//!
//! provides!(Dano => dyn NameGiver);
//!
//! let giver: Arc<dyn NameGiver> = Arc::new(Dano).provide();
//! assert_eq!(giver.give_name(), "Dano");
//! ```

use std::sync::Arc;

/// Declares that `Self` satisfies capability type `T`
///
/// Every concrete type provides itself, so a producer of `Arc<C>` can
/// always be bound under `C`. Trait-object capabilities are declared with
/// the [`provides!`](crate::provides) macro or a hand-written impl.
///
/// `Self` must be `Send + Sync`. A concrete that stores other capabilities
/// (`Vec<Arc<dyn Cap>>`) only qualifies when `Cap` has `Send + Sync`
/// supertraits.
pub trait Provides<T: ?Sized>: Send + Sync + 'static {
    /// View this shared instance as capability `T`
    fn provide(self: Arc<Self>) -> Arc<T>;
}

impl<T: Send + Sync + 'static> Provides<T> for T {
    fn provide(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Implement [`Provides`] for a concrete type and one or more capabilities
///
/// ```rust
/// # use wiring_domain::provides;
/// trait PrimaryIdGiver {}
/// trait SecondaryIdGiver {}
/// struct Both;
/// impl PrimaryIdGiver for Both {}
/// impl SecondaryIdGiver for Both {}
///
/// provides!(Both => dyn PrimaryIdGiver, dyn SecondaryIdGiver);
/// ```
#[macro_export]
macro_rules! provides {
    ($concrete:ty => $($capability:ty),+ $(,)?) => {
        $(
            impl $crate::Provides<$capability> for $concrete {
                fn provide(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$capability> {
                    self
                }
            }
        )+
    };
}
