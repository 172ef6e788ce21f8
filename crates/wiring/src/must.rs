//! Abort-on-error adapters
//!
//! Same contracts as the functions in [`global`](crate::global), but any
//! reported error becomes a panic carrying the error's message. Meant for
//! start-up wiring where a missing binding is a programming error.

use std::sync::Arc;

use wiring_application::{IntoProduced, Producer, Registry};
use wiring_domain::Provides;

use crate::global;

/// Bind in the default registry, panicking on failure
pub fn must_bind<T, F, Args>(producer: F)
where
    T: ?Sized + 'static,
    F: Producer<Args>,
    Args: 'static,
    <F::Output as IntoProduced>::Concrete: Provides<T>,
{
    if let Err(err) = global::bind::<T, F, Args>(producer) {
        panic!("{err}");
    }
}

/// Bind in `registry`, panicking on failure
pub fn must_bind_instance<T, F, Args>(registry: &mut Registry, producer: F)
where
    T: ?Sized + 'static,
    F: Producer<Args>,
    Args: 'static,
    <F::Output as IntoProduced>::Concrete: Provides<T>,
{
    if let Err(err) = global::bind_instance::<T, F, Args>(registry, producer) {
        panic!("{err}");
    }
}

/// Resolve every instance of `T` in the default registry, panicking on failure
pub fn must_resolve_all<T: ?Sized + 'static>() -> Vec<Arc<T>> {
    global::resolve_all::<T>().unwrap_or_else(|err| panic!("{err}"))
}

/// Resolve every instance of `T` in `registry`, panicking on failure
pub fn must_resolve_all_instance<T: ?Sized + 'static>(registry: &mut Registry) -> Vec<Arc<T>> {
    global::resolve_all_instance::<T>(registry).unwrap_or_else(|err| panic!("{err}"))
}

/// Resolve the winning instance of `T` in the default registry, panicking on failure
pub fn must_resolve<T: ?Sized + 'static>() -> Arc<T> {
    global::resolve::<T>().unwrap_or_else(|err| panic!("{err}"))
}

/// Resolve the winning instance of `T` in `registry`, panicking on failure
pub fn must_resolve_instance<T: ?Sized + 'static>(registry: &mut Registry) -> Arc<T> {
    global::resolve_instance::<T>(registry).unwrap_or_else(|err| panic!("{err}"))
}
