//! Process-wide default registry
//!
//! Thin forwarding layer over one [`Registry`] that lives for the whole
//! process. Every function here has an `*_instance` twin taking an explicit
//! registry; prefer those wherever a registry can be passed around.
//!
//! The default registry is guarded by a re-entrant lock, so concurrent
//! callers on different threads are serialized. A producer that calls back
//! into the default registry while it is resolving gets a `RegistryBusy`
//! error instead of a deadlock.

use std::cell::RefCell;
use std::sync::{Arc, LazyLock};

use parking_lot::ReentrantMutex;
use tracing::warn;
use wiring_application::{IntoProduced, Producer, Registry, ResolutionPolicy};
use wiring_domain::error::Result;
use wiring_domain::{BindingError, CapabilityKey, Provides, ResolutionError};
use wiring_infrastructure::{AppConfig, init_logging};

static GLOBAL: LazyLock<ReentrantMutex<RefCell<Registry>>> =
    LazyLock::new(|| ReentrantMutex::new(RefCell::new(Registry::new())));

/// Run `f` with exclusive access to the default registry
///
/// Returns `None` when called from inside a producer that is being
/// resolved by the default registry on the same thread.
pub fn with_global<R>(f: impl FnOnce(&mut Registry) -> R) -> Option<R> {
    let guard = GLOBAL.lock();
    let mut registry = guard.try_borrow_mut().ok()?;
    Some(f(&mut *registry))
}

/// Register `producer` for capability `T` in the default registry
pub fn bind<T, F, Args>(producer: F) -> std::result::Result<(), BindingError>
where
    T: ?Sized + 'static,
    F: Producer<Args>,
    Args: 'static,
    <F::Output as IntoProduced>::Concrete: Provides<T>,
{
    with_global(|registry| bind_instance::<T, F, Args>(registry, producer)).unwrap_or_else(|| {
        Err(BindingError::RegistryBusy {
            capability: CapabilityKey::of::<T>(),
        })
    })
}

/// Register `producer` for capability `T` in `registry`
pub fn bind_instance<T, F, Args>(
    registry: &mut Registry,
    producer: F,
) -> std::result::Result<(), BindingError>
where
    T: ?Sized + 'static,
    F: Producer<Args>,
    Args: 'static,
    <F::Output as IntoProduced>::Concrete: Provides<T>,
{
    registry.bind::<T, F, Args>(producer)
}

/// Every instance bound to `T` in the default registry, in binding order
pub fn resolve_all<T: ?Sized + 'static>() -> std::result::Result<Vec<Arc<T>>, ResolutionError> {
    with_global(resolve_all_instance::<T>).unwrap_or_else(|| Err(busy::<T>()))
}

/// Every instance bound to `T` in `registry`, in binding order
pub fn resolve_all_instance<T: ?Sized + 'static>(
    registry: &mut Registry,
) -> std::result::Result<Vec<Arc<T>>, ResolutionError> {
    registry.resolve_all::<T>()
}

/// The most recently bound instance for `T` in the default registry
pub fn resolve<T: ?Sized + 'static>() -> std::result::Result<Arc<T>, ResolutionError> {
    with_global(resolve_instance::<T>).unwrap_or_else(|| Err(busy::<T>()))
}

/// The most recently bound instance for `T` in `registry`
pub fn resolve_instance<T: ?Sized + 'static>(
    registry: &mut Registry,
) -> std::result::Result<Arc<T>, ResolutionError> {
    registry.resolve::<T>()
}

/// Clear every binding and cached instance of the default registry
///
/// Ignored, with a warning, when called from inside a producer that the
/// default registry is currently resolving.
pub fn empty() {
    if with_global(empty_instance).is_none() {
        warn!("Default registry is busy; empty() ignored");
    }
}

/// Clear every binding and cached instance of `registry`
pub fn empty_instance(registry: &mut Registry) {
    registry.empty();
}

/// Whether anything is bound for `T` in the default registry
pub fn is_bound<T: ?Sized + 'static>() -> bool {
    with_global(|registry| registry.is_bound::<T>()).unwrap_or(false)
}

/// Replace the resolution policy of the default registry
///
/// Returns `false` when the default registry is busy.
pub fn configure_global(policy: ResolutionPolicy) -> bool {
    with_global(|registry| registry.set_policy(policy)).is_some()
}

/// Apply the registry section of `config` to the default registry, then install logging
pub fn bootstrap(config: &AppConfig) -> Result<()> {
    if !configure_global(config.resolution_policy()) {
        warn!("Default registry is busy; resolution policy not applied");
    }
    init_logging(&config.logging)
}

fn busy<T: ?Sized + 'static>() -> ResolutionError {
    ResolutionError::RegistryBusy {
        capability: CapabilityKey::of::<T>(),
    }
}
