//! Recursive resolution
//!
//! One [`Resolution`] lives for one top-level `resolve`/`resolve_all` call.
//! It carries the stack of producers currently being invoked so that
//! re-entering one of them is reported as a cycle instead of recursing
//! until the stack overflows.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, trace};
use wiring_domain::constants::OPAQUE_PANIC_MESSAGE;
use wiring_domain::{CapabilityKey, ProducerId, ResolutionError};

use crate::producer::AnyInstance;
use crate::registry::{Binding, Registry};

/// An in-flight resolution pass over a [`Registry`]
pub struct Resolution<'r> {
    registry: &'r mut Registry,
    in_progress: Vec<ProducerId>,
}

impl<'r> Resolution<'r> {
    pub(crate) fn new(registry: &'r mut Registry) -> Self {
        Self {
            registry,
            in_progress: Vec::new(),
        }
    }

    /// Number of producers currently mid-invocation
    ///
    /// Inside a [`Dependency::resolve`](crate::Dependency::resolve) call this
    /// counts the producer whose input is being resolved.
    pub fn depth(&self) -> usize {
        self.in_progress.len()
    }

    /// Whether at least one producer is bound for `T`
    pub fn is_bound<T: ?Sized + 'static>(&self) -> bool {
        self.registry.is_bound::<T>()
    }

    /// Every instance bound to `T`, in binding order
    pub fn resolve_all<T: ?Sized + 'static>(&mut self) -> Result<Vec<Arc<T>>, ResolutionError> {
        let capability = CapabilityKey::of::<T>();
        let bindings = match self.registry.bindings.get(&capability) {
            Some(bindings) if !bindings.is_empty() => bindings.clone(),
            _ => return Err(ResolutionError::NotBound { capability }),
        };

        let mut resolved = Vec::with_capacity(bindings.len());
        for binding in &bindings {
            let instance = self.instantiate(binding)?;
            resolved.push(view_as::<T>(binding, &instance, capability)?);
        }
        Ok(resolved)
    }

    /// The instance of the most recently bound producer for `T`
    pub fn resolve_one<T: ?Sized + 'static>(&mut self) -> Result<Arc<T>, ResolutionError> {
        self.resolve_all::<T>()?
            .pop()
            .ok_or_else(ResolutionError::not_bound::<T>)
    }

    fn instantiate(&mut self, binding: &Binding) -> Result<AnyInstance, ResolutionError> {
        let producer = binding.id();
        if let Some(instance) = self.registry.cached(producer) {
            trace!(producer = %producer, "Reusing cached instance");
            return Ok(instance);
        }

        if let Some(start) = self.in_progress.iter().position(|p| *p == producer) {
            let mut cycle = self.in_progress[start..].to_vec();
            cycle.push(producer);
            return Err(ResolutionError::CyclicDependency { cycle });
        }

        if let Some(limit) = self.registry.policy.max_depth
            && self.depth() >= limit
        {
            return Err(ResolutionError::DepthExceeded { limit, producer });
        }

        self.in_progress.push(producer);
        debug!(producer = %producer, depth = self.depth(), "Invoking producer");
        let produced = binding.producer.produce(self);
        self.in_progress.pop();

        let instance = produced?;
        self.registry.store(producer, Arc::clone(&instance));
        Ok(instance)
    }

    /// Run a producer body, turning a panic into a [`ResolutionError`]
    pub(crate) fn invoke<R>(
        &self,
        producer: ProducerId,
        call: impl FnOnce() -> R,
    ) -> Result<R, ResolutionError> {
        if !self.registry.policy.catch_panics {
            return Ok(call());
        }
        panic::catch_unwind(AssertUnwindSafe(call)).map_err(|payload| {
            ResolutionError::producer_panicked(producer, panic_message(payload.as_ref()))
        })
    }
}

fn view_as<T: ?Sized + 'static>(
    binding: &Binding,
    instance: &AnyInstance,
    capability: CapabilityKey,
) -> Result<Arc<T>, ResolutionError> {
    (binding.view)(instance)
        .and_then(|viewed| viewed.downcast::<Arc<T>>().ok())
        .map(|viewed| *viewed)
        .ok_or(ResolutionError::InstanceMismatch {
            producer: binding.id(),
            capability,
        })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        OPAQUE_PANIC_MESSAGE.to_string()
    }
}
