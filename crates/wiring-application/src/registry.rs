//! The binding table and instance cache

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;
use wiring_domain::{
    BindingError, CapabilityKey, DependencyKind, ProducerId, Provides, ResolutionError,
};

use crate::policy::ResolutionPolicy;
use crate::producer::{AnyInstance, ErasedProducer, FnProducer, IntoProduced, Producer};
use crate::resolution::Resolution;

/// Views a type-erased cached instance as one capability
pub(crate) type ViewFn = fn(&AnyInstance) -> Option<Box<dyn Any>>;

/// One producer registered under one capability
#[derive(Clone)]
pub(crate) struct Binding {
    pub(crate) producer: Arc<dyn ErasedProducer>,
    pub(crate) view: ViewFn,
}

impl Binding {
    pub(crate) fn id(&self) -> ProducerId {
        self.producer.id()
    }
}

/// Maps capability types to the producers that satisfy them and caches
/// every instance those producers build
///
/// - Producers bound to one capability are kept in binding order; binding
///   an already-present producer again moves it to the end. Presence is
///   decided by [`Producer::producer_id`]: fn items and capture-free
///   closures match by type, stateful callables only match clones of the
///   same [`SharedProducer`](crate::SharedProducer).
/// - [`resolve`](Self::resolve) returns the instance of the last bound producer.
/// - Each producer runs at most once per registry, no matter how many
///   capabilities it is bound under. Its instance is cached until
///   [`empty`](Self::empty).
///
/// Mutating operations take `&mut self`; the registry has no internal locking.
pub struct Registry {
    pub(crate) bindings: HashMap<CapabilityKey, Vec<Binding>>,
    instances: HashMap<ProducerId, Option<AnyInstance>>,
    pub(crate) policy: ResolutionPolicy,
}

impl Registry {
    /// Create an empty registry with the default policy
    pub fn new() -> Self {
        Self::with_policy(ResolutionPolicy::default())
    }

    /// Create an empty registry with the given policy
    pub fn with_policy(policy: ResolutionPolicy) -> Self {
        Self {
            bindings: HashMap::new(),
            instances: HashMap::new(),
            policy,
        }
    }

    /// The policy applied to resolutions
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Replace the policy; bindings and cached instances are kept
    pub fn set_policy(&mut self, policy: ResolutionPolicy) {
        self.policy = policy;
    }

    /// Register `producer` as able to satisfy capability `T`
    ///
    /// The producer's output must be `Arc<C>` or `Result<Arc<C>, E>` with
    /// `C: Provides<T>`, and each of its inputs must be a [`Dependency`](crate::Dependency);
    /// both are enforced at compile time.
    ///
    /// # Errors
    ///
    /// [`BindingError::SelfDependency`] when the producer asks for every
    /// producer of `T` (a `Vec<Arc<T>>` input). Nothing is modified on error.
    pub fn bind<T, F, Args>(&mut self, producer: F) -> Result<(), BindingError>
    where
        T: ?Sized + 'static,
        F: Producer<Args>,
        Args: 'static,
        <F::Output as IntoProduced>::Concrete: Provides<T>,
    {
        let capability = CapabilityKey::of::<T>();
        let id = <F as Producer<Args>>::producer_id(&producer);

        let requests_itself = <F as Producer<Args>>::dependencies()
            .iter()
            .any(|slot| slot.kind == DependencyKind::All && slot.capability == capability);
        if requests_itself {
            return Err(BindingError::SelfDependency {
                capability,
                producer: id,
            });
        }

        let binding = Binding {
            producer: Arc::new(FnProducer::<F, Args>::new(id, producer)),
            view: view_instance::<<F::Output as IntoProduced>::Concrete, T>,
        };

        let bindings = self.bindings.entry(capability).or_default();
        let rebound = match bindings.iter().position(|existing| existing.id() == id) {
            Some(position) => {
                bindings.remove(position);
                true
            }
            None => false,
        };
        bindings.push(binding);
        let count = bindings.len();

        self.instances.entry(id).or_insert(None);

        debug!(
            capability = capability.name(),
            producer = %id,
            bindings = count,
            rebound,
            "Bound producer"
        );
        Ok(())
    }

    /// Every instance bound to `T`, in binding order
    ///
    /// Producers that have not run yet are invoked, inputs first. Instances
    /// built before a failure stay cached.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::NotBound`] when nothing is bound for `T`, otherwise
    /// the first failure raised while building an instance.
    pub fn resolve_all<T: ?Sized + 'static>(&mut self) -> Result<Vec<Arc<T>>, ResolutionError> {
        Resolution::new(self).resolve_all::<T>()
    }

    /// The instance of the most recently bound producer for `T`
    ///
    /// Defined as the last element of [`resolve_all`](Self::resolve_all), so
    /// every producer bound to `T` is built.
    pub fn resolve<T: ?Sized + 'static>(&mut self) -> Result<Arc<T>, ResolutionError> {
        Resolution::new(self).resolve_one::<T>()
    }

    /// Remove every binding and every cached instance
    pub fn empty(&mut self) {
        let capabilities = self.bindings.len();
        let producers = self.instances.len();
        self.bindings.clear();
        self.instances.clear();
        debug!(capabilities, producers, "Emptied registry");
    }

    /// Whether at least one producer is bound for `T`
    pub fn is_bound<T: ?Sized + 'static>(&self) -> bool {
        self.binding_count::<T>() > 0
    }

    /// Number of producers bound for `T`
    pub fn binding_count<T: ?Sized + 'static>(&self) -> usize {
        self.bindings
            .get(&CapabilityKey::of::<T>())
            .map_or(0, Vec::len)
    }

    /// Whether every producer bound for `T` already has a cached instance
    ///
    /// False when nothing is bound.
    pub fn is_resolved<T: ?Sized + 'static>(&self) -> bool {
        match self.bindings.get(&CapabilityKey::of::<T>()) {
            Some(bindings) if !bindings.is_empty() => bindings
                .iter()
                .all(|binding| self.cached(binding.id()).is_some()),
            _ => false,
        }
    }

    /// Number of capability types with at least one binding
    pub fn capability_count(&self) -> usize {
        self.bindings.values().filter(|b| !b.is_empty()).count()
    }

    /// Number of distinct producers known to the registry
    pub fn producer_count(&self) -> usize {
        self.instances.len()
    }

    pub(crate) fn cached(&self, producer: ProducerId) -> Option<AnyInstance> {
        self.instances.get(&producer).and_then(Option::clone)
    }

    pub(crate) fn store(&mut self, producer: ProducerId, instance: AnyInstance) {
        self.instances.insert(producer, Some(instance));
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings: HashMap<&str, usize> = self
            .bindings
            .iter()
            .map(|(capability, bindings)| (capability.name(), bindings.len()))
            .collect();
        f.debug_struct("Registry")
            .field("bindings", &bindings)
            .field("producers", &self.instances.len())
            .field("policy", &self.policy)
            .finish()
    }
}

fn view_instance<C, T>(instance: &AnyInstance) -> Option<Box<dyn Any>>
where
    C: Provides<T>,
    T: ?Sized + 'static,
{
    let concrete = Arc::clone(instance).downcast::<C>().ok()?;
    let capability: Arc<T> = <C as Provides<T>>::provide(concrete);
    Some(Box::new(capability))
}

// The registry must be movable into a lock shared across threads.
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send_sync::<Registry>();
    }
};
