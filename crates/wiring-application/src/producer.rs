//! Producer shapes
//!
//! A producer is any `Fn` whose inputs all implement [`Dependency`] and whose
//! output implements [`IntoProduced`]. Both constraints are checked by the
//! compiler at the bind site:
//!
//! - an input such as `u32` has no [`Dependency`] impl and cannot be resolved
//! - an output that is not `Arc<C>` (optionally inside a `Result`) has no
//!   [`IntoProduced`] impl, so value types cannot be shared across resolutions
//! - the concrete `C` must implement [`Provides`](wiring_domain::Provides) for
//!   the capability it is bound under, and must be `Send + Sync`; trait
//!   objects held inside it therefore need `Send + Sync` supertraits
//!
//! ## Identity
//!
//! Zero-sized producers (fn items, closures capturing nothing) are identified
//! by their type, so binding one again moves it instead of adding a second
//! entry. A producer with captured state gets a fresh identity on every
//! bind. Wrap it in a [`SharedProducer`] and bind clones of that to reuse
//! one identity, and therefore one cached instance, across capabilities.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use wiring_domain::{BoxError, DependencySlot, ProducerId, ResolutionError};

use crate::dependency::Dependency;
use crate::resolution::Resolution;

/// A cached concrete instance with its type erased
pub(crate) type AnyInstance = Arc<dyn Any + Send + Sync>;

/// Primary output of a producer, plus an optional failure indicator
///
/// The produced concrete type is cached and handed to every thread that
/// resolves it, hence the `Send + Sync` bound on [`Concrete`](Self::Concrete).
pub trait IntoProduced: 'static {
    /// Concrete type of the produced instance
    type Concrete: Send + Sync + 'static;

    /// Split the output into the instance or the reported failure
    fn into_produced(self) -> Result<Arc<Self::Concrete>, BoxError>;
}

impl<C: Send + Sync + 'static> IntoProduced for Arc<C> {
    type Concrete = C;

    fn into_produced(self) -> Result<Arc<C>, BoxError> {
        Ok(self)
    }
}

impl<C, E> IntoProduced for Result<Arc<C>, E>
where
    C: Send + Sync + 'static,
    E: Into<BoxError> + 'static,
{
    type Concrete = C;

    fn into_produced(self) -> Result<Arc<C>, BoxError> {
        self.map_err(Into::into)
    }
}

/// A callable that can be bound to a capability
///
/// Implemented for every `Fn(A1, .., An) -> R` with up to eight inputs. The
/// `Args` parameter only exists to keep the per-arity impls apart; callers
/// let it be inferred.
pub trait Producer<Args>: Sized + Send + Sync + 'static {
    /// What the callable returns
    type Output: IntoProduced;

    /// Identity this value is bound under
    fn producer_id(&self) -> ProducerId {
        ProducerId::for_callable::<Self>()
    }

    /// The declared inputs, in parameter order
    fn dependencies() -> Vec<DependencySlot>;

    /// Resolve every declared input against the registry behind `resolution`
    fn resolve_inputs(
        resolution: &mut Resolution<'_>,
        producer: ProducerId,
    ) -> Result<Args, ResolutionError>;

    /// Invoke the callable with already-resolved inputs
    fn call(&self, args: Args) -> Self::Output;
}

macro_rules! impl_producer {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg,)*> Producer<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out + Send + Sync + 'static,
            Out: IntoProduced,
            $($arg: Dependency,)*
        {
            type Output = Out;

            fn dependencies() -> Vec<DependencySlot> {
                vec![$($arg::slot()),*]
            }

            #[allow(unused_variables)]
            fn resolve_inputs(
                resolution: &mut Resolution<'_>,
                producer: ProducerId,
            ) -> Result<($($arg,)*), ResolutionError> {
                Ok(($(
                    $arg::resolve(resolution)
                        .map_err(|err| ResolutionError::dependency(producer, $arg::slot(), err))?,
                )*))
            }

            #[allow(non_snake_case)]
            fn call(&self, ($($arg,)*): ($($arg,)*)) -> Out {
                (self)($($arg),*)
            }
        }
    };
}

impl_producer!();
impl_producer!(A1);
impl_producer!(A1, A2);
impl_producer!(A1, A2, A3);
impl_producer!(A1, A2, A3, A4);
impl_producer!(A1, A2, A3, A4, A5);
impl_producer!(A1, A2, A3, A4, A5, A6);
impl_producer!(A1, A2, A3, A4, A5, A6, A7);
impl_producer!(A1, A2, A3, A4, A5, A6, A7, A8);

/// A producer whose identity survives cloning
///
/// Every clone reports the identity assigned in [`new`](Self::new), so
/// binding clones under several capabilities invokes the callable once.
pub struct SharedProducer<F> {
    func: Arc<F>,
    id: ProducerId,
}

impl<F: 'static> SharedProducer<F> {
    /// Wrap `func`, assigning its identity now
    pub fn new(func: F) -> Self {
        Self {
            func: Arc::new(func),
            id: ProducerId::for_callable::<F>(),
        }
    }

    /// The identity shared by every clone
    pub fn id(&self) -> ProducerId {
        self.id
    }
}

impl<F> Clone for SharedProducer<F> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            id: self.id,
        }
    }
}

impl<F, Args> Producer<Args> for SharedProducer<F>
where
    F: Producer<Args>,
{
    type Output = F::Output;

    fn producer_id(&self) -> ProducerId {
        self.id
    }

    fn dependencies() -> Vec<DependencySlot> {
        <F as Producer<Args>>::dependencies()
    }

    fn resolve_inputs(
        resolution: &mut Resolution<'_>,
        producer: ProducerId,
    ) -> Result<Args, ResolutionError> {
        <F as Producer<Args>>::resolve_inputs(resolution, producer)
    }

    fn call(&self, args: Args) -> Self::Output {
        <F as Producer<Args>>::call(&*self.func, args)
    }
}

/// Object-safe view of a bound producer
pub(crate) trait ErasedProducer: Send + Sync {
    fn id(&self) -> ProducerId;

    fn produce(&self, resolution: &mut Resolution<'_>) -> Result<AnyInstance, ResolutionError>;
}

/// Adapts a typed [`Producer`] to [`ErasedProducer`]
pub(crate) struct FnProducer<F, Args> {
    id: ProducerId,
    func: F,
    _args: PhantomData<fn() -> Args>,
}

impl<F, Args> FnProducer<F, Args> {
    pub(crate) fn new(id: ProducerId, func: F) -> Self {
        Self {
            id,
            func,
            _args: PhantomData,
        }
    }
}

impl<F, Args> ErasedProducer for FnProducer<F, Args>
where
    F: Producer<Args>,
    Args: 'static,
{
    fn id(&self) -> ProducerId {
        self.id
    }

    fn produce(&self, resolution: &mut Resolution<'_>) -> Result<AnyInstance, ResolutionError> {
        let producer = self.id();
        let args = F::resolve_inputs(resolution, producer)?;
        let output = resolution.invoke(producer, || self.func.call(args))?;
        let concrete = output
            .into_produced()
            .map_err(|err| ResolutionError::producer_failed(producer, err))?;
        let instance: AnyInstance = concrete;
        Ok(instance)
    }
}
