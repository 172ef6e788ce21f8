//! Producer identity and declared inputs

use std::any::TypeId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::CapabilityKey;

static NEXT_PRODUCER_SERIAL: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Identity {
    Type(TypeId),
    Serial(u64),
}

/// Identity of a producer callable
///
/// A zero-sized callable (a fn item, or a closure capturing nothing) carries
/// no state, so every value of its type is the same producer and its
/// identity is the type itself. A callable with captured state gets a fresh
/// serial each time [`for_callable`](Self::for_callable) is asked for one:
/// two closures returned by the same factory are distinct producers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProducerId {
    identity: Identity,
    name: &'static str,
}

impl ProducerId {
    /// Type identity of the callable type `F`
    pub fn of<F: ?Sized + 'static>() -> Self {
        Self {
            identity: Identity::Type(TypeId::of::<F>()),
            name: std::any::type_name::<F>(),
        }
    }

    /// A new identity, distinct from every other one in the process
    pub fn unique<F: ?Sized + 'static>() -> Self {
        Self {
            identity: Identity::Serial(NEXT_PRODUCER_SERIAL.fetch_add(1, Ordering::Relaxed)),
            name: std::any::type_name::<F>(),
        }
    }

    /// Identity for one callable value of type `F`
    ///
    /// Type identity when `F` is zero-sized, otherwise [`unique`](Self::unique).
    pub fn for_callable<F: 'static>() -> Self {
        if size_of::<F>() == 0 {
            Self::of::<F>()
        } else {
            Self::unique::<F>()
        }
    }

    /// Whether this identity was allocated per value rather than per type
    pub fn is_unique(&self) -> bool {
        matches!(self.identity, Identity::Serial(_))
    }

    /// Fully qualified name of the callable type, for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity {
            Identity::Type(_) => f.debug_tuple("ProducerId").field(&self.name).finish(),
            Identity::Serial(serial) => f
                .debug_tuple("ProducerId")
                .field(&self.name)
                .field(&serial)
                .finish(),
        }
    }
}

impl fmt::Display for ProducerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.identity {
            Identity::Type(_) => f.write_str(self.name),
            Identity::Serial(serial) => write!(f, "{}#{serial}", self.name),
        }
    }
}

/// How a declared input is satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// Exactly one instance, the precedence winner; missing is an error
    Single,
    /// Every instance bound to the capability, in binding order; may be empty
    All,
    /// The precedence winner if anything is bound, otherwise nothing
    Optional,
}

/// One declared input of a producer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DependencySlot {
    /// Resolution rule for this input
    pub kind: DependencyKind,
    /// Capability the input asks for
    pub capability: CapabilityKey,
}

impl DependencySlot {
    /// A single-value requirement on `T`
    pub fn single<T: ?Sized + 'static>() -> Self {
        Self {
            kind: DependencyKind::Single,
            capability: CapabilityKey::of::<T>(),
        }
    }

    /// An "all producers of `T`" requirement
    pub fn all<T: ?Sized + 'static>() -> Self {
        Self {
            kind: DependencyKind::All,
            capability: CapabilityKey::of::<T>(),
        }
    }

    /// An optional single-value requirement on `T`
    pub fn optional<T: ?Sized + 'static>() -> Self {
        Self {
            kind: DependencyKind::Optional,
            capability: CapabilityKey::of::<T>(),
        }
    }
}

impl fmt::Display for DependencySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DependencyKind::Single => write!(f, "Arc<{}>", self.capability),
            DependencyKind::All => write!(f, "Vec<Arc<{}>>", self.capability),
            DependencyKind::Optional => write!(f, "Option<Arc<{}>>", self.capability),
        }
    }
}
