//! Capability Key Value Object

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Value Object: Capability Type Witness
///
/// Identifies a capability type (`dyn Trait` or a concrete type) in the
/// binding table. Two keys are equal exactly when they were built from
/// the same Rust type.
///
/// ## Example
///
/// ```rust
/// use wiring_domain::CapabilityKey;
///
/// trait Greeter {}
///
/// let key = CapabilityKey::of::<dyn Greeter>();
/// assert_eq!(key, CapabilityKey::of::<dyn Greeter>());
/// assert_ne!(key, CapabilityKey::of::<String>());
/// assert!(key.name().contains("Greeter"));
/// ```
#[derive(Clone, Copy)]
pub struct CapabilityKey {
    id: TypeId,
    name: &'static str,
}

impl CapabilityKey {
    /// Build the key for capability type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying type identifier
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for CapabilityKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CapabilityKey {}

impl Hash for CapabilityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityKey").field(&self.name).finish()
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
