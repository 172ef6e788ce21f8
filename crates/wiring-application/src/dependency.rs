//! Declared producer inputs
//!
//! | Input type | Resolved with | Nothing bound |
//! |------------|---------------|---------------|
//! | `Arc<T>` | [`Resolution::resolve_one`] | error |
//! | `Vec<Arc<T>>` | [`Resolution::resolve_all`] | empty vector |
//! | `Option<Arc<T>>` | [`Resolution::resolve_one`] | `None` |

use std::sync::Arc;

use wiring_domain::{DependencySlot, ResolutionError};

use crate::resolution::Resolution;

/// A value a producer can declare as an input
pub trait Dependency: Sized + 'static {
    /// Describe this input for validation and diagnostics
    fn slot() -> DependencySlot;

    /// Obtain the input from the registry behind `resolution`
    fn resolve(resolution: &mut Resolution<'_>) -> Result<Self, ResolutionError>;
}

impl<T: ?Sized + 'static> Dependency for Arc<T> {
    fn slot() -> DependencySlot {
        DependencySlot::single::<T>()
    }

    fn resolve(resolution: &mut Resolution<'_>) -> Result<Self, ResolutionError> {
        resolution.resolve_one::<T>()
    }
}

impl<T: ?Sized + 'static> Dependency for Vec<Arc<T>> {
    fn slot() -> DependencySlot {
        DependencySlot::all::<T>()
    }

    fn resolve(resolution: &mut Resolution<'_>) -> Result<Self, ResolutionError> {
        if !resolution.is_bound::<T>() {
            return Ok(Vec::new());
        }
        resolution.resolve_all::<T>()
    }
}

impl<T: ?Sized + 'static> Dependency for Option<Arc<T>> {
    fn slot() -> DependencySlot {
        DependencySlot::optional::<T>()
    }

    fn resolve(resolution: &mut Resolution<'_>) -> Result<Self, ResolutionError> {
        if !resolution.is_bound::<T>() {
            return Ok(None);
        }
        resolution.resolve_one::<T>().map(Some)
    }
}
