//! Resolution policy

/// Tunables applied to every resolution pass of a [`Registry`](crate::Registry)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// Maximum number of producers that may be mid-invocation at once
    ///
    /// `None` (the default) leaves acyclic graphs unbounded; cycles are
    /// detected regardless. Set a limit to reject graphs nested deeper
    /// than the caller's stack can take.
    pub max_depth: Option<usize>,
    /// Convert producer panics into errors instead of unwinding through the caller
    pub catch_panics: bool,
}

impl ResolutionPolicy {
    /// The default policy with a nesting limit of `max_depth`
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Self::default()
        }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            max_depth: None,
            catch_panics: true,
        }
    }
}
