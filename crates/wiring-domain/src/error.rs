//! Error handling types
//!
//! Two failure families come out of the registry: [`BindingError`] when a
//! producer cannot be registered, and [`ResolutionError`] when an instance
//! cannot be obtained. [`Error`] wraps both together with the
//! configuration and logging failures of the outer layers.

use thiserror::Error;

use crate::value_objects::{CapabilityKey, DependencySlot, ProducerId};

/// Boxed error reported by a producer through its failure output
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to register a producer
///
/// Shape problems (wrong output type, unresolvable inputs, value-type
/// capabilities) are rejected by the compiler; what remains here are the
/// checks that need the binding itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// The producer asks for every producer of the capability it is bound to
    #[error("producer {producer} requests all producers of {capability}, which includes itself")]
    SelfDependency {
        /// Capability the producer was being bound under
        capability: CapabilityKey,
        /// The offending producer
        producer: ProducerId,
    },

    /// The registry is already borrowed further up the call stack
    #[error("registry is busy; cannot bind {capability} from inside a resolution")]
    RegistryBusy {
        /// Capability the caller tried to bind
        capability: CapabilityKey,
    },
}

/// Failure to obtain an instance
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// Nothing is bound for the requested capability
    #[error("no producer bound for {capability}")]
    NotBound {
        /// The requested capability
        capability: CapabilityKey,
    },

    /// A declared input of a producer could not be resolved
    #[error("producer {producer} could not resolve input {slot}: {source}")]
    Dependency {
        /// Producer whose input failed
        producer: ProducerId,
        /// The failing input slot
        slot: DependencySlot,
        /// Why the input failed
        #[source]
        source: Box<ResolutionError>,
    },

    /// A producer reported failure through its error output
    #[error("producer {producer} failed: {source}")]
    ProducerFailed {
        /// The failing producer
        producer: ProducerId,
        /// Error returned by the producer
        #[source]
        source: BoxError,
    },

    /// A producer panicked while being invoked
    #[error("producer {producer} panicked: {message}")]
    ProducerPanicked {
        /// The panicking producer
        producer: ProducerId,
        /// Panic payload rendered as text
        message: String,
    },

    /// A producer (transitively) requires itself
    #[error("cyclic dependency detected: {}", format_chain(.cycle))]
    CyclicDependency {
        /// Producers on the cycle, starting and ending with the re-entered one
        cycle: Vec<ProducerId>,
    },

    /// Producer nesting went deeper than the configured limit
    #[error("resolution depth limit of {limit} exceeded at producer {producer}")]
    DepthExceeded {
        /// Configured limit
        limit: usize,
        /// Producer that would have exceeded it
        producer: ProducerId,
    },

    /// The registry is already borrowed further up the call stack
    #[error("registry is busy; cannot resolve {capability} from inside a resolution")]
    RegistryBusy {
        /// The requested capability
        capability: CapabilityKey,
    },

    /// A cached instance could not be viewed as the requested capability
    #[error("instance cached for producer {producer} cannot be viewed as {capability}")]
    InstanceMismatch {
        /// Producer owning the cached instance
        producer: ProducerId,
        /// The requested capability
        capability: CapabilityKey,
    },
}

fn format_chain(cycle: &[ProducerId]) -> String {
    cycle
        .iter()
        .map(ProducerId::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl ResolutionError {
    /// Create a not-bound error for capability `T`
    pub fn not_bound<T: ?Sized + 'static>() -> Self {
        Self::NotBound {
            capability: CapabilityKey::of::<T>(),
        }
    }

    /// Create a producer-failed error from any error type
    pub fn producer_failed<E: Into<BoxError>>(producer: ProducerId, source: E) -> Self {
        Self::ProducerFailed {
            producer,
            source: source.into(),
        }
    }

    /// Create a producer-panicked error
    pub fn producer_panicked<S: Into<String>>(producer: ProducerId, message: S) -> Self {
        Self::ProducerPanicked {
            producer,
            message: message.into(),
        }
    }

    /// Wrap a failed input of `producer`
    pub fn dependency(producer: ProducerId, slot: DependencySlot, source: Self) -> Self {
        Self::Dependency {
            producer,
            slot,
            source: Box::new(source),
        }
    }

    /// Innermost resolution error in a chain of dependency failures
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Dependency { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Main error type for the wiring workspace
#[derive(Error, Debug)]
pub enum Error {
    /// A producer could not be bound
    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),

    /// An instance could not be resolved
    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Logging bootstrap error
    #[error("Logging error: {message}")]
    Logging {
        /// Description of the logging error
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Logging and I/O error creation methods
impl Error {
    /// Create a logging error
    pub fn logging<S: Into<String>>(message: S) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
