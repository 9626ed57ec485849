#![allow(clippy::used_underscore_binding)]

use crate::TypeScope;
use derive_more::{Display, Error};
use std::any::{Any, TypeId};

#[cfg(feature = "arc")]
mod types {
    use crate::InjectError;
    use std::{any::Any, sync::Arc};

    /// A reference-counted pointer holding a service. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Arc<T>;

    /// A reference-counted pointer holding an instance of `dyn Any`. Resolved
    /// instances travel through the container as a `DynSvc` wrapping the
    /// typed `Svc<T>`.
    pub type DynSvc = Arc<dyn Any + Send + Sync>;

    /// A result from attempting to resolve a binding and construct an
    /// instance of it.
    pub type InjectResult<T> = Result<T, InjectError>;

    /// Implemented automatically on types that are capable of being bound.
    pub trait Service: Any + Send + Sync {}
    impl<T: ?Sized + Any + Send + Sync> Service for T {}
}

#[cfg(feature = "rc")]
mod types {
    use crate::InjectError;
    use std::{any::Any, rc::Rc};

    /// A reference-counted pointer holding a service. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Rc<T>;

    /// A reference-counted pointer holding an instance of `dyn Any`. Resolved
    /// instances travel through the container as a `DynSvc` wrapping the
    /// typed `Svc<T>`.
    pub type DynSvc = Rc<dyn Any>;

    /// A result from attempting to resolve a binding and construct an
    /// instance of it.
    pub type InjectResult<T> = Result<T, InjectError>;

    /// Implemented automatically on types that are capable of being bound.
    pub trait Service: Any {}
    impl<T: ?Sized + Any> Service for T {}
}

pub use types::*;

/// Type information about a bound service. This is the key bindings are
/// stored under in a container's registry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ServiceInfo {
    id: TypeId,
    name: &'static str,
}

impl ServiceInfo {
    /// Creates a [`ServiceInfo`] for the given type.
    #[must_use]
    pub fn of<T: ?Sized + Any>() -> Self {
        ServiceInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Gets the [`TypeId`] for this service.
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Gets the type name of this service.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// An error that has occurred during resolution of a service.
#[derive(Debug, Display, Error)]
#[non_exhaustive]
pub enum InjectError {
    /// No binding is registered for the requested type anywhere in the
    /// container chain.
    #[display(fmt = "{} has no binding", "service_info.name()")]
    BindingNotFound { service_info: ServiceInfo },

    /// Bindings exist for the requested type, but none of them was accepted
    /// by the resolution constraints.
    #[display(
        fmt = "no binding for {} satisfies the resolution constraints",
        "service_info.name()"
    )]
    ConstraintUnsatisfied { service_info: ServiceInfo },

    /// The binding's scope has no resolver registered in the container. This
    /// is a configuration error and is never delegated to a parent.
    #[display(
        fmt = "no resolver is registered for {} bindings of {}",
        scope,
        "service_info.name()"
    )]
    ResolverNotFound {
        service_info: ServiceInfo,
        scope: TypeScope,
    },

    /// The binding was registered without a factory.
    #[display(fmt = "the binding for {} has no factory", "service_info.name()")]
    MissingFactory { service_info: ServiceInfo },

    /// A cycle was detected during construction of a service.
    #[display(
        fmt = "a cycle was detected during construction of {} [{}]",
        "service_info.name()",
        "fmt_cycle(cycle)"
    )]
    CycleDetected {
        service_info: ServiceInfo,
        cycle: Vec<ServiceInfo>,
    },

    /// The binding produced an instance of the wrong type.
    #[display(
        fmt = "the binding for {} produced the wrong type",
        "service_info.name()"
    )]
    InvalidBinding { service_info: ServiceInfo },
}

impl InjectError {
    /// Whether this error is a lookup failure, meaning a parent container may
    /// still be able to satisfy the request.
    #[must_use]
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            InjectError::BindingNotFound { .. }
                | InjectError::ConstraintUnsatisfied { .. }
        )
    }
}

fn fmt_cycle(cycle: &[ServiceInfo]) -> String {
    let mut joined = String::new();
    for item in cycle.iter().rev() {
        if !joined.is_empty() {
            joined.push_str(" -> ");
        }
        joined.push_str(item.name());
    }
    joined
}
