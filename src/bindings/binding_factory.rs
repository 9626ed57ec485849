use crate::{BindingMetadata, ServiceInfo, TypeScope};

/// A strategy producing the initial settings of every new binding in a
/// container. The configuration closure passed to
/// [`Container::bind`](crate::Container::bind) runs on top of these
/// settings, so they only act as defaults.
///
/// Closures of the form `Fn(ServiceInfo) -> BindingMetadata` are also
/// binding factories.
pub trait TypeBindingFactory: 'static {
    /// Creates the initial metadata of a binding for the given service.
    fn create(&self, service_info: ServiceInfo) -> BindingMetadata;
}

impl<F> TypeBindingFactory for F
where
    F: 'static + Fn(ServiceInfo) -> BindingMetadata,
{
    fn create(&self, service_info: ServiceInfo) -> BindingMetadata {
        self(service_info)
    }
}

/// Creates lazy, transient bindings without an id.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTypeBindingFactory;

impl TypeBindingFactory for DefaultTypeBindingFactory {
    fn create(&self, service_info: ServiceInfo) -> BindingMetadata {
        BindingMetadata::new(service_info, TypeScope::Transient, true)
    }
}
