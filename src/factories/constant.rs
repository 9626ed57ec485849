use crate::{Container, InjectResult, Service, Svc, TypeFactory};

/// A factory which always hands out the same, already constructed instance.
/// Note that this behaves like a single binding regardless of the binding's
/// scope, since no new instance is ever built.
pub struct InstanceTypeFactory<T>
where
    T: ?Sized + Service,
{
    instance: Svc<T>,
}

impl<T> InstanceTypeFactory<T>
where
    T: ?Sized + Service,
{
    /// Creates a new [`InstanceTypeFactory`] from an existing service
    /// pointer.
    #[must_use]
    pub fn new(instance: Svc<T>) -> Self {
        InstanceTypeFactory { instance }
    }
}

impl<T> TypeFactory<T> for InstanceTypeFactory<T>
where
    T: ?Sized + Service,
{
    fn create(&mut self, _container: &Container) -> InjectResult<Svc<T>> {
        Ok(self.instance.clone())
    }
}

/// Create a factory from a constant value. While the value itself will never
/// be exposed through a mutable reference, if it supports interior
/// mutability, its fields still can be mutated.
///
/// # Example
///
/// ```
/// use runtime_binder::{instance, Container, Svc};
///
/// let mut container = Container::builder().build();
/// container.bind::<i32>(|b| {
///     b.from_factory(instance(8));
/// });
///
/// let value: Svc<i32> = container.resolve().unwrap();
/// assert_eq!(8, *value);
/// ```
pub fn instance<T: Service>(value: T) -> InstanceTypeFactory<T> {
    InstanceTypeFactory::new(Svc::new(value))
}
