use crate::{Container, InjectResult, Service, Svc};

/// A construction strategy for a bound type. Given the container that is
/// resolving the binding, a factory builds an instance of the service. The
/// container may be used to resolve any dependencies the service has.
///
/// Factories are taken out of their binding while they run, so a factory
/// that (directly or transitively) requests its own binding fails with
/// [`InjectError::CycleDetected`](crate::InjectError::CycleDetected).
///
/// # Example
///
/// ```
/// use runtime_binder::{Container, InjectResult, Svc, TypeFactory};
///
/// struct Greeting(String);
///
/// struct GreetingFactory;
/// impl TypeFactory<Greeting> for GreetingFactory {
///     fn create(&mut self, _container: &Container) -> InjectResult<Svc<Greeting>> {
///         Ok(Svc::new(Greeting("hello".to_string())))
///     }
/// }
///
/// let mut container = Container::builder().build();
/// container.bind::<Greeting>(|b| {
///     b.from_factory(GreetingFactory);
/// });
///
/// let greeting: Svc<Greeting> = container.resolve().unwrap();
/// assert_eq!("hello", greeting.0);
/// ```
pub trait TypeFactory<T>: 'static
where
    T: ?Sized + Service,
{
    /// Creates an instance of the service.
    fn create(&mut self, container: &Container) -> InjectResult<Svc<T>>;
}

impl<T> TypeFactory<T> for Box<dyn TypeFactory<T>>
where
    T: ?Sized + Service,
{
    fn create(&mut self, container: &Container) -> InjectResult<Svc<T>> {
        (**self).create(container)
    }
}
