use crate::{
    Container, InjectResult, ResolutionConstraints, Service, Svc, TypeFactory,
};

/// A factory which builds its instance by resolving another bound type from
/// the container and converting the resulting pointer. This is how a binding
/// for an interface (`dyn Trait`) is forwarded to the binding of a concrete
/// implementation.
///
/// ```
/// use runtime_binder::{Container, Svc};
///
/// // The `Send` and `Sync` supertrait requirements are only necessary when
/// // compiling with the "arc" feature to allow for service pointer
/// // downcasting.
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> &'static str;
/// }
///
/// struct English;
/// impl Greeter for English {
///     fn greet(&self) -> &'static str {
///         "hello"
///     }
/// }
///
/// let mut container = Container::builder().build();
/// container.bind::<English>(|b| {
///     b.from_fn(|_| Ok(English)).single();
/// });
/// container.bind::<dyn Greeter>(|b| {
///     b.from_container::<English>(|english| english as Svc<dyn Greeter>);
/// });
///
/// let greeter: Svc<dyn Greeter> = container.resolve().unwrap();
/// assert_eq!("hello", greeter.greet());
/// ```
pub struct ContainerTypeFactory<S, T>
where
    S: ?Sized + Service,
    T: ?Sized + Service,
{
    convert: fn(Svc<S>) -> Svc<T>,
    constraints: Option<Box<dyn ResolutionConstraints>>,
}

impl<S, T> ContainerTypeFactory<S, T>
where
    S: ?Sized + Service,
    T: ?Sized + Service,
{
    /// Creates a new [`ContainerTypeFactory`] which resolves `S` and converts
    /// it into `T`.
    #[must_use]
    pub fn new(convert: fn(Svc<S>) -> Svc<T>) -> Self {
        ContainerTypeFactory {
            convert,
            constraints: None,
        }
    }

    /// Restricts which binding of `S` is resolved.
    #[must_use]
    pub fn with_constraints<C>(mut self, constraints: C) -> Self
    where
        C: ResolutionConstraints + 'static,
    {
        self.constraints = Some(Box::new(constraints));
        self
    }
}

impl<S, T> TypeFactory<T> for ContainerTypeFactory<S, T>
where
    S: ?Sized + Service,
    T: ?Sized + Service,
{
    fn create(&mut self, container: &Container) -> InjectResult<Svc<T>> {
        let source = match &self.constraints {
            Some(constraints) => container.resolve_with::<S>(&**constraints)?,
            None => container.resolve::<S>()?,
        };

        Ok((self.convert)(source))
    }
}
