use crate::{
    Container, ContainerTypeFactory, DynSvc, FnTypeFactory, InjectError,
    InjectResult, InjectionCommand, InjectionDelegate, InjectionQueue,
    InstanceTypeFactory, Service, ServiceInfo, Svc, TypeFactory, TypeScope,
};
use std::{cell::RefCell, mem, rc::Rc};

/// Descriptive information about a binding. This is what resolution
/// constraints and resolvers get to see when choosing a binding.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BindingMetadata {
    service_info: ServiceInfo,
    scope: TypeScope,
    is_lazy: bool,
    id: Option<String>,
}

impl BindingMetadata {
    /// Creates metadata for a binding of the given service without an id.
    #[must_use]
    pub fn new(service_info: ServiceInfo, scope: TypeScope, is_lazy: bool) -> Self {
        BindingMetadata {
            service_info,
            scope,
            is_lazy,
            id: None,
        }
    }

    /// The type the binding is registered under.
    #[must_use]
    pub fn service_info(&self) -> ServiceInfo {
        self.service_info
    }

    #[must_use]
    pub fn scope(&self) -> TypeScope {
        self.scope
    }

    /// Lazy bindings are skipped by
    /// [`Container::finish_binding`](crate::Container::finish_binding).
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        self.is_lazy
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }
}

enum FactorySlot<T: ?Sized + Service> {
    Unset,
    Ready(Box<dyn TypeFactory<T>>),
    Running,
}

/// A registration of a type in a container: how to build it, how long its
/// instances live and what to inject into them once built.
///
/// Bindings are configured inside the closure passed to
/// [`Container::bind`]. Each setter returns the binding so calls can be
/// chained. Setting the scope or factory again overwrites the previous
/// value, while injection actions accumulate.
///
/// ```
/// use runtime_binder::{Container, Svc};
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Config {
///     name: Mutex<String>,
/// }
///
/// let mut container = Container::builder().build();
/// container.bind::<Config>(|b| {
///     b.from_fn(|_| Ok(Config::default()))
///         .single()
///         .inject(|config, _| {
///             *config.name.lock().unwrap() = "configured".to_string();
///             Ok(())
///         });
/// });
///
/// let config: Svc<Config> = container.resolve().unwrap();
/// assert_eq!("configured", *config.name.lock().unwrap());
/// ```
pub struct TypeBinding<T>
where
    T: ?Sized + Service,
{
    metadata: BindingMetadata,
    factory: RefCell<FactorySlot<T>>,
    injections: Vec<InjectionDelegate<T>>,
    instance: RefCell<Option<DynSvc>>,
}

#[allow(clippy::wrong_self_convention)]
impl<T> TypeBinding<T>
where
    T: ?Sized + Service,
{
    /// Creates an unconfigured binding with the given initial metadata.
    #[must_use]
    pub fn new(metadata: BindingMetadata) -> Self {
        TypeBinding {
            metadata,
            factory: RefCell::new(FactorySlot::Unset),
            injections: Vec::new(),
            instance: RefCell::new(None),
        }
    }

    #[must_use]
    pub fn metadata(&self) -> &BindingMetadata {
        &self.metadata
    }

    /// Sets the factory used to construct instances.
    pub fn from_factory<F>(&mut self, factory: F) -> &mut Self
    where
        F: TypeFactory<T>,
    {
        *self.factory.get_mut() = FactorySlot::Ready(Box::new(factory));
        self
    }

    /// Constructs instances with a function receiving the resolving
    /// container. See [`FnTypeFactory`].
    pub fn from_fn<F, R>(&mut self, func: F) -> &mut Self
    where
        F: 'static + FnMut(&Container) -> InjectResult<R>,
        R: 'static + Into<Svc<T>>,
    {
        self.from_factory(FnTypeFactory::new(func))
    }

    /// Always provides the given instance. See [`InstanceTypeFactory`].
    pub fn from_instance(&mut self, instance: Svc<T>) -> &mut Self {
        self.from_factory(InstanceTypeFactory::new(instance))
    }

    /// Resolves `S` from the container and converts it. See
    /// [`ContainerTypeFactory`].
    pub fn from_container<S>(&mut self, convert: fn(Svc<S>) -> Svc<T>) -> &mut Self
    where
        S: ?Sized + Service,
    {
        self.from_factory(ContainerTypeFactory::new(convert))
    }

    pub fn scope(&mut self, scope: TypeScope) -> &mut Self {
        self.metadata.scope = scope;
        self
    }

    /// Constructs a new instance on every request.
    pub fn transient(&mut self) -> &mut Self {
        self.scope(TypeScope::Transient)
    }

    /// Constructs one instance on the first request and reuses it.
    pub fn single(&mut self) -> &mut Self {
        self.scope(TypeScope::Single)
    }

    /// Only constructs instances on demand.
    pub fn lazy(&mut self) -> &mut Self {
        self.metadata.is_lazy = true;
        self
    }

    /// Constructs an instance during
    /// [`Container::finish_binding`](crate::Container::finish_binding).
    pub fn eager(&mut self) -> &mut Self {
        self.metadata.is_lazy = false;
        self
    }

    /// Tags this binding so it can be selected with
    /// [`WithId`](crate::WithId).
    pub fn with_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.metadata.set_id(id);
        self
    }

    /// Adds an action to run on each newly constructed instance once the
    /// outermost resolution has finished building its object graph.
    pub fn inject<F>(&mut self, action: F) -> &mut Self
    where
        F: 'static + Fn(&Svc<T>, &Container) -> InjectResult<()>,
    {
        self.inject_delegate(Rc::new(action))
    }

    /// Like [`TypeBinding::inject`], but for an action that is already
    /// shared. Adding the same delegate twice runs it twice.
    pub fn inject_delegate(&mut self, action: InjectionDelegate<T>) -> &mut Self {
        self.injections.push(action);
        self
    }
}

/// Type-erased view of a [`TypeBinding`] used by the container and by
/// resolvers.
pub trait UntypedBinding: 'static {
    fn metadata(&self) -> &BindingMetadata;

    /// Constructs a new instance with the binding's factory. The instance is
    /// a `DynSvc` wrapping the typed `Svc<T>`.
    fn create(&self, container: &Container) -> InjectResult<DynSvc>;

    /// The instance cached on this binding, if any.
    fn cached(&self) -> Option<DynSvc>;

    /// Caches an instance on this binding.
    fn cache(&self, instance: DynSvc);

    /// Queues one injection command per injection action of this binding.
    fn queue_injections(
        &self,
        instance: &DynSvc,
        queue: &InjectionQueue,
    ) -> InjectResult<()>;
}

impl<T> UntypedBinding for TypeBinding<T>
where
    T: ?Sized + Service,
{
    fn metadata(&self) -> &BindingMetadata {
        &self.metadata
    }

    fn create(&self, container: &Container) -> InjectResult<DynSvc> {
        let service_info = self.metadata.service_info;
        let slot =
            mem::replace(&mut *self.factory.borrow_mut(), FactorySlot::Running);
        let mut factory = match slot {
            FactorySlot::Ready(factory) => factory,
            FactorySlot::Running => {
                return Err(InjectError::CycleDetected {
                    service_info,
                    cycle: vec![service_info],
                })
            }
            FactorySlot::Unset => {
                *self.factory.borrow_mut() = FactorySlot::Unset;
                return Err(InjectError::MissingFactory { service_info });
            }
        };

        let result = factory.create(container);
        *self.factory.borrow_mut() = FactorySlot::Ready(factory);

        match result {
            Ok(instance) => Ok(Svc::new(instance) as DynSvc),
            Err(InjectError::CycleDetected { mut cycle, .. }) => {
                cycle.push(service_info);
                Err(InjectError::CycleDetected {
                    service_info,
                    cycle,
                })
            }
            Err(error) => Err(error),
        }
    }

    fn cached(&self) -> Option<DynSvc> {
        self.instance.borrow().clone()
    }

    fn cache(&self, instance: DynSvc) {
        *self.instance.borrow_mut() = Some(instance);
    }

    fn queue_injections(
        &self,
        instance: &DynSvc,
        queue: &InjectionQueue,
    ) -> InjectResult<()> {
        if self.injections.is_empty() {
            return Ok(());
        }

        let service_info = self.metadata.service_info;
        let instance: Svc<T> = downcast_instance(service_info, instance)?;
        for action in &self.injections {
            let action = action.clone();
            let instance = instance.clone();
            queue.push(InjectionCommand::new(service_info, move |container| {
                action(&instance, container)
            }));
        }

        Ok(())
    }
}

/// Recovers the typed service pointer from a resolved instance.
pub(crate) fn downcast_instance<T>(
    service_info: ServiceInfo,
    instance: &DynSvc,
) -> InjectResult<Svc<T>>
where
    T: ?Sized + Service,
{
    (**instance)
        .downcast_ref::<Svc<T>>()
        .cloned()
        .ok_or(InjectError::InvalidBinding { service_info })
}
