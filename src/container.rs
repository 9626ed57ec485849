mod injection;
mod registry;

pub use injection::*;

use crate::{
    bindings::downcast_instance, ContainerBuilder, DynSvc, InjectError,
    InjectResult, ResolutionConstraints, Service, ServiceInfo, Svc,
    TypeBinding, TypeBindingFactory, TypeResolver, UntypedBinding,
};
use registry::Registry;
use std::{cell::Cell, iter, rc::Rc};
use tracing::{debug, trace};

/// A runtime dependency injection container. This holds all the bindings
/// between types and the way they are constructed, the resolvers that give
/// each scope its meaning, and the queue of pending injections.
///
/// Resolution is synchronous and single-threaded. Factories and injection
/// actions may re-enter the container to resolve their dependencies; the
/// injections queued while building an object graph only run once the
/// outermost resolution has finished constructing it. A container is not
/// safe to share between threads.
///
/// # Parent containers
///
/// A container may be given a parent. When no binding of the container
/// satisfies a request, the request is delegated to the parent (and to its
/// parent, and so on). [`Container::resolve_all`] returns the matches of this
/// container followed by the matches of its parents.
///
/// Every container keeps its own injection queue. While a container is
/// constructing an object graph, its parents hold back their injections too,
/// even when a factory of the graph resolves services from them. Once the
/// graph is built, the container runs its own queue first and then the
/// queues of its parents, nearest parent first.
///
/// ```
/// use runtime_binder::{Container, Svc};
/// use std::rc::Rc;
///
/// let mut parent = Container::builder().build();
/// parent.bind::<i32>(|b| {
///     b.from_fn(|_| Ok(1_i32));
/// });
/// let parent = Rc::new(parent);
///
/// let mut builder = Container::builder();
/// builder.parent(parent);
/// let mut child = builder.build();
/// child.bind::<i32>(|b| {
///     b.from_fn(|_| Ok(2_i32));
/// });
///
/// let all: Vec<Svc<i32>> = child.resolve_all().unwrap();
/// assert_eq!(vec![2, 1], all.iter().map(|value| **value).collect::<Vec<_>>());
/// ```
pub struct Container {
    registry: Registry,
    resolvers: Vec<Box<dyn TypeResolver>>,
    injections: InjectionQueue,
    binding_factory: Box<dyn TypeBindingFactory>,
    parent: Option<Rc<Container>>,
    depth: Cell<usize>,
}

impl Container {
    /// Creates a builder for a container. This is the preferred way of
    /// creating a container.
    #[must_use]
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::default()
    }

    /// Creates a new container directly from its parts. Prefer
    /// [`Container::builder()`] for creating new containers instead.
    #[must_use]
    pub fn new(
        binding_factory: Box<dyn TypeBindingFactory>,
        resolvers: Vec<Box<dyn TypeResolver>>,
        parent: Option<Rc<Container>>,
    ) -> Self {
        Container {
            registry: Registry::default(),
            resolvers,
            injections: InjectionQueue::default(),
            binding_factory,
            parent,
            depth: Cell::new(0),
        }
    }

    /// The container requests are delegated to when this one can't satisfy
    /// them.
    #[must_use]
    pub fn parent(&self) -> Option<&Rc<Container>> {
        self.parent.as_ref()
    }

    /// Registers a new binding for `T`. The binding is created by the
    /// container's [`TypeBindingFactory`] and then configured by `configure`.
    /// Binding a type more than once adds another binding; the first one
    /// stays the default.
    pub fn bind<T>(&mut self, configure: impl FnOnce(&mut TypeBinding<T>))
    where
        T: ?Sized + Service,
    {
        let service_info = ServiceInfo::of::<T>();
        let mut binding =
            TypeBinding::<T>::new(self.binding_factory.create(service_info));
        configure(&mut binding);

        let metadata = binding.metadata();
        debug!(
            service = service_info.name(),
            scope = %metadata.scope(),
            lazy = metadata.is_lazy(),
            id = metadata.id(),
            "bound service"
        );
        self.registry.insert(Box::new(binding));
    }

    /// The number of bindings registered for `T` in this container, not
    /// counting its parents.
    #[must_use]
    pub fn binding_count<T: ?Sized + Service>(&self) -> usize {
        self.registry.count(ServiceInfo::of::<T>())
    }

    /// Whether this container, not counting its parents, has a binding for
    /// `T`.
    #[must_use]
    pub fn is_bound<T: ?Sized + Service>(&self) -> bool {
        self.binding_count::<T>() > 0
    }

    /// Resolves the first binding registered for `T`.
    ///
    /// If this container has no binding for `T`, the request is delegated to
    /// the parent container. Without a parent, this returns
    /// [`InjectError::BindingNotFound`].
    pub fn resolve<T: ?Sized + Service>(&self) -> InjectResult<Svc<T>> {
        self.resolve_constrained(None)
    }

    /// Resolves the first binding for `T` accepted by the constraints.
    ///
    /// If no binding of this container is accepted, the request (including
    /// the constraints) is delegated to the parent container.
    ///
    /// ```
    /// use runtime_binder::{Container, Svc, WithId};
    ///
    /// let mut container = Container::builder().build();
    /// container.bind::<String>(|b| {
    ///     b.from_fn(|_| Ok("primary".to_string())).with_id("primary");
    /// });
    /// container.bind::<String>(|b| {
    ///     b.from_fn(|_| Ok("replica".to_string())).with_id("replica");
    /// });
    ///
    /// let replica: Svc<String> = container.resolve_with(&WithId::new("replica")).unwrap();
    /// assert_eq!("replica", *replica);
    /// ```
    pub fn resolve_with<T: ?Sized + Service>(
        &self,
        constraints: &dyn ResolutionConstraints,
    ) -> InjectResult<Svc<T>> {
        self.resolve_constrained(Some(constraints))
    }

    /// Resolves every binding registered for `T` in this container, followed
    /// by every binding for `T` in its parents. An empty result is not an
    /// error.
    pub fn resolve_all<T: ?Sized + Service>(&self) -> InjectResult<Vec<Svc<T>>> {
        self.resolve_all_constrained(None)
    }

    /// Resolves every binding for `T` accepted by the constraints, in this
    /// container and then in its parents.
    pub fn resolve_all_with<T: ?Sized + Service>(
        &self,
        constraints: &dyn ResolutionConstraints,
    ) -> InjectResult<Vec<Svc<T>>> {
        self.resolve_all_constrained(Some(constraints))
    }

    /// Resolves every binding that is not lazy once, in the order the bound
    /// types were first registered. Call this after registering all bindings
    /// so eager singletons exist, and have been injected into, before the
    /// container is used.
    pub fn finish_binding(&self) -> InjectResult<()> {
        let mut resolved = 0_usize;
        for binding in self.registry.iter() {
            if binding.metadata().is_lazy() {
                continue;
            }

            self.resolve_untyped(binding)?;
            resolved += 1;
        }

        debug!(eager = resolved, "finished binding");
        Ok(())
    }

    fn resolve_constrained<T: ?Sized + Service>(
        &self,
        constraints: Option<&dyn ResolutionConstraints>,
    ) -> InjectResult<Svc<T>> {
        let service_info = ServiceInfo::of::<T>();
        match self.registry.find(service_info, constraints) {
            Ok(binding) => self.resolve_typed(binding),
            Err(error) if error.is_lookup_failure() => match &self.parent {
                Some(parent) => {
                    debug!(
                        service = service_info.name(),
                        reason = %error,
                        "no satisfying binding, trying parent container"
                    );
                    parent.resolve_constrained(constraints)
                }
                None => Err(error),
            },
            Err(error) => Err(error),
        }
    }

    fn resolve_all_constrained<T: ?Sized + Service>(
        &self,
        constraints: Option<&dyn ResolutionConstraints>,
    ) -> InjectResult<Vec<Svc<T>>> {
        let service_info = ServiceInfo::of::<T>();
        let mut resolved = match self.registry.find_all(service_info, constraints) {
            Ok(bindings) => bindings
                .into_iter()
                .map(|binding| self.resolve_typed(binding))
                .collect::<InjectResult<Vec<_>>>()?,
            Err(error) => {
                trace!(
                    service = service_info.name(),
                    reason = %error,
                    "no local bindings"
                );
                Vec::new()
            }
        };

        if let Some(parent) = &self.parent {
            resolved.extend(parent.resolve_all_constrained::<T>(constraints)?);
        }

        Ok(resolved)
    }

    fn resolve_typed<T: ?Sized + Service>(
        &self,
        binding: &dyn UntypedBinding,
    ) -> InjectResult<Svc<T>> {
        let instance = self.resolve_untyped(binding)?;
        downcast_instance(binding.metadata().service_info(), &instance)
    }

    /// Resolves a binding through its resolver. Only the resolution entered
    /// at depth zero drains the injection queue, after the whole object graph
    /// has been constructed. Parents are held at a raised depth meanwhile so
    /// services they build for this graph queue their injections instead of
    /// running them.
    fn resolve_untyped(&self, binding: &dyn UntypedBinding) -> InjectResult<DynSvc> {
        let resolver = self.resolver_for(binding)?;
        let depth = ResolutionDepth::enter(&self.depth);
        trace!(
            service = binding.metadata().service_info().name(),
            depth = depth.level(),
            "resolving"
        );

        // Only parents that were idle are drained by this resolution
        let held: Vec<_> = if depth.is_outermost() {
            self.ancestors()
                .map(|ancestor| (ancestor, ResolutionDepth::enter(&ancestor.depth)))
                .filter(|(_, guard)| guard.is_outermost())
                .collect()
        } else {
            Vec::new()
        };

        let result = resolver
            .resolve(self, binding, &self.injections)
            .and_then(|instance| {
                if depth.is_outermost() {
                    self.injections.drain(self)?;
                    for (ancestor, _) in &held {
                        ancestor.injections.drain(ancestor)?;
                    }
                }
                Ok(instance)
            });

        if result.is_err() && depth.is_outermost() {
            self.injections.clear();
            for (ancestor, _) in &held {
                ancestor.injections.clear();
            }
        }

        result
    }

    fn ancestors(&self) -> impl Iterator<Item = &Container> {
        iter::successors(self.parent.as_deref(), |&container| {
            container.parent.as_deref()
        })
    }

    fn resolver_for(
        &self,
        binding: &dyn UntypedBinding,
    ) -> InjectResult<&dyn TypeResolver> {
        let metadata = binding.metadata();
        self.resolvers
            .iter()
            .map(|resolver| &**resolver)
            .find(|resolver| resolver.is_resolver_for(metadata))
            .ok_or(InjectError::ResolverNotFound {
                service_info: metadata.service_info(),
                scope: metadata.scope(),
            })
    }
}

/// Tracks how deeply resolutions are nested for as long as it is alive.
struct ResolutionDepth<'a> {
    depth: &'a Cell<usize>,
    level: usize,
}

impl<'a> ResolutionDepth<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        let level = depth.get();
        depth.set(level + 1);
        ResolutionDepth { depth, level }
    }

    fn level(&self) -> usize {
        self.level
    }

    fn is_outermost(&self) -> bool {
        self.level == 0
    }
}

impl Drop for ResolutionDepth<'_> {
    fn drop(&mut self) {
        self.depth.set(self.level);
    }
}
