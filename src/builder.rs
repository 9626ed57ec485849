use crate::{
    Container, DefaultTypeBindingFactory, SingleTypeResolver,
    TransientTypeResolver, TypeBindingFactory, TypeResolver,
};
use std::rc::Rc;

/// A builder for a [`Container`].
pub struct ContainerBuilder {
    binding_factory: Box<dyn TypeBindingFactory>,
    resolvers: Vec<Box<dyn TypeResolver>>,
    parent: Option<Rc<Container>>,
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        ContainerBuilder {
            binding_factory: Box::new(DefaultTypeBindingFactory),
            resolvers: vec![
                Box::new(TransientTypeResolver),
                Box::new(SingleTypeResolver),
            ],
            parent: None,
        }
    }
}

impl ContainerBuilder {
    /// Sets the strategy creating the initial settings of new bindings.
    pub fn binding_factory<F: TypeBindingFactory>(&mut self, factory: F) {
        self.binding_factory = Box::new(factory);
    }

    /// Adds a resolver. Resolvers are consulted in the order they were
    /// added, after the default ones unless those were cleared.
    pub fn resolver<R: TypeResolver>(&mut self, resolver: R) {
        self.resolvers.push(Box::new(resolver));
    }

    /// Removes all resolvers, including the default transient and single
    /// resolvers.
    pub fn clear_resolvers(&mut self) {
        self.resolvers.clear();
    }

    /// Sets the container requests are delegated to when the built container
    /// can't satisfy them.
    pub fn parent(&mut self, parent: Rc<Container>) {
        self.parent = Some(parent);
    }

    /// Builds the container.
    #[must_use]
    pub fn build(self) -> Container {
        Container::new(self.binding_factory, self.resolvers, self.parent)
    }
}
