use crate::{
    BindingMetadata, Container, DynSvc, InjectResult, InjectionQueue,
    UntypedBinding,
};

/// Turns a binding into an instance, honoring the binding's scope. A
/// container holds an ordered list of resolvers and uses the first one that
/// declares itself responsible for a binding.
pub trait TypeResolver: 'static {
    /// Whether this resolver handles the given binding.
    fn is_resolver_for(&self, binding: &BindingMetadata) -> bool;

    /// Provides an instance for the binding. Newly constructed instances
    /// must have their injection actions queued rather than run.
    fn resolve(
        &self,
        container: &Container,
        binding: &dyn UntypedBinding,
        injections: &InjectionQueue,
    ) -> InjectResult<DynSvc>;
}
