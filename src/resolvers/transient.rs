use crate::{
    BindingMetadata, Container, DynSvc, InjectResult, InjectionQueue,
    TypeResolver, TypeScope, UntypedBinding,
};

/// Resolves [`TypeScope::Transient`] bindings by constructing a new instance
/// on every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransientTypeResolver;

impl TypeResolver for TransientTypeResolver {
    fn is_resolver_for(&self, binding: &BindingMetadata) -> bool {
        binding.scope() == TypeScope::Transient
    }

    fn resolve(
        &self,
        container: &Container,
        binding: &dyn UntypedBinding,
        injections: &InjectionQueue,
    ) -> InjectResult<DynSvc> {
        let instance = binding.create(container)?;
        binding.queue_injections(&instance, injections)?;
        Ok(instance)
    }
}
