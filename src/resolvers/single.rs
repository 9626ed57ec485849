use crate::{
    BindingMetadata, Container, DynSvc, InjectResult, InjectionQueue,
    TypeResolver, TypeScope, UntypedBinding,
};
use tracing::trace;

/// Resolves [`TypeScope::Single`] bindings. The instance is constructed on
/// the first request and cached on the binding; later requests return the
/// cached instance and do not run injection actions again.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleTypeResolver;

impl TypeResolver for SingleTypeResolver {
    fn is_resolver_for(&self, binding: &BindingMetadata) -> bool {
        binding.scope() == TypeScope::Single
    }

    fn resolve(
        &self,
        container: &Container,
        binding: &dyn UntypedBinding,
        injections: &InjectionQueue,
    ) -> InjectResult<DynSvc> {
        if let Some(instance) = binding.cached() {
            trace!(
                service = binding.metadata().service_info().name(),
                "using cached instance"
            );
            return Ok(instance);
        }

        let instance = binding.create(container)?;
        binding.cache(instance.clone());
        binding.queue_injections(&instance, injections)?;
        Ok(instance)
    }
}
