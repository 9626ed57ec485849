use crate::{
    InjectError, InjectResult, ResolutionConstraints, ServiceInfo,
    UntypedBinding,
};
use std::collections::HashMap;

/// Bindings of a container, grouped by the type they are registered under.
/// Within a type, bindings keep their registration order.
#[derive(Default)]
pub(crate) struct Registry {
    bindings: HashMap<ServiceInfo, Vec<Box<dyn UntypedBinding>>>,
    order: Vec<ServiceInfo>,
}

impl Registry {
    pub fn insert(&mut self, binding: Box<dyn UntypedBinding>) {
        let service_info = binding.metadata().service_info();
        let order = &mut self.order;
        self.bindings
            .entry(service_info)
            .or_insert_with(|| {
                order.push(service_info);
                Vec::new()
            })
            .push(binding);
    }

    pub fn count(&self, service_info: ServiceInfo) -> usize {
        self.bindings.get(&service_info).map_or(0, Vec::len)
    }

    fn candidates(
        &self,
        service_info: ServiceInfo,
    ) -> InjectResult<&[Box<dyn UntypedBinding>]> {
        match self.bindings.get(&service_info) {
            Some(bindings) if !bindings.is_empty() => Ok(bindings),
            _ => Err(InjectError::BindingNotFound { service_info }),
        }
    }

    /// Finds the first binding accepted by the constraints, or the first
    /// binding if there are none.
    pub fn find(
        &self,
        service_info: ServiceInfo,
        constraints: Option<&dyn ResolutionConstraints>,
    ) -> InjectResult<&dyn UntypedBinding> {
        let candidates = self.candidates(service_info)?;
        let constraints = match constraints {
            Some(constraints) => constraints,
            None => return Ok(&*candidates[0]),
        };

        candidates
            .iter()
            .map(|binding| &**binding)
            .find(|binding| constraints.accepts(binding.metadata()))
            .ok_or(InjectError::ConstraintUnsatisfied { service_info })
    }

    /// Finds every binding accepted by the constraints, in registration
    /// order.
    pub fn find_all(
        &self,
        service_info: ServiceInfo,
        constraints: Option<&dyn ResolutionConstraints>,
    ) -> InjectResult<Vec<&dyn UntypedBinding>> {
        let accepted: Vec<_> = self
            .candidates(service_info)?
            .iter()
            .map(|binding| &**binding)
            .filter(|binding| {
                constraints.map_or(true, |constraints| {
                    constraints.accepts(binding.metadata())
                })
            })
            .collect();

        if accepted.is_empty() {
            return Err(InjectError::ConstraintUnsatisfied { service_info });
        }

        Ok(accepted)
    }

    /// Iterates all bindings, grouped by type in the order each type was
    /// first bound.
    pub fn iter(&self) -> impl Iterator<Item = &dyn UntypedBinding> + '_ {
        self.order
            .iter()
            .filter_map(move |service_info| self.bindings.get(service_info))
            .flatten()
            .map(|binding| &**binding)
    }
}
