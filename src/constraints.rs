use crate::BindingMetadata;

/// A predicate used to choose between multiple bindings of the same type.
/// Candidates are offered in registration order and the first accepted
/// binding wins for single resolution.
///
/// Any `Fn(&BindingMetadata) -> bool` can be used as constraints:
///
/// ```
/// use runtime_binder::{BindingMetadata, Container, Svc, TypeScope};
///
/// let mut container = Container::builder().build();
/// container.bind::<i32>(|b| {
///     b.from_fn(|_| Ok(1_i32));
/// });
/// container.bind::<i32>(|b| {
///     b.from_fn(|_| Ok(2_i32)).single();
/// });
///
/// let single_only = |binding: &BindingMetadata| binding.scope() == TypeScope::Single;
/// let value: Svc<i32> = container.resolve_with(&single_only).unwrap();
/// assert_eq!(2, *value);
/// ```
pub trait ResolutionConstraints {
    /// Whether the given binding satisfies these constraints.
    fn accepts(&self, binding: &BindingMetadata) -> bool;
}

impl<F> ResolutionConstraints for F
where
    F: Fn(&BindingMetadata) -> bool,
{
    fn accepts(&self, binding: &BindingMetadata) -> bool {
        self(binding)
    }
}

/// Accepts only bindings tagged with the given id.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WithId(String);

impl WithId {
    /// Creates constraints matching bindings registered with
    /// [`TypeBinding::with_id`](crate::TypeBinding::with_id).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        WithId(id.into())
    }
}

impl ResolutionConstraints for WithId {
    fn accepts(&self, binding: &BindingMetadata) -> bool {
        binding.id() == Some(self.0.as_str())
    }
}
