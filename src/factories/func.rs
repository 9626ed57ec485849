use crate::{Container, InjectResult, Service, Svc, TypeFactory};
use std::marker::PhantomData;

/// A factory backed by a function or closure. The function receives the
/// resolving container and returns either the service itself or a pointer
/// to it.
pub struct FnTypeFactory<F, R> {
    func: F,
    marker: PhantomData<fn() -> R>,
}

impl<F, R> FnTypeFactory<F, R>
where
    F: FnMut(&Container) -> InjectResult<R>,
{
    /// Creates a new [`FnTypeFactory`] from a function.
    #[must_use]
    pub fn new(func: F) -> Self {
        FnTypeFactory {
            func,
            marker: PhantomData,
        }
    }
}

impl<T, F, R> TypeFactory<T> for FnTypeFactory<F, R>
where
    T: ?Sized + Service,
    F: 'static + FnMut(&Container) -> InjectResult<R>,
    R: 'static + Into<Svc<T>>,
{
    fn create(&mut self, container: &Container) -> InjectResult<Svc<T>> {
        (self.func)(container).map(Into::into)
    }
}
