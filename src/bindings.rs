mod binding;
mod binding_factory;
mod scope;

pub use binding::*;
pub use binding_factory::*;
pub use scope::*;

pub(crate) use binding::downcast_instance;
