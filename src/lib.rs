//! Binding-based runtime dependency injection.
//!
//! By default, instances provided by the [`Container`] are held in `Rc<T>`
//! pointers, which are not thread-safe. This can be changed by disabling
//! default features and enabling the "arc" feature:
//!
//! ```text
//! runtime_binder = {
//!     version = "*",
//!     default_features = false,
//!     features = ["arc"]
//! }
//! ```
//!
//! The container itself is never thread-safe. It is meant to be built and
//! used from a single thread; the "arc" feature only allows the instances
//! it creates to be sent elsewhere afterwards.
//!
//! # Bindings
//!
//! A binding tells the container how to obtain an instance of a type: which
//! [`TypeFactory`] builds it, which [`TypeScope`] it lives in, whether it is
//! built eagerly by [`Container::finish_binding`], and which injection
//! actions run on it once built. A type may be bound several times. The
//! first binding is the default, and [`ResolutionConstraints`] can select
//! between the others.
//!
//! # Scopes
//!
//! - Transient: an instance is constructed each time it is requested.
//! - Single: an instance is constructed the first time it is requested and
//!   cached on the binding for every later request.
//!
//! Scopes are interpreted by [`TypeResolver`]s. The container picks the
//! first resolver that declares itself responsible for a binding.
//!
//! # Deferred injection
//!
//! Injection actions do not run when their instance is constructed. They are
//! queued, and the outermost resolution runs the whole queue, most recently
//! queued first, after every object of the graph it requested has been
//! constructed. This makes it possible for two services to reference each
//! other, as long as one of the references is injected rather than passed
//! to the constructor:
//!
//! ```
//! use runtime_binder::{Container, Svc};
//! use std::sync::Mutex;
//!
//! #[derive(Default)]
//! struct Parent {
//!     child: Mutex<Option<Svc<Child>>>,
//! }
//!
//! struct Child {
//!     parent: Svc<Parent>,
//! }
//!
//! let mut container = Container::builder().build();
//! container.bind::<Parent>(|b| {
//!     b.from_fn(|_| Ok(Parent::default()))
//!         .single()
//!         .inject(|parent, container| {
//!             *parent.child.lock().unwrap() = Some(container.resolve()?);
//!             Ok(())
//!         });
//! });
//! container.bind::<Child>(|b| {
//!     b.from_fn(|container| Ok(Child { parent: container.resolve()? }))
//!         .single();
//! });
//!
//! let parent: Svc<Parent> = container.resolve().unwrap();
//! let child = parent.child.lock().unwrap().clone().unwrap();
//! assert!(Svc::ptr_eq(&parent, &child.parent));
//! ```
//!
//! # Parent containers
//!
//! Containers can be chained. A request that a container can't satisfy is
//! delegated to its parent, and [`Container::resolve_all`] collects the
//! matches of the whole chain. Parents hold back their injections while a
//! child is constructing a graph that uses their services, and the child
//! runs their queues after its own.

#![forbid(unsafe_code)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value
)]

#[cfg(not(any(feature = "arc", feature = "rc")))]
compile_error!(
    "Either the 'arc' or 'rc' feature must be enabled (but not both)."
);

#[cfg(all(feature = "arc", feature = "rc"))]
compile_error!(
    "The 'arc' and 'rc' features are mutually exclusive and cannot be enabled together."
);

mod bindings;
mod builder;
mod constraints;
mod container;
mod factories;
mod resolvers;
mod service;

pub use bindings::*;
pub use builder::*;
pub use constraints::*;
pub use container::*;
pub use factories::*;
pub use resolvers::*;
pub use service::*;
