use derive_more::Display;

/// The lifecycle policy of a binding. Scopes are plain tags; resolvers
/// decide what each one means.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Display)]
pub enum TypeScope {
    /// A new instance is constructed on every request.
    #[display(fmt = "transient")]
    Transient,

    /// An instance is constructed on the first request and cached on the
    /// binding. Each binding has its own cache, so two single bindings of the
    /// same type produce two different instances.
    #[display(fmt = "single")]
    Single,
}

impl Default for TypeScope {
    fn default() -> Self {
        TypeScope::Transient
    }
}
