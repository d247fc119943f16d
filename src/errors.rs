mod dependency_resolver;
mod instantiate;
mod instantiator;

pub use dependency_resolver::ResolveErrorKind;
pub use instantiate::InstantiateErrorKind;
pub(crate) use instantiator::InstantiatorErrorKind;

/// Return type of constructors and instantiators registered in a [`crate::Catalog`]
pub type InstantiatorResult<T> = Result<T, InstantiateErrorKind>;
