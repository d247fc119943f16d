use alloc::string::String;

use super::instantiate::InstantiateErrorKind;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Type `{name}` not found in catalog")]
    Lookup { name: String },
    #[error("Failed to construct `{type_name}`: {source}")]
    Construction {
        type_name: String,
        #[source]
        source: InstantiateErrorKind,
    },
    #[error("Parameter {position} of `{type_name}` has no capability type (declared as `{parameter}`)")]
    UnresolvableDependency {
        type_name: String,
        position: usize,
        parameter: &'static str,
    },
    #[error("Instance of `{actual}` doesn't provide `{expected}`")]
    IncorrectType { expected: &'static str, actual: String },
}
