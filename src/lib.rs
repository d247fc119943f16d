#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod constructor;
pub(crate) mod container;
pub(crate) mod dependency_resolver;
pub(crate) mod errors;
pub(crate) mod inject;
pub(crate) mod instance;
pub(crate) mod instantiator;
pub(crate) mod literal;
pub(crate) mod registry;
pub(crate) mod service;

pub use any::TypeInfo;
pub use catalog::{Catalog, Parameter, TypeDef};
pub use config::Config;
pub use constructor::Constructor;
pub use container::Container;
pub use dependency_resolver::DependencyResolver;
pub use errors::{InstantiateErrorKind, InstantiatorResult, ResolveErrorKind};
pub use inject::{Capability, Inject};
pub use instance::Instance;
pub use instantiator::Instantiator;
pub use literal::{FromLiteral, Literal};
pub use registry::{Binding, Registry};
