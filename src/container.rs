use alloc::{
    boxed::Box,
    string::{String, ToString as _},
    sync::Arc,
    vec::Vec,
};
use core::any::{type_name, Any};
use parking_lot::RwLock;
use tracing::{debug, error, info_span, warn};

use crate::{
    catalog::{Catalog, Factory, Parameter, TypeEntry},
    config::Config,
    dependency_resolver::DependencyResolver,
    errors::{InstantiateErrorKind, InstantiatorErrorKind, ResolveErrorKind},
    instance::Instance,
    instantiator::{BoxedCloneInstantiator, Instantiator},
    literal::Literal,
    registry::{Binding, Registry},
    service::Service as _,
};

/// Service registry with its resolvers.
///
/// Clones share the same registry and catalog, so it's cheap to pass the container around.
/// Every resolution constructs a fresh instance, nothing is cached.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    catalog: Catalog,
    registry: RwLock<Registry>,
    config: Config,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self::new_with_config(catalog, Config::default())
    }

    #[inline]
    #[must_use]
    pub fn new_with_config(catalog: Catalog, config: Config) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                catalog,
                registry: RwLock::new(Registry::new()),
                config,
            }),
        }
    }

    /// Binds the service name to the type identifier, constructed without arguments.
    /// Overwrites a previous binding of the name. The type isn't checked until resolution.
    pub fn register(&self, name: impl Into<String>, implementation: impl Into<String>) {
        self.add_binding(name.into(), Binding::new(implementation));
    }

    /// Binds the service name to the type identifier, constructed with the literal arguments in order.
    /// Overwrites a previous binding of the name. Neither the type nor the arity is checked until resolution.
    pub fn register_with_args<I, L>(&self, name: impl Into<String>, implementation: impl Into<String>, args: I)
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        self.add_binding(name.into(), Binding::with_args(implementation, args));
    }

    /// Gets an instance by service name.
    ///
    /// The binding's implementation is constructed with the binding's arguments, or default-constructed if there are none.
    /// Dependencies of the implementation aren't resolved here, use [`Self::resolve`] for that.
    ///
    /// # Errors
    /// - [`ResolveErrorKind::Lookup`] if the implementation isn't in the catalog
    ///   (or the name is unregistered and [`Config::fallback_to_type_identifier`] is off)
    /// - [`ResolveErrorKind::Construction`] if the constructor can't take the binding's arguments or fails itself
    pub fn get(&self, name: &str) -> Result<Instance, ResolveErrorKind> {
        let span = info_span!("get", service = name);
        let _guard = span.enter();

        let Some(Binding { implementation, args }) = self.lookup(name) else {
            let err = ResolveErrorKind::Lookup { name: name.to_string() };
            error!("{}", err);
            return Err(err);
        };
        let entry = self.entry(&implementation)?;

        let value = match &entry.factory {
            Factory::Literal(constructor) => constructor.clone().call(args).map_err(|err| construction_error(entry, err))?,
            Factory::Autowired(instantiator) => {
                check_autowired_args(&entry.parameters, &args).map_err(|err| construction_error(entry, err))?;
                self.instantiate(entry, instantiator)?
            }
        };

        debug!(implementation = implementation.as_str(), "Resolved");
        Ok(entry.instance(value))
    }

    /// Gets instances for the names in order and passes them to the factory.
    ///
    /// # Errors
    /// Returns the error of the first failed [`Self::get`], the factory isn't called in that case
    pub fn inject<const N: usize, F, R>(&self, names: [&str; N], factory: F) -> Result<R, ResolveErrorKind>
    where
        F: FnOnce([Instance; N]) -> R,
    {
        let span = info_span!("inject", count = N);
        let _guard = span.enter();

        let mut instances = Vec::with_capacity(N);
        for name in names {
            instances.push(self.get(name)?);
        }
        let instances: [Instance; N] = match instances.try_into() {
            Ok(instances) => instances,
            Err(_) => unreachable!("every name resolves to one instance"),
        };

        debug!("Injected");
        Ok(factory(instances))
    }

    /// Calls the factory with its [`crate::Inject`] parameters resolved in order.
    ///
    /// # Errors
    /// - Returns the error of the first failed parameter, the factory isn't called in that case
    /// - [`ResolveErrorKind::Construction`] if the factory fails
    pub fn inject_with<Inst, Deps>(&self, mut factory: Inst) -> Result<Inst::Provides, ResolveErrorKind>
    where
        Inst: Instantiator<Deps>,
        Deps: DependencyResolver,
    {
        let span = info_span!("inject_with", factory = type_name::<Inst>());
        let _guard = span.enter();

        let dependencies = Deps::resolve(self).map_err(Into::into)?;
        match factory.instantiate(dependencies) {
            Ok(provides) => {
                debug!("Injected");
                Ok(provides)
            }
            Err(err) => {
                let err = ResolveErrorKind::Construction {
                    type_name: type_name::<Inst::Provides>().to_string(),
                    source: err.into(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    /// Constructs the type, resolving each of its constructor parameters with [`Self::get`] under the parameter's capability name.
    ///
    /// Only the direct parameters are autowired, their own dependencies aren't.
    /// A type without parameters is default-constructed without looking at the registry.
    ///
    /// # Errors
    /// - [`ResolveErrorKind::Lookup`] if the type isn't in the catalog
    /// - [`ResolveErrorKind::UnresolvableDependency`] if a parameter has no capability type
    /// - Any error of [`Self::get`] for a parameter
    /// - [`ResolveErrorKind::Construction`] if the constructor fails
    pub fn resolve(&self, type_identifier: &str) -> Result<Instance, ResolveErrorKind> {
        let span = info_span!("resolve", type_identifier);
        let _guard = span.enter();

        let entry = self.entry(type_identifier)?;

        if let Some((position, parameter)) = entry.parameters.iter().enumerate().find(|(_, parameter)| !parameter.is_capability()) {
            let err = ResolveErrorKind::UnresolvableDependency {
                type_name: entry.name.clone(),
                position,
                parameter: parameter.type_name(),
            };
            error!("{}", err);
            return Err(err);
        }
        if entry.parameters.is_empty() {
            debug!("No constructor parameters");
        }

        // Every parameter of a literal constructor is a literal one, so only the default constructor gets here
        let value = match &entry.factory {
            Factory::Literal(constructor) => constructor.clone().call(Vec::new()).map_err(|err| construction_error(entry, err))?,
            Factory::Autowired(instantiator) => self.instantiate(entry, instantiator)?,
        };

        debug!("Resolved");
        Ok(entry.instance(value))
    }

    /// Returns the stored binding of the name, without the fallback to the type identifier
    #[must_use]
    pub fn binding(&self, name: &str) -> Option<Binding> {
        self.inner.registry.read().get(name).cloned()
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.inner.registry.read().contains(name)
    }

    /// Snapshot of the current bindings
    #[must_use]
    pub fn registry(&self) -> Registry {
        self.inner.registry.read().clone()
    }

    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> Config {
        self.inner.config
    }
}

impl Container {
    fn add_binding(&self, name: String, binding: Binding) {
        let span = info_span!("register", service = name.as_str(), %binding);
        let _guard = span.enter();

        if let Some(previous) = self.inner.registry.write().register(name, binding) {
            debug!(previous = previous.implementation.as_str(), "Overwrote binding");
        } else {
            debug!("Registered");
        }
    }

    /// Binding of the name, with the lock released before returning
    fn lookup(&self, name: &str) -> Option<Binding> {
        let registry = self.inner.registry.read();
        if self.inner.config.fallback_to_type_identifier {
            return Some(registry.lookup(name));
        }
        registry.get(name).inspect(|_| debug!("Found binding")).cloned()
    }

    fn entry(&self, type_identifier: &str) -> Result<&TypeEntry, ResolveErrorKind> {
        self.inner.catalog.get(type_identifier).ok_or_else(|| {
            let err = ResolveErrorKind::Lookup {
                name: type_identifier.to_string(),
            };
            error!("{}", err);
            err
        })
    }

    fn instantiate(&self, entry: &TypeEntry, instantiator: &BoxedCloneInstantiator) -> Result<Box<dyn Any>, ResolveErrorKind> {
        match instantiator.clone().call(self.clone()) {
            Ok(value) => Ok(value),
            Err(InstantiatorErrorKind::Deps(err)) => {
                warn!("{}", err);
                Err(err)
            }
            Err(InstantiatorErrorKind::Factory(err)) => Err(construction_error(entry, err)),
        }
    }
}

fn construction_error(entry: &TypeEntry, source: InstantiateErrorKind) -> ResolveErrorKind {
    let err = ResolveErrorKind::Construction {
        type_name: entry.name.clone(),
        source,
    };
    error!("{}", err);
    err
}

/// Literal arguments can't satisfy capability parameters, so only an empty constructor accepts an empty binding
fn check_autowired_args(parameters: &[Parameter], args: &[Literal]) -> Result<(), InstantiateErrorKind> {
    if parameters.len() != args.len() {
        return Err(InstantiateErrorKind::ArityMismatch {
            expected: parameters.len(),
            actual: args.len(),
        });
    }
    match (parameters.first(), args.first()) {
        (Some(parameter), Some(literal)) => Err(InstantiateErrorKind::ArgumentType {
            position: 0,
            expected: parameter.type_name(),
            actual: literal.kind(),
        }),
        _ => Ok(()),
    }
}
