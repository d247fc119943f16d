use alloc::{
    boxed::Box,
    collections::BTreeMap,
    string::String,
    sync::Arc,
    vec::Vec,
};
use core::{any::TypeId, marker::PhantomData};

use crate::{
    any::TypeInfo,
    constructor::{boxed_constructor, BoxedCloneConstructor, Constructor},
    dependency_resolver::DependencyResolver,
    errors::InstantiateErrorKind,
    instance::{caster, Casts, Instance},
    instantiator::{boxed_instantiator, BoxedCloneInstantiator, Instantiator},
    literal::FromLiteral,
};

/// Declared constructor parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// Object-shaped dependency, resolved under the capability name
    Capability { name: &'static str },
    /// Plain scalar filled from literal binding arguments
    Literal { ty: &'static str },
}

impl Parameter {
    #[inline]
    #[must_use]
    pub fn literal<T: FromLiteral>() -> Self {
        Parameter::Literal { ty: T::KIND }
    }

    #[inline]
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Parameter::Capability { name } => name,
            Parameter::Literal { ty } => ty,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_capability(&self) -> bool {
        matches!(self, Parameter::Capability { .. })
    }
}

#[derive(Clone)]
pub(crate) enum Factory {
    Literal(BoxedCloneConstructor),
    Autowired(BoxedCloneInstantiator),
}

#[derive(Clone)]
pub(crate) struct TypeEntry {
    pub(crate) name: String,
    pub(crate) type_info: TypeInfo,
    pub(crate) factory: Factory,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) casts: Arc<Casts>,
}

impl TypeEntry {
    #[inline]
    #[must_use]
    pub(crate) fn instance(&self, value: Box<dyn core::any::Any>) -> Instance {
        Instance::new(value, self.name.clone(), self.type_info, self.casts.clone())
    }
}

/// Description of one constructible type: its identifier, its single constructor and the capabilities it provides
pub struct TypeDef<T> {
    name: String,
    factory: Factory,
    parameters: Vec<Parameter>,
    casts: Casts,
    _provides: PhantomData<fn() -> T>,
}

impl<T: 'static> TypeDef<T> {
    fn new(name: String, factory: Factory, parameters: Vec<Parameter>) -> Self {
        let mut casts = Casts::new();
        casts.insert(TypeId::of::<T>(), caster::<T, T>(Box::new));

        Self {
            name,
            factory,
            parameters,
            casts,
            _provides: PhantomData,
        }
    }

    /// Type constructed from literal binding arguments.
    /// A constructor without parameters makes the type default-constructible.
    #[must_use]
    pub fn literal<Ctor, Args>(name: impl Into<String>, constructor: Ctor) -> Self
    where
        Ctor: Constructor<Args, Provides = T, Error = InstantiateErrorKind> + Send + Sync,
    {
        Self::new(name.into(), Factory::Literal(boxed_constructor(constructor)), Ctor::parameters())
    }

    /// Type whose constructor parameters are capabilities resolved from the container
    #[must_use]
    pub fn autowired<Inst, Deps>(name: impl Into<String>, instantiator: Inst) -> Self
    where
        Inst: Instantiator<Deps, Provides = T, Error = InstantiateErrorKind> + Send + Sync,
        Deps: DependencyResolver,
    {
        Self::new(name.into(), Factory::Autowired(boxed_instantiator(instantiator)), Deps::parameters())
    }

    /// Declares that the type can be viewed as `C`, usually a trait object of a capability it implements
    ///
    /// # Examples
    /// ```rust
    /// use nomen::TypeDef;
    ///
    /// trait Auth {}
    ///
    /// struct HttpAuth;
    ///
    /// impl Auth for HttpAuth {}
    ///
    /// let def = TypeDef::literal("HttpAuth", || Ok(HttpAuth)).implements::<dyn Auth>(|auth| Box::new(auth));
    /// ```
    #[must_use]
    pub fn implements<C: ?Sized + 'static>(mut self, cast: fn(T) -> Box<C>) -> Self {
        self.casts.insert(TypeId::of::<C>(), caster(cast));
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

/// Set of constructible types known by identifier.
/// It's the replacement for "does this class exist" checks, so lookups return [`Option`].
#[derive(Default, Clone)]
pub struct Catalog {
    entries: BTreeMap<String, TypeEntry>,
}

impl Catalog {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Adds the type to the catalog, replacing a previous definition with the same identifier
    #[must_use]
    pub fn define<T: 'static>(mut self, def: TypeDef<T>) -> Self {
        self.add_entry(def);
        self
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Constructor parameters of the type, in declaration order
    #[inline]
    #[must_use]
    pub fn parameters(&self, name: &str) -> Option<&[Parameter]> {
        self.entries.get(name).map(|entry| entry.parameters.as_slice())
    }

    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Catalog {
    pub(crate) fn add_entry<T: 'static>(&mut self, def: TypeDef<T>) -> Option<TypeEntry> {
        let TypeDef {
            name,
            factory,
            parameters,
            casts,
            ..
        } = def;

        self.entries.insert(
            name.clone(),
            TypeEntry {
                name,
                type_info: TypeInfo::of::<T>(),
                factory,
                parameters,
                casts: Arc::new(casts),
            },
        )
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.entries.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, Parameter, TypeDef};
    use crate::{capability, Inject};

    use alloc::{boxed::Box, string::String, vec, vec::Vec};

    trait Auth {}

    struct DbAuth;
    struct HttpAuth;
    struct Session;
    #[allow(dead_code)]
    struct App(Box<dyn Auth>, Box<Session>);

    impl Auth for DbAuth {}
    impl Auth for HttpAuth {}

    capability!(dyn Auth => "Auth", Session => "Session");

    fn catalog() -> Catalog {
        Catalog::new()
            .define(TypeDef::literal("DbAuth", |_dsn: String, _user: String, _pass: String| Ok(DbAuth)).implements::<dyn Auth>(|auth| Box::new(auth)))
            .define(TypeDef::literal("HttpAuth", || Ok(HttpAuth)).implements::<dyn Auth>(|auth| Box::new(auth)))
            .define(TypeDef::literal("Session", || Ok(Session)))
            .define(TypeDef::autowired("App", |Inject(auth): Inject<dyn Auth>, Inject(session): Inject<Session>| {
                Ok(App(auth, session))
            }))
    }

    #[test]
    fn test_define() {
        let catalog = catalog();

        assert_eq!(catalog.len(), 4);
        assert!(catalog.contains("HttpAuth"));
        assert!(!catalog.contains("Auth"));
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["App", "DbAuth", "HttpAuth", "Session"]);
    }

    #[test]
    fn test_parameters() {
        let catalog = catalog();

        assert_eq!(
            catalog.parameters("App"),
            Some(&[Parameter::Capability { name: "Auth" }, Parameter::Capability { name: "Session" }][..])
        );
        assert_eq!(catalog.parameters("DbAuth").map(<[_]>::len), Some(3));
        assert_eq!(catalog.parameters("HttpAuth"), Some(&[][..]));
        assert_eq!(catalog.parameters("Auth"), None);
    }

    #[test]
    fn test_redefine_overwrites() {
        let catalog = catalog().define(TypeDef::literal("Session", |_id: String| Ok(Session)));

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.parameters("Session"), Some(&[Parameter::Literal { ty: "string" }][..]));
    }

    #[test]
    fn test_implements() {
        let def = TypeDef::literal("HttpAuth", || Ok(HttpAuth)).implements::<dyn Auth>(|auth| Box::new(auth));

        assert_eq!(def.name(), "HttpAuth");
        assert!(def.parameters().is_empty());
        assert_eq!(def.casts.len(), 2);
    }
}
