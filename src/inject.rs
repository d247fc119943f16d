use alloc::{boxed::Box, vec, vec::Vec};

use crate::{catalog::Parameter, dependency_resolver::DependencyResolver, Container, ResolveErrorKind};

/// Service name under which a capability is looked up during autowiring.
///
/// Implement it for a trait object to bind an interface (`dyn Auth` as `"Auth"`)
/// or for a concrete type resolvable by its own name.
pub trait Capability: 'static {
    const NAME: &'static str;
}

/// Implements [`Capability`] for each listed type.
///
/// # Examples
/// ```rust
/// use nomen::capability;
///
/// trait Auth {}
/// struct Session;
///
/// capability!(dyn Auth => "Auth", Session => "Session");
/// ```
#[macro_export]
macro_rules! capability {
    ($($ty:ty => $name:expr),+ $(,)?) => {
        $(
            impl $crate::Capability for $ty {
                const NAME: &'static str = $name;
            }
        )+
    };
}

/// Autowired constructor parameter, resolved with [`Container::get`] under [`Capability::NAME`]
pub struct Inject<C: ?Sized>(pub Box<C>);

impl<C: Capability + ?Sized> DependencyResolver for Inject<C> {
    type Error = ResolveErrorKind;

    fn resolve(container: &Container) -> Result<Self, Self::Error> {
        container.get(C::NAME)?.into_capability().map(Self)
    }

    fn parameters() -> Vec<Parameter> {
        vec![Parameter::Capability { name: C::NAME }]
    }
}
