use alloc::vec::Vec;

use super::errors::ResolveErrorKind;
use crate::{catalog::Parameter, Container};

/// Constructor parameter that can be resolved from a [`Container`].
/// Implemented by [`crate::Inject`] and by tuples of resolvers, resolved left to right.
pub trait DependencyResolver: Sized {
    type Error: Into<ResolveErrorKind>;

    fn resolve(container: &Container) -> Result<Self, Self::Error>;

    /// Declared parameters in resolution order
    #[must_use]
    fn parameters() -> Vec<Parameter>;
}

macro_rules! impl_dependency_resolver {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case, unused_mut)]
        impl<$($ty,)*> DependencyResolver for ($($ty,)*)
        where
            $( $ty: DependencyResolver, )*
        {
            type Error = ResolveErrorKind;

            #[inline]
            #[allow(unused_variables)]
            fn resolve(container: &Container) -> Result<Self, Self::Error> {
                Ok(($($ty::resolve(container).map_err(Into::into)?,)*))
            }

            #[inline]
            fn parameters() -> Vec<Parameter> {
                let mut parameters = Vec::new();
                $( parameters.extend($ty::parameters()); )*
                parameters
            }
        }
    };
}

all_the_tuples!(impl_dependency_resolver);
