use alloc::{boxed::Box, vec, vec::Vec};
use core::any::Any;
use tracing::debug;

use super::{
    catalog::Parameter,
    errors::InstantiateErrorKind,
    literal::{FromLiteral, Literal},
    service::{service_fn, BoxCloneService},
};

/// Factory whose parameters are literal values taken from a [`crate::Binding`].
/// A constructor without parameters is the default constructor of its type.
pub trait Constructor<Args>: Clone + 'static {
    type Provides: 'static;
    type Error: Into<InstantiateErrorKind>;

    #[must_use]
    fn parameters() -> Vec<Parameter>;

    /// Constructs the value from exactly [`Self::parameters`] literals, positionally.
    ///
    /// # Errors
    /// - [`InstantiateErrorKind::ArityMismatch`] if the count of literals differs from the count of parameters
    /// - [`InstantiateErrorKind::ArgumentType`] if a literal can't be converted to its parameter type
    fn construct(&mut self, args: &[Literal]) -> Result<Self::Provides, InstantiateErrorKind>;
}

fn argument<T: FromLiteral>(args: &[Literal], position: usize) -> Result<T, InstantiateErrorKind> {
    let Some(literal) = args.get(position) else {
        return Err(InstantiateErrorKind::ArityMismatch {
            expected: position + 1,
            actual: args.len(),
        });
    };
    T::from_literal(literal).ok_or(InstantiateErrorKind::ArgumentType {
        position,
        expected: T::KIND,
        actual: literal.kind(),
    })
}

pub(crate) type BoxedCloneConstructor = BoxCloneService<Vec<Literal>, Box<dyn Any>, InstantiateErrorKind>;

#[must_use]
pub(crate) fn boxed_constructor<Ctor, Args>(constructor: Ctor) -> BoxedCloneConstructor
where
    Ctor: Constructor<Args> + Send + Sync,
{
    BoxCloneService(Box::new(service_fn({
        move |args: Vec<Literal>| -> Result<Box<dyn Any>, InstantiateErrorKind> {
            let dependency = constructor.clone().construct(&args)?;

            debug!("Constructed");

            Ok(Box::new(dependency) as _)
        }
    })))
}

macro_rules! impl_constructor {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, Response, Err, $($ty,)*> Constructor<($($ty,)*)> for F
        where
            F: FnMut($($ty,)*) -> Result<Response, Err> + Clone + 'static,
            Response: 'static,
            Err: Into<InstantiateErrorKind>,
            $( $ty: FromLiteral, )*
        {
            type Provides = Response;
            type Error = Err;

            #[inline]
            fn parameters() -> Vec<Parameter> {
                vec![$(Parameter::literal::<$ty>(),)*]
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn construct(&mut self, args: &[Literal]) -> Result<Self::Provides, InstantiateErrorKind> {
                let expected = count_idents!($($ty),*);
                if args.len() != expected {
                    return Err(InstantiateErrorKind::ArityMismatch {
                        expected,
                        actual: args.len(),
                    });
                }

                let mut position = 0;
                $(
                    let $ty = argument::<$ty>(args, position)?;
                    position += 1;
                )*

                self($($ty,)*).map_err(Into::into)
            }
        }
    };
}

all_the_tuples!(impl_constructor);
