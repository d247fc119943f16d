use alloc::{boxed::Box, collections::BTreeMap, string::String, sync::Arc};
use core::{
    any::{Any, TypeId},
    fmt::{self, Debug, Formatter},
};

use crate::{any::TypeInfo, errors::ResolveErrorKind};

/// Converts a boxed concrete value into a boxed `Box<C>` of one capability view
pub(crate) type Caster = Arc<dyn Fn(Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>> + Send + Sync>;

pub(crate) type Casts = BTreeMap<TypeId, Caster>;

#[must_use]
pub(crate) fn caster<T, C>(cast: fn(T) -> Box<C>) -> Caster
where
    T: 'static,
    C: ?Sized + 'static,
{
    Arc::new(move |value: Box<dyn Any>| value.downcast::<T>().map(|value| Box::new(cast(*value)) as Box<dyn Any>))
}

/// Freshly constructed value owned by the caller.
/// The container keeps no reference to it.
pub struct Instance {
    value: Box<dyn Any>,
    type_name: String,
    type_info: TypeInfo,
    casts: Arc<Casts>,
}

impl Instance {
    #[inline]
    #[must_use]
    pub(crate) fn new(value: Box<dyn Any>, type_name: String, type_info: TypeInfo, casts: Arc<Casts>) -> Self {
        Self {
            value,
            type_name,
            type_info,
            casts,
        }
    }

    /// Type identifier the instance was constructed from
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    #[inline]
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }

    /// Takes the concrete value out of the instance.
    ///
    /// # Errors
    /// Returns the instance back if it isn't a `T`
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        let Self {
            value,
            type_name,
            type_info,
            casts,
        } = self;

        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self {
                value,
                type_name,
                type_info,
                casts,
            }),
        }
    }

    /// Returns `true` if the instance can be viewed as `C`
    #[inline]
    #[must_use]
    pub fn provides<C: ?Sized + 'static>(&self) -> bool {
        self.casts.contains_key(&TypeId::of::<C>())
    }

    /// Converts the instance into one of its capability views, e.g. `Box<dyn Auth>`.
    /// Every instance provides its own concrete type, other views are declared with [`crate::TypeDef::implements`].
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::IncorrectType`] if the type doesn't provide `C`
    pub fn into_capability<C: ?Sized + 'static>(self) -> Result<Box<C>, ResolveErrorKind> {
        let Self {
            value, type_name, casts, ..
        } = self;

        let Some(cast) = casts.get(&TypeId::of::<C>()) else {
            return Err(ResolveErrorKind::IncorrectType {
                expected: core::any::type_name::<C>(),
                actual: type_name,
            });
        };

        match cast(value).map(|view| view.downcast::<Box<C>>()) {
            Ok(Ok(view)) => Ok(*view),
            _ => Err(ResolveErrorKind::IncorrectType {
                expected: core::any::type_name::<C>(),
                actual: type_name,
            }),
        }
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("type", &self.type_info.short_name())
            .finish_non_exhaustive()
    }
}
