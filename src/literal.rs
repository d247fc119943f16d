use alloc::string::{String, ToString as _};
use core::fmt::{self, Display, Formatter};

/// Literal constructor argument stored in a [`crate::Binding`]
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Literal {
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Literal::Str(_) => "string",
            Literal::Int(_) => "integer",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "bool",
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(val) => write!(f, "{val:?}"),
            Literal::Int(val) => write!(f, "{val}"),
            Literal::Float(val) => write!(f, "{val}"),
            Literal::Bool(val) => write!(f, "{val}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(val: &str) -> Self {
        Literal::Str(val.to_string())
    }
}

impl From<String> for Literal {
    fn from(val: String) -> Self {
        Literal::Str(val)
    }
}

impl From<bool> for Literal {
    fn from(val: bool) -> Self {
        Literal::Bool(val)
    }
}

impl From<f64> for Literal {
    fn from(val: f64) -> Self {
        Literal::Float(val)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(val: $ty) -> Self {
                    Literal::Int(i64::from(val))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Typed view of a [`Literal`], used for parameters of literal constructors.
///
/// Integers are range-checked, so `Literal::Int(-1)` isn't a valid `u16`.
pub trait FromLiteral: Sized + 'static {
    /// Name of the expected literal, shown in argument type errors
    const KIND: &'static str;

    fn from_literal(literal: &Literal) -> Option<Self>;
}

impl FromLiteral for String {
    const KIND: &'static str = "string";

    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal {
            Literal::Str(val) => Some(val.clone()),
            _ => None,
        }
    }
}

impl FromLiteral for bool {
    const KIND: &'static str = "bool";

    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal {
            Literal::Bool(val) => Some(*val),
            _ => None,
        }
    }
}

impl FromLiteral for f64 {
    const KIND: &'static str = "float";

    #[allow(clippy::cast_precision_loss)]
    fn from_literal(literal: &Literal) -> Option<Self> {
        match literal {
            Literal::Float(val) => Some(*val),
            Literal::Int(val) => Some(*val as f64),
            _ => None,
        }
    }
}

macro_rules! impl_from_literal_int {
    ($($ty:ty => $kind:literal),*) => {
        $(
            impl FromLiteral for $ty {
                const KIND: &'static str = $kind;

                fn from_literal(literal: &Literal) -> Option<Self> {
                    match literal {
                        Literal::Int(val) => <$ty>::try_from(*val).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_literal_int!(
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize"
);

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{FromLiteral, Literal};

    use alloc::string::{String, ToString as _};

    #[test]
    fn test_from_rust_values() {
        assert_eq!(Literal::from("root"), Literal::Str("root".to_string()));
        assert_eq!(Literal::from(3306u16), Literal::Int(3306));
        assert_eq!(Literal::from(true), Literal::Bool(true));
        assert_eq!(Literal::from(0.5), Literal::Float(0.5));
    }

    #[test]
    fn test_from_literal() {
        assert_eq!(String::from_literal(&Literal::from("root")), Some("root".to_string()));
        assert_eq!(String::from_literal(&Literal::Int(1)), None);
        assert_eq!(u16::from_literal(&Literal::Int(3306)), Some(3306));
        assert_eq!(u16::from_literal(&Literal::Int(-1)), None);
        assert_eq!(i8::from_literal(&Literal::Int(300)), None);
        assert_eq!(f64::from_literal(&Literal::Int(2)), Some(2.0));
        assert_eq!(bool::from_literal(&Literal::Str("true".to_string())), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Literal::from("mysql://localhost").to_string(), "\"mysql://localhost\"");
        assert_eq!(Literal::Int(42).to_string(), "42");
        assert_eq!(Literal::Bool(false).kind(), "bool");
    }
}
