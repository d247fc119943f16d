use alloc::{
    collections::{btree_map, BTreeMap},
    string::String,
    vec::Vec,
};

use core::fmt::{self, Display, Formatter};
use tracing::debug;

use crate::literal::Literal;

/// Type identifier plus the literal arguments it's constructed with
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub implementation: String,
    pub args: Vec<Literal>,
}

impl Binding {
    #[inline]
    #[must_use]
    pub fn new(implementation: impl Into<String>) -> Self {
        Self {
            implementation: implementation.into(),
            args: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_args<I, L>(implementation: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Literal>,
    {
        Self {
            implementation: implementation.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Formats as a constructor call, e.g. `DbAuth("mysql://localhost", 3306)`, or the bare type identifier without arguments
impl Display for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.implementation)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (position, arg) in self.args.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Service name to [`Binding`] map.
/// One binding per name, the last registration wins.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    bindings: BTreeMap<String, Binding>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { bindings: BTreeMap::new() }
    }

    /// Stores the binding for the name and returns the overwritten one, if any
    #[inline]
    pub fn register(&mut self, name: impl Into<String>, binding: Binding) -> Option<Binding> {
        self.bindings.insert(name.into(), binding)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Returns the stored binding or, for an unregistered name, a binding that uses the name as type identifier
    #[must_use]
    pub fn lookup(&self, name: &str) -> Binding {
        if let Some(binding) = self.bindings.get(name) {
            debug!("Found binding");
            return binding.clone();
        }
        debug!("Fallback to type identifier");
        Binding::new(name)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, String, Binding> {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Binding, Registry};
    use crate::Literal;

    use alloc::{
        format,
        string::{String, ToString as _},
        vec,
        vec::Vec,
    };
    use tracing_test::traced_test;

    #[test]
    fn test_register_overwrites() {
        let mut registry = Registry::new();

        assert!(registry
            .register("Auth", Binding::with_args("DbAuth", ["mysql://localhost", "root", "123456"]))
            .is_none());
        let previous = registry.register("Auth", Binding::new("HttpAuth")).unwrap();

        assert_eq!(previous.implementation, "DbAuth");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Auth"), Some(&Binding::new("HttpAuth")));
    }

    #[test]
    fn test_lookup_keeps_args_order() {
        let mut registry = Registry::new();
        registry.register("Auth", Binding::with_args("DbAuth", ["mysql://localhost", "root", "123456"]));

        let binding = registry.lookup("Auth");

        assert_eq!(binding.implementation, "DbAuth");
        assert_eq!(
            binding.args,
            vec![Literal::from("mysql://localhost"), Literal::from("root"), Literal::from("123456")]
        );
    }

    #[test]
    fn test_binding_display() {
        assert_eq!(Binding::new("HttpAuth").to_string(), "HttpAuth");
        assert_eq!(
            Binding::with_args("DbAuth", [Literal::from("mysql://localhost"), Literal::from(3306), Literal::from(true)]).to_string(),
            r#"DbAuth("mysql://localhost", 3306, true)"#
        );
    }

    #[test]
    fn test_iter_sorted_by_name() {
        let mut registry = Registry::new();
        registry.register("Session", Binding::new("Session"));
        registry.register("Auth", Binding::new("HttpAuth"));

        let names = registry.iter().map(|(name, binding)| (name.as_str(), binding.implementation.as_str())).collect::<Vec<_>>();

        assert_eq!(names, vec![("Auth", "HttpAuth"), ("Session", "Session")]);
    }

    #[test]
    #[traced_test]
    fn test_lookup_unregistered_uses_name() {
        let registry = Registry::new();

        assert!(registry.is_empty());
        assert!(!registry.contains("Session"));
        assert_eq!(registry.lookup("Session"), Binding::new("Session"));
        assert!(logs_contain("Fallback to type identifier"));
    }
}
