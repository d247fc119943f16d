/// Config for a container
/// ## Fields
/// - `fallback_to_type_identifier`:
///   If `true`, a service name without a binding is treated as a type identifier,
///   so `get("Session")` constructs the `Session` type itself.
///
///   If `false`, only registered names are resolvable and every other name is a lookup error.
///   This does **not** affect [`crate::Container::resolve`], which always takes a type identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub fallback_to_type_identifier: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_to_type_identifier: true,
        }
    }
}
