//! Centralized configuration for loadpath registries.

/// Registry-level configuration.
pub struct RegistryConfig;

impl RegistryConfig {
    /// Name of the distinguished context that every registry starts with.
    pub const DEFAULT_CONTEXT: &'static str = "system";
    /// Environment variable holding the platform path list used to seed the
    /// default context.
    pub const ENV_VAR: &'static str = "LOADPATH";
}

/// How a context treats an insertion of a location it already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicatePolicy {
    /// Keep every insertion, in exactly the requested order.
    #[default]
    Allow,
    /// Inserting a location that is already present is a successful no-op.
    Forbid,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Allow => "allow",
            DuplicatePolicy::Forbid => "forbid",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "allow" => Some(DuplicatePolicy::Allow),
            "forbid" => Some(DuplicatePolicy::Forbid),
            _ => None,
        }
    }

    pub fn allows_duplicates(&self) -> bool {
        matches!(self, DuplicatePolicy::Allow)
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
