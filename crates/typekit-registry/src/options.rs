//! Operator resolver configuration.

/// Switches for the built-in operator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Register `as` conversions between all numeric primitives.
    pub numeric_conversions: bool,

    /// Treat lossy numeric conversions as implicit.
    pub implicit_narrowing: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            numeric_conversions: true,
            implicit_narrowing: false,
        }
    }
}

impl ResolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numeric_conversions(mut self, enabled: bool) -> Self {
        self.numeric_conversions = enabled;
        self
    }

    pub fn implicit_narrowing(mut self, enabled: bool) -> Self {
        self.implicit_narrowing = enabled;
        self
    }
}
