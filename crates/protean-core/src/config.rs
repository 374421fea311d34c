//! Dispatch configuration.

/// Configuration controlling how a protocol resolves implementations.
///
/// # Defaults
///
/// - `ancestry_fallback`: `true`. A miss on an object's own identity walks
///   its ancestors' identities, nearest first. When disabled only the
///   resolved identity is consulted.
///
/// # Example
///
/// ```
/// use protean_core::DispatchConfig;
///
/// let config = DispatchConfig::default();
/// assert!(config.ancestry_fallback());
/// assert!(!DispatchConfig::new(false).ancestry_fallback());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Whether misses on an identity fall back to ancestor identities.
    ancestry_fallback: bool,
}

impl DispatchConfig {
    /// Creates a configuration with explicit values.
    #[must_use]
    pub const fn new(ancestry_fallback: bool) -> Self {
        Self { ancestry_fallback }
    }

    /// Returns whether ancestry fallback is enabled.
    #[must_use]
    pub const fn ancestry_fallback(&self) -> bool {
        self.ancestry_fallback
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            ancestry_fallback: true,
        }
    }
}
