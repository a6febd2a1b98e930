//! Registry configuration.

use std::time::Duration;

/// Sizing and diagnostics settings for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Prefix for log lines emitted by this registry.
    pub name: &'static str,
    /// Number of records the table is sized for up front.
    pub capacity: usize,
    /// How often a task blocked forever in `open` logs that it is still
    /// waiting.
    pub open_warning_interval: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            name: "records",
            capacity: 32,
            open_warning_interval: Duration::from_secs(5),
        }
    }
}

impl RegistryConfig {
    /// Creates a new registry configuration builder.
    pub fn builder() -> RegistryConfigBuilder {
        RegistryConfigBuilder::default()
    }
}

/// Builder for [`RegistryConfig`].
#[derive(Debug, Clone, Default)]
pub struct RegistryConfigBuilder {
    config: RegistryConfig,
}

impl RegistryConfigBuilder {
    /// Sets the registry name used in log output.
    pub fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Sets the expected number of records.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Sets the interval between "still waiting" warnings.
    ///
    /// Values below one millisecond are raised to one millisecond when used.
    pub fn open_warning_interval(mut self, interval: Duration) -> Self {
        self.config.open_warning_interval = interval;
        self
    }

    pub fn build(self) -> RegistryConfig {
        self.config
    }
}
