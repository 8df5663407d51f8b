use std::collections::TryReserveError;

/// Fatal simulation errors. Every tunable saturates instead of failing, so the
/// only thing that can go wrong is running out of memory on (re)allocation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("failed to allocate {cells} cells for a {resolution}x{resolution} grid")]
    Allocation {
        resolution: usize,
        cells: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
