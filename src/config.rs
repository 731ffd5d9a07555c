// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
//! Viewer configuration.

use std::time::Duration;

use crate::replay::GraphicsApi;

const DEFAULT_OPEN_ATTEMPTS: u32 = 10;
const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_millis(40);

/// Tunables for an [`ImageViewer`](crate::viewer::ImageViewer).
///
/// Build one with [`ViewerConfigBuilder`], or take the [`Default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// How many times a reload tries to open the file before giving up.  Always at least 1.
    pub open_attempts: u32,
    /// Pause between two open attempts.
    pub retry_interval: Duration,
    /// API family the viewer advertises, whatever its proxy runs on.
    pub pipeline_type: GraphicsApi,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfigBuilder::new().build()
    }
}

impl ViewerConfig {
    /// Longest a single reload can block waiting for the file.
    pub fn worst_case_wait(&self) -> Duration {
        self.retry_interval * self.open_attempts.saturating_sub(1)
    }
}

/// Builder for [`ViewerConfig`].
///
/// ```
/// use std::time::Duration;
/// use image_replay::config::ViewerConfigBuilder;
///
/// let config = ViewerConfigBuilder::new()
///     .with_open_attempts(3)
///     .with_retry_interval(Duration::from_millis(5))
///     .build();
/// assert_eq!(config.open_attempts, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ViewerConfigBuilder {
    open_attempts: Option<u32>,
    retry_interval: Option<Duration>,
    pipeline_type: Option<GraphicsApi>,
}

impl ViewerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many times to try opening the file.  Zero is treated as one.
    pub fn with_open_attempts(mut self, attempts: u32) -> Self {
        self.open_attempts = Some(attempts);
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = Some(interval);
        self
    }

    /// Set the API family advertised to the host.
    pub fn with_pipeline_type(mut self, api: GraphicsApi) -> Self {
        self.pipeline_type = Some(api);
        self
    }

    pub fn build(self) -> ViewerConfig {
        ViewerConfig {
            open_attempts: self.open_attempts.unwrap_or(DEFAULT_OPEN_ATTEMPTS).max(1),
            retry_interval: self.retry_interval.unwrap_or(DEFAULT_RETRY_INTERVAL),
            pipeline_type: self.pipeline_type.unwrap_or(GraphicsApi::D3D11),
        }
    }
}
