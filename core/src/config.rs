//! Client configuration.
//!
//! Defaults target the public service and write comment files to the current
//! directory. `from_env` lets a host point the client somewhere else (a local
//! mock server, a scratch directory) without code changes.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const ENV_BASE_URL: &str = "PLACEHOLDER_BASE_URL";
const ENV_OUTPUT_DIR: &str = "PLACEHOLDER_OUTPUT_DIR";
const ENV_TIMEOUT_SECS: &str = "PLACEHOLDER_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Directory that persisted comment files are written to.
    pub output_dir: PathBuf,
    /// Global per-request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Read overrides from `PLACEHOLDER_*` variables, falling back to defaults.
    /// An unparsable timeout is ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let timeout = lookup(ENV_TIMEOUT_SECS).and_then(|secs| match secs.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                tracing::warn!(value = %secs, "ignoring invalid {ENV_TIMEOUT_SECS}");
                None
            }
        });
        Self {
            base_url: lookup(ENV_BASE_URL).unwrap_or(defaults.base_url),
            output_dir: lookup(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
