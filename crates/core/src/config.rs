//! Configuration types shared across crates.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload and extraction limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Working-directory settings.
    #[serde(default)]
    pub work: WorkConfig,
}

impl AppConfig {
    /// Create a test configuration rooted at a caller-provided work root.
    ///
    /// **For testing only.** Everything else keeps its defaults.
    pub fn for_testing(work_root: impl Into<PathBuf>) -> Self {
        Self {
            work: WorkConfig {
                root: work_root.into(),
            },
            ..Self::default()
        }
    }
}

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Upload and extraction limits.
///
/// The uploaded archive declares its own uncompressed sizes, so extraction
/// is bounded three ways: entry count, cumulative uncompressed size, and
/// wall-clock time. The request body itself is bounded separately by
/// `max_upload_bytes`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum multipart request body size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
    /// Maximum cumulative uncompressed size of extracted entries in bytes.
    #[serde(default = "default_max_extracted_bytes")]
    pub max_extracted_bytes: u64,
    /// Maximum number of entries in the uploaded archive.
    #[serde(default = "default_max_archive_entries")]
    pub max_archive_entries: usize,
    /// Bound on extraction wall-clock time in seconds.
    #[serde(default = "default_extraction_timeout_secs")]
    pub extraction_timeout_secs: u64,
}

impl LimitsConfig {
    /// Get the extraction timeout as a Duration.
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            max_extracted_bytes: default_max_extracted_bytes(),
            max_archive_entries: default_max_archive_entries(),
            extraction_timeout_secs: default_extraction_timeout_secs(),
        }
    }
}

/// Working-directory configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkConfig {
    /// Root directory request workspaces are allocated under. Each request
    /// gets its own uniquely-named subdirectory.
    #[serde(default = "default_work_root")]
    pub root: PathBuf,
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            root: default_work_root(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_max_upload_bytes() -> u64 {
    64 * 1024 * 1024
}

fn default_max_extracted_bytes() -> u64 {
    512 * 1024 * 1024
}

fn default_max_archive_entries() -> usize {
    10_000
}

fn default_extraction_timeout_secs() -> u64 {
    30
}

fn default_work_root() -> PathBuf {
    PathBuf::from("work")
}
