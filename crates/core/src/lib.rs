//! Core domain types and shared logic for pwapack.
//!
//! This crate defines the canonical data model used by the pipeline and
//! server crates:
//! - The PWA web-app manifest and its fixed template
//! - Entry-page markup injection
//! - The service-worker template
//! - Well-known file names
//! - Configuration types

pub mod config;
pub mod error;
pub mod inject;
pub mod manifest;
pub mod sw;

pub use config::{AppConfig, LimitsConfig, ServerConfig, WorkConfig};
pub use error::{Error, Result};
pub use inject::{inject_pwa_tags, InjectionOutcome};
pub use manifest::{ManifestIcon, WebManifest};

/// File name that marks a site root.
pub const ENTRY_FILE_NAME: &str = "index.html";

/// File name the manifest is written under, beside the entry HTML file.
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// File name the service worker is written under.
pub const SERVICE_WORKER_FILE_NAME: &str = "sw.js";

/// File name the uploaded icon is copied to.
pub const ICON_FILE_NAME: &str = "icon.png";

/// Suggested download name for the converted archive.
pub const OUTPUT_ARCHIVE_NAME: &str = "modified-site.zip";
