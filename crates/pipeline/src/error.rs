//! Pipeline error taxonomy.

use std::fmt;
use thiserror::Error;

/// The mutation sub-step that failed.
///
/// The four writes run in this order; surfacing which one failed makes a
/// 500 diagnosable without reproducing the upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutateStep {
    CopyIcon,
    WriteManifest,
    RewriteHtml,
    WriteServiceWorker,
}

impl MutateStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CopyIcon => "icon copy",
            Self::WriteManifest => "manifest write",
            Self::RewriteHtml => "entry page rewrite",
            Self::WriteServiceWorker => "service worker write",
        }
    }
}

impl fmt::Display for MutateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline error type.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid zip archive: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),

    #[error("archive contains no entries")]
    EmptyArchive,

    #[error("archive entry escapes the extraction root: {0}")]
    UnsafeEntryPath(String),

    #[error("archive has too many entries (limit {limit})")]
    TooManyEntries { limit: usize },

    #[error("extracted size exceeds the limit of {limit} bytes")]
    ExtractedTooLarge { limit: u64 },

    #[error("archive extraction failed: {0}")]
    Extraction(#[source] std::io::Error),

    #[error("extraction did not finish within {secs}s")]
    ExtractionTimeout { secs: u64 },

    #[error("no index.html found in the uploaded archive")]
    SiteRootNotFound,

    #[error("{step} failed: {source}")]
    Mutate {
        step: MutateStep,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to package the converted site: {0}")]
    Packaging(#[source] zip::result::ZipError),

    #[error("workspace error: {0}")]
    Workspace(#[source] std::io::Error),

    #[error("background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// Whether the failure is the client's fault (a bad or oversized
    /// upload) rather than a server-side processing failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArchive(_)
                | Self::EmptyArchive
                | Self::UnsafeEntryPath(_)
                | Self::TooManyEntries { .. }
                | Self::ExtractedTooLarge { .. }
                | Self::Extraction(_)
                | Self::ExtractionTimeout { .. }
                | Self::SiteRootNotFound
        )
    }
}

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
