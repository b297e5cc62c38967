//! Archive transform pipeline for pwapack.
//!
//! The pipeline takes a staged site archive and icon, and produces a
//! repackaged archive with PWA scaffolding injected:
//! - Per-request workspace allocation with guaranteed teardown
//! - Zip extraction with traversal, size, and time bounds
//! - Site-root discovery
//! - In-place mutation of the extracted tree
//! - Repackaging to a staged output archive
//!
//! Each request runs the stages strictly in sequence; there is no shared
//! state between requests beyond the work-root directory they allocate
//! their workspaces under.

pub mod archive;
pub mod error;
pub mod locate;
pub mod pipeline;
pub mod workspace;

pub use error::{MutateStep, PipelineError, PipelineResult};
pub use pipeline::{convert_site, ConvertOutcome};
pub use workspace::RequestWorkspace;
