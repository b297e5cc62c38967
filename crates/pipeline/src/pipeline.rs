//! Pipeline orchestration.
//!
//! One request runs `extract → locate → mutate → package` strictly in
//! sequence; any failure is terminal for the request. The caller owns the
//! workspace, and with it the lifetime of everything the run writes.

use crate::archive;
use crate::error::{MutateStep, PipelineError, PipelineResult};
use crate::locate;
use crate::workspace::RequestWorkspace;
use pwapack_core::inject::{inject_pwa_tags, InjectionOutcome};
use pwapack_core::sw::SERVICE_WORKER_JS;
use pwapack_core::{
    LimitsConfig, WebManifest, ICON_FILE_NAME, MANIFEST_FILE_NAME, SERVICE_WORKER_FILE_NAME,
};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// What a successful pipeline run produced.
#[derive(Debug)]
pub struct ConvertOutcome {
    /// Packaged archive, staged inside the workspace.
    pub archive_path: PathBuf,
    /// Size of the packaged archive in bytes.
    pub archive_bytes: u64,
    /// Entry file path relative to the extracted tree root.
    pub entry_html: PathBuf,
    /// Which markup insertions applied.
    pub injection: InjectionOutcome,
}

/// Run the full transform against the staged uploads in `workspace`.
///
/// Expects `workspace.staged_archive()` and `workspace.staged_icon()` to
/// have been written by the caller. On success the output archive sits at
/// `workspace.output_archive()`, complete and closed, ready to stream.
pub async fn convert_site(
    workspace: &RequestWorkspace,
    limits: &LimitsConfig,
) -> PipelineResult<ConvertOutcome> {
    let site_dir = workspace.site_dir();

    let summary = archive::extract_archive(&workspace.staged_archive(), &site_dir, limits).await?;
    tracing::debug!(
        workspace = %workspace.id(),
        entries = summary.entries,
        bytes = summary.bytes,
        "archive extracted"
    );

    let entry_path = locate_entry(&site_dir).await?;
    tracing::debug!(
        workspace = %workspace.id(),
        entry = %entry_path.display(),
        "site root located"
    );

    let injection = mutate_site(&entry_path, &workspace.staged_icon()).await?;

    let output = workspace.output_archive();
    let archive_bytes = archive::pack_directory(&site_dir, &output).await?;
    tracing::debug!(
        workspace = %workspace.id(),
        bytes = archive_bytes,
        "converted site packaged"
    );

    let entry_html = entry_path
        .strip_prefix(&site_dir)
        .unwrap_or(&entry_path)
        .to_path_buf();

    Ok(ConvertOutcome {
        archive_path: output,
        archive_bytes,
        entry_html,
        injection,
    })
}

async fn locate_entry(site_dir: &Path) -> PipelineResult<PathBuf> {
    let root = site_dir.to_path_buf();
    tokio::task::spawn_blocking(move || locate::find_entry_html(&root))
        .await?
        .ok_or(PipelineError::SiteRootNotFound)
}

/// Apply the four mutations beside the entry file, in fixed order: icon
/// copy, manifest write, entry-page rewrite, service-worker write.
async fn mutate_site(entry_path: &Path, staged_icon: &Path) -> PipelineResult<InjectionOutcome> {
    let site_root = entry_path.parent().ok_or_else(|| PipelineError::Mutate {
        step: MutateStep::CopyIcon,
        source: io::Error::other("entry file has no parent directory"),
    })?;

    fs::copy(staged_icon, site_root.join(ICON_FILE_NAME))
        .await
        .map_err(|source| PipelineError::Mutate {
            step: MutateStep::CopyIcon,
            source,
        })?;

    let manifest = WebManifest::for_icon(ICON_FILE_NAME);
    let json = manifest.to_json().map_err(|e| PipelineError::Mutate {
        step: MutateStep::WriteManifest,
        source: io::Error::other(e),
    })?;
    fs::write(site_root.join(MANIFEST_FILE_NAME), json)
        .await
        .map_err(|source| PipelineError::Mutate {
            step: MutateStep::WriteManifest,
            source,
        })?;

    let html = fs::read_to_string(entry_path)
        .await
        .map_err(|source| PipelineError::Mutate {
            step: MutateStep::RewriteHtml,
            source,
        })?;
    let (patched, injection) = inject_pwa_tags(&html);
    if !injection.manifest_linked {
        tracing::warn!(entry = %entry_path.display(), "no </head> tag; manifest link not inserted");
    }
    if !injection.sw_registered {
        tracing::warn!(entry = %entry_path.display(), "no </body> tag; service worker not registered");
    }
    fs::write(entry_path, patched)
        .await
        .map_err(|source| PipelineError::Mutate {
            step: MutateStep::RewriteHtml,
            source,
        })?;

    fs::write(site_root.join(SERVICE_WORKER_FILE_NAME), SERVICE_WORKER_JS)
        .await
        .map_err(|source| PipelineError::Mutate {
            step: MutateStep::WriteServiceWorker,
            source,
        })?;

    Ok(injection)
}
