//! Site conversion handler.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::body::Body;
use axum::extract::{Multipart, State};
use bytes::Bytes;
use axum::http::{header, StatusCode};
use axum::response::Response;
use futures::StreamExt;
use pwapack_core::OUTPUT_ARCHIVE_NAME;
use pwapack_pipeline::{convert_site, PipelineError, RequestWorkspace};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Multipart part carrying the site archive.
const SITE_PART: &str = "siteZip";

/// Multipart part carrying the icon image.
const ICON_PART: &str = "icon";

/// POST /convert-to-pwa - Accept a site archive and an icon, inject the
/// PWA scaffolding, and stream back the repackaged archive.
///
/// Both parts are buffered before any filesystem work happens, so a
/// request missing either one is rejected without a workspace ever being
/// created. On success the packaged archive is already complete on disk;
/// the response streams it out and the workspace lives exactly as long as
/// the response body.
pub async fn convert_to_pwa(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut site_zip: Option<Bytes> = None;
    let mut icon: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some(SITE_PART) => site_zip = Some(field.bytes().await?),
            Some(ICON_PART) => icon = Some(field.bytes().await?),
            // Unknown parts are ignored, not rejected.
            _ => continue,
        }
    }

    let site_zip = site_zip.ok_or(ApiError::MissingPart(SITE_PART))?;
    let icon = icon.ok_or(ApiError::MissingPart(ICON_PART))?;

    let workspace = RequestWorkspace::create(state.work_root())
        .await
        .map_err(PipelineError::Workspace)?;
    tracing::info!(
        workspace = %workspace.id(),
        site_bytes = site_zip.len(),
        icon_bytes = icon.len(),
        "conversion started"
    );

    tokio::fs::write(workspace.staged_archive(), &site_zip)
        .await
        .map_err(PipelineError::Workspace)?;
    tokio::fs::write(workspace.staged_icon(), &icon)
        .await
        .map_err(PipelineError::Workspace)?;

    let outcome = convert_site(&workspace, &state.config.limits).await?;
    tracing::info!(
        workspace = %workspace.id(),
        entry = %outcome.entry_html.display(),
        bytes = outcome.archive_bytes,
        "conversion finished"
    );

    // The archive is fully staged before any response bytes are committed;
    // a failure above still yields a clean error response.
    let file = File::open(&outcome.archive_path)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to open packaged archive: {e}")))?;

    // The body owns the workspace guard: when the stream is dropped, on
    // completion or on client disconnect, the workspace is removed.
    let stream = ReaderStream::new(file).map(move |chunk| {
        let _workspace = &workspace;
        chunk
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(header::CONTENT_LENGTH, outcome.archive_bytes)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{OUTPUT_ARCHIVE_NAME}\""),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal(format!("failed to build response: {e}")))
}
