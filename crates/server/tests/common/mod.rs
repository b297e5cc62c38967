//! Common test utilities and fixtures.
//! Note: #[allow(dead_code)] because each test file compiles common/ separately.
#![allow(dead_code)]

use pwapack_core::AppConfig;
use pwapack_server::{create_router, AppState};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Multipart boundary used by the test request builder.
pub const BOUNDARY: &str = "pwapack-test-boundary";

/// Minimal bytes standing in for an uploaded PNG icon.
pub const ICON_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// A test server wrapper with its own work root.
pub struct TestServer {
    pub router: axum::Router,
    work_root: PathBuf,
    _temp_dir: TempDir,
}

impl TestServer {
    /// Create a new test server with a temporary work root.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let work_root = temp_dir.path().join("work");
        std::fs::create_dir_all(&work_root).expect("Failed to create work root");

        let state = AppState::new(AppConfig::for_testing(&work_root));
        let router = create_router(state);

        Self {
            router,
            work_root,
            _temp_dir: temp_dir,
        }
    }

    /// Directory request workspaces are allocated under.
    pub fn work_root(&self) -> &Path {
        &self.work_root
    }

    /// Number of workspace directories currently present under the work root.
    pub fn workspace_count(&self) -> usize {
        std::fs::read_dir(&self.work_root).map(|d| d.count()).unwrap_or(0)
    }
}

/// Build a zip archive in memory from (name, contents) pairs.
pub fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Build a multipart/form-data body from (part name, file name, contents)
/// triples, using [`BOUNDARY`].
pub fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
