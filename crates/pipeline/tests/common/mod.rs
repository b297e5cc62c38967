//! Common test fixtures.
//! Note: #[allow(dead_code)] because each test file compiles common/ separately.
#![allow(dead_code)]

use pwapack_pipeline::RequestWorkspace;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Minimal bytes standing in for an uploaded PNG icon.
pub const ICON_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// An entry page with both closing tags present.
pub const BASIC_HTML: &str =
    "<html><head><title>site</title></head><body><h1>hello</h1></body></html>";

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

/// List entry names of a zip file on disk.
pub fn zip_names(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let archive = ZipArchive::new(file).unwrap();
    archive.file_names().map(String::from).collect()
}

/// Read one entry of a zip file on disk.
pub fn zip_entry(path: &Path, name: &str) -> Vec<u8> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut out = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut out).unwrap();
    out
}

/// Allocate a workspace under `work_root` with the given uploads staged.
pub async fn stage_workspace(
    work_root: &Path,
    site_zip: &[u8],
    icon: &[u8],
) -> RequestWorkspace {
    let workspace = RequestWorkspace::create(work_root).await.unwrap();
    tokio::fs::write(workspace.staged_archive(), site_zip)
        .await
        .unwrap();
    tokio::fs::write(workspace.staged_icon(), icon).await.unwrap();
    workspace
}
