//! Zip extraction and packing.
//!
//! Both halves are thin wrappers over the `zip` crate, run on the blocking
//! thread pool since the codec is synchronous.

use crate::error::{PipelineError, PipelineResult};
use pwapack_core::LimitsConfig;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Summary of one extraction.
#[derive(Clone, Copy, Debug)]
pub struct ExtractionSummary {
    /// Number of archive entries processed.
    pub entries: usize,
    /// Cumulative uncompressed bytes written.
    pub bytes: u64,
}

/// Extract `archive` into `dest`, preserving relative paths and directory
/// structure.
///
/// Enforces the configured entry-count and cumulative-size limits, rejects
/// entries whose names escape `dest`, and bounds the whole operation with
/// the configured timeout.
pub async fn extract_archive(
    archive: &Path,
    dest: &Path,
    limits: &LimitsConfig,
) -> PipelineResult<ExtractionSummary> {
    let archive = archive.to_path_buf();
    let dest = dest.to_path_buf();
    let deadline = limits.extraction_timeout();
    let secs = limits.extraction_timeout_secs;
    let limits = limits.clone();

    let task = tokio::task::spawn_blocking(move || extract_sync(&archive, &dest, &limits));
    match tokio::time::timeout(deadline, task).await {
        Ok(joined) => joined?,
        // The blocking task keeps running detached, but the size and entry
        // limits bound how much work it can still do; the request itself
        // fails here.
        Err(_) => Err(PipelineError::ExtractionTimeout { secs }),
    }
}

fn extract_sync(archive: &Path, dest: &Path, limits: &LimitsConfig) -> PipelineResult<ExtractionSummary> {
    let file = File::open(archive).map_err(PipelineError::Workspace)?;
    let mut zip = ZipArchive::new(file)?;

    if zip.len() == 0 {
        return Err(PipelineError::EmptyArchive);
    }
    if zip.len() > limits.max_archive_entries {
        return Err(PipelineError::TooManyEntries {
            limit: limits.max_archive_entries,
        });
    }

    let mut bytes = 0u64;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(PipelineError::UnsafeEntryPath(entry.name().to_string()));
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(PipelineError::Extraction)?;
            continue;
        }

        bytes = bytes.saturating_add(entry.size());
        if bytes > limits.max_extracted_bytes {
            return Err(PipelineError::ExtractedTooLarge {
                limit: limits.max_extracted_bytes,
            });
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(PipelineError::Extraction)?;
        }
        let mut out = File::create(&target).map_err(PipelineError::Extraction)?;
        io::copy(&mut entry, &mut out).map_err(PipelineError::Extraction)?;
    }

    Ok(ExtractionSummary {
        entries: zip.len(),
        bytes,
    })
}

/// Zip the full recursive contents of `src` into the file at `out`, with
/// entry paths relative to `src`.
///
/// The archive is fully written and closed before this returns, so the
/// caller can commit to a success response knowing the output is complete
/// and valid. Returns the packaged size in bytes.
pub async fn pack_directory(src: &Path, out: &Path) -> PipelineResult<u64> {
    let src = src.to_path_buf();
    let out = out.to_path_buf();
    tokio::task::spawn_blocking(move || pack_sync(&src, &out)).await?
}

fn pack_sync(src: &Path, out: &Path) -> PipelineResult<u64> {
    let file = File::create(out).map_err(|e| PipelineError::Packaging(e.into()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| PipelineError::Packaging(io::Error::other(e).into()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| PipelineError::Packaging(io::Error::other(e).into()))?;
        let name = relative.to_string_lossy();

        if entry.file_type().is_dir() {
            zip.add_directory(name.as_ref(), options)
                .map_err(PipelineError::Packaging)?;
        } else {
            zip.start_file(name.as_ref(), options)
                .map_err(PipelineError::Packaging)?;
            let mut input =
                File::open(entry.path()).map_err(|e| PipelineError::Packaging(e.into()))?;
            io::copy(&mut input, &mut zip).map_err(|e| PipelineError::Packaging(e.into()))?;
        }
    }

    let file = zip.finish().map_err(PipelineError::Packaging)?;
    let bytes = file
        .metadata()
        .map_err(|e| PipelineError::Packaging(e.into()))?
        .len();
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn limits() -> LimitsConfig {
        LimitsConfig::default()
    }

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
    }

    #[tokio::test]
    async fn extracts_nested_entries() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("site.zip");
        write_zip(
            &archive,
            &[("index.html", b"<html>"), ("assets/app.js", b"let x;")],
        );

        let dest = temp.path().join("out");
        let summary = extract_archive(&archive, &dest, &limits()).await.unwrap();
        assert_eq!(summary.entries, 2);
        assert!(dest.join("index.html").is_file());
        assert!(dest.join("assets/app.js").is_file());
    }

    #[tokio::test]
    async fn rejects_garbage_input() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("bogus.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();

        let err = extract_archive(&archive, &temp.path().join("out"), &limits())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidArchive(_)));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn rejects_archives_with_no_entries() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("empty.zip");
        write_zip(&archive, &[]);

        let err = extract_archive(&archive, &temp.path().join("out"), &limits())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyArchive));
    }

    #[tokio::test]
    async fn rejects_path_traversal_entries() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("slip.zip");
        write_zip(&archive, &[("../evil.txt", b"pwned")]);

        let dest = temp.path().join("out");
        let err = extract_archive(&archive, &dest, &limits()).await.unwrap_err();
        assert!(matches!(err, PipelineError::UnsafeEntryPath(_)));
        assert!(!temp.path().join("evil.txt").exists());
    }

    #[tokio::test]
    async fn enforces_the_entry_count_limit() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("many.zip");
        write_zip(&archive, &[("a.txt", b"a"), ("b.txt", b"b"), ("c.txt", b"c")]);

        let tight = LimitsConfig {
            max_archive_entries: 2,
            ..limits()
        };
        let err = extract_archive(&archive, &temp.path().join("out"), &tight)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::TooManyEntries { limit: 2 }));
    }

    #[tokio::test]
    async fn enforces_the_extracted_size_limit() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("big.zip");
        write_zip(&archive, &[("blob.bin", &[0u8; 4096])]);

        let tight = LimitsConfig {
            max_extracted_bytes: 1024,
            ..limits()
        };
        let err = extract_archive(&archive, &temp.path().join("out"), &tight)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::ExtractedTooLarge { limit: 1024 }));
    }

    #[tokio::test]
    async fn pack_round_trips_a_tree() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("tree");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("index.html"), b"<html>").unwrap();
        fs::write(src.join("sub/data.txt"), b"payload").unwrap();

        let out = temp.path().join("packed.zip");
        let bytes = pack_directory(&src, &out).await.unwrap();
        assert!(bytes > 0);
        assert_eq!(bytes, fs::metadata(&out).unwrap().len());

        let dest = temp.path().join("unpacked");
        extract_archive(&out, &dest, &limits()).await.unwrap();
        assert_eq!(fs::read(dest.join("index.html")).unwrap(), b"<html>");
        assert_eq!(fs::read(dest.join("sub/data.txt")).unwrap(), b"payload");
    }
}
