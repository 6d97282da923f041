/// Filesystem-backed media index.
///
/// Walks a directory tree with `jwalk`'s rayon-backed parallel traversal
/// and derives mime types from file extensions. Directories are emitted as
/// mime-less rows, exactly as a platform media store reports them, so the
/// aggregation pass's inclusion filter governs them. Entries the walker
/// cannot stat surface as per-record errors rather than aborting the
/// stream.
use super::{MediaIndex, RecordError, Records, SourceError};
use crate::model::FileRecord;
use compact_str::CompactString;
use std::path::{Path, PathBuf};

/// A media index that scans a directory tree on demand.
#[derive(Debug, Clone)]
pub struct FsMediaIndex {
    root: PathBuf,
}

impl FsMediaIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MediaIndex for FsMediaIndex {
    fn records(&self) -> Result<Records<'_>, SourceError> {
        // A missing or non-directory root is "whole index unavailable",
        // not an empty stream.
        let meta = std::fs::metadata(&self.root)?;
        if !meta.is_dir() {
            return Err(SourceError::Unavailable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }

        let walker = jwalk::WalkDir::new(&self.root)
            .skip_hidden(false)
            .follow_links(false)
            .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

        let root = self.root.clone();
        let rows = walker.into_iter().filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => return Some(Err(RecordError::new(err.to_string()))),
            };
            let path = entry.path();

            // The scan root itself is not a row.
            if path == root {
                return None;
            }

            if entry.file_type().is_dir() {
                // Directory rows carry no mime type; the size is whatever
                // the directory entry itself occupies.
                let size = std::fs::symlink_metadata(&path).map(|m| m.len()).unwrap_or(0);
                return Some(Ok(FileRecord {
                    size,
                    mime_type: None,
                    path,
                }));
            }

            match std::fs::symlink_metadata(&path) {
                Ok(meta) => {
                    let mime_type = path
                        .extension()
                        .and_then(|e| e.to_str())
                        .and_then(mime_for_extension)
                        .map(CompactString::new);
                    Some(Ok(FileRecord {
                        size: meta.len(),
                        mime_type,
                        path,
                    }))
                }
                Err(err) => Some(Err(RecordError::new(format!(
                    "{}: {err}",
                    path.display()
                )))),
            }
        });

        Ok(Box::new(rows))
    }

    fn is_dir(&self, path: &Path) -> bool {
        std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }
}

/// Derive a mime type from a file extension.
///
/// Zero-heap-allocation hot path: extensions are lowercased into a
/// fixed-size stack buffer (`[u8; 16]`) rather than allocating a `String`.
/// Extensions longer than 16 bytes, and any extension not in the table,
/// yield `None` — the row then goes through the mime-less inclusion filter.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let bytes = ext.as_bytes();
    if bytes.len() > 16 {
        return None;
    }

    let mut lower = [0u8; 16];
    for (dest, &src) in lower.iter_mut().zip(bytes.iter()) {
        *dest = src.to_ascii_lowercase();
    }
    let lower_str = std::str::from_utf8(&lower[..bytes.len()]).ok()?;

    let mime = match lower_str {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "heic" | "heif" => "image/heic",
        // Video
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mpg" | "mpeg" => "video/mpeg",
        "3gp" => "video/3gpp",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/x-wav",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "m4a" => "audio/mp4",
        "opus" => "audio/opus",
        "ogg" => "application/ogg",
        // Text and documents
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "pdf" => "application/pdf",
        "rtf" => "application/rtf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "odt" => "application/vnd.oasis.opendocument.text",
        "json" => "application/json",
        "js" => "application/javascript",
        "xml" => "application/xml",
        // Archives
        "zip" => "application/zip",
        "rar" => "application/x-rar-compressed",
        "7z" => "application/x-7z-compressed",
        "tar" => "application/x-tar",
        "gz" => "application/gzip",
        "bz2" => "application/x-bzip2",
        "jar" => "application/java-archive",
        _ => return None,
    };
    Some(mime)
}
