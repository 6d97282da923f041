/// Mime-type classification into the six storage categories.
///
/// A mime type's primary component ("image/png" → "image") decides the
/// category directly where it can; everything else goes through the
/// [`CategoryTable`], three disjoint sets of full mime-type strings for
/// documents, audio, and archives that hide behind other primary types.
use compact_str::CompactString;
use serde::Serialize;
use std::collections::HashSet;

/// The six buckets used to summarise storage usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileCategory {
    Images,
    Videos,
    Audio,
    Documents,
    Archives,
    Other,
}

impl FileCategory {
    /// Every category, in display order.
    pub const ALL: [FileCategory; 6] = [
        Self::Images,
        Self::Videos,
        Self::Audio,
        Self::Documents,
        Self::Archives,
        Self::Other,
    ];

    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Images => "Images",
            Self::Videos => "Videos",
            Self::Audio => "Audio",
            Self::Documents => "Documents",
            Self::Archives => "Archives",
            Self::Other => "Other",
        }
    }
}

/// Full mime types counted as documents although their primary type is not
/// "text". Note that `application/pdf` is deliberately absent: PDFs are
/// filed under Other.
const EXTRA_DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.ms-excel",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.oasis.opendocument.spreadsheet",
    "application/vnd.oasis.opendocument.presentation",
    "application/rtf",
    "application/json",
    "application/javascript",
    "application/x-javascript",
    "application/xml",
];

/// Full mime types counted as audio although their primary type is not
/// "audio".
const EXTRA_AUDIO_MIME_TYPES: &[&str] = &["application/ogg", "application/x-flac"];

/// Full mime types counted as archives.
const ARCHIVE_MIME_TYPES: &[&str] = &[
    "application/zip",
    "application/x-zip-compressed",
    "application/x-rar-compressed",
    "application/vnd.rar",
    "application/x-7z-compressed",
    "application/x-tar",
    "application/gzip",
    "application/x-gzip",
    "application/x-bzip2",
    "application/java-archive",
];

/// Lookup table for mime types whose primary component does not map
/// directly to a category.
///
/// The three sets must be disjoint; lookups run in document → audio →
/// archive order. Built once at startup and passed into the aggregation
/// pass, so the classifier stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    extra_documents: HashSet<CompactString>,
    extra_audio: HashSet<CompactString>,
    archives: HashSet<CompactString>,
}

impl CategoryTable {
    /// Build a table from explicit set contents.
    ///
    /// Entries are ASCII-lowercased on the way in so that lookups stay
    /// case-insensitive.
    pub fn new<D, A, R>(documents: D, audio: A, archives: R) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        fn lowered<I>(entries: I) -> HashSet<CompactString>
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            entries
                .into_iter()
                .map(|e| {
                    e.as_ref()
                        .chars()
                        .map(|c| c.to_ascii_lowercase())
                        .collect()
                })
                .collect()
        }

        Self {
            extra_documents: lowered(documents),
            extra_audio: lowered(audio),
            archives: lowered(archives),
        }
    }
}

impl Default for CategoryTable {
    /// The built-in table: common office/OpenDocument formats, Ogg audio,
    /// and the usual archive containers.
    fn default() -> Self {
        Self::new(
            EXTRA_DOCUMENT_MIME_TYPES.iter().copied(),
            EXTRA_AUDIO_MIME_TYPES.iter().copied(),
            ARCHIVE_MIME_TYPES.iter().copied(),
        )
    }
}

/// Classify a mime type into a category.
///
/// The primary component (the substring before the first '/') is matched
/// first; "image", "video", "audio", and "text" map directly. Any other
/// primary type falls through to the full-string sets in the table.
/// Matching is case-insensitive via ASCII lowercasing only — case folding
/// must never vary with the host locale.
pub fn classify_mime(mime: &str, table: &CategoryTable) -> FileCategory {
    let lower: CompactString = mime.chars().map(|c| c.to_ascii_lowercase()).collect();

    // A mime type without a '/' is its own primary component.
    let primary = lower.split('/').next().unwrap_or(lower.as_str());

    match primary {
        "image" => FileCategory::Images,
        "video" => FileCategory::Videos,
        "audio" => FileCategory::Audio,
        "text" => FileCategory::Documents,
        _ => {
            if table.extra_documents.contains(lower.as_str()) {
                FileCategory::Documents
            } else if table.extra_audio.contains(lower.as_str()) {
                FileCategory::Audio
            } else if table.archives.contains(lower.as_str()) {
                FileCategory::Archives
            } else {
                FileCategory::Other
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── classify_mime ────────────────────────────────────────────────────

    #[test]
    fn primary_types_map_directly() {
        let table = CategoryTable::default();
        assert_eq!(classify_mime("image/png", &table), FileCategory::Images);
        assert_eq!(classify_mime("video/mp4", &table), FileCategory::Videos);
        assert_eq!(classify_mime("audio/mpeg", &table), FileCategory::Audio);
        assert_eq!(classify_mime("text/plain", &table), FileCategory::Documents);
    }

    /// Mime matching must be case-insensitive so "IMAGE/PNG" and
    /// "image/png" classify identically.
    #[test]
    fn matching_is_case_insensitive() {
        let table = CategoryTable::default();
        assert_eq!(classify_mime("IMAGE/PNG", &table), FileCategory::Images);
        assert_eq!(classify_mime("Video/MP4", &table), FileCategory::Videos);
        assert_eq!(
            classify_mime("APPLICATION/ZIP", &table),
            FileCategory::Archives
        );
        assert_eq!(
            classify_mime("Application/MsWord", &table),
            FileCategory::Documents
        );
    }

    #[test]
    fn extra_document_types() {
        let table = CategoryTable::default();
        assert_eq!(
            classify_mime("application/msword", &table),
            FileCategory::Documents
        );
        assert_eq!(
            classify_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                &table
            ),
            FileCategory::Documents
        );
        assert_eq!(
            classify_mime("application/json", &table),
            FileCategory::Documents
        );
    }

    #[test]
    fn extra_audio_types() {
        let table = CategoryTable::default();
        assert_eq!(classify_mime("application/ogg", &table), FileCategory::Audio);
    }

    #[test]
    fn archive_types() {
        let table = CategoryTable::default();
        assert_eq!(
            classify_mime("application/zip", &table),
            FileCategory::Archives
        );
        assert_eq!(
            classify_mime("application/x-7z-compressed", &table),
            FileCategory::Archives
        );
    }

    /// PDFs are in no extra set and their primary type has no direct
    /// mapping, so they land in Other.
    #[test]
    fn pdf_classifies_as_other() {
        let table = CategoryTable::default();
        assert_eq!(
            classify_mime("application/pdf", &table),
            FileCategory::Other
        );
    }

    #[test]
    fn unknown_mime_classifies_as_other() {
        let table = CategoryTable::default();
        assert_eq!(
            classify_mime("application/octet-stream", &table),
            FileCategory::Other
        );
        assert_eq!(classify_mime("model/gltf+json", &table), FileCategory::Other);
    }

    /// A mime type without a subtype is matched on the whole string.
    #[test]
    fn mime_without_slash_uses_whole_string_as_primary() {
        let table = CategoryTable::default();
        assert_eq!(classify_mime("image", &table), FileCategory::Images);
        assert_eq!(classify_mime("weird", &table), FileCategory::Other);
    }

    /// Identical inputs must always yield identical assignments.
    #[test]
    fn classification_is_deterministic() {
        let table = CategoryTable::default();
        for _ in 0..3 {
            assert_eq!(classify_mime("audio/flac", &table), FileCategory::Audio);
        }
    }

    // ── CategoryTable ────────────────────────────────────────────────────

    /// The three built-in sets must never overlap; first-match-wins order
    /// would otherwise silently shadow entries.
    #[test]
    fn builtin_sets_are_disjoint() {
        for doc in EXTRA_DOCUMENT_MIME_TYPES {
            assert!(!EXTRA_AUDIO_MIME_TYPES.contains(doc), "{doc} in two sets");
            assert!(!ARCHIVE_MIME_TYPES.contains(doc), "{doc} in two sets");
        }
        for audio in EXTRA_AUDIO_MIME_TYPES {
            assert!(!ARCHIVE_MIME_TYPES.contains(audio), "{audio} in two sets");
        }
    }

    /// Custom tables lowercase their entries so lookups stay
    /// case-insensitive in both directions.
    #[test]
    fn custom_table_entries_are_lowercased() {
        let table = CategoryTable::new(
            ["application/X-Custom-Doc"],
            Vec::<&str>::new(),
            Vec::<&str>::new(),
        );
        assert_eq!(
            classify_mime("APPLICATION/x-custom-doc", &table),
            FileCategory::Documents
        );
    }
}
