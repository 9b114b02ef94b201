use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::blob::{BlobHash, BlobId};
use crate::object::ObjectId;

/// Path served when a directory is requested and used as the SPA fallback.
pub const INDEX_PATH: &str = "/index.html";

/// Header marking a resource as a patch inside a quilt.
///
/// Its value is the hex-encoded internal id of the patch.
pub const QUILT_PATCH_HEADER: &str = "x-wal-quilt-patch-internal-id";

/// Path of a resource within a site, e.g. `/index.html`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourcePath(String);

impl ResourcePath {
    /// Wrap a path as-is.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Normalize a request path.
    ///
    /// Paths that are empty or end in `/` get `index.html` appended. A
    /// missing leading `/` is added.
    pub fn normalize(raw: &str) -> Self {
        let mut path = if raw.starts_with('/') {
            raw.to_owned()
        } else {
            format!("/{raw}")
        };
        if path.ends_with('/') {
            path.push_str("index.html");
        }
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_index(&self) -> bool {
        self.0 == INDEX_PATH
    }

    /// Lower-cased file extension of the last path segment, if any.
    pub fn extension(&self) -> Option<String> {
        let file = self.0.rsplit('/').next()?;
        let (stem, ext) = file.rsplit_once('.')?;
        if stem.is_empty() && ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Byte range of a resource inside its blob. Either bound may be open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: Option<u64>,
    pub end: Option<u64>,
}

impl ByteRange {
    pub fn new(start: Option<u64>, end: Option<u64>) -> Self {
        Self { start, end }
    }

    /// Value for the HTTP `Range` header. Absent bounds are left empty.
    pub fn to_header_value(&self) -> String {
        let start = self.start.map(|v| v.to_string()).unwrap_or_default();
        let end = self.end.map(|v| v.to_string()).unwrap_or_default();
        format!("bytes={start}-{end}")
    }
}

/// Resource metadata stored on chain as a dynamic field of the site object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Path as stored in the record. Not required to equal the request path.
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub blob_id: BlobId,
    pub blob_hash: BlobHash,
    pub range: Option<ByteRange>,
}

impl ResourceRecord {
    /// Look up a header. Exact key first, then case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }

    /// Internal id of the quilt patch holding this resource, if it is one.
    ///
    /// A blank header value means the resource is a plain blob.
    pub fn quilt_internal_id(&self) -> Option<&str> {
        self.header(QUILT_PATCH_HEADER)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}

/// Verified resource content plus the headers to serve it with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResult {
    /// Site object the resource was finally found under.
    pub object_id: ObjectId,
    /// Path as stored in the record, which may differ from the request.
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: Bytes,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(headers: &[(&str, &str)]) -> ResourceRecord {
        ResourceRecord {
            path: "/a".into(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            blob_id: BlobId::from_bytes([1; 32]),
            blob_hash: BlobHash::from_bytes([2; 32]),
            range: None,
        }
    }

    #[test]
    fn normalize_root_and_directories() {
        assert_eq!(ResourcePath::normalize("/").as_str(), "/index.html");
        assert_eq!(ResourcePath::normalize("/docs/").as_str(), "/docs/index.html");
        assert_eq!(ResourcePath::normalize("").as_str(), "/index.html");
    }

    #[test]
    fn normalize_file_is_noop() {
        assert_eq!(ResourcePath::normalize("/app.js").as_str(), "/app.js");
        assert_eq!(ResourcePath::normalize("app.js").as_str(), "/app.js");
    }

    #[test]
    fn index_detection() {
        assert!(ResourcePath::normalize("/").is_index());
        assert!(!ResourcePath::normalize("/docs/").is_index());
    }

    #[test]
    fn extension_of_last_segment() {
        assert_eq!(ResourcePath::new("/a/b.JS").extension().as_deref(), Some("js"));
        assert_eq!(ResourcePath::new("/a.d/file").extension(), None);
        assert_eq!(ResourcePath::new("/archive.tar.gz").extension().as_deref(), Some("gz"));
    }

    #[test]
    fn range_header_values() {
        assert_eq!(ByteRange::new(Some(0), Some(99)).to_header_value(), "bytes=0-99");
        assert_eq!(ByteRange::new(Some(100), None).to_header_value(), "bytes=100-");
        assert_eq!(ByteRange::new(None, Some(5)).to_header_value(), "bytes=-5");
    }

    #[test]
    fn header_lookup_is_case_insensitive_fallback() {
        let r = record(&[("Content-Type", "text/html")]);
        assert_eq!(r.header("content-type"), Some("text/html"));
        assert_eq!(r.header("x-missing"), None);
    }

    proptest::proptest! {
        #[test]
        fn normalized_paths_are_absolute_files(raw in "[a-z/.]{0,24}") {
            let path = ResourcePath::normalize(&raw);
            proptest::prop_assert!(path.as_str().starts_with('/'));
            proptest::prop_assert!(!path.as_str().ends_with('/'));
            proptest::prop_assert_eq!(ResourcePath::normalize(path.as_str()), path.clone());
        }
    }

    #[test]
    fn quilt_marker() {
        assert_eq!(record(&[]).quilt_internal_id(), None);
        let r = record(&[(QUILT_PATCH_HEADER, "0x0101000200")]);
        assert_eq!(r.quilt_internal_id(), Some("0x0101000200"));
    }

    #[test]
    fn blank_quilt_marker_is_ignored() {
        assert_eq!(record(&[(QUILT_PATCH_HEADER, "")]).quilt_internal_id(), None);
        assert_eq!(record(&[(QUILT_PATCH_HEADER, "  ")]).quilt_internal_id(), None);
    }
}
