//! Serving files from a directory when no route matches.
//!
//! The request path is mapped under a root directory (the working directory
//! by default). Only normal path segments are accepted, so `..` can not escape
//! the root. The content type is picked from the file extension:
//!
//! | extension     | content type      |
//! |---------------|-------------------|
//! | `html`        | `text/html`       |
//! | `md`          | `text/markdown`   |
//! | `css`         | `text/css`        |
//! | `js`          | `text/javascript` |
//! | `gif`         | `image/gif`       |
//! | `jpeg`, `jpg` | `image/png`       |
//! | `svg`         | `image/svg+xml`   |
//! | `webp`        | `webp`            |
//! | anything else | `text/plain`      |
//!
//! The `jpeg`/`jpg` and `webp` entries are kept as deployed clients see them.

use nano_http::protocol::Response;
use std::collections::HashSet;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const DEFAULT_CONTENT_TYPE: &str = "text/plain";

const CONTENT_TYPES: [(&str, &str); 9] = [
    ("html", "text/html"),
    ("md", "text/markdown"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("gif", "image/gif"),
    ("jpeg", "image/png"),
    ("jpg", "image/png"),
    ("svg", "image/svg+xml"),
    ("webp", "webp"),
];

#[derive(Error, Debug)]
pub enum StaticFileError {
    #[error("file not found: {path}")]
    NotFound { path: String },

    #[error("path is not allowed: {path}")]
    Forbidden { path: String },

    #[error("io error reading {path}: {source}")]
    Io { path: String, source: io::Error },
}

/// Content type for a request path, by extension (text after the last `.`).
pub fn content_type_for(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map_or("", |(_, ext)| ext);
    CONTENT_TYPES.iter().find(|(ext, _)| *ext == extension).map_or(DEFAULT_CONTENT_TYPE, |(_, content_type)| content_type)
}

/// Files under a root directory, optionally restricted to an allowlist of request paths.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    root: PathBuf,
    allowed: HashSet<String>,
}

impl Default for StaticFiles {
    fn default() -> Self {
        Self::new(".")
    }
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into(), allowed: HashSet::new() }
    }

    /// Restricts serving to the given request path; can be called repeatedly.
    ///
    /// With no allowed paths every file under the root is served.
    pub fn allow(mut self, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        self.allowed.insert(path);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_allowed(&self, path: &str) -> bool {
        self.allowed.is_empty() || self.allowed.contains(path)
    }

    /// Maps a request path onto the root; `None` for anything but plain segments.
    fn map_path(&self, path: &str) -> Option<PathBuf> {
        let mut file = self.root.clone();
        for component in Path::new(path.trim_start_matches('/')).components() {
            match component {
                Component::Normal(segment) => file.push(segment),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(file)
    }

    /// Reads the file for `path` into a `200 OK` response with the nosniff header.
    pub async fn load(&self, path: &str) -> Result<Response, StaticFileError> {
        if !self.is_allowed(path) {
            return Err(StaticFileError::Forbidden { path: path.to_string() });
        }

        let file = self.map_path(path).ok_or_else(|| StaticFileError::Forbidden { path: path.to_string() })?;

        let metadata = match tokio::fs::metadata(&file).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StaticFileError::NotFound { path: path.to_string() }),
            Err(source) => return Err(StaticFileError::Io { path: path.to_string(), source }),
        };
        if !metadata.is_file() {
            return Err(StaticFileError::NotFound { path: path.to_string() });
        }

        let content = tokio::fs::read(&file).await.map_err(|source| StaticFileError::Io { path: path.to_string(), source })?;

        debug!(path, file = %file.display(), "serving static file");
        Ok(Response::ok(content).with_content_type(content_type_for(path)).with_nosniff())
    }

    /// Like [`load`](Self::load), but logs the failure and returns `None`.
    pub async fn serve(&self, path: &str) -> Option<Response> {
        match self.load(path).await {
            Ok(response) => Some(response),
            Err(e @ StaticFileError::NotFound { .. }) => {
                debug!(cause = %e, "no static file");
                None
            }
            Err(e) => {
                warn!(cause = %e, "can't serve static file");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// The directory and its files are removed when the returned guard drops.
    fn temp_root() -> TempDir {
        let root = tempfile::Builder::new().prefix("nano-web-static-").tempdir().unwrap();
        fs::create_dir_all(root.path().join("docs")).unwrap();
        fs::write(root.path().join("index.html"), "<h1>hi</h1>").unwrap();
        fs::write(root.path().join("docs/readme.md"), "# readme").unwrap();
        root
    }

    #[test]
    fn test_content_type_table() {
        assert_eq!(content_type_for("/index.html"), "text/html");
        assert_eq!(content_type_for("/a/readme.md"), "text/markdown");
        assert_eq!(content_type_for("/style.css"), "text/css");
        assert_eq!(content_type_for("/app.js"), "text/javascript");
        assert_eq!(content_type_for("/anim.gif"), "image/gif");
        assert_eq!(content_type_for("/photo.jpeg"), "image/png");
        assert_eq!(content_type_for("/photo.jpg"), "image/png");
        assert_eq!(content_type_for("/logo.svg"), "image/svg+xml");
        assert_eq!(content_type_for("/image.webp"), "webp");
        assert_eq!(content_type_for("/notes.txt"), "text/plain");
        assert_eq!(content_type_for("/Makefile"), "text/plain");
        assert_eq!(content_type_for("/archive.tar.gz"), "text/plain");
    }

    #[test]
    fn test_map_path_prevents_traversal() {
        let files = StaticFiles::new("/srv/www");
        assert!(files.map_path("/../etc/passwd").is_none());
        assert!(files.map_path("/docs/../../secret").is_none());
        assert_eq!(files.map_path("/docs/./a.md"), Some(PathBuf::from("/srv/www/docs/a.md")));
    }

    #[tokio::test]
    async fn test_load_file() {
        let root = temp_root();
        let files = StaticFiles::new(root.path());

        let response = files.load("/index.html").await.unwrap();
        assert_eq!(response.content_type(), "text/html");
        assert!(response.nosniff());
        assert_eq!(response.content().as_ref(), b"<h1>hi</h1>");

        let response = files.load("/docs/readme.md").await.unwrap();
        assert_eq!(response.content_type(), "text/markdown");
    }

    #[tokio::test]
    async fn test_missing_file_and_directory() {
        let root = temp_root();
        let files = StaticFiles::new(root.path());

        assert!(matches!(files.load("/nope.html").await, Err(StaticFileError::NotFound { .. })));
        assert!(matches!(files.load("/docs").await, Err(StaticFileError::NotFound { .. })));
        assert!(files.serve("/nope.html").await.is_none());
    }

    #[tokio::test]
    async fn test_allowlist() {
        let root = temp_root();
        let files = StaticFiles::new(root.path()).allow("index.html");

        assert!(files.load("/index.html").await.is_ok());
        assert!(matches!(files.load("/docs/readme.md").await, Err(StaticFileError::Forbidden { .. })));
    }

    #[tokio::test]
    async fn test_traversal_is_forbidden() {
        let root = temp_root();
        let files = StaticFiles::new(root.path().join("docs"));

        assert!(matches!(files.load("/../index.html").await, Err(StaticFileError::Forbidden { .. })));
    }
}
