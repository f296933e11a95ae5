//! Destinations for report artifacts.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;

/// Somewhere named artifacts (CSV, SVG) can be written.
pub trait ArtifactSink {
    /// Store `bytes` under `name`, returning where they ended up.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Io`] if the artifact cannot be stored.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError>;
}

/// Writes artifacts as files under one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ReportError {
    let path = path.to_path_buf();
    move |source| ReportError::Io { path, source }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.root).map_err(io_error(&self.root))?;
        let path = self.root.join(name);
        fs::write(&path, bytes).map_err(io_error(&path))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
        Ok(path)
    }
}

/// Keeps artifacts in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// Artifact contents as UTF-8, if present and valid.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|bytes| std::str::from_utf8(bytes).ok())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError> {
        self.files.insert(name.to_string(), bytes.to_vec());
        Ok(PathBuf::from(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_sink_creates_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("out"));
        let path = sink.write("a.txt", b"hello").unwrap();
        assert_eq!(path, dir.path().join("out").join("a.txt"));
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn directory_sink_reports_unwritable_root() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let mut sink = DirectorySink::new(blocker.join("nested"));
        let err = sink.write("a.txt", b"hello").unwrap_err();
        assert!(matches!(err, ReportError::Io { ref path, .. } if path.ends_with("nested")));
    }

    #[test]
    fn memory_sink_overwrites_by_name() {
        let mut sink = MemorySink::new();
        sink.write("a", b"1").unwrap();
        sink.write("a", b"2").unwrap();
        assert_eq!(sink.text("a"), Some("2"));
        assert_eq!(sink.names().collect::<Vec<_>>(), vec!["a"]);
    }
}
