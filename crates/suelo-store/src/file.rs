//! File-backed key-value store
//!
//! Each key maps to one JSON file under the root directory. Key segments
//! separated by `/` become subdirectories. Within a segment, bytes outside
//! `[A-Za-z0-9-]` (including `_` itself) are written as `_` followed by two
//! hex digits, and an empty segment becomes `_`. Distinct keys therefore map
//! to distinct files, and no segment can name `.` or `..`.
//! Writes go to a temporary file that is then renamed over the target.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use suelo_core::error::{Result, SueloError};
use tokio::fs;

use crate::ports::KeyValueStore;

#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding a key
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        let segments: Vec<String> = key.split('/').map(encode_segment).collect();

        // `split` always yields at least one segment
        if let Some((last, dirs)) = segments.split_last() {
            for dir in dirs {
                path.push(dir);
            }
            path.push(format!("{}.json", last));
        }
        path
    }
}

fn encode_segment(segment: &str) -> String {
    if segment.is_empty() {
        return "_".to_string();
    }

    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("_{:02x}", byte));
        }
    }
    encoded
}

fn storage_error(key: &str, err: std::io::Error) -> SueloError {
    SueloError::Storage { key: key.to_string(), reason: err.to_string() }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(key, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| storage_error(key, e))?;
        }

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await.map_err(|e| storage_error(key, e))?;
        fs::rename(&tmp_path, &path).await.map_err(|e| storage_error(key, e))?;

        tracing::debug!(key, path = %path.display(), bytes = value.len(), "Wrote key");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(key, e)),
        }
    }
}
