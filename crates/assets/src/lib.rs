//! Project file access and sprite image handling for the scene editor.
//!
//! Everything here is rooted at a project directory: relative paths are
//! sanitized before they touch the file system, so a definition can never
//! reference an image outside the project.

mod placeholder;
mod sprite;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

pub use placeholder::render_placeholder;
pub use sprite::{decode_image, PixelRect, SpriteImage};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssetLimits {
    pub max_bytes: u64,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for AssetLimits {
    fn default() -> Self {
        Self {
            max_bytes: 15 * 1024 * 1024,
            max_width: 4096,
            max_height: 4096,
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset path traversal blocked")]
    Traversal,
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("unsupported asset extension: {0}")]
    UnsupportedExtension(String),
    #[error("asset too large: {size} bytes (max {max})")]
    TooLarge { size: u64, max: u64 },
    #[error("asset dimensions {width}x{height} exceed limit {max_width}x{max_height}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },
    #[error("image decode error: {0}")]
    Decode(String),
}

/// Persistence collaborator: lists definition files and hands out raw bytes.
///
/// Paths are always relative to the project root.
pub trait ProjectSource {
    /// Files directly inside `dir` whose extension matches `extension`
    /// (case-insensitive), sorted by file name.
    fn list_files(&self, dir: &Path, extension: &str) -> Vec<PathBuf>;

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, AssetError>;

    fn exists(&self, path: &Path) -> bool;

    fn limits(&self) -> AssetLimits {
        AssetLimits::default()
    }

    fn read_string(&self, path: &Path) -> Result<String, AssetError> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|err| {
            AssetError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                err.to_string(),
            ))
        })
    }

    /// Reads and decodes an image, enforcing the source's limits.
    fn load_image(&self, path: &Path) -> Result<SpriteImage, AssetError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|value| value.to_lowercase())
            .ok_or_else(|| AssetError::UnsupportedExtension(path.display().to_string()))?;
        if !IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AssetError::UnsupportedExtension(path.display().to_string()));
        }
        let bytes = self.read_bytes(path)?;
        decode_image(&bytes, &self.limits())
    }
}

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// File-system backed project source.
#[derive(Clone, Debug)]
pub struct AssetStore {
    root: PathBuf,
    limits: AssetLimits,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            limits: AssetLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: AssetLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, rel: &Path) -> Result<PathBuf, AssetError> {
        Ok(self.root.join(sanitize_rel_path(rel)?)) // sanitize_rel_path prevents traversal
    }
}

impl ProjectSource for AssetStore {
    fn list_files(&self, dir: &Path, extension: &str) -> Vec<PathBuf> {
        let Ok(rel_dir) = sanitize_rel_path(dir) else {
            warn!(dir = %dir.display(), "directory escapes project root");
            return Vec::new();
        };
        let full_dir = self.root.join(&rel_dir);
        if !full_dir.is_dir() {
            warn!(dir = %full_dir.display(), "directory not found");
            return Vec::new();
        }
        let wanted = extension.to_lowercase();
        let mut files = Vec::new();
        for entry in WalkDir::new(&full_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.to_lowercase() == wanted);
            if matches {
                files.push(rel_dir.join(entry.file_name()));
            }
        }
        files
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        let full_path = self.resolve(path)?;
        if !full_path.is_file() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        let size = fs::metadata(&full_path)?.len();
        if size > self.limits.max_bytes {
            return Err(AssetError::TooLarge {
                size,
                max: self.limits.max_bytes,
            });
        }
        Ok(fs::read(&full_path)?)
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_ok_and(|full| full.is_file())
    }

    fn limits(&self) -> AssetLimits {
        self.limits
    }
}

/// In-memory project source, keyed by sanitized relative path.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: BTreeMap<PathBuf, Vec<u8>>,
    limits: AssetLimits,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) {
        match sanitize_rel_path(path.as_ref()) {
            Ok(rel) => {
                self.files.insert(rel, bytes.into());
            }
            Err(_) => warn!(path = %path.as_ref().display(), "refusing to store escaping path"),
        }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn remove(&mut self, path: impl AsRef<Path>) -> bool {
        sanitize_rel_path(path.as_ref())
            .map(|rel| self.files.remove(&rel).is_some())
            .unwrap_or(false)
    }
}

impl ProjectSource for MemorySource {
    fn list_files(&self, dir: &Path, extension: &str) -> Vec<PathBuf> {
        let Ok(rel_dir) = sanitize_rel_path(dir) else {
            return Vec::new();
        };
        let wanted = extension.to_lowercase();
        self.files
            .keys()
            .filter(|path| path.parent() == Some(rel_dir.as_path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.to_lowercase() == wanted)
            })
            .cloned()
            .collect()
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        let rel = sanitize_rel_path(path)?;
        let bytes = self
            .files
            .get(&rel)
            .ok_or_else(|| AssetError::NotFound(path.display().to_string()))?;
        let size = bytes.len() as u64;
        if size > self.limits.max_bytes {
            return Err(AssetError::TooLarge {
                size,
                max: self.limits.max_bytes,
            });
        }
        Ok(bytes.clone())
    }

    fn exists(&self, path: &Path) -> bool {
        sanitize_rel_path(path).is_ok_and(|rel| self.files.contains_key(&rel))
    }

    fn limits(&self) -> AssetLimits {
        self.limits
    }
}

pub fn sanitize_rel_path(rel: &Path) -> Result<PathBuf, AssetError> {
    use std::path::Component::*;
    let mut out = PathBuf::new();
    for component in rel.components() {
        match component {
            CurDir => {}
            Normal(part) => out.push(part),
            ParentDir | RootDir | Prefix(_) => return Err(AssetError::Traversal),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
