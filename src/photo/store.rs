//! Image stores: where [`ImageRef`]s point.
//!
//! Canvas items never embed pixels. A store resolves a reference to encoded
//! bytes and hands out fresh references for newly produced images.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::document::ImageRef;
use crate::error::{FolioError, Result};

/// Resolve and create image references.
pub trait ImageStore {
    /// Encoded bytes behind `source`.
    fn get(&self, source: &ImageRef) -> Result<Vec<u8>>;

    /// Store new bytes under a fresh reference.
    fn put(&mut self, bytes: Vec<u8>) -> Result<ImageRef>;
}

/// In-memory store keyed by random references.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    images: HashMap<ImageRef, Vec<u8>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes under a caller-chosen reference.
    pub fn insert(&mut self, source: ImageRef, bytes: Vec<u8>) {
        self.images.insert(source, bytes);
    }

    pub fn contains(&self, source: &ImageRef) -> bool {
        self.images.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageStore for MemoryImageStore {
    fn get(&self, source: &ImageRef) -> Result<Vec<u8>> {
        self.images
            .get(source)
            .cloned()
            .ok_or_else(|| FolioError::UnknownImage(source.to_string()))
    }

    fn put(&mut self, bytes: Vec<u8>) -> Result<ImageRef> {
        let source = ImageRef::new(Uuid::new_v4().to_string());
        self.images.insert(source.clone(), bytes);
        Ok(source)
    }
}

/// Store backed by a directory; references are file names inside it.
#[derive(Debug, Clone)]
pub struct DirImageStore {
    root: PathBuf,
}

impl DirImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a reference, refusing anything that would leave the directory.
    fn path_for(&self, source: &ImageRef) -> Result<PathBuf> {
        let name = source.as_str();
        let escapes = name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name == "."
            || name == "..";
        if escapes {
            return Err(FolioError::UnknownImage(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl ImageStore for DirImageStore {
    fn get(&self, source: &ImageRef) -> Result<Vec<u8>> {
        let path = self.path_for(source)?;
        std::fs::read(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FolioError::UnknownImage(source.to_string()),
            _ => FolioError::Io(e),
        })
    }

    fn put(&mut self, bytes: Vec<u8>) -> Result<ImageRef> {
        let extension = image::guess_format(&bytes)
            .ok()
            .and_then(|format| format.extensions_str().first().copied())
            .unwrap_or("bin");
        let source = ImageRef::new(format!("{}.{}", Uuid::new_v4(), extension));
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(&source)?, bytes)?;
        Ok(source)
    }
}
