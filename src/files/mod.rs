use crate::error::{Error, Result};
use crate::feature::{FeatureCollection, read_collection};
use std::path::Path;

/// One loaded file and its feature collection
#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub filename: String,
    pub collection: FeatureCollection,
}

/// Caller-owned list of feature collections, keyed by filename, plus the
/// collection currently shown on the map.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    entries: Vec<FileEntry>,
    current: Option<String>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any previous entry with the same filename
    pub fn insert(&mut self, filename: impl Into<String>, collection: FeatureCollection) {
        let filename = filename.into();
        match self.entries.iter().position(|e| e.filename == filename) {
            Some(i) => self.entries[i].collection = collection,
            None => self.entries.push(FileEntry {
                filename,
                collection,
            }),
        }
    }

    /// Read a GeoJSON file and add it under its file name
    pub fn open(&mut self, path: &Path) -> Result<&FileEntry> {
        let collection = read_collection(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.insert(filename.clone(), collection);
        self.get(&filename).ok_or(Error::UnknownFile(filename))
    }

    /// Replace the collection stored under `filename`
    pub fn replace(&mut self, filename: &str, collection: FeatureCollection) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.filename == filename)
            .ok_or_else(|| Error::UnknownFile(filename.to_string()))?;
        entry.collection = collection;
        Ok(())
    }

    /// Mark `filename` as the collection currently shown
    pub fn select(&mut self, filename: &str) -> Result<()> {
        if self.get(filename).is_none() {
            return Err(Error::UnknownFile(filename.to_string()));
        }
        self.current = Some(filename.to_string());
        Ok(())
    }

    pub fn get(&self, filename: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.filename == filename)
    }

    pub fn current(&self) -> Option<&FileEntry> {
        self.current.as_deref().and_then(|name| self.get(name))
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
