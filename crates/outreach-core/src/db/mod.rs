//! JSON document database for prospects and outreach history.
//!
//! The whole store lives in memory and is mirrored to a single JSON file
//! after every mutation (full rewrite, atomic rename). A corrupt or
//! unreadable file on open resets both mappings to empty.
//! Blocking file I/O is executed via `tokio::task::spawn_blocking`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::models::{OutreachHistory, Prospect};

/// The persisted layout: two top-level mappings keyed by id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub prospects: IndexMap<String, Prospect>,
    #[serde(default)]
    pub history: IndexMap<String, OutreachHistory>,
}

/// Thread-safe handle to the document.
#[derive(Clone)]
pub struct Database {
    doc: Arc<Mutex<Document>>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) the document at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref().to_path_buf();
        let doc = load_document(&path);

        save_document(&path, &doc)?;
        tracing::info!(
            "Document store opened at {} ({} prospects, {} history records)",
            path.display(),
            doc.prospects.len(),
            doc.history.len()
        );

        Ok(Self {
            doc: Arc::new(Mutex::new(doc)),
            path: Some(path),
        })
    }

    /// An unpersisted store (for testing).
    pub fn open_in_memory() -> Self {
        Self {
            doc: Arc::new(Mutex::new(Document::default())),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read from the document under the lock.
    pub fn read<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&Document) -> T,
    {
        let doc = self
            .doc
            .lock()
            .map_err(|e| ServerError::Storage(format!("Lock poisoned: {}", e)))?;
        Ok(f(&doc))
    }

    /// Mutate the document and rewrite the file before releasing the lock.
    ///
    /// If the file cannot be written the mutation is rolled back, so memory
    /// never holds changes the file does not.
    pub fn write<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Document) -> T,
    {
        let mut doc = self
            .doc
            .lock()
            .map_err(|e| ServerError::Storage(format!("Lock poisoned: {}", e)))?;
        let Some(ref path) = self.path else {
            return Ok(f(&mut doc));
        };

        let before = doc.clone();
        let out = f(&mut doc);
        if let Err(e) = save_document(path, &doc) {
            *doc = before;
            return Err(e);
        }
        Ok(out)
    }

    /// `write` on the blocking pool.
    pub async fn write_async<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Document) -> T + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || db.write(f))
            .await
            .map_err(|e| ServerError::Storage(format!("Task join error: {}", e)))?
    }

    /// A copy of the whole document.
    pub fn snapshot(&self) -> Result<Document, ServerError> {
        self.read(Document::clone)
    }
}

fn load_document(path: &Path) -> Document {
    if !path.exists() {
        return Document::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Error loading database {}: {}", path.display(), e);
            return Document::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!(
                "Corrupt database {}: {}; starting with an empty store",
                path.display(),
                e
            );
            Document::default()
        }
    }
}

fn save_document(path: &Path, doc: &Document) -> Result<(), ServerError> {
    let json = serde_json::to_string_pretty(doc)
        .map_err(|e| ServerError::Storage(format!("Failed to serialize document: {}", e)))?;

    write_atomic(path, json.as_bytes()).map_err(|e| {
        tracing::error!("Error saving database {}: {}", path.display(), e);
        ServerError::Storage(format!("Failed to save {}: {}", path.display(), e))
    })
}

/// Temp file in the target directory, fsync, then rename over the target.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
