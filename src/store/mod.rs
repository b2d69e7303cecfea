//! Insertion-ordered key/value store backed by a properties file.
//!
//! Keys keep the position they were first seen at, so a load followed by a
//! save never reorders or drops entries. The store is rewritten in full on
//! every save.

pub mod codec;

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{Result, StampError};

/// Ordered view over a properties file
#[derive(Debug, Clone, Default)]
pub struct OrderedStore {
    entries: IndexMap<String, String>,
}

impl OrderedStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a properties file.
    ///
    /// # Returns
    /// * `Ok(OrderedStore)` - Entries in first-seen order
    /// * `Err(StampError::NotFound)` - If the file does not exist
    /// * `Err(StampError::Parse)` - If a line holds a malformed `\uXXXX` escape
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StampError::not_found(path),
            _ => StampError::Io(e),
        })?;

        let store = Self::parse(&text).map_err(|e| match e {
            StampError::Parse(msg) => StampError::parse(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        debug!(path = %path.display(), entries = store.len(), "loaded version store");
        Ok(store)
    }

    /// Parse properties text. A repeated key keeps its first position and its last value.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(codec::parse_entries(text)?.into_iter().collect())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert a new key at the end, or update an existing key in place
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Render the store as properties text, header comment first
    pub fn render(&self, header: &str) -> String {
        codec::render_entries(header, self.iter())
    }

    /// Rewrite the whole file with the current entries.
    ///
    /// Content goes to a temporary file next to the target, is synced, then
    /// renamed over it, so readers see either the old or the new file. There is
    /// no locking: two concurrent writers to the same path race and the last
    /// rename wins.
    pub fn save(&self, path: impl AsRef<Path>, header: &str) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_name = format!(
            ".{}.{}.tmp",
            path.file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default(),
            std::process::id()
        );
        let temp_path = path.with_file_name(&temp_name);

        let written = write_synced(&temp_path, self.render(header).as_bytes())
            .and_then(|_| fs::rename(&temp_path, path));
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path);
            return Err(StampError::Io(e));
        }

        debug!(path = %path.display(), entries = self.len(), "saved version store");
        Ok(())
    }
}

fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(content)?;
    file.sync_all()
}

impl<K, V> FromIterator<(K, V)> for OrderedStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = OrderedStore::new();
        for (key, value) in iter {
            store.put(key, value);
        }
        store
    }
}
