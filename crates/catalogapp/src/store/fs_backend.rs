use super::backend::StorageBackend;
use super::lock::SnapshotLock;
use super::Tables;
use crate::error::{CatalogError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "catalog.json";

/// Filesystem backend: one pretty-printed JSON snapshot per data directory.
pub struct FsBackend {
    root: PathBuf,
    file_name: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_DATA_FILE.to_string(),
        }
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        if name.ends_with(".json") {
            self.file_name = name.to_string();
        } else {
            self.file_name = format!("{}.json", name);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    /// Lock file guarding writes to [`Self::data_path`].
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(format!(".{}.lock", self.file_name))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(CatalogError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_tables(&self) -> Result<Tables> {
        let data_file = self.data_path();
        if !data_file.exists() {
            return Ok(Tables::default());
        }
        let content = fs::read_to_string(data_file).map_err(CatalogError::Io)?;
        if content.trim().is_empty() {
            return Ok(Tables::default());
        }
        let tables: Tables =
            serde_json::from_str(&content).map_err(CatalogError::Serialization)?;
        Ok(tables)
    }

    fn save_tables(&self, tables: &Tables) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let content = serde_json::to_string_pretty(tables).map_err(CatalogError::Serialization)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".catalog-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(CatalogError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.data_path()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(CatalogError::Io(e));
        }

        Ok(())
    }

    fn location(&self) -> String {
        self.data_path().display().to_string()
    }

    fn lock(&self) -> Result<Option<SnapshotLock>> {
        self.ensure_dir(&self.root)?;
        SnapshotLock::acquire(&self.lock_path()).map(Some)
    }
}
