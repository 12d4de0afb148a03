use super::backend::StorageBackend;
use super::{DataStore, Tables};
use crate::error::Result;
use parking_lot::Mutex;

pub struct CatalogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    /// Held for the whole load-mutate-save cycle of a transaction, together
    /// with the backend's own lock when it has one.
    write_lock: Mutex<()>,
}

impl<B: StorageBackend> CatalogStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }
}

impl<B: StorageBackend> DataStore for CatalogStore<B> {
    fn snapshot(&self) -> Result<Tables> {
        self.backend.load_tables()
    }

    fn transact<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Tables) -> Result<T>,
    {
        let _guard = self.write_lock.lock();
        let _file_lock = self.backend.lock()?;

        let mut tables = self.backend.load_tables()?;
        let output = f(&mut tables)?;
        self.backend.save_tables(&tables)?;

        Ok(output)
    }
}
