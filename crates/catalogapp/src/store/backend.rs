use super::lock::SnapshotLock;
use super::Tables;
use crate::error::Result;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while CatalogStore handles the "what" (transactions, write ordering).
pub trait StorageBackend: Send + Sync {
    /// Load the current snapshot. A backend with nothing stored yet
    /// returns an empty [`Tables`], not an error.
    fn load_tables(&self) -> Result<Tables>;

    /// Replace the stored snapshot.
    /// MUST be atomic (e.g. write to tmp then rename) so a failed save
    /// leaves the previous snapshot intact and visible.
    fn save_tables(&self, tables: &Tables) -> Result<()>;

    /// Human-readable location of the data, for diagnostics.
    fn location(&self) -> String;

    /// Exclusive write lock shared with every other store on the same data,
    /// held across load-mutate-save. Backends private to one store need none.
    fn lock(&self) -> Result<Option<SnapshotLock>> {
        Ok(None)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn load_tables(&self) -> Result<Tables> {
        (**self).load_tables()
    }

    fn save_tables(&self, tables: &Tables) -> Result<()> {
        (**self).save_tables(tables)
    }

    fn location(&self) -> String {
        (**self).location()
    }

    fn lock(&self) -> Result<Option<SnapshotLock>> {
        (**self).lock()
    }
}
