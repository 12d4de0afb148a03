use super::backend::StorageBackend;
use super::Tables;
use crate::error::{CatalogError, Result};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory storage backend.
///
/// The snapshot sits behind a `RwLock` so the backend can be shared across
/// threads; saving swaps the whole snapshot under the write lock, which is
/// what makes it atomic.
#[derive(Default)]
pub struct MemBackend {
    tables: RwLock<Tables>,
    simulate_write_error: AtomicBool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot (e.g. to test doctor on bad data).
    pub fn with_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
            simulate_write_error: AtomicBool::new(false),
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }
}

impl StorageBackend for MemBackend {
    fn load_tables(&self) -> Result<Tables> {
        Ok(self.tables.read().clone())
    }

    fn save_tables(&self, tables: &Tables) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(CatalogError::Storage("Simulated write error".to_string()));
        }
        *self.tables.write() = tables.clone();
        Ok(())
    }

    fn location(&self) -> String {
        "memory://catalog".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CategoryId;
    use crate::model::Category;

    fn one_category() -> Tables {
        let mut tables = Tables::default();
        let id = CategoryId::new();
        tables.categories.insert(
            id,
            Category {
                id,
                name: "Lab".into(),
            },
        );
        tables
    }

    #[test]
    fn starts_empty() {
        let backend = MemBackend::new();
        assert!(backend.load_tables().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let backend = MemBackend::new();
        let tables = one_category();
        backend.save_tables(&tables).unwrap();
        assert_eq!(backend.load_tables().unwrap(), tables);
    }

    #[test]
    fn simulated_error_keeps_previous_snapshot() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let err = backend.save_tables(&one_category()).unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
        assert!(backend.load_tables().unwrap().is_empty());
    }
}
