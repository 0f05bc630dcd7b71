use anyhow::Result;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{JobTable, io};

/// Read-only handle to an augmented dataset, loaded on first use.
///
/// The table is read from disk once and shared for the rest of the process.
/// There is no reload: picking up a rewritten file requires a restart.
pub struct SharedTable {
    path: PathBuf,
    table: OnceCell<Arc<JobTable>>,
}

impl SharedTable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Result<Arc<JobTable>> {
        let table = self.table.get_or_try_init(|| {
            tracing::info!("Loading dataset {}", self.path.display());
            io::read_job_table(&self.path).map(Arc::new)
        })?;
        Ok(Arc::clone(table))
    }
}
