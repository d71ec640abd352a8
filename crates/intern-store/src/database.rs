use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use intern_model::{Company, Student, Supervisor};

use crate::error::{Result, StoreError};
use crate::json_file::JsonFileStore;
use crate::memory::MemoryStore;
use crate::store::EntityStore;

/// Long-lived handle to the three entity stores.
///
/// Open it once per process and pass it to whatever needs persistence.
/// Cloning is cheap and shares the underlying stores.
#[derive(Clone)]
pub struct Database {
    location: Option<PathBuf>,
    students: Arc<dyn EntityStore<Student>>,
    companies: Arc<dyn EntityStore<Company>>,
    supervisors: Arc<dyn EntityStore<Supervisor>>,
}

impl Database {
    /// Opens (creating if needed) a JSON document store rooted at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        fs::create_dir_all(root).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: root.to_path_buf(),
            source: e,
        })?;
        tracing::info!(root = %root.display(), "opened document store");
        Ok(Self {
            location: Some(root.to_path_buf()),
            students: Arc::new(JsonFileStore::<Student>::new(root)),
            companies: Arc::new(JsonFileStore::<Company>::new(root)),
            supervisors: Arc::new(JsonFileStore::<Supervisor>::new(root)),
        })
    }

    /// A store that lives only as long as this handle.
    pub fn in_memory() -> Self {
        Self {
            location: None,
            students: Arc::new(MemoryStore::<Student>::new()),
            companies: Arc::new(MemoryStore::<Company>::new()),
            supervisors: Arc::new(MemoryStore::<Supervisor>::new()),
        }
    }

    /// Assembles a handle from arbitrary store implementations.
    pub fn from_stores(
        students: Arc<dyn EntityStore<Student>>,
        companies: Arc<dyn EntityStore<Company>>,
        supervisors: Arc<dyn EntityStore<Supervisor>>,
    ) -> Self {
        Self {
            location: None,
            students,
            companies,
            supervisors,
        }
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    pub fn students(&self) -> &dyn EntityStore<Student> {
        self.students.as_ref()
    }

    pub fn companies(&self) -> &dyn EntityStore<Company> {
        self.companies.as_ref()
    }

    pub fn supervisors(&self) -> &dyn EntityStore<Supervisor> {
        self.supervisors.as_ref()
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
