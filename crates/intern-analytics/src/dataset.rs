use intern_model::{Company, Entity, EntityKind, Student, Supervisor, Year};
use intern_store::{Database, EntityStore};
use tracing::debug;

use crate::error::{AnalyticsError, Result};

/// Snapshot of the stored records the statistics are computed from.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub students: Vec<Student>,
    pub companies: Vec<Company>,
    pub supervisors: Vec<Supervisor>,
}

impl Dataset {
    /// Loads every year, or only `year` when given.
    pub async fn load(db: &Database, year: Option<&Year>) -> Result<Self> {
        let dataset = Self {
            students: load_records(db.students(), year, EntityKind::Student).await?,
            companies: load_records(db.companies(), year, EntityKind::Company).await?,
            supervisors: load_records(db.supervisors(), year, EntityKind::Supervisor).await?,
        };
        debug!(
            students = dataset.students.len(),
            companies = dataset.companies.len(),
            supervisors = dataset.supervisors.len(),
            "analytics dataset loaded"
        );
        Ok(dataset)
    }
}

async fn load_records<E: Entity>(
    store: &dyn EntityStore<E>,
    year: Option<&Year>,
    kind: EntityKind,
) -> Result<Vec<E>> {
    let stored = match year {
        Some(year) => store.find_by_year(year).await,
        None => store.find_all().await,
    };
    stored
        .map(|records| records.into_iter().map(|stored| stored.record).collect())
        .map_err(|source| AnalyticsError::Load { kind, source })
}
