use intern_map::ParseResult;
use intern_store::Database;
use serde::Serialize;

use crate::engine::{ReconcileOptions, Reconciler};
use crate::error::Result;
use crate::link::{LinkReport, link_students};
use crate::report::ReconcileReport;

/// Reports of a full import, one per entity type plus the link phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub companies: ReconcileReport,
    pub supervisors: ReconcileReport,
    pub students: ReconcileReport,
    pub links: LinkReport,
}

impl ImportReport {
    pub fn has_failures(&self) -> bool {
        self.companies.has_failures()
            || self.supervisors.has_failures()
            || self.students.has_failures()
    }

    pub fn reports(&self) -> [&ReconcileReport; 3] {
        [&self.companies, &self.supervisors, &self.students]
    }
}

/// Persists a parsed workbook: companies, then supervisors, then students,
/// then resolves student references against what was stored.
pub async fn import_parsed(
    db: &Database,
    parsed: ParseResult,
    options: ReconcileOptions,
) -> Result<ImportReport> {
    let companies = Reconciler::new(db.companies(), options)?
        .reconcile(parsed.companies)
        .await?;
    let supervisors = Reconciler::new(db.supervisors(), options)?
        .reconcile(parsed.supervisors)
        .await?;
    let students = Reconciler::new(db.students(), options)?
        .reconcile(parsed.students)
        .await?;
    let links = link_students(db).await?;
    Ok(ImportReport {
        companies,
        supervisors,
        students,
        links,
    })
}
