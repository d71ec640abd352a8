//! Resolution of student soft references to stored record ids.

use std::collections::HashMap;

use intern_ingest::company_key;
use intern_model::{
    Categorie, Company, EntityKind, RecordId, Stored, Student, Supervisor, SupervisorKey, Year,
};
use intern_store::Database;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ReconcileError, Result};

/// Resolved references of one stored student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLinks {
    pub student_id: RecordId,
    pub cin: i64,
    pub annee: Year,
    pub company_id: Option<RecordId>,
    pub encadreur_ac_id: Option<RecordId>,
    pub encadreur_pro_id: Option<RecordId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub links: Vec<StudentLinks>,
    /// References that matched a stored record.
    pub resolved: usize,
    /// Non-empty references with no matching record in the same year.
    pub unresolved: usize,
}

/// Same-year lookup tables.
struct YearIndex {
    companies: HashMap<String, RecordId>,
    supervisors: HashMap<SupervisorKey, RecordId>,
}

impl YearIndex {
    fn new(companies: &[Stored<Company>], supervisors: &[Stored<Supervisor>]) -> Self {
        Self {
            companies: companies
                .iter()
                .map(|stored| (stored.record.nom_normalise.clone(), stored.id))
                .collect(),
            supervisors: supervisors
                .iter()
                .map(|stored| (stored.natural_key(), stored.id))
                .collect(),
        }
    }

    fn company(&self, name: &str) -> Option<RecordId> {
        self.companies.get(&company_key(name)).copied()
    }

    fn supervisor(&self, name: &str, categorie: Categorie) -> Option<RecordId> {
        let key = SupervisorKey {
            prenom: name.to_string(),
            categorie,
        };
        self.supervisors.get(&key).copied()
    }
}

/// Resolves every stored student's company and supervisor names.
///
/// Companies match on [`company_key`], supervisors on `(prenom, categorie)`,
/// both within the student's year. A name with no match stays `None`.
pub async fn link_students(db: &Database) -> Result<LinkReport> {
    let years = db.students().years().await.map_err(|source| ReconcileError::Link {
        kind: EntityKind::Student,
        source,
    })?;

    let mut report = LinkReport::default();
    for year in years {
        let students = db.students().find_by_year(&year).await.map_err(|source| {
            ReconcileError::Link {
                kind: EntityKind::Student,
                source,
            }
        })?;
        let companies = db.companies().find_by_year(&year).await.map_err(|source| {
            ReconcileError::Link {
                kind: EntityKind::Company,
                source,
            }
        })?;
        let supervisors = db.supervisors().find_by_year(&year).await.map_err(|source| {
            ReconcileError::Link {
                kind: EntityKind::Supervisor,
                source,
            }
        })?;
        let index = YearIndex::new(&companies, &supervisors);
        let (resolved_before, unresolved_before) = (report.resolved, report.unresolved);
        for stored in &students {
            let links = link_one(stored, &index, &mut report);
            report.links.push(links);
        }
        debug!(
            %year,
            students = students.len(),
            resolved = report.resolved - resolved_before,
            unresolved = report.unresolved - unresolved_before,
            "year linked"
        );
    }
    info!(
        students = report.links.len(),
        resolved = report.resolved,
        unresolved = report.unresolved,
        "student references linked"
    );
    Ok(report)
}

fn link_one(stored: &Stored<Student>, index: &YearIndex, report: &mut LinkReport) -> StudentLinks {
    let student = &stored.record;
    let company_id = student.company_id.as_deref().and_then(|name| index.company(name));
    let encadreur_ac_id = student
        .encadreur_ac_id
        .as_deref()
        .and_then(|name| index.supervisor(name, Categorie::Academique));
    let encadreur_pro_id = student
        .encadreur_pro_id
        .as_deref()
        .and_then(|name| index.supervisor(name, Categorie::Professionnel));

    count(report, student.company_id.is_some(), company_id);
    count(report, student.encadreur_ac_id.is_some(), encadreur_ac_id);
    count(report, student.encadreur_pro_id.is_some(), encadreur_pro_id);

    StudentLinks {
        student_id: stored.id,
        cin: student.cin,
        annee: student.annee.clone(),
        company_id,
        encadreur_ac_id,
        encadreur_pro_id,
    }
}

fn count(report: &mut LinkReport, referenced: bool, id: Option<RecordId>) {
    match (referenced, id) {
        (false, _) => {}
        (true, Some(_)) => report.resolved += 1,
        (true, None) => report.unresolved += 1,
    }
}
