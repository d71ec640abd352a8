use std::collections::HashMap;

use intern_model::{Categorie, Student, Year};
use serde::Serialize;

use crate::dataset::Dataset;

/// Hours credited per supervised student.
pub const HOURS_PER_STUDENT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorWorkload {
    pub prenom: String,
    pub categorie: Categorie,
    pub annee: Year,
    pub student_count: u32,
    pub workload_hours: u32,
}

fn supervisor_name(student: &Student, categorie: Categorie) -> Option<&str> {
    match categorie {
        Categorie::Academique => student.encadreur_ac_id.as_deref(),
        Categorie::Professionnel => student.encadreur_pro_id.as_deref(),
    }
}

/// Students per supervisor and year, with the derived hour proxy.
///
/// A supervisor is matched by display name within its category and year.
/// Supervisors with no student are omitted. Heaviest load first.
pub fn supervisor_workload(data: &Dataset) -> Vec<SupervisorWorkload> {
    let mut counts: HashMap<(&str, Categorie, &Year), u32> = HashMap::new();
    for student in &data.students {
        for categorie in [Categorie::Academique, Categorie::Professionnel] {
            if let Some(name) = supervisor_name(student, categorie) {
                *counts.entry((name, categorie, &student.annee)).or_default() += 1;
            }
        }
    }

    let mut workloads: Vec<SupervisorWorkload> = data
        .supervisors
        .iter()
        .filter_map(|supervisor| {
            let key = (supervisor.prenom.as_str(), supervisor.categorie, &supervisor.annee);
            let student_count = counts.get(&key).copied().filter(|count| *count > 0)?;
            Some(SupervisorWorkload {
                prenom: supervisor.prenom.clone(),
                categorie: supervisor.categorie,
                annee: supervisor.annee.clone(),
                student_count,
                workload_hours: student_count * HOURS_PER_STUDENT,
            })
        })
        .collect();

    workloads.sort_by(|a, b| {
        b.student_count
            .cmp(&a.student_count)
            .then_with(|| a.prenom.cmp(&b.prenom))
            .then_with(|| a.annee.cmp(&b.annee))
    });
    workloads
}
