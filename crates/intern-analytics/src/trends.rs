use std::collections::{BTreeMap, BTreeSet};

use intern_model::{Categorie, Year};
use serde::Serialize;

use crate::dataset::Dataset;

/// Distinct-value counts for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTrend {
    pub annee: Year,
    pub students: usize,
    pub companies: usize,
    pub supervisors: usize,
    pub filieres: usize,
}

#[derive(Default)]
struct YearSets<'a> {
    students: BTreeSet<i64>,
    companies: BTreeSet<&'a str>,
    supervisors: BTreeSet<(&'a str, Categorie)>,
    filieres: BTreeSet<&'a str>,
}

/// Per-year counts of distinct students, companies, supervisors and tracks.
///
/// Only years with at least one record appear, oldest first.
pub fn yearly_trends(data: &Dataset) -> Vec<YearTrend> {
    let mut years: BTreeMap<&Year, YearSets<'_>> = BTreeMap::new();
    for student in &data.students {
        let sets = years.entry(&student.annee).or_default();
        sets.students.insert(student.cin);
        if let Some(filiere) = student.filiere.as_deref() {
            sets.filieres.insert(filiere);
        }
    }
    for company in &data.companies {
        years
            .entry(&company.annee)
            .or_default()
            .companies
            .insert(company.nom_normalise.as_str());
    }
    for supervisor in &data.supervisors {
        years
            .entry(&supervisor.annee)
            .or_default()
            .supervisors
            .insert((supervisor.prenom.as_str(), supervisor.categorie));
    }

    years
        .into_iter()
        .map(|(annee, sets)| YearTrend {
            annee: annee.clone(),
            students: sets.students.len(),
            companies: sets.companies.len(),
            supervisors: sets.supervisors.len(),
            filieres: sets.filieres.len(),
        })
        .collect()
}
