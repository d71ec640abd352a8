use std::collections::HashMap;

use intern_ingest::company_key;
use serde::Serialize;

use crate::dataset::Dataset;

const INTERN_WEIGHT: f64 = 0.6;
const GRADE_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRanking {
    pub nom: String,
    pub nom_normalise: String,
    pub intern_count: usize,
    /// Mean of the known grades; `0` when no intern has one.
    pub average_grade: f64,
    pub score: f64,
}

#[derive(Default)]
struct Accumulator {
    display: Option<String>,
    interns: usize,
    grades: Vec<f64>,
}

/// Companies ranked by `0.6 × interns + 0.4 × average grade`, best first.
///
/// Students are attributed by [`company_key`] of their company name; companies no student
/// references do not appear.
pub fn top_companies(data: &Dataset, limit: usize) -> Vec<CompanyRanking> {
    let display_names: HashMap<&str, &str> = data
        .companies
        .iter()
        .map(|company| (company.nom_normalise.as_str(), company.nom.as_str()))
        .collect();

    let mut by_company: HashMap<String, Accumulator> = HashMap::new();
    for student in &data.students {
        let Some(name) = student.company_id.as_deref() else {
            continue;
        };
        let key = company_key(name);
        if key.is_empty() {
            continue;
        }
        let entry = by_company.entry(key).or_default();
        entry.display.get_or_insert_with(|| name.to_string());
        entry.interns += 1;
        entry.grades.extend(student.score);
    }

    let mut rankings: Vec<CompanyRanking> = by_company
        .into_iter()
        .map(|(key, acc)| {
            let average_grade = if acc.grades.is_empty() {
                0.0
            } else {
                acc.grades.iter().sum::<f64>() / acc.grades.len() as f64
            };
            let nom = display_names
                .get(key.as_str())
                .map(|nom| (*nom).to_string())
                .or(acc.display)
                .unwrap_or_else(|| key.clone());
            CompanyRanking {
                nom,
                score: INTERN_WEIGHT * acc.interns as f64 + GRADE_WEIGHT * average_grade,
                nom_normalise: key,
                intern_count: acc.interns,
                average_grade,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.nom_normalise.cmp(&b.nom_normalise))
    });
    rankings.truncate(limit);
    rankings
}
