use std::collections::BTreeMap;

use intern_model::Year;
use serde::Serialize;

use crate::dataset::Dataset;

/// Grade distribution of one program track in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeStats {
    pub filiere: String,
    pub annee: Year,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Element at index `n / 2` of the sorted grades (upper-middle for even `n`).
    pub median: f64,
}

/// Statistics per `(filiere, annee)` over students with a known grade.
///
/// Students without a track or a grade are left out; groups are ordered by
/// track then year.
pub fn grade_stats(data: &Dataset) -> Vec<GradeStats> {
    let mut groups: BTreeMap<(String, Year), Vec<f64>> = BTreeMap::new();
    for student in &data.students {
        let (Some(filiere), Some(score)) = (student.filiere.as_ref(), student.score) else {
            continue;
        };
        groups
            .entry((filiere.clone(), student.annee.clone()))
            .or_default()
            .push(score);
    }

    groups
        .into_iter()
        .map(|((filiere, annee), grades)| describe(filiere, annee, grades))
        .collect()
}

fn describe(filiere: String, annee: Year, mut grades: Vec<f64>) -> GradeStats {
    grades.sort_by(f64::total_cmp);
    let count = grades.len();
    let mean = grades.iter().sum::<f64>() / count as f64;
    let variance = grades.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / count as f64;
    GradeStats {
        filiere,
        annee,
        count,
        mean,
        min: grades[0],
        max: grades[count - 1],
        std_dev: variance.sqrt(),
        median: grades[count / 2],
    }
}
