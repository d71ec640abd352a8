use std::collections::HashMap;

use intern_ingest::{Cell, Sheet};
use intern_model::{Categorie, Supervisor, Year};

use crate::aliases::SupervisorField;
use crate::header::ColumnIndex;

struct CategoryColumns {
    categorie: Categorie,
    name: SupervisorField,
    email: SupervisorField,
    phone: SupervisorField,
}

const CATEGORIES: [CategoryColumns; 2] = [
    CategoryColumns {
        categorie: Categorie::Academique,
        name: SupervisorField::AcademicName,
        email: SupervisorField::AcademicEmail,
        phone: SupervisorField::AcademicPhone,
    },
    CategoryColumns {
        categorie: Categorie::Professionnel,
        name: SupervisorField::ProfessionalName,
        email: SupervisorField::ProfessionalEmail,
        phone: SupervisorField::ProfessionalPhone,
    },
];

/// Parses academic and professional supervisors from `sheet`.
///
/// A row can name one supervisor of each category. A name seen again in the
/// same category counts one more student for the first record.
pub fn parse_supervisors(sheet: &Sheet, annee: &Year) -> Vec<Supervisor> {
    let Some(header) = sheet.header() else {
        return Vec::new();
    };
    let columns = ColumnIndex::<SupervisorField>::resolve(header);

    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut supervisors: Vec<Supervisor> = Vec::new();
    for row in sheet.data_rows() {
        for category in &CATEGORIES {
            let Some(candidate) = build_supervisor(&columns, row, category, annee) else {
                continue;
            };
            let key = format!(
                "{}_{}_{}",
                candidate.prenom.to_lowercase(),
                candidate.categorie,
                annee
            );
            match positions.get(&key) {
                Some(&idx) => supervisors[idx].nombre_etudiants += 1,
                None => {
                    positions.insert(key, supervisors.len());
                    supervisors.push(candidate);
                }
            }
        }
    }
    supervisors
}

fn build_supervisor(
    columns: &ColumnIndex<SupervisorField>,
    row: &[Cell],
    category: &CategoryColumns,
    annee: &Year,
) -> Option<Supervisor> {
    let prenom = columns.text(row, category.name)?;
    let mut supervisor = Supervisor::new(prenom, category.categorie, annee.clone());
    supervisor.email = columns.text(row, category.email);
    supervisor.telephone = columns.text(row, category.phone);
    Some(supervisor)
}
