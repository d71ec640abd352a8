use intern_ingest::{Cell, Sheet, clean_identifier, clean_score, clean_string, parse_date};
use intern_model::{Collaborateur, Collaboration, LocalisationType, Student, Year};
use tracing::{debug, trace};

use crate::aliases::StudentField;
use crate::header::ColumnIndex;

/// Parses every data row of `sheet` into students tagged with `annee`.
///
/// Rows lacking a name, project code or CIN are dropped.
pub fn parse_students(sheet: &Sheet, annee: &Year) -> Vec<Student> {
    let Some(header) = sheet.header() else {
        return Vec::new();
    };
    let columns = ColumnIndex::<StudentField>::resolve(header);

    let mut students = Vec::new();
    let mut dropped = 0usize;
    for (offset, row) in sheet.data_rows().enumerate() {
        let student = build_student(&columns, row, annee);
        if student.is_valid() {
            students.push(student);
        } else {
            dropped += 1;
            trace!(row = offset + 1, "dropping student row without identity fields");
        }
    }
    if dropped > 0 {
        debug!(sheet = %sheet.name, dropped, kept = students.len(), "invalid student rows dropped");
    }
    students
}

fn build_student(columns: &ColumnIndex<StudentField>, row: &[Cell], annee: &Year) -> Student {
    let prenom = clean_string(columns.cell(row, StudentField::Prenom));
    let cin = clean_identifier(columns.cell(row, StudentField::Cin));
    let code_projet = clean_string(columns.cell(row, StudentField::CodeProjet));

    let mut student = Student::new(prenom, cin, code_projet, annee.clone());
    student.filiere = columns.text(row, StudentField::Filiere);
    student.score = clean_score(columns.cell(row, StudentField::Score));
    student.titre_projet = columns.text(row, StudentField::TitreProjet);
    student.company_id = columns.text(row, StudentField::Company);
    student.localisation_type = localisation(columns, row);
    student.encadreur_ac_id = columns.text(row, StudentField::EncadreurAc);
    student.encadreur_pro_id = columns.text(row, StudentField::EncadreurPro);
    student.duree_stage = columns.text(row, StudentField::DureeStage);
    student.debut_stage = parse_date(columns.cell(row, StudentField::DebutStage)).valid();
    student.fin_stage = parse_date(columns.cell(row, StudentField::FinStage)).valid();
    student.collaboration = collaboration(columns, row);
    if student.collaboration == Collaboration::Binome {
        student.collaborateur = collaborateur(columns, row);
    }
    student.fiche_information = columns.text(row, StudentField::FicheInformation);
    student.cahier_charge = columns.text(row, StudentField::CahierCharge);
    student
}

/// `None` only when the sheet has no localisation column.
fn localisation(columns: &ColumnIndex<StudentField>, row: &[Cell]) -> Option<LocalisationType> {
    if !columns.has(StudentField::Localisation) {
        return None;
    }
    let value = clean_string(columns.cell(row, StudentField::Localisation)).to_lowercase();
    if value.contains("interne") {
        Some(LocalisationType::Interne)
    } else {
        Some(LocalisationType::Externe)
    }
}

fn collaboration(columns: &ColumnIndex<StudentField>, row: &[Cell]) -> Collaboration {
    let value = clean_string(columns.cell(row, StudentField::Collaboration)).to_lowercase();
    if value.contains("binôme") || value.contains("binome") {
        Collaboration::Binome
    } else {
        Collaboration::Monome
    }
}

fn collaborateur(columns: &ColumnIndex<StudentField>, row: &[Cell]) -> Option<Collaborateur> {
    let cin = clean_identifier(columns.cell(row, StudentField::CollaborateurCin));
    let teammate = Collaborateur {
        prenom: columns.text(row, StudentField::CollaborateurPrenom),
        cin: (cin != 0).then_some(cin),
        filiere: columns.text(row, StudentField::CollaborateurFiliere),
    };
    (!teammate.is_empty()).then_some(teammate)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sheet(rows: Vec<Vec<Cell>>) -> Sheet {
        Sheet::new("Promo 2023", rows)
    }

    fn header(labels: &[&str]) -> Vec<Cell> {
        labels.iter().map(|label| Cell::text(*label)).collect()
    }

    fn year() -> Year {
        Year::from_calendar(2023)
    }

    #[test]
    fn full_row_is_mapped() {
        let rows = vec![
            header(&[
                "Nom et Prénom",
                "CIN",
                "Code Projet",
                "Filière",
                "Note",
                "Sujet",
                "Entreprise",
                "Localisation",
                "Encadrant ISIMM",
                "Encadrant professionnel",
                "Durée",
                "Date début",
                "Date fin",
                "Binôme/Monôme",
                "Nom du binôme",
                "CIN binôme",
            ]),
            vec![
                Cell::text("Sami Ben Ali"),
                Cell::Number(11_223_344.0),
                Cell::text("PFE-07"),
                Cell::text("LSI"),
                Cell::text("15.5"),
                Cell::text("Plateforme de suivi"),
                Cell::text("Vermeg"),
                Cell::text("Stage interne"),
                Cell::text("Dr. Amira"),
                Cell::text("Karim"),
                Cell::text("4 mois"),
                Cell::Number(45_000.0),
                Cell::text("2023-06-30"),
                Cell::text("Binôme"),
                Cell::text("Leila"),
                Cell::Number(55_667_788.0),
            ],
        ];
        let students = parse_students(&sheet(rows), &year());
        assert_eq!(students.len(), 1);
        let student = &students[0];
        assert_eq!(student.prenom, "Sami Ben Ali");
        assert_eq!(student.cin, 11_223_344);
        assert_eq!(student.code_projet, "PFE-07");
        assert_eq!(student.score, Some(15.5));
        assert_eq!(student.company_id.as_deref(), Some("Vermeg"));
        assert_eq!(student.localisation_type, Some(LocalisationType::Interne));
        assert_eq!(student.encadreur_ac_id.as_deref(), Some("Dr. Amira"));
        assert_eq!(student.encadreur_pro_id.as_deref(), Some("Karim"));
        assert_eq!(student.debut_stage, NaiveDate::from_ymd_opt(2023, 3, 15));
        assert_eq!(student.fin_stage, NaiveDate::from_ymd_opt(2023, 6, 30));
        assert_eq!(student.collaboration, Collaboration::Binome);
        let teammate = student.collaborateur.as_ref().unwrap();
        assert_eq!(teammate.prenom.as_deref(), Some("Leila"));
        assert_eq!(teammate.cin, Some(55_667_788));
        assert_eq!(student.annee, year());
    }

    #[test]
    fn row_without_cin_is_dropped() {
        let rows = vec![
            header(&["Prénom", "CIN", "Code projet", "Filière"]),
            vec![Cell::text("Sami"), Cell::Empty, Cell::text("P1"), Cell::text("LSI")],
            vec![Cell::text("Leila"), Cell::text("n/a"), Cell::text("P2"), Cell::text("LSI")],
            vec![Cell::text("Omar"), Cell::Number(1234.0), Cell::text("P3")],
        ];
        let students = parse_students(&sheet(rows), &year());
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].prenom, "Omar");
        assert_eq!(students[0].filiere, None);
    }

    #[test]
    fn row_with_fractional_or_oversized_cin_is_dropped() {
        let rows = vec![
            header(&["Prénom", "CIN", "Code projet", "Binôme/Monôme", "CIN binôme"]),
            vec![Cell::text("Sami"), Cell::Number(1234.5), Cell::text("P1")],
            vec![Cell::text("Leila"), Cell::Number(1e20), Cell::text("P2")],
            vec![Cell::text("Nour"), Cell::Number(-7.0), Cell::text("P3")],
            vec![
                Cell::text("Omar"),
                Cell::Number(1234.0),
                Cell::text("P4"),
                Cell::text("Binôme"),
                Cell::Number(5678.25),
            ],
        ];
        let students = parse_students(&sheet(rows), &year());
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].prenom, "Omar");
        assert_eq!(students[0].cin, 1234);
        assert_eq!(students[0].collaboration, Collaboration::Binome);
        assert!(students[0].collaborateur.is_none());
    }

    #[test]
    fn collaboration_defaults_to_monome() {
        let rows = vec![
            header(&["Prénom", "CIN", "Code projet", "Collaboration"]),
            vec![Cell::text("Sami"), Cell::Number(1.0), Cell::text("P1"), Cell::Empty],
            vec![Cell::text("Omar"), Cell::Number(2.0), Cell::text("P2"), Cell::text("seul")],
        ];
        let students = parse_students(&sheet(rows), &year());
        assert!(students.iter().all(|s| s.collaboration == Collaboration::Monome));
        assert!(students.iter().all(|s| s.collaborateur.is_none()));

        let rows = vec![
            header(&["Prénom", "CIN", "Code projet"]),
            vec![Cell::text("Sami"), Cell::Number(1.0), Cell::text("P1")],
        ];
        let students = parse_students(&sheet(rows), &year());
        assert_eq!(students[0].collaboration, Collaboration::Monome);
    }

    #[test]
    fn localisation_depends_on_column_presence() {
        let rows = vec![
            header(&["Prénom", "CIN", "Code projet", "Lieu"]),
            vec![Cell::text("Sami"), Cell::Number(1.0), Cell::text("P1"), Cell::Empty],
        ];
        let students = parse_students(&sheet(rows), &year());
        assert_eq!(students[0].localisation_type, Some(LocalisationType::Externe));

        let rows = vec![
            header(&["Prénom", "CIN", "Code projet"]),
            vec![Cell::text("Sami"), Cell::Number(1.0), Cell::text("P1")],
        ];
        let students = parse_students(&sheet(rows), &year());
        assert_eq!(students[0].localisation_type, None);
    }

    #[test]
    fn unreadable_score_is_unknown() {
        let rows = vec![
            header(&["Prénom", "CIN", "Code projet", "Note"]),
            vec![Cell::text("Sami"), Cell::Number(1.0), Cell::text("P1"), Cell::text("absent")],
            vec![Cell::text("Omar"), Cell::Number(2.0), Cell::text("P2"), Cell::Number(0.0)],
        ];
        let students = parse_students(&sheet(rows), &year());
        assert_eq!(students[0].score, None);
        assert_eq!(students[1].score, Some(0.0));
    }
}
