use std::collections::HashSet;

use intern_ingest::{Sheet, clean_string, company_key};
use intern_model::{Company, Year};
use tracing::trace;

use crate::aliases::CompanyField;
use crate::header::ColumnIndex;

/// Parses the companies named in `sheet`, one record per distinct name.
///
/// Duplicates within the sheet are detected on the company key (see
/// [`company_key`]) and the first occurrence is kept as is. The same key is
/// stored in `nom_normalise`.
pub fn parse_companies(sheet: &Sheet, annee: &Year) -> Vec<Company> {
    let Some(header) = sheet.header() else {
        return Vec::new();
    };
    let columns = ColumnIndex::<CompanyField>::resolve(header);
    if !columns.has(CompanyField::Nom) {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    let mut companies = Vec::new();
    for row in sheet.data_rows() {
        let nom = clean_string(columns.cell(row, CompanyField::Nom));
        if nom.is_empty() {
            continue;
        }
        let nom_normalise = company_key(&nom);
        if !seen.insert(nom_normalise.clone()) {
            trace!(sheet = %sheet.name, "duplicate company row skipped");
            continue;
        }

        let mut company = Company::new(nom, nom_normalise, annee.clone());
        company.secteur = columns.text(row, CompanyField::Secteur);
        company.adresse = columns.text(row, CompanyField::Adresse);
        company.contact = columns.text(row, CompanyField::Contact);
        company.email = columns.text(row, CompanyField::Email);
        company.telephone = columns.text(row, CompanyField::Telephone);
        company.encadrant_pro = columns
            .text(row, CompanyField::EncadrantPro)
            .into_iter()
            .collect();
        companies.push(company);
    }
    companies
}

#[cfg(test)]
mod tests {
    use intern_ingest::Cell;

    use super::*;

    fn row(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|value| if value.is_empty() { Cell::Empty } else { Cell::text(*value) })
            .collect()
    }

    #[test]
    fn duplicate_names_collapse_to_first_occurrence() {
        let sheet = Sheet::new(
            "2023",
            vec![
                row(&["Entreprise", "Secteur", "Encadrant professionnel"]),
                row(&["Vermeg", "Finance", "Karim"]),
                row(&["VERMEG", "Banque", "Nadia"]),
                row(&["Société Vermeg", "", ""]),
                row(&["", "Industrie", ""]),
                row(&["Sofrecom", "", ""]),
            ],
        );
        let companies = parse_companies(&sheet, &Year::from_calendar(2023));
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].nom, "Vermeg");
        assert_eq!(companies[0].secteur.as_deref(), Some("Finance"));
        assert_eq!(companies[0].encadrant_pro, vec!["Karim".to_string()]);
        assert_eq!(companies[0].nombre_stagiaires, 1);
        assert_eq!(companies[1].nom_normalise, "sofrecom");
        assert!(companies[1].encadrant_pro.is_empty());
    }

    #[test]
    fn names_without_a_latin_key_keep_their_own_key() {
        let sheet = Sheet::new(
            "2023",
            vec![
                row(&["Entreprise"]),
                row(&["Société"]),
                row(&["شركة"]),
                row(&["SOCIÉTÉ"]),
            ],
        );
        let companies = parse_companies(&sheet, &Year::from_calendar(2023));
        let keys: Vec<_> = companies.iter().map(|c| c.nom_normalise.as_str()).collect();
        assert_eq!(keys, vec!["societe", "شركة"]);
        assert_eq!(companies[0].nom, "Société");
    }

    #[test]
    fn sheet_without_company_column_yields_nothing() {
        let sheet = Sheet::new(
            "2023",
            vec![row(&["Prénom", "CIN"]), row(&["Sami", "1"])],
        );
        assert!(parse_companies(&sheet, &Year::from_calendar(2023)).is_empty());
    }
}
