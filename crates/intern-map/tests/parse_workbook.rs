use intern_ingest::{Cell, Sheet, Workbook};
use intern_map::{ParseOptions, parse_workbook, parse_workbook_with};
use intern_model::{Categorie, Collaboration};

fn text_row(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|value| if value.is_empty() { Cell::Empty } else { Cell::text(*value) })
        .collect()
}

const HEADER: &[&str] = &[
    "Nom et prénom",
    "CIN",
    "Code projet",
    "Filière",
    "Note",
    "Entreprise",
    "Encadrant ISIMM",
    "Encadrant professionnel",
    "Binôme/Monôme",
];

fn promo_workbook() -> Workbook {
    Workbook::new(vec![
        Sheet::new(
            "Promo 2022-2023",
            vec![
                text_row(HEADER),
                text_row(&["Sami", "11111111", "P1", "LSI", "14", "Société Vermeg", "Amira", "Karim", "Monôme"]),
                text_row(&["Leila", "22222222", "P2", "LSI", "16", "VERMEG", "Amira", "", "Binôme"]),
                text_row(&["", "33333333", "P3", "LSI", "12", "Sofrecom", "", "", ""]),
            ],
        ),
        Sheet::new(
            "PFE 2023",
            vec![
                text_row(HEADER),
                text_row(&["Omar", "44444444", "P4", "GL", "absent", "Vermeg", "Amira", "", ""]),
            ],
        ),
        Sheet::new("Notes", Vec::new()),
    ])
}

#[test]
fn summary_snapshot() {
    let result = parse_workbook(&promo_workbook());
    insta::assert_json_snapshot!(result.summary, @r#"
    {
      "totalStudents": 3,
      "totalCompanies": 3,
      "totalSupervisors": 3,
      "yearsCovered": [
        "2023",
        "2022"
      ]
    }
    "#);
}

#[test]
fn every_record_carries_its_sheet_year() {
    let result = parse_workbook(&promo_workbook());
    let first_sheet: Vec<_> = result.students.iter().filter(|s| s.cin != 44_444_444).collect();
    assert!(first_sheet.iter().all(|s| s.annee.as_str() == "2022"));
    assert!(
        result
            .companies
            .iter()
            .filter(|c| c.nom != "Vermeg")
            .all(|c| c.annee.as_str() == "2022")
    );
}

#[test]
fn same_company_in_one_sheet_is_kept_once() {
    let result = parse_workbook(&promo_workbook());
    let vermeg_2022: Vec<_> = result
        .companies
        .iter()
        .filter(|c| c.nom_normalise == "vermeg" && c.annee.as_str() == "2022")
        .collect();
    assert_eq!(vermeg_2022.len(), 1);
    assert_eq!(vermeg_2022[0].nom, "Société Vermeg");
}

#[test]
fn rows_keep_their_references_as_names() {
    let result = parse_workbook(&promo_workbook());
    let leila = result.students.iter().find(|s| s.cin == 22_222_222).unwrap();
    assert_eq!(leila.company_id.as_deref(), Some("VERMEG"));
    assert_eq!(leila.encadreur_ac_id.as_deref(), Some("Amira"));
    assert_eq!(leila.encadreur_pro_id, None);
    assert_eq!(leila.collaboration, Collaboration::Binome);

    let omar = result.students.iter().find(|s| s.cin == 44_444_444).unwrap();
    assert_eq!(omar.score, None);
    assert_eq!(omar.collaboration, Collaboration::Monome);

    let amira_2022 = result
        .supervisors
        .iter()
        .find(|s| s.prenom == "Amira" && s.annee.as_str() == "2022")
        .unwrap();
    assert_eq!(amira_2022.categorie, Categorie::Academique);
    assert_eq!(amira_2022.nombre_etudiants, 2);
}

#[test]
fn sheets_without_year_use_the_fallback() {
    let workbook = Workbook::new(vec![Sheet::new(
        "Stagiaires",
        vec![text_row(&["Entreprise"]), text_row(&["Vermeg"])],
    )]);
    let result = parse_workbook_with(&workbook, ParseOptions { fallback_year: Some(2019) });
    assert_eq!(result.companies[0].annee.as_str(), "2019");
    assert_eq!(result.summary.years_covered.len(), 1);
}
