use intern_ingest::{Cell, Sheet, Workbook};
use intern_map::parse_workbook;
use intern_reconcile::{ReconcileOptions, import_parsed, link_students};
use intern_store::{Database, EntityStore};

fn row(values: &[&str]) -> Vec<Cell> {
    values
        .iter()
        .map(|value| if value.is_empty() { Cell::Empty } else { Cell::text(*value) })
        .collect()
}

fn workbook() -> Workbook {
    Workbook::new(vec![Sheet::new(
        "Promo 2023",
        vec![
            row(&[
                "Prénom",
                "CIN",
                "Code projet",
                "Entreprise",
                "Encadrant ISIMM",
                "Encadrant professionnel",
            ]),
            row(&["Sami", "11111111", "P1", "Société Vermeg", "Amira", "Karim"]),
            row(&["Leila", "22222222", "P2", "Vermeg", "Amira", ""]),
            row(&["Omar", "33333333", "P3", "", "Nour", "Inconnu"]),
        ],
    )])
}

#[tokio::test]
async fn import_persists_all_entities_and_links_students() {
    let db = Database::in_memory();
    let report = import_parsed(&db, parse_workbook(&workbook()), ReconcileOptions::default())
        .await
        .unwrap();

    assert!(!report.has_failures());
    assert_eq!(report.companies.inserted, 1);
    assert_eq!(report.supervisors.inserted, 4);
    assert_eq!(report.students.inserted, 3);

    // Sami: company, Amira, Karim. Leila: company, Amira. Omar: Nour, Inconnu.
    assert_eq!(report.links.links.len(), 3);
    assert_eq!(report.links.resolved, 7);
    assert_eq!(report.links.unresolved, 0);

    let sami = report.links.links.iter().find(|l| l.cin == 11_111_111).unwrap();
    let leila = report.links.links.iter().find(|l| l.cin == 22_222_222).unwrap();
    assert!(sami.company_id.is_some());
    assert_eq!(sami.company_id, leila.company_id);
    assert_eq!(sami.encadreur_ac_id, leila.encadreur_ac_id);
    assert_eq!(leila.encadreur_pro_id, None);
}

#[tokio::test]
async fn reimport_updates_every_record() {
    let db = Database::in_memory();
    import_parsed(&db, parse_workbook(&workbook()), ReconcileOptions::default())
        .await
        .unwrap();
    let again = import_parsed(&db, parse_workbook(&workbook()), ReconcileOptions::default())
        .await
        .unwrap();

    assert_eq!(again.students.inserted, 0);
    assert_eq!(again.students.updated, 3);
    assert_eq!(again.companies.updated, 1);
    assert_eq!(db.students().count_all().await.unwrap(), 3);

    let companies = db.companies().find_all().await.unwrap();
    assert_eq!(companies[0].record.nombre_stagiaires, 2);
}

#[tokio::test]
async fn missing_references_stay_unresolved() {
    let db = Database::in_memory();
    let mut parsed = parse_workbook(&workbook());
    parsed.companies.clear();
    parsed.supervisors.clear();
    import_parsed(&db, parsed, ReconcileOptions::default())
        .await
        .unwrap();

    let links = link_students(&db).await.unwrap();
    assert_eq!(links.resolved, 0);
    assert_eq!(links.unresolved, 7);
    assert!(links.links.iter().all(|l| l.company_id.is_none()));
}

#[tokio::test]
async fn companies_without_a_latin_key_stay_distinct() {
    let sheet = Sheet::new(
        "Promo 2023",
        vec![
            row(&["Prénom", "CIN", "Code projet", "Entreprise"]),
            row(&["Sami", "11111111", "P1", "Société"]),
            row(&["Leila", "22222222", "P2", "شركة"]),
        ],
    );
    let db = Database::in_memory();
    let parsed = parse_workbook(&Workbook::new(vec![sheet]));
    let report = import_parsed(&db, parsed, ReconcileOptions::default())
        .await
        .unwrap();

    assert_eq!(report.companies.inserted, 2);
    assert_eq!(report.companies.updated, 0);
    assert_eq!(db.companies().count_all().await.unwrap(), 2);

    let sami = report.links.links.iter().find(|l| l.cin == 11_111_111).unwrap();
    let leila = report.links.links.iter().find(|l| l.cin == 22_222_222).unwrap();
    assert!(sami.company_id.is_some());
    assert!(leila.company_id.is_some());
    assert_ne!(sami.company_id, leila.company_id);
}
