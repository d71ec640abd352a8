use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use intern_map::ParseResult;
use intern_model::Year;
use intern_reconcile::{ImportReport, ReconcileReport};

use crate::commands::StatsResult;

/// Record counts of one academic year in a parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCounts {
    pub annee: Year,
    pub students: usize,
    pub companies: usize,
    pub supervisors: usize,
}

/// Per-year counts, most recent year first.
pub fn year_counts(parsed: &ParseResult) -> Vec<YearCounts> {
    let mut years = BTreeMap::new();
    for student in &parsed.students {
        slot(&mut years, &student.annee).students += 1;
    }
    for company in &parsed.companies {
        slot(&mut years, &company.annee).companies += 1;
    }
    for supervisor in &parsed.supervisors {
        slot(&mut years, &supervisor.annee).supervisors += 1;
    }
    years.into_values().rev().collect()
}

fn slot<'a>(years: &'a mut BTreeMap<Year, YearCounts>, annee: &Year) -> &'a mut YearCounts {
    years.entry(annee.clone()).or_insert_with(|| YearCounts {
        annee: annee.clone(),
        students: 0,
        companies: 0,
        supervisors: 0,
    })
}

pub fn print_parse_summary(parsed: &ParseResult) {
    let mut table = new_table(&["Year", "Students", "Companies", "Supervisors"]);
    for column in 1..=3 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for counts in year_counts(parsed) {
        table.add_row(vec![
            Cell::new(&counts.annee),
            Cell::new(counts.students),
            Cell::new(counts.companies),
            Cell::new(counts.supervisors),
        ]);
    }
    let summary = &parsed.summary;
    table.add_row(vec![
        total_cell(),
        Cell::new(summary.total_students).add_attribute(Attribute::Bold),
        Cell::new(summary.total_companies).add_attribute(Attribute::Bold),
        Cell::new(summary.total_supervisors).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_import_report(report: &ImportReport) {
    let mut table = new_table(&[
        "Entity", "Mode", "Total", "Inserted", "Updated", "Failed", "Years", "Stored",
    ]);
    for column in 2..=7 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for entity in report.reports() {
        table.add_row(vec![
            Cell::new(entity.kind).add_attribute(Attribute::Bold),
            dim_cell(entity.operation),
            Cell::new(entity.total),
            Cell::new(entity.inserted),
            Cell::new(entity.updated),
            count_cell(entity.failed, Color::Red),
            Cell::new(entity.years_processed),
            Cell::new(entity.verification.count_documents),
        ]);
    }
    println!("{table}");
    println!(
        "Student references: {} resolved, {} unresolved",
        report.links.resolved, report.links.unresolved
    );
    for entity in report.reports() {
        print_error_details(entity);
    }
}

fn print_error_details(report: &ReconcileReport) {
    if report.errors.is_empty() {
        return;
    }
    eprintln!("Errors ({}):", report.kind);
    for detail in &report.errors {
        match detail.batch {
            Some(batch) => eprintln!(
                "- {} batch {}: {} ({} records)",
                detail.year, batch, detail.message, detail.count
            ),
            None => eprintln!(
                "- {}: {} ({} records)",
                detail.year, detail.message, detail.count
            ),
        }
    }
}

pub fn print_stats(stats: &StatsResult) {
    if let Some(year) = &stats.year {
        println!("Year: {year}");
    }

    println!("Top companies");
    let mut table = new_table(&["#", "Company", "Interns", "Avg grade", "Score"]);
    for column in [0, 2, 3, 4] {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for (rank, company) in stats.top_companies.iter().enumerate() {
        table.add_row(vec![
            dim_cell(rank + 1),
            Cell::new(&company.nom),
            Cell::new(company.intern_count),
            Cell::new(format!("{:.2}", company.average_grade)),
            Cell::new(format!("{:.2}", company.score)),
        ]);
    }
    println!("{table}");

    println!("Grades by program");
    let mut table = new_table(&[
        "Year", "Program", "Students", "Mean", "Min", "Max", "Std dev", "Median",
    ]);
    for column in 2..=7 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for grade in &stats.grades {
        table.add_row(vec![
            Cell::new(&grade.annee),
            Cell::new(&grade.filiere),
            Cell::new(grade.count),
            Cell::new(format!("{:.2}", grade.mean)),
            Cell::new(format!("{:.2}", grade.min)),
            Cell::new(format!("{:.2}", grade.max)),
            Cell::new(format!("{:.2}", grade.std_dev)),
            Cell::new(format!("{:.2}", grade.median)),
        ]);
    }
    println!("{table}");

    println!("Supervisor workload");
    let mut table = new_table(&["Year", "Supervisor", "Category", "Students", "Hours"]);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for load in &stats.workload {
        table.add_row(vec![
            Cell::new(&load.annee),
            Cell::new(&load.prenom),
            dim_cell(load.categorie),
            Cell::new(load.student_count),
            Cell::new(load.workload_hours),
        ]);
    }
    println!("{table}");

    println!("Yearly trends");
    let mut table = new_table(&["Year", "Students", "Companies", "Supervisors", "Programs"]);
    for column in 1..=4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for trend in &stats.trends {
        table.add_row(vec![
            Cell::new(&trend.annee),
            Cell::new(trend.students),
            Cell::new(trend.companies),
            Cell::new(trend.supervisors),
            Cell::new(trend.filieres),
        ]);
    }
    println!("{table}");
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(headers.iter().map(|label| header_cell(label)));
    apply_table_style(&mut table);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn total_cell() -> Cell {
    Cell::new("TOTAL")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
