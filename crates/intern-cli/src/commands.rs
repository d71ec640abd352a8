use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use intern_analytics::{
    CompanyRanking, Dataset, GradeStats, SupervisorWorkload, YearTrend, grade_stats,
    supervisor_workload, top_companies, yearly_trends,
};
use intern_ingest::{Workbook, read_workbook};
use intern_map::{ParseOptions, ParseResult, parse_workbook_with};
use intern_model::Year;
use intern_reconcile::{ImportReport, ReconcileMode, import_parsed};
use intern_store::Database;
use tracing::{Level, info, info_span, trace};

use crate::config::ImportConfig;
use crate::logging::redact_value;

/// Everything `stats` prints.
#[derive(Debug, Clone, Default)]
pub struct StatsResult {
    pub year: Option<Year>,
    pub top_companies: Vec<CompanyRanking>,
    pub grades: Vec<GradeStats>,
    pub workload: Vec<SupervisorWorkload>,
    pub trends: Vec<YearTrend>,
}

pub fn load_workbook(path: &Path) -> Result<Workbook> {
    read_workbook(path).with_context(|| format!("read workbook {}", path.display()))
}

pub fn parse_file(path: &Path, options: ParseOptions) -> Result<ParseResult> {
    let workbook = load_workbook(path)?;
    let parsed = parse_workbook_with(&workbook, options);
    if tracing::enabled!(Level::TRACE) {
        for student in &parsed.students {
            let cin = student.cin.to_string();
            trace!(
                prenom = redact_value(&student.prenom),
                cin = redact_value(&cin),
                annee = %student.annee,
                "parsed student"
            );
        }
    }
    Ok(parsed)
}

pub fn run_parse(
    workbook: &Path,
    json_out: Option<&Path>,
    config: &ImportConfig,
) -> Result<ParseResult> {
    let span = info_span!("parse", workbook = %workbook.display());
    let _guard = span.enter();
    let parsed = parse_file(workbook, config.parse_options())?;
    if let Some(out) = json_out {
        write_json(out, &parsed)?;
        info!(path = %out.display(), "wrote parse result");
    }
    Ok(parsed)
}

fn write_json(path: &Path, parsed: &ParseResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, parsed)
        .with_context(|| format!("serialize parse result to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn open_store(config: &ImportConfig) -> Result<Database> {
    Database::open(&config.store_dir)
        .with_context(|| format!("open store {}", config.store_dir.display()))
}

pub async fn run_import(
    workbook: &Path,
    mode: ReconcileMode,
    config: &ImportConfig,
) -> Result<ImportReport> {
    let db = open_store(config)?;
    import_workbook(&db, workbook, mode, config).await
}

/// Parses `workbook` off the async runtime, then reconciles it into `db`.
pub async fn import_workbook(
    db: &Database,
    workbook: &Path,
    mode: ReconcileMode,
    config: &ImportConfig,
) -> Result<ImportReport> {
    let start = Instant::now();
    let path: PathBuf = workbook.to_path_buf();
    let options = config.parse_options();
    let parsed = tokio::task::spawn_blocking(move || parse_file(&path, options))
        .await
        .context("parse task")??;
    info!(
        students = parsed.summary.total_students,
        companies = parsed.summary.total_companies,
        supervisors = parsed.summary.total_supervisors,
        "parsed workbook"
    );
    let report = import_parsed(db, parsed, config.reconcile_options(mode))
        .await
        .context("reconcile workbook")?;
    info!(
        mode = %mode,
        failed = report.has_failures(),
        elapsed_ms = start.elapsed().as_millis(),
        "import finished"
    );
    Ok(report)
}

pub async fn run_stats(year: Option<&str>, limit: usize, config: &ImportConfig) -> Result<StatsResult> {
    let db = open_store(config)?;
    collect_stats(&db, year, limit).await
}

pub async fn collect_stats(db: &Database, year: Option<&str>, limit: usize) -> Result<StatsResult> {
    let year = year
        .map(|value| Year::new(value).with_context(|| format!("invalid year '{value}'")))
        .transpose()?;
    let data = Dataset::load(db, year.as_ref())
        .await
        .context("load records")?;
    Ok(StatsResult {
        top_companies: top_companies(&data, limit),
        grades: grade_stats(&data),
        workload: supervisor_workload(&data),
        trends: yearly_trends(&data),
        year,
    })
}
