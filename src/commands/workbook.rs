use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params_from_iter};
use tracing::{info, warn};

use crate::cli::{WorkbookArgs, resolve_csv_dir};
use crate::util::{ensure_directory, list_files_with_extension, output_entry, write_run_manifest};

pub const SHEET_NAME_LIMIT: usize = 31;

pub trait SheetSink {
    fn write_sheet(&mut self, name: &str, header: &[String], rows: &[Vec<String>]) -> Result<()>;
}

pub struct SqliteWorkbook {
    connection: Connection,
}

impl SqliteWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_directory(parent)?;
        }
        let connection =
            Connection::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Ok(Self { connection })
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl SheetSink for SqliteWorkbook {
    fn write_sheet(&mut self, name: &str, header: &[String], rows: &[Vec<String>]) -> Result<()> {
        let table = quote_identifier(name);
        let columns = header
            .iter()
            .map(|column| format!("{} TEXT", quote_identifier(column)))
            .collect::<Vec<String>>()
            .join(", ");
        let placeholders = vec!["?"; header.len()].join(", ");

        let tx = self
            .connection
            .transaction()
            .context("failed to start workbook transaction")?;
        tx.execute(&format!("DROP TABLE IF EXISTS {table}"), [])
            .with_context(|| format!("failed to drop sheet {name}"))?;
        tx.execute(&format!("CREATE TABLE {table} ({columns})"), [])
            .with_context(|| format!("failed to create sheet {name}"))?;
        {
            let mut statement = tx
                .prepare(&format!("INSERT INTO {table} VALUES ({placeholders})"))
                .with_context(|| format!("failed to prepare insert for sheet {name}"))?;
            for row in rows {
                statement
                    .execute(params_from_iter(row.iter()))
                    .with_context(|| format!("failed to insert row into sheet {name}"))?;
            }
        }
        tx.commit()
            .with_context(|| format!("failed to commit sheet {name}"))?;

        Ok(())
    }
}

fn truncate_chars(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}

/// Sheet name from the CSV file stem: characters spreadsheets reject become
/// `_`, the result is cut to 31 characters, and a case-insensitive clash
/// with an earlier sheet gets a numeric suffix.
pub fn sheet_name_for(path: &Path, used: &mut HashSet<String>) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());
    let sanitized = stem
        .chars()
        .map(|character| match character {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            other => other,
        })
        .collect::<String>();

    let mut candidate = truncate_chars(&sanitized, SHEET_NAME_LIMIT);
    let mut counter = 2usize;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!("_{counter}");
        candidate = format!(
            "{}{}",
            truncate_chars(&sanitized, SHEET_NAME_LIMIT - suffix.len()),
            suffix
        );
        counter += 1;
    }

    used.insert(candidate.to_lowercase());
    candidate
}

#[derive(Debug, Default)]
pub struct WorkbookSummary {
    pub sheets: Vec<(String, usize)>,
    pub missing: Vec<PathBuf>,
}

impl WorkbookSummary {
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|(_, rows)| rows).sum()
    }
}

fn read_csv_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let header = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .map(ToOwned::to_owned)
        .collect::<Vec<String>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("failed to read row of {}", path.display()))?;
        rows.push(record.iter().map(ToOwned::to_owned).collect::<Vec<String>>());
    }

    Ok((header, rows))
}

pub fn export_workbook<S: SheetSink>(csv_files: &[PathBuf], sink: &mut S) -> Result<WorkbookSummary> {
    let mut used = HashSet::new();
    let mut summary = WorkbookSummary::default();

    for path in csv_files {
        if !path.is_file() {
            warn!(path = %path.display(), "skipping missing CSV for workbook sheet");
            summary.missing.push(path.clone());
            continue;
        }

        let (header, rows) = read_csv_table(path)?;
        let sheet = sheet_name_for(path, &mut used);
        sink.write_sheet(&sheet, &header, &rows)?;

        info!(sheet = %sheet, rows = rows.len(), "workbook sheet written");
        summary.sheets.push((sheet, rows.len()));
    }

    Ok(summary)
}

pub fn run(args: WorkbookArgs) -> Result<()> {
    let started = Utc::now();
    let csv_dir = resolve_csv_dir(&args.bible_root, args.csv_dir.as_ref());
    let csv_files = if args.csv_files.is_empty() {
        list_files_with_extension(&csv_dir, "csv")?
    } else {
        args.csv_files.clone()
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.bible_root.join("workbook.sqlite"));

    info!(
        output = %output.display(),
        csv_count = csv_files.len(),
        "starting workbook export"
    );

    let mut workbook = SqliteWorkbook::open(&output)?;
    let summary = export_workbook(&csv_files, &mut workbook)?;
    drop(workbook);

    let warnings = summary
        .missing
        .iter()
        .map(|path| format!("missing CSV skipped: {}", path.display()))
        .collect::<Vec<String>>();
    let manifest_path = write_run_manifest(
        &args.bible_root,
        "workbook",
        started,
        vec![output_entry(&output, summary.total_rows())?],
        warnings,
    )?;

    info!(
        sheets = summary.sheets.len(),
        missing = summary.missing.len(),
        manifest = %manifest_path.display(),
        "workbook export completed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::path::Path;

    use rusqlite::Connection;

    use super::{SqliteWorkbook, export_workbook, sheet_name_for};

    #[test]
    fn sheet_names_are_truncated_and_deduplicated() {
        let mut used = HashSet::new();
        let long = Path::new("CSV/English_Song of Songs_and_more_words.csv");

        let first = sheet_name_for(long, &mut used);
        assert_eq!(first, "English_Song of Songs_and_more_");
        assert_eq!(first.chars().count(), 31);

        let second = sheet_name_for(long, &mut used);
        assert_eq!(second, "English_Song of Songs_and_mor_2");
        assert_eq!(second.chars().count(), 31);

        assert_eq!(sheet_name_for(Path::new("a/b:c.csv"), &mut used), "b_c");
    }

    #[test]
    fn export_workbook_writes_sheets_and_skips_missing_csv() {
        let temp = tempfile::tempdir().expect("tempdir");
        let csv_path = temp.path().join("English_GEN.csv");
        fs::write(
            &csv_path,
            "book,chapter,verse_number,text\nGEN,1,1,In the beginning\nGEN,1,2,\"And, the earth\"\n",
        )
        .expect("write csv");
        let workbook_path = temp.path().join("workbook.sqlite");

        let mut workbook = SqliteWorkbook::open(&workbook_path).expect("open workbook");
        let summary = export_workbook(
            &[csv_path, temp.path().join("Tagalog_GEN.csv")],
            &mut workbook,
        )
        .expect("export");
        drop(workbook);

        assert_eq!(summary.sheets, vec![("English_GEN".to_string(), 2)]);
        assert_eq!(summary.missing.len(), 1);
        assert_eq!(summary.total_rows(), 2);

        let connection = Connection::open(&workbook_path).expect("reopen");
        let text: String = connection
            .query_row(
                "SELECT text FROM \"English_GEN\" WHERE verse_number = '2'",
                [],
                |row| row.get(0),
            )
            .expect("query");
        assert_eq!(text, "And, the earth");
    }
}
