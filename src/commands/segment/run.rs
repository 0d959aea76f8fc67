use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use super::{chapter_from_file_name, parse_chapter_rows};
use crate::cli::{SegmentArgs, resolve_csv_dir};
use crate::model::{BookDescriptor, VERSE_ROW_HEADER, VerseRow};
use crate::util::{
    ensure_directory, file_name_string, list_files_with_extension, output_entry, read_text_file,
    write_run_manifest,
};

#[derive(Debug, Clone)]
pub struct SegmentOutcome {
    pub csv_path: PathBuf,
    pub row_count: usize,
    pub warnings: Vec<String>,
}

pub fn run(args: SegmentArgs) -> Result<()> {
    let started = Utc::now();
    let descriptor = BookDescriptor {
        language: args.language.clone(),
        book: args.book.clone(),
        base_path: args.folder.clone(),
    };
    let csv_dir = resolve_csv_dir(&args.bible_root, args.csv_dir.as_ref());

    info!(
        folder = %descriptor.base_path.display(),
        language = %descriptor.language,
        book = %descriptor.book,
        "starting verse segmentation"
    );

    let outcome = segment_by_verse(&descriptor, &csv_dir)?;
    let manifest_path = write_run_manifest(
        &args.bible_root,
        "segment",
        started,
        vec![output_entry(&outcome.csv_path, outcome.row_count)?],
        outcome.warnings,
    )?;

    info!(
        path = %outcome.csv_path.display(),
        rows = outcome.row_count,
        manifest = %manifest_path.display(),
        "segmentation completed"
    );
    Ok(())
}

pub fn segment_by_verse(descriptor: &BookDescriptor, csv_dir: &Path) -> Result<SegmentOutcome> {
    if !descriptor.base_path.is_dir() {
        bail!(
            "chapter folder does not exist: {}",
            descriptor.base_path.display()
        );
    }

    let mut rows = Vec::<VerseRow>::new();
    let mut warnings = Vec::<String>::new();

    for path in list_files_with_extension(&descriptor.base_path, "txt")? {
        let file_name = file_name_string(&path)?;
        let Some(chapter) = chapter_from_file_name(&file_name, &descriptor.book) else {
            warn!(file = %file_name, book = %descriptor.book, "skipping file outside book naming convention");
            warnings.push(format!("skipped {file_name}: not a {} chapter file", descriptor.book));
            continue;
        };

        let parsed = parse_chapter_rows(&descriptor.book, chapter, &read_text_file(&path)?);
        for line in &parsed.rejected_lines {
            warn!(file = %file_name, line = %line, "skipping line without verse marker");
            warnings.push(format!("{file_name}: rejected line without verse marker: {line}"));
        }
        rows.extend(parsed.rows);
    }

    rows.sort_by_key(|row| (row.chapter, row.verse));

    ensure_directory(csv_dir)?;
    let csv_path = csv_dir.join(descriptor.csv_file_name());
    write_verse_rows(&csv_path, &rows)?;

    Ok(SegmentOutcome {
        csv_path,
        row_count: rows.len(),
        warnings,
    })
}

pub fn write_verse_rows(path: &Path, rows: &[VerseRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer
        .write_record(VERSE_ROW_HEADER)
        .with_context(|| format!("failed to write header to {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    Ok(())
}
