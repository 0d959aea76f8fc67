use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::books::is_known_book;
use crate::model::VerseRow;
use crate::util::{file_name_string, list_files_with_extension};

pub fn read_verse_rows(path: &Path) -> Result<Vec<VerseRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    reader
        .deserialize::<VerseRow>()
        .enumerate()
        .map(|(index, row)| {
            row.with_context(|| format!("failed to parse row {} of {}", index + 1, path.display()))
        })
        .collect()
}

/// Concatenates per-book CSVs of one language, ordered by
/// `(book, chapter, verse)`. Repeated keys keep their first occurrence.
pub fn load_language_corpus(paths: &[PathBuf]) -> Result<Vec<VerseRow>> {
    let mut rows = Vec::<VerseRow>::new();
    for path in paths {
        rows.extend(read_verse_rows(path)?);
    }

    rows.sort_by(|left, right| left.key().cmp(&right.key()));

    let before = rows.len();
    rows.dedup_by(|current, previous| current.key() == previous.key());
    let duplicates = before - rows.len();
    if duplicates > 0 {
        warn!(duplicates, "dropped repeated corpus keys");
    }

    Ok(rows)
}

/// Per-book CSVs of one language. Without an explicit book list only
/// `<language>_<book>.csv` files naming a known book are taken, so a
/// language label that prefixes another (`English` vs `English_UK`) does not
/// pull in the other corpus.
pub fn discover_language_csvs(
    csv_dir: &Path,
    language: &str,
    books: &[String],
) -> Result<Vec<PathBuf>> {
    if !books.is_empty() {
        let mut paths = Vec::with_capacity(books.len());
        for book in books {
            let path = csv_dir.join(format!("{language}_{book}.csv"));
            if path.is_file() {
                paths.push(path);
            } else {
                warn!(path = %path.display(), "skipping missing corpus CSV");
            }
        }
        return Ok(paths);
    }

    let prefix = format!("{language}_");
    let mut paths = Vec::new();
    for path in list_files_with_extension(csv_dir, "csv")? {
        let file_name = file_name_string(&path)?;
        let Some(book) = file_name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(".csv"))
        else {
            continue;
        };

        if is_known_book(book) {
            paths.push(path);
        } else if !file_name.ends_with("_parallel.csv") {
            warn!(
                path = %path.display(),
                language = %language,
                "skipping CSV whose book part is not a known book; pass --book to include it"
            );
        }
    }
    Ok(paths)
}
