use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, warn};

use super::{discover_language_csvs, load_language_corpus};
use crate::model::{ParallelRow, VerseRow};
use crate::util::ensure_directory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub a: String,
    pub b: String,
}

impl FromStr for LanguagePair {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let (a, b) = value
            .split_once(':')
            .ok_or_else(|| anyhow!("language pair must be written as A:B, got '{value}'"))?;
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() {
            bail!("language pair has an empty side: '{value}'");
        }
        Ok(Self {
            a: a.to_string(),
            b: b.to_string(),
        })
    }
}

impl LanguagePair {
    pub fn output_file_name(&self) -> String {
        format!("{}_{}_parallel.csv", self.a, self.b)
    }

    pub fn header(&self) -> [String; 5] {
        [
            "book".to_string(),
            "chapter".to_string(),
            "verse".to_string(),
            format!("text_{}", self.a),
            format!("text_{}", self.b),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct ParallelOutcome {
    pub path: PathBuf,
    pub row_count: usize,
}

/// Inner join on `(book, chapter, verse)`, in the key order of `a`. Keys
/// present on only one side are dropped.
pub fn align_corpora(a: &[VerseRow], b: &[VerseRow]) -> Vec<ParallelRow> {
    let lookup = b
        .iter()
        .map(|row| (row.key(), row.text.as_str()))
        .collect::<HashMap<(&str, u32, u32), &str>>();

    a.iter()
        .filter_map(|row| {
            lookup.get(&row.key()).map(|text_b| ParallelRow {
                book: row.book.clone(),
                chapter: row.chapter,
                verse: row.verse,
                text_a: row.text.clone(),
                text_b: (*text_b).to_string(),
            })
        })
        .collect()
}

pub fn write_parallel_csv(path: &Path, pair: &LanguagePair, rows: &[ParallelRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer
        .write_record(pair.header())
        .with_context(|| format!("failed to write header to {}", path.display()))?;
    for row in rows {
        let chapter = row.chapter.to_string();
        let verse = row.verse.to_string();
        writer
            .write_record([
                row.book.as_str(),
                chapter.as_str(),
                verse.as_str(),
                row.text_a.as_str(),
                row.text_b.as_str(),
            ])
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;

    Ok(())
}

pub fn create_parallel_corpora(
    csv_dir: &Path,
    pairs: &[LanguagePair],
    books: &[String],
    output_dir: &Path,
) -> Result<Vec<ParallelOutcome>> {
    ensure_directory(output_dir)?;

    let mut corpora = BTreeMap::<String, Vec<VerseRow>>::new();
    let mut outcomes = Vec::with_capacity(pairs.len());

    for pair in pairs {
        for language in [&pair.a, &pair.b] {
            if corpora.contains_key(language) {
                continue;
            }
            let paths = discover_language_csvs(csv_dir, language, books)?;
            if paths.is_empty() {
                warn!(language = %language, csv_dir = %csv_dir.display(), "no corpus CSVs found");
            }
            corpora.insert(language.clone(), load_language_corpus(&paths)?);
        }

        let rows = align_corpora(&corpora[&pair.a], &corpora[&pair.b]);
        let path = output_dir.join(pair.output_file_name());
        write_parallel_csv(&path, pair, &rows)?;

        info!(
            language_a = %pair.a,
            language_b = %pair.b,
            rows = rows.len(),
            path = %path.display(),
            "parallel corpus written"
        );
        outcomes.push(ParallelOutcome {
            path,
            row_count: rows.len(),
        });
    }

    Ok(outcomes)
}
