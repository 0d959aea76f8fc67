use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use super::{
    LanguagePair, count_corpus_size, create_parallel_corpora, discover_language_csvs,
    load_language_corpus,
};
use crate::cli::{ParallelArgs, StatsArgs, resolve_csv_dir};
use crate::util::{output_entry, write_run_manifest};

pub fn run_parallel(args: ParallelArgs) -> Result<()> {
    let started = Utc::now();
    let csv_dir = resolve_csv_dir(&args.bible_root, args.csv_dir.as_ref());
    let output_dir = args.output_dir.clone().unwrap_or_else(|| csv_dir.clone());
    let pairs = args
        .pairs
        .iter()
        .map(|value| value.parse::<LanguagePair>())
        .collect::<Result<Vec<LanguagePair>>>()?;

    info!(
        csv_dir = %csv_dir.display(),
        output_dir = %output_dir.display(),
        pair_count = pairs.len(),
        "starting parallel corpus build"
    );

    let outcomes = create_parallel_corpora(&csv_dir, &pairs, &args.books, &output_dir)?;
    let outputs = outcomes
        .iter()
        .map(|outcome| output_entry(&outcome.path, outcome.row_count))
        .collect::<Result<Vec<_>>>()?;
    let manifest_path = write_run_manifest(&args.bible_root, "parallel", started, outputs, Vec::new())?;

    info!(
        pair_count = outcomes.len(),
        total_rows = outcomes.iter().map(|outcome| outcome.row_count).sum::<usize>(),
        manifest = %manifest_path.display(),
        "parallel corpora created"
    );
    Ok(())
}

pub fn run_stats(args: StatsArgs) -> Result<()> {
    let csv_dir = resolve_csv_dir(&args.bible_root, args.csv_dir.as_ref());
    let mut sizes = Vec::with_capacity(args.languages.len());

    for language in &args.languages {
        let paths = discover_language_csvs(&csv_dir, language, &args.books)?;
        let corpus = load_language_corpus(&paths)?;
        let size = count_corpus_size(language, &corpus);

        info!(
            language = %size.language,
            books = size.books,
            chapters = size.chapters,
            verses = size.verses,
            words = size.words,
            "corpus size"
        );
        sizes.push(size);
    }

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&sizes).context("failed to serialize corpus sizes")?;
        println!("{rendered}");
    }

    Ok(())
}
