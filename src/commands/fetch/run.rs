use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};
use tracing::{info, warn};

use super::{ChapterSource, HttpFetcher, MarkupExtractor, MarkupFetcher};
use crate::cli::FetchArgs;
use crate::util::{ensure_directory, write_text_file};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub chapter_files: Vec<PathBuf>,
    pub empty_chapters: Vec<u32>,
}

pub fn run(args: FetchArgs) -> Result<()> {
    if args.chapters == 0 {
        bail!("--chapters must be at least 1");
    }
    let language = args.language.trim();
    if language.is_empty() {
        bail!("language must not be empty");
    }

    let source = ChapterSource::new(
        args.source,
        &args.book,
        &args.translation,
        args.version_id.as_deref(),
    )?;
    let folder = args
        .bible_root
        .join(format!("{}-{}", source.translation(), language))
        .join(source.book_folder_name());

    info!(
        source = args.source.as_str(),
        folder = %folder.display(),
        chapters = args.chapters,
        delay_ms = args.delay_ms,
        "starting chapter fetch"
    );

    let fetcher = HttpFetcher::new()?;
    let summary = fetch_book(
        &fetcher,
        &source,
        &folder,
        args.chapters,
        Duration::from_millis(args.delay_ms),
    )?;

    info!(
        files = summary.chapter_files.len(),
        empty_chapters = summary.empty_chapters.len(),
        "chapter fetch completed"
    );
    Ok(())
}

pub fn fetch_book<F: MarkupFetcher>(
    fetcher: &F,
    source: &ChapterSource,
    folder: &Path,
    chapters: u32,
    delay: Duration,
) -> Result<FetchSummary> {
    ensure_directory(folder)?;

    let book_name = source.book_folder_name();
    let extractor = MarkupExtractor::new(source.element_matcher())?;
    let mut summary = FetchSummary::default();

    for chapter in 1..=chapters {
        if chapter > 1 && !delay.is_zero() {
            thread::sleep(delay);
        }

        let url = source.chapter_url(chapter);
        info!(url = %url, "fetching chapter");
        let markup = fetcher.fetch(&url)?;

        let fragments = extractor.extract_fragments(&markup);
        if fragments.is_empty() {
            warn!(url = %url, chapter, "no verse elements found");
            summary.empty_chapters.push(chapter);
        }

        let path = folder.join(format!("{book_name}_{chapter}.txt"));
        write_text_file(&path, &fragments.join("\n"))?;
        summary.chapter_files.push(path);
    }

    Ok(summary)
}
