use std::path::Path;

use anyhow::{Result, bail};
use tracing::{info, warn};

use super::reconstruct::render_verses;
use super::{VerseAligner, clean_verses};
use crate::cli::{AlignArgs, VersesArgs};
use crate::util::{file_name_string, list_files_with_extension, read_text_file, write_text_file};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AlignSummary {
    pub aligned: Vec<u32>,
    pub missing: Vec<u32>,
}

pub fn run(args: VersesArgs) -> Result<()> {
    info!(folder = %args.folder.display(), "starting verse reconstruction");
    let file_count = clean_verses_in_folder(&args.folder)?;
    info!(file_count, "verse reconstruction completed");
    Ok(())
}

pub fn run_align(args: AlignArgs) -> Result<()> {
    info!(
        folder = %args.folder.display(),
        book = %args.book,
        chapter_count = args.chapters.len(),
        "starting verse alignment"
    );
    let summary = align_verses(&args.book, &args.chapters, &args.folder)?;
    info!(
        aligned = summary.aligned.len(),
        missing = summary.missing.len(),
        "verse alignment completed"
    );
    Ok(())
}

pub fn clean_verses_in_folder(folder: &Path) -> Result<usize> {
    if !folder.is_dir() {
        bail!("verse folder does not exist: {}", folder.display());
    }

    let files = list_files_with_extension(folder, "txt")?;
    for path in &files {
        let file_name = file_name_string(path)?;
        let verses = clean_verses(&read_text_file(path)?);
        write_text_file(path, &render_verses(&verses))?;
        info!(file = %file_name, verse_count = verses.len(), "cleaned verses");
    }

    Ok(files.len())
}

pub fn align_verses(book: &str, chapters: &[u32], folder: &Path) -> Result<AlignSummary> {
    let aligner = VerseAligner::new()?;
    let mut summary = AlignSummary::default();

    for &chapter in chapters {
        let file_name = format!("{book}_{chapter}.txt");
        let path = folder.join(&file_name);

        if !path.is_file() {
            warn!(path = %path.display(), "skipping missing chapter file");
            summary.missing.push(chapter);
            continue;
        }

        let aligned = aligner.align(&read_text_file(&path)?);
        write_text_file(&path, &aligned)?;
        info!(file = %file_name, "aligned chapter file");
        summary.aligned.push(chapter);
    }

    Ok(summary)
}
