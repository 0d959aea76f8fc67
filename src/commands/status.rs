use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::PipelineRunManifest;
use crate::util::{file_name_string, list_files_with_extension};

const RESERVED_DIRS: [&str; 2] = ["CSV", "manifests"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFolderStatus {
    pub translation: String,
    pub book: String,
    pub chapter_files: usize,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let root = &args.bible_root;
    info!(bible_root = %root.display(), "status requested");

    if !root.is_dir() {
        warn!(path = %root.display(), "bible root missing");
        return Ok(());
    }

    for folder in scan_book_folders(root)? {
        info!(
            translation = %folder.translation,
            book = %folder.book,
            chapter_files = folder.chapter_files,
            "chapter folder"
        );
    }

    let csv_dir = root.join("CSV");
    if csv_dir.is_dir() {
        let csv_files = list_files_with_extension(&csv_dir, "csv")?;
        info!(path = %csv_dir.display(), csv_files = csv_files.len(), "csv folder");
    } else {
        warn!(path = %csv_dir.display(), "csv folder missing");
    }

    let manifest_dir = root.join("manifests");
    match latest_manifest(&manifest_dir)? {
        Some(manifest) => info!(
            run_id = %manifest.run_id,
            command = %manifest.command,
            started_at = %manifest.started_at,
            completed_at = %manifest.completed_at,
            outputs = manifest.outputs.len(),
            warnings = manifest.warnings.len(),
            "latest run manifest"
        ),
        None => warn!(path = %manifest_dir.display(), "no run manifests found"),
    }

    Ok(())
}

fn sorted_subdirectories(path: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut dirs = Vec::new();
    let entries = fs::read_dir(path).with_context(|| format!("failed to read {}", path.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", path.display()))?;
        let entry_path = entry.path();
        if entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", entry_path.display()))?
            .is_dir()
        {
            dirs.push(entry_path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

pub fn scan_book_folders(root: &Path) -> Result<Vec<BookFolderStatus>> {
    let mut folders = Vec::new();

    for translation_dir in sorted_subdirectories(root)? {
        let translation = file_name_string(&translation_dir)?;
        if RESERVED_DIRS.contains(&translation.as_str()) {
            continue;
        }

        for book_dir in sorted_subdirectories(&translation_dir)? {
            folders.push(BookFolderStatus {
                translation: translation.clone(),
                book: file_name_string(&book_dir)?,
                chapter_files: list_files_with_extension(&book_dir, "txt")?.len(),
            });
        }
    }

    Ok(folders)
}

pub fn latest_manifest(manifest_dir: &Path) -> Result<Option<PipelineRunManifest>> {
    if !manifest_dir.is_dir() {
        return Ok(None);
    }

    let mut latest: Option<PipelineRunManifest> = None;
    for path in list_files_with_extension(manifest_dir, "json")? {
        let raw = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let manifest: PipelineRunManifest = serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let newer = latest
            .as_ref()
            .map(|current| manifest.started_at > current.started_at)
            .unwrap_or(true);
        if newer {
            latest = Some(manifest);
        }
    }

    Ok(latest)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{TimeZone, Utc};

    use super::{BookFolderStatus, latest_manifest, scan_book_folders};
    use crate::util::write_run_manifest;

    #[test]
    fn scan_book_folders_counts_chapter_files_and_skips_outputs() {
        let temp = tempfile::tempdir().expect("tempdir");
        let genesis = temp.path().join("KJV-English").join("Genesis");
        fs::create_dir_all(&genesis).expect("genesis");
        fs::write(genesis.join("Genesis_1.txt"), "1 In").expect("write");
        fs::write(genesis.join("Genesis_2.txt"), "1 Thus").expect("write");
        fs::create_dir_all(temp.path().join("CSV").join("nested")).expect("csv");

        let folders = scan_book_folders(temp.path()).expect("scan");
        assert_eq!(
            folders,
            vec![BookFolderStatus {
                translation: "KJV-English".to_string(),
                book: "Genesis".to_string(),
                chapter_files: 2,
            }]
        );
    }

    #[test]
    fn latest_manifest_prefers_most_recent_run() {
        let temp = tempfile::tempdir().expect("tempdir");
        let earlier = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        write_run_manifest(temp.path(), "segment", earlier, Vec::new(), Vec::new())
            .expect("write manifest");
        write_run_manifest(temp.path(), "parallel", Utc::now(), Vec::new(), Vec::new())
            .expect("write manifest");

        let latest = latest_manifest(&temp.path().join("manifests"))
            .expect("latest")
            .expect("manifest present");
        assert_eq!(latest.command, "parallel");
        assert_eq!(latest.manifest_version, 1);
    }
}
