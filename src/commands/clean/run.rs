use std::path::Path;

use anyhow::{Result, bail};
use tracing::info;

use super::{FlattenOptions, RuleSet, VerseFlattener, clean_lines};
use crate::cli::{CleanArgs, CleanMode};
use crate::util::{
    ensure_directory, file_name_string, list_files_with_extension, read_text_file,
    write_text_file,
};

pub fn run(args: CleanArgs) -> Result<()> {
    let rules = match &args.rules {
        Some(path) => RuleSet::load(path)?,
        None => RuleSet::builtin()?,
    };
    let options = FlattenOptions {
        renumber_first_verse: !args.keep_first_verse_number,
    };

    info!(
        raw_dir = %args.raw_dir.display(),
        clean_dir = %args.clean_dir.display(),
        mode = args.mode.as_str(),
        rule_count = rules.len(),
        renumber_first_verse = options.renumber_first_verse,
        "starting cleanup"
    );

    let cleaned = clean_text_folder(&args.raw_dir, &args.clean_dir, &rules, args.mode, options)?;
    info!(file_count = cleaned, "cleanup completed");
    Ok(())
}

pub fn clean_text_folder(
    raw_dir: &Path,
    clean_dir: &Path,
    rules: &RuleSet,
    mode: CleanMode,
    options: FlattenOptions,
) -> Result<usize> {
    if !raw_dir.is_dir() {
        bail!("raw folder does not exist: {}", raw_dir.display());
    }
    ensure_directory(clean_dir)?;

    let flattener = VerseFlattener::new()?;
    let files = list_files_with_extension(raw_dir, "txt")?;

    for raw_path in &files {
        let file_name = file_name_string(raw_path)?;
        let text = read_text_file(raw_path)?;

        let cleaned = match mode {
            CleanMode::Flatten => flattener.clean_flatten(&text, rules, options),
            CleanMode::Lines => clean_lines(&text, rules),
        };

        write_text_file(&clean_dir.join(&file_name), &cleaned)?;
        info!(file = %file_name, "cleaned chapter file");
    }

    Ok(files.len())
}
