use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "versecorpus",
    version,
    about = "Scripture scraping, verse normalization and parallel corpus tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Fetch(FetchArgs),
    Clean(CleanArgs),
    Align(AlignArgs),
    Verses(VersesArgs),
    Segment(SegmentArgs),
    Parallel(ParallelArgs),
    Stats(StatsArgs),
    /// Export CSVs into a SQLite file with one table per sheet (not an .xlsx spreadsheet)
    Workbook(WorkbookArgs),
    Status(StatusArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum SourceSite {
    Gateway,
    BibleCom,
}

impl SourceSite {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::BibleCom => "bible-com",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    #[arg(long, default_value = "Bible")]
    pub bible_root: PathBuf,

    #[arg(long, value_enum, default_value_t = SourceSite::Gateway)]
    pub source: SourceSite,

    /// Book name (gateway) or USFM book code such as GEN (bible-com).
    #[arg(long)]
    pub book: String,

    #[arg(long)]
    pub translation: String,

    #[arg(long)]
    pub language: String,

    /// Numeric version id used by bible.com URLs (1588 for KJV).
    #[arg(long)]
    pub version_id: Option<String>,

    #[arg(long)]
    pub chapters: u32,

    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CleanMode {
    Flatten,
    Lines,
}

impl CleanMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flatten => "flatten",
            Self::Lines => "lines",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    #[arg(long)]
    pub raw_dir: PathBuf,

    #[arg(long)]
    pub clean_dir: PathBuf,

    /// JSON array of {"pattern", "replacement"} objects, applied in order.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = CleanMode::Flatten)]
    pub mode: CleanMode,

    #[arg(long, default_value_t = false)]
    pub keep_first_verse_number: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AlignArgs {
    #[arg(long)]
    pub folder: PathBuf,

    #[arg(long)]
    pub book: String,

    #[arg(long = "chapter", required = true)]
    pub chapters: Vec<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct VersesArgs {
    #[arg(long)]
    pub folder: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SegmentArgs {
    #[arg(long, default_value = "Bible")]
    pub bible_root: PathBuf,

    #[arg(long)]
    pub folder: PathBuf,

    #[arg(long)]
    pub language: String,

    #[arg(long)]
    pub book: String,

    #[arg(long)]
    pub csv_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ParallelArgs {
    #[arg(long, default_value = "Bible")]
    pub bible_root: PathBuf,

    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// Language pair written as A:B; repeat for several pairs.
    #[arg(long = "pair", required = true)]
    pub pairs: Vec<String>,

    #[arg(long = "book")]
    pub books: Vec<String>,

    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    #[arg(long, default_value = "Bible")]
    pub bible_root: PathBuf,

    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    #[arg(long = "language", required = true)]
    pub languages: Vec<String>,

    #[arg(long = "book")]
    pub books: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WorkbookArgs {
    #[arg(long, default_value = "Bible")]
    pub bible_root: PathBuf,

    #[arg(long)]
    pub csv_dir: Option<PathBuf>,

    /// Explicit CSV files; every CSV in the CSV directory when omitted.
    #[arg(long = "csv")]
    pub csv_files: Vec<PathBuf>,

    /// SQLite file to write (default <bible-root>/workbook.sqlite).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "Bible")]
    pub bible_root: PathBuf,
}

pub fn resolve_csv_dir(bible_root: &std::path::Path, csv_dir: Option<&PathBuf>) -> PathBuf {
    csv_dir
        .cloned()
        .unwrap_or_else(|| bible_root.join("CSV"))
}
