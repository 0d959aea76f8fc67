use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerseId {
    Single(u32),
    Range { start: u32, end: u32 },
}

impl VerseId {
    /// Parses `"7"` or `"2-3"`. Only ASCII digits are accepted and a range
    /// must satisfy `1 <= start < end`.
    pub fn parse(token: &str) -> Option<Self> {
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_verse_number(start)?;
                let end = parse_verse_number(end)?;
                (start >= 1 && start < end).then_some(Self::Range { start, end })
            }
            None => parse_verse_number(token).map(Self::Single),
        }
    }

    pub fn numbers(self) -> RangeInclusive<u32> {
        match self {
            Self::Single(number) => number..=number,
            Self::Range { start, end } => start..=end,
        }
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(number) => write!(f, "{number}"),
            Self::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

pub fn parse_verse_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    token.parse::<u32>().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseEntry {
    pub id: VerseId,
    pub text: String,
}

impl VerseEntry {
    pub fn new(id: VerseId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    pub fn to_line(&self) -> String {
        if self.text.is_empty() {
            return self.id.to_string();
        }
        format!("{} {}", self.id, self.text)
    }
}

pub const VERSE_ROW_HEADER: [&str; 4] = ["book", "chapter", "verse_number", "text"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRow {
    pub book: String,
    pub chapter: u32,
    #[serde(rename = "verse_number")]
    pub verse: u32,
    pub text: String,
}

impl VerseRow {
    pub fn key(&self) -> (&str, u32, u32) {
        (self.book.as_str(), self.chapter, self.verse)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelRow {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text_a: String,
    pub text_b: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDescriptor {
    pub language: String,
    pub book: String,
    pub base_path: PathBuf,
}

impl BookDescriptor {
    pub fn csv_file_name(&self) -> String {
        format!("{}_{}.csv", self.language, self.book)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputEntry {
    pub path: String,
    pub rows: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub command: String,
    pub started_at: String,
    pub completed_at: String,
    pub outputs: Vec<OutputEntry>,
    pub warnings: Vec<String>,
}
