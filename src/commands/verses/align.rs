use anyhow::{Context, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct VerseAligner {
    marker: Regex,
}

impl VerseAligner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            marker: Regex::new(r"\s*(\d+(?:-\d+)?)\s+").context("failed to compile verse marker regex")?,
        })
    }

    pub fn align(&self, text: &str) -> String {
        self.marker
            .replace_all(text, "\n${1} ")
            .trim()
            .to_string()
    }
}
