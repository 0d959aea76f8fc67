use anyhow::{Context, Result};
use regex::Regex;

use super::RuleSet;

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[derive(Debug, Clone, Copy)]
pub struct FlattenOptions {
    /// Relabel the first recovered verse as `1`. Pages that render the
    /// chapter number in place of the verse-1 marker need this.
    pub renumber_first_verse: bool,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            renumber_first_verse: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VerseFlattener {
    trailing_digits: Regex,
    number_token: Regex,
}

impl VerseFlattener {
    pub fn new() -> Result<Self> {
        Ok(Self {
            trailing_digits: Regex::new(r"\d+$").context("failed to compile trailing digit regex")?,
            number_token: Regex::new(r"^\d+$").context("failed to compile number token regex")?,
        })
    }

    /// Splits whitespace-normalized text into `(number, text)` pairs. The
    /// first marker is the trailing digit run of the first token that ends in
    /// digits; text before it is discarded. Every later marker is a token made
    /// only of digits, and verse text runs up to the next such token.
    pub fn split_verses(&self, normalized: &str, options: FlattenOptions) -> Vec<(String, String)> {
        let tokens = normalized
            .split(' ')
            .filter(|token| !token.is_empty())
            .collect::<Vec<&str>>();

        let Some((first_index, first_number)) =
            tokens.iter().enumerate().find_map(|(index, token)| {
                self.trailing_digits
                    .find(token)
                    .map(|found| (index, found.as_str()))
            })
        else {
            return Vec::new();
        };

        let mut verses = Vec::new();
        let mut number = first_number.to_string();
        let mut cursor = first_index + 1;

        loop {
            if cursor >= tokens.len() {
                verses.push((number, String::new()));
                break;
            }

            let mut end = cursor;
            while end + 1 < tokens.len() && !self.number_token.is_match(tokens[end + 1]) {
                end += 1;
            }
            verses.push((number, tokens[cursor..=end].join(" ")));

            if end + 1 >= tokens.len() {
                break;
            }
            number = tokens[end + 1].to_string();
            cursor = end + 2;
        }

        if options.renumber_first_verse {
            if let Some(first) = verses.first_mut() {
                first.0 = "1".to_string();
            }
        }

        verses
    }

    pub fn clean_flatten(&self, text: &str, rules: &RuleSet, options: FlattenOptions) -> String {
        let normalized = collapse_whitespace(&rules.apply(text));
        let verses = self.split_verses(&normalized, options);
        if verses.is_empty() {
            return normalized;
        }

        verses
            .iter()
            .map(|(number, verse)| format!("{number} {verse}").trim_end().to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

pub fn clean_lines(text: &str, rules: &RuleSet) -> String {
    text.lines()
        .map(|line| collapse_whitespace(&rules.apply(line)))
        .filter(|line| !line.is_empty())
        .collect::<Vec<String>>()
        .join("\n")
}
