use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::VerseRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusSize {
    pub language: String,
    pub books: usize,
    pub chapters: usize,
    pub verses: usize,
    pub words: usize,
}

pub fn count_corpus_size(language: &str, rows: &[VerseRow]) -> CorpusSize {
    let books = rows
        .iter()
        .map(|row| row.book.as_str())
        .collect::<BTreeSet<&str>>();
    let chapters = rows
        .iter()
        .map(|row| (row.book.as_str(), row.chapter))
        .collect::<BTreeSet<(&str, u32)>>();

    CorpusSize {
        language: language.to_string(),
        books: books.len(),
        chapters: chapters.len(),
        verses: rows.len(),
        words: rows
            .iter()
            .map(|row| row.text.split_whitespace().count())
            .sum(),
    }
}
