use crate::model::{VerseId, VerseRow, parse_verse_number};

pub fn chapter_from_file_name(file_name: &str, book: &str) -> Option<u32> {
    let stem = file_name.strip_suffix(".txt")?;
    let (prefix, chapter) = stem.rsplit_once('_')?;
    if prefix != book {
        return None;
    }
    chapter.parse::<u32>().ok().filter(|chapter| *chapter >= 1)
}

/// Row ids accept any `start-end` with `1 <= start <= end`; `2-2` is verse 2.
fn parse_row_id(token: &str) -> Option<VerseId> {
    let id = match token.split_once('-') {
        Some((start, end)) => {
            let start = parse_verse_number(start)?;
            let end = parse_verse_number(end)?;
            if start == end {
                VerseId::Single(start)
            } else {
                VerseId::parse(token)?
            }
        }
        None => VerseId::parse(token)?,
    };
    (*id.numbers().start() >= 1).then_some(id)
}

#[derive(Debug, Default)]
pub struct ChapterRows {
    pub rows: Vec<VerseRow>,
    pub rejected_lines: Vec<String>,
}

pub fn parse_chapter_rows(book: &str, chapter: u32, text: &str) -> ChapterRows {
    let mut parsed = ChapterRows::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (token, rest) = line
            .split_once(char::is_whitespace)
            .map(|(token, rest)| (token, rest.trim()))
            .unwrap_or((line, ""));

        let Some(id) = parse_row_id(token) else {
            parsed.rejected_lines.push(line.to_string());
            continue;
        };

        parsed.rows.extend(id.numbers().map(|verse| VerseRow {
            book: book.to_string(),
            chapter,
            verse,
            text: rest.to_string(),
        }));
    }

    parsed
}
