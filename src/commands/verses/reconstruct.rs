use crate::model::{VerseEntry, VerseId, parse_verse_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadingToken {
    Range { start: u32, end: u32 },
    Number(u32),
    MalformedRange,
    Text,
}

fn classify_leading_token(token: &str) -> LeadingToken {
    if let Some((start, end)) = token.split_once('-') {
        let (Some(start), Some(end)) = (parse_verse_number(start), parse_verse_number(end)) else {
            return LeadingToken::Text;
        };
        return match VerseId::parse(token) {
            Some(VerseId::Range { start, end }) => LeadingToken::Range { start, end },
            _ if start == end => LeadingToken::Number(start),
            _ => LeadingToken::MalformedRange,
        };
    }

    match parse_verse_number(token) {
        Some(number) => LeadingToken::Number(number),
        None => LeadingToken::Text,
    }
}

fn split_leading_token(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((token, rest)) => Some((token, rest.trim())),
        None => Some((line, "")),
    }
}

/// Fold state for verse reconstruction: the entries built so far and the
/// verse number the next real marker must carry.
#[derive(Debug)]
struct Reconstruction {
    verses: Vec<VerseEntry>,
    expected: u32,
}

impl Reconstruction {
    fn new() -> Self {
        Self {
            verses: Vec::new(),
            expected: 1,
        }
    }

    fn push_line(mut self, line: &str) -> Self {
        let Some((token, rest)) = split_leading_token(line) else {
            return self;
        };

        match classify_leading_token(token) {
            LeadingToken::Range { start, end } => {
                self.verses
                    .push(VerseEntry::new(VerseId::Range { start, end }, rest));
                self.expected = end.saturating_add(1);
            }
            LeadingToken::Number(number) if number == self.expected => {
                self.verses.push(VerseEntry::new(VerseId::Single(number), rest));
                self.expected = number.saturating_add(1);
            }
            LeadingToken::Number(number) => {
                if !self.append_to_last(line) && number >= 1 {
                    self.verses.push(VerseEntry::new(VerseId::Single(number), rest));
                    self.expected = number.saturating_add(1);
                }
            }
            LeadingToken::MalformedRange | LeadingToken::Text => {
                self.append_to_last(line);
            }
        }

        self
    }

    fn append_to_last(&mut self, line: &str) -> bool {
        let Some(last) = self.verses.last_mut() else {
            return false;
        };
        if !last.text.is_empty() {
            last.text.push(' ');
        }
        last.text.push_str(line.trim());
        true
    }
}

/// Rebuilds ordered verse entries from lines that nominally start with a
/// verse marker. A number that is not the expected next verse is merged into
/// the previous entry. When no entry exists yet, that number opens the first
/// entry and `expected` moves past it, so `"2 a\n3 b"` yields verses 2 and 3
/// rather than one merged entry; this keeps the output strictly ascending.
pub fn clean_verses(text: &str) -> Vec<VerseEntry> {
    text.lines()
        .fold(Reconstruction::new(), Reconstruction::push_line)
        .verses
}

pub fn render_verses(verses: &[VerseEntry]) -> String {
    let mut rendered = String::new();
    for verse in verses {
        rendered.push_str(&verse.to_line());
        rendered.push('\n');
    }
    rendered
}
