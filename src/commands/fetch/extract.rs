use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementMatcher {
    ClassToken(&'static str),
    HasAttribute(&'static str),
}

impl ElementMatcher {
    pub fn css(self) -> String {
        match self {
            Self::ClassToken(class) => format!("span.{class}"),
            Self::HasAttribute(attribute) => format!("span[{attribute}]"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarkupExtractor {
    verse_elements: Selector,
}

impl MarkupExtractor {
    pub fn new(matcher: ElementMatcher) -> Result<Self> {
        let css = matcher.css();
        let verse_elements = Selector::parse(&css)
            .map_err(|err| anyhow!("failed to parse selector {css}: {err:?}"))?;
        Ok(Self { verse_elements })
    }

    /// Text of every verse-bearing element in document order. Nested matches
    /// are reported separately and elements without text are dropped.
    pub fn extract_fragments(&self, markup: &str) -> Vec<String> {
        let document = Html::parse_document(markup);
        document
            .select(&self.verse_elements)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}
