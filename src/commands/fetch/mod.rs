mod extract;
mod run;
mod source;
#[cfg(test)]
mod tests;

use extract::{ElementMatcher, MarkupExtractor};
use source::{ChapterSource, HttpFetcher, MarkupFetcher};

pub(crate) use run::run;
