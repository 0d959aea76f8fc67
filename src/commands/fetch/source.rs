use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;

use super::ElementMatcher;
use crate::books::book_name_for_code;
use crate::cli::SourceSite;

const USER_AGENT: &str = "Mozilla/5.0";

pub trait MarkupFetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl MarkupFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request failed: {url}"))?
            .error_for_status()
            .with_context(|| format!("unexpected HTTP status: {url}"))?;

        response
            .text()
            .with_context(|| format!("failed to read response body: {url}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSource {
    site: SourceSite,
    book: String,
    translation: String,
    version: Option<String>,
}

impl ChapterSource {
    pub fn new(
        site: SourceSite,
        book: &str,
        translation: &str,
        version: Option<&str>,
    ) -> Result<Self> {
        let book = book.trim();
        if book.is_empty() {
            bail!("book must not be empty");
        }
        let translation = translation.trim().to_uppercase();
        if translation.is_empty() {
            bail!("translation must not be empty");
        }

        let (book, version) = match site {
            SourceSite::Gateway => (book.to_string(), None),
            SourceSite::BibleCom => {
                let Some(version) = version.map(str::trim).filter(|value| !value.is_empty())
                else {
                    bail!("bible-com source requires --version");
                };
                (book.to_uppercase(), Some(version.to_string()))
            }
        };

        Ok(Self {
            site,
            book,
            translation,
            version,
        })
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    pub fn chapter_url(&self, chapter: u32) -> String {
        match self.site {
            SourceSite::Gateway => format!(
                "https://www.biblegateway.com/passage/?search={}+{}&version={}",
                self.book.replace(' ', "+"),
                chapter,
                self.translation
            ),
            SourceSite::BibleCom => format!(
                "https://www.bible.com/bible/{}/{}.{}.{}",
                self.version.as_deref().unwrap_or_default(),
                self.book,
                chapter,
                self.translation
            ),
        }
    }

    pub fn book_folder_name(&self) -> String {
        match self.site {
            SourceSite::Gateway => self.book.clone(),
            SourceSite::BibleCom => book_name_for_code(&self.book)
                .map(ToOwned::to_owned)
                .unwrap_or_else(|| self.book.clone()),
        }
    }

    pub fn element_matcher(&self) -> ElementMatcher {
        match self.site {
            SourceSite::Gateway => ElementMatcher::ClassToken("text"),
            SourceSite::BibleCom => ElementMatcher::HasAttribute("data-usfm"),
        }
    }
}
