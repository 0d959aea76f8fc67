use std::cell::RefCell;
use std::fs;
use std::time::Duration;

use anyhow::{Result, anyhow};

use super::extract::{ElementMatcher, MarkupExtractor};
use super::run::fetch_book;
use super::source::{ChapterSource, MarkupFetcher};
use crate::cli::SourceSite;

struct StubFetcher {
    pages: Vec<String>,
    requested: RefCell<Vec<String>>,
}

impl MarkupFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let mut requested = self.requested.borrow_mut();
        let page = self
            .pages
            .get(requested.len())
            .cloned()
            .ok_or_else(|| anyhow!("no stub page for {url}"))?;
        requested.push(url.to_string());
        Ok(page)
    }
}

const GATEWAY_PAGE: &str = r##"
<div class="passage-text">
  <h3><span id="en-KJV-1" class="text Gen-1-1">The Creation</span></h3>
  <p><span class="text Gen-1-1"><span class="chapternum">1 </span>In the beginning God created the heaven and the earth.</span>
  <span class="text Gen-1-2"><sup class="versenum">2 </sup>And the earth was without form<sup class="footnote">[<a href="#f1">a</a>]</sup>, and void.</span>
  <span class="woj">not a verse</span>
  <span class="text Gen-1-3"></span></p>
</div>
"##;

const BIBLE_COM_PAGE: &str = r#"
<span data-usfm="GEN.1.1" class="ChapterContent_verse"><span class="ChapterContent_label">1</span><span class="ChapterContent_content">In the beginning God created the heavens &amp; the earth.</span></span>
<span class="ChapterContent_heading">Heading</span>
<span data-usfm="GEN.1.2"><span class="ChapterContent_label">2</span><span>Now the earth was&nbsp;formless</span></span>
"#;

#[test]
fn gateway_extraction_reads_text_spans_only() {
    let extractor = MarkupExtractor::new(ElementMatcher::ClassToken("text")).expect("extractor");
    let fragments = extractor.extract_fragments(GATEWAY_PAGE);
    assert_eq!(
        fragments,
        vec![
            "The Creation",
            "1 In the beginning God created the heaven and the earth.",
            "2 And the earth was without form [ a ] , and void.",
        ]
    );
}

#[test]
fn bible_com_extraction_joins_nested_spans_and_decodes_entities() {
    let extractor =
        MarkupExtractor::new(ElementMatcher::HasAttribute("data-usfm")).expect("extractor");
    let fragments = extractor.extract_fragments(BIBLE_COM_PAGE);
    assert_eq!(
        fragments,
        vec![
            "1 In the beginning God created the heavens & the earth.",
            "2 Now the earth was\u{a0}formless",
        ]
    );
}

#[test]
fn extraction_keeps_attribute_values_out_of_text_and_decodes_named_entities() {
    let extractor = MarkupExtractor::new(ElementMatcher::ClassToken("text")).expect("extractor");
    let fragments = extractor.extract_fragments(
        r#"<p><span class="text Gen-1-1" title="a>b">In the beginning&hellip; God</span></p>"#,
    );
    assert_eq!(fragments, vec!["In the beginning\u{2026} God"]);
}

#[test]
fn chapter_urls_follow_each_site_layout() {
    let gateway =
        ChapterSource::new(SourceSite::Gateway, "Song of Songs", "kjv", None).expect("source");
    assert_eq!(
        gateway.chapter_url(2),
        "https://www.biblegateway.com/passage/?search=Song+of+Songs+2&version=KJV"
    );
    assert_eq!(gateway.book_folder_name(), "Song of Songs");

    let bible_com =
        ChapterSource::new(SourceSite::BibleCom, "gen", "tgl", Some("1588")).expect("source");
    assert_eq!(bible_com.chapter_url(3), "https://www.bible.com/bible/1588/GEN.3.TGL");
    assert_eq!(bible_com.book_folder_name(), "Genesis");
}

#[test]
fn bible_com_source_requires_version() {
    assert!(ChapterSource::new(SourceSite::BibleCom, "GEN", "KJV", None).is_err());
    assert!(ChapterSource::new(SourceSite::BibleCom, "GEN", "KJV", Some(" ")).is_err());
}

#[test]
fn fetch_book_writes_one_file_per_chapter() {
    let temp = tempfile::tempdir().expect("tempdir");
    let folder = temp.path().join("KJV-English").join("Genesis");
    let fetcher = StubFetcher {
        pages: vec![BIBLE_COM_PAGE.to_string(), "<html></html>".to_string()],
        requested: RefCell::new(Vec::new()),
    };
    let source =
        ChapterSource::new(SourceSite::BibleCom, "GEN", "KJV", Some("1")).expect("source");

    let summary = fetch_book(&fetcher, &source, &folder, 2, Duration::ZERO).expect("fetch");

    assert_eq!(summary.chapter_files.len(), 2);
    assert_eq!(summary.empty_chapters, vec![2]);
    assert_eq!(
        fetcher.requested.borrow().as_slice(),
        [
            "https://www.bible.com/bible/1/GEN.1.KJV",
            "https://www.bible.com/bible/1/GEN.2.KJV",
        ]
    );
    assert_eq!(
        fs::read_to_string(folder.join("Genesis_1.txt")).expect("read"),
        "1 In the beginning God created the heavens & the earth.\n2 Now the earth was\u{a0}formless"
    );
    assert_eq!(fs::read_to_string(folder.join("Genesis_2.txt")).expect("read"), "");
}

#[test]
fn fetch_book_propagates_fetch_failures() {
    let temp = tempfile::tempdir().expect("tempdir");
    let fetcher = StubFetcher {
        pages: Vec::new(),
        requested: RefCell::new(Vec::new()),
    };
    let source = ChapterSource::new(SourceSite::Gateway, "John", "NIV", None).expect("source");

    let result = fetch_book(&fetcher, &source, temp.path(), 1, Duration::ZERO);
    assert!(result.is_err());
}
