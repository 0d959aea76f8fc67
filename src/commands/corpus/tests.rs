use std::fs;
use std::path::Path;

use super::load::{discover_language_csvs, load_language_corpus};
use super::parallel::{LanguagePair, align_corpora, create_parallel_corpora};
use super::stats::count_corpus_size;
use crate::model::VerseRow;

fn row(book: &str, chapter: u32, verse: u32, text: &str) -> VerseRow {
    VerseRow {
        book: book.to_string(),
        chapter,
        verse,
        text: text.to_string(),
    }
}

fn write_csv(path: &Path, body: &str) {
    fs::write(path, format!("book,chapter,verse_number,text\n{body}")).expect("write csv");
}

#[test]
fn language_pair_parses_colon_form() {
    let pair = "English:Tagalog".parse::<LanguagePair>().expect("pair");
    assert_eq!(pair.a, "English");
    assert_eq!(pair.b, "Tagalog");
    assert_eq!(pair.output_file_name(), "English_Tagalog_parallel.csv");
    assert!("English".parse::<LanguagePair>().is_err());
    assert!(":Tagalog".parse::<LanguagePair>().is_err());
}

#[test]
fn load_language_corpus_sorts_by_book_chapter_verse() {
    let temp = tempfile::tempdir().expect("tempdir");
    let genesis = temp.path().join("English_GEN.csv");
    let exodus = temp.path().join("English_EXO.csv");
    write_csv(&genesis, "GEN,2,1,Thus\nGEN,1,2,And\nGEN,1,1,In\n");
    write_csv(&exodus, "EXO,1,1,Now\n");

    let corpus = load_language_corpus(&[genesis, exodus]).expect("load");
    let keys = corpus
        .iter()
        .map(|row| (row.book.clone(), row.chapter, row.verse))
        .collect::<Vec<_>>();
    assert_eq!(
        keys,
        vec![
            ("EXO".to_string(), 1, 1),
            ("GEN".to_string(), 1, 1),
            ("GEN".to_string(), 1, 2),
            ("GEN".to_string(), 2, 1),
        ]
    );
}

#[test]
fn load_language_corpus_keeps_first_duplicate_key() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("English_GEN.csv");
    write_csv(&path, "GEN,1,1,first\nGEN,1,1,second\n");

    let corpus = load_language_corpus(&[path]).expect("load");
    assert_eq!(corpus, vec![row("GEN", 1, 1, "first")]);
}

#[test]
fn align_corpora_drops_unmatched_keys() {
    let english = vec![
        row("GEN", 1, 4, "And God saw"),
        row("GEN", 1, 5, "And God called"),
    ];
    let tagalog = vec![row("GEN", 1, 4, "At nakita ng Dios"), row("GEN", 1, 6, "extra")];

    let aligned = align_corpora(&english, &tagalog);
    assert_eq!(aligned.len(), 1);
    assert_eq!(aligned[0].verse, 4);
    assert_eq!(aligned[0].text_a, "And God saw");
    assert_eq!(aligned[0].text_b, "At nakita ng Dios");
}

#[test]
fn create_parallel_corpora_writes_pair_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let csv_dir = temp.path().join("CSV");
    fs::create_dir_all(&csv_dir).expect("csv dir");
    write_csv(&csv_dir.join("English_GEN.csv"), "GEN,1,1,In the beginning\nGEN,1,5,Day\n");
    write_csv(&csv_dir.join("Tagalog_GEN.csv"), "GEN,1,1,Nang pasimula\n");

    let pairs = vec!["English:Tagalog".parse::<LanguagePair>().expect("pair")];
    let outcomes =
        create_parallel_corpora(&csv_dir, &pairs, &[], &temp.path().join("out")).expect("parallel");

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].row_count, 1);
    let written = fs::read_to_string(&outcomes[0].path).expect("read");
    assert_eq!(
        written,
        "book,chapter,verse,text_English,text_Tagalog\nGEN,1,1,In the beginning,Nang pasimula\n"
    );
    assert!(!written.contains("Day"));
}

#[test]
fn discover_language_csvs_takes_only_known_books_of_the_language() {
    let temp = tempfile::tempdir().expect("tempdir");
    write_csv(&temp.path().join("English_GEN.csv"), "");
    write_csv(&temp.path().join("English_Tagalog_parallel.csv"), "");
    write_csv(&temp.path().join("Tagalog_GEN.csv"), "");

    write_csv(&temp.path().join("English_UK_Genesis.csv"), "");
    write_csv(&temp.path().join("English_Genesis.csv"), "");

    let discovered = discover_language_csvs(temp.path(), "English", &[]).expect("discover");
    assert_eq!(
        discovered,
        vec![
            temp.path().join("English_GEN.csv"),
            temp.path().join("English_Genesis.csv"),
        ]
    );

    let uk = discover_language_csvs(temp.path(), "English_UK", &[]).expect("discover");
    assert_eq!(uk, vec![temp.path().join("English_UK_Genesis.csv")]);

    let explicit = discover_language_csvs(
        temp.path(),
        "English",
        &["GEN".to_string(), "EXO".to_string()],
    )
    .expect("discover");
    assert_eq!(explicit, vec![temp.path().join("English_GEN.csv")]);
}

#[test]
fn count_corpus_size_counts_books_chapters_verses_and_words() {
    let corpus = vec![
        row("GEN", 1, 1, "In the beginning"),
        row("GEN", 1, 2, "And the earth"),
        row("GEN", 2, 1, "Thus"),
        row("EXO", 1, 1, ""),
    ];

    let size = count_corpus_size("English", &corpus);
    assert_eq!(size.books, 2);
    assert_eq!(size.chapters, 3);
    assert_eq!(size.verses, 4);
    assert_eq!(size.words, 7);
}
