mod load;
mod parallel;
mod run;
mod stats;
#[cfg(test)]
mod tests;

use load::discover_language_csvs;
use parallel::{LanguagePair, create_parallel_corpora};
use stats::count_corpus_size;

pub(crate) use load::load_language_corpus;
pub(crate) use run::{run_parallel, run_stats};
