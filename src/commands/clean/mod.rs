mod normalize;
mod rules;
mod run;

use normalize::{FlattenOptions, VerseFlattener, clean_lines};
use rules::RuleSet;

pub(crate) use run::run;
