mod parse;
mod run;

use parse::{chapter_from_file_name, parse_chapter_rows};

pub(crate) use run::run;
