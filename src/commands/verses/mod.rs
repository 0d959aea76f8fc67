mod align;
mod reconstruct;
mod run;

use align::VerseAligner;
use reconstruct::clean_verses;

pub(crate) use run::{run, run_align};
