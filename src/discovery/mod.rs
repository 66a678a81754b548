//! File discovery: ignore rules and the filtered tree walk.

mod rules;
mod walker;

pub use rules::{IgnoreMatcher, ALWAYS_EXCLUDED};
pub use walker::{find_source_files, relative_path};
