//! Puzzle-domain types: the letter domain, decoded grids, and word lists

pub mod dictionary;
pub mod grid;
pub mod letters;

pub use dictionary::{create_example_word_lists, load_words_from_file, parse_words};
pub use grid::FilledGrid;
