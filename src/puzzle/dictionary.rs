//! Word-list loading and validation
//!
//! The dictionary is the only external input besides the grid size. Words
//! are validated here, at the boundary, so the constraint core can assume
//! every word it sees is lowercase a-z.

use crate::puzzle::letters::is_valid_word;
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;
use thiserror::Error;

/// Problems with the content of a word list.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("word list contains no usable words")]
    Empty,
    #[error("word '{word}' contains characters outside a-z")]
    InvalidWord { word: String },
}

/// Load a word list from a text file, one word per line.
pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read word list: {}", path.as_ref().display()))?;

    parse_words(&content)
        .with_context(|| format!("Failed to parse word list: {}", path.as_ref().display()))
}

/// Parse a word list from a string: trims lines, drops empties, rejects
/// words with characters outside a-z, and deduplicates preserving order.
pub fn parse_words(content: &str) -> Result<Vec<String>, DictionaryError> {
    let words: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect();

    for word in &words {
        if !is_valid_word(word) {
            return Err(DictionaryError::InvalidWord { word: word.clone() });
        }
    }

    let unique: Vec<String> = words.into_iter().unique().collect();
    if unique.is_empty() {
        return Err(DictionaryError::Empty);
    }
    Ok(unique)
}

/// Save a word list to a text file, one word per line.
pub fn save_words_to_file<P: AsRef<Path>>(words: &[String], path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = words.iter().join("\n") + "\n";
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write word list: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example word lists for the `setup` command.
pub fn create_example_word_lists<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();

    let tiny: Vec<String> = ["at", "to", "zu", "pi", "mr", "ws"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    save_words_to_file(&tiny, dir.join("tiny.txt"))?;

    let common: Vec<String> = [
        "cat", "dog", "sun", "sky", "sea", "map", "art", "ink", "oak", "owl", "ash", "elm",
        "ice", "arc", "ear", "era", "tea", "eat", "ate", "net", "ten", "tan", "ant", "nap",
        "pan", "pen", "pin", "tip", "pit", "sip", "air", "oar", "raw", "war", "saw", "was",
    ]
    .iter()
    .map(|w| w.to_string())
    .collect();
    save_words_to_file(&common, dir.join("common.txt"))?;

    Ok(())
}
