//! Word list parsing
//!
//! ```text
//! # comment
//! first line of level one
//! second line of level one
//!
//! level two
//! ```

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Lines of text rendered into one map
pub type Level = Vec<String>;

/// Split word list text into levels
///
/// Lines are trimmed, `#` lines are ignored and one or more blank lines
/// end a level. Empty levels are dropped.
pub fn parse_word_list(text: &str) -> Vec<Level> {
    let mut levels = Vec::new();
    let mut current = Level::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.starts_with('#') {
            continue;
        }
        if line.is_empty() {
            if !current.is_empty() {
                levels.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(line.to_string());
    }
    if !current.is_empty() {
        levels.push(current);
    }

    levels
}

/// Read and parse a word list file
pub fn read_word_list(path: &Path) -> Result<Vec<Level>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read word list: {}", path.display()))?;
    let levels = parse_word_list(&text);
    info!(
        "Loaded {} levels ({} lines) from {}",
        levels.len(),
        levels.iter().map(Vec::len).sum::<usize>(),
        path.display()
    );
    Ok(levels)
}
