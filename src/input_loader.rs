use std::fs;
use std::path::Path;
use log::info;
use crate::error::{Error, Result};

const DISABLED_MARKER: char = '#';

/// One search term from the keyword file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub term: String,
    pub enabled: bool,
}

impl Keyword {
    /// Parses a trimmed, non-empty line. A leading `#` disables the term.
    pub fn parse(line: &str) -> Self {
        match line.strip_prefix(DISABLED_MARKER) {
            Some(rest) => Keyword { term: rest.trim().to_string(), enabled: false },
            None => Keyword { term: line.to_string(), enabled: true },
        }
    }
}

/// Reads the keyword file in order. Blank lines are dropped, nothing is deduplicated.
pub fn load_keywords<P: AsRef<Path>>(filename: P) -> Result<Vec<Keyword>> {
    let path = filename.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::KeywordFile {
        path: path.to_path_buf(),
        source,
    })?;

    let keywords = parse_keywords(&content);
    let enabled = keywords.iter().filter(|k| k.enabled).count();
    info!(
        "Loaded {} keywords from {:?} ({} active, {} disabled)",
        keywords.len(),
        path,
        enabled,
        keywords.len() - enabled
    );
    Ok(keywords)
}

pub fn parse_keywords(content: &str) -> Vec<Keyword> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Keyword::parse)
        .collect()
}
