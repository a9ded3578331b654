//! Target providers: where practice tokens come from.
//!
//! Two conforming providers cover the two game modes; the session engine is
//! written once against the `TargetProvider` trait. Load failures are
//! terminal for the session instance: the caller surfaces them and leaves the
//! session unstartable, there is no retry.

use crate::token::{KanjiEntry, Token};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

static DATA_DIR: Dir = include_dir!("src/data");

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse word list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("embedded word list `{0}` not found")]
    Missing(String),
}

/// Invalid session parameters, rejected at construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("initial time must be at least 1 second")]
    ZeroTime,
    #[error("batch size must be at least 1")]
    ZeroBatch,
}

pub trait TargetProvider {
    fn load_pool(&self) -> Result<Vec<Token>, PoolError>;
}

#[derive(Clone, Debug)]
enum Source {
    Embedded(&'static str),
    File(PathBuf),
}

impl Source {
    fn read(&self) -> Result<String, PoolError> {
        match self {
            Source::Embedded(name) => {
                let file = DATA_DIR
                    .get_file(name)
                    .ok_or_else(|| PoolError::Missing(name.to_string()))?;
                file.contents_utf8()
                    .map(str::to_owned)
                    .ok_or_else(|| PoolError::Missing(name.to_string()))
            }
            Source::File(path) => Ok(std::fs::read_to_string(path)?),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
struct WordList {
    #[allow(dead_code)]
    name: String,
    #[allow(dead_code)]
    size: u32,
    words: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
struct KanjiList {
    #[allow(dead_code)]
    name: String,
    #[allow(dead_code)]
    size: u32,
    entries: Vec<KanjiEntry>,
}

/// Plain hiragana words, typed as displayed.
#[derive(Clone, Debug)]
pub struct HiraganaProvider {
    source: Source,
}

impl HiraganaProvider {
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded("hiragana.json"),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
        }
    }
}

impl TargetProvider for HiraganaProvider {
    fn load_pool(&self) -> Result<Vec<Token>, PoolError> {
        let raw = self.source.read()?;
        let list: WordList = serde_json::from_str(&raw)?;
        Ok(list
            .words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .map(Token::Plain)
            .collect())
    }
}

/// Kanji glyphs with annotated readings.
#[derive(Clone, Debug)]
pub struct KanjiProvider {
    source: Source,
}

impl KanjiProvider {
    pub fn embedded() -> Self {
        Self {
            source: Source::Embedded("kanji.json"),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: Source::File(path.as_ref().to_path_buf()),
        }
    }
}

impl TargetProvider for KanjiProvider {
    fn load_pool(&self) -> Result<Vec<Token>, PoolError> {
        let raw = self.source.read()?;
        let list: KanjiList = serde_json::from_str(&raw)?;
        Ok(list
            .entries
            .into_iter()
            // entries with no usable reading can never be matched; drop them
            // here so the reconciler never sees an empty target
            .filter(|e| !e.glyph().is_empty() && e.has_reading())
            .map(Token::Kanji)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_hiragana_pool_loads() {
        let pool = HiraganaProvider::embedded().load_pool().unwrap();
        assert!(!pool.is_empty());
        assert!(pool.iter().all(|t| matches!(t, Token::Plain(w) if !w.is_empty())));
    }

    #[test]
    fn embedded_kanji_pool_loads() {
        let pool = KanjiProvider::embedded().load_pool().unwrap();
        assert!(!pool.is_empty());
        for token in &pool {
            match token {
                Token::Kanji(entry) => assert!(entry.has_reading()),
                Token::Plain(_) => panic!("kanji provider produced a plain token"),
            }
        }
    }

    #[test]
    fn file_provider_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"{{"name": "test", "size": 3, "words": ["ねこ", "  ", "いぬ"]}}"#
        )
        .unwrap();

        let pool = HiraganaProvider::from_path(&path).load_pool().unwrap();
        assert_eq!(
            pool,
            vec![
                Token::Plain("ねこ".to_string()),
                Token::Plain("いぬ".to_string())
            ]
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = HiraganaProvider::from_path("/nonexistent/words.json")
            .load_pool()
            .unwrap_err();
        assert!(matches!(err, PoolError::Io(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not json").unwrap();

        let err = HiraganaProvider::from_path(&path).load_pool().unwrap_err();
        assert!(matches!(err, PoolError::Parse(_)));
    }

    #[test]
    fn unreadable_kanji_entries_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kanji.json");
        std::fs::write(
            &path,
            r#"{"name": "test", "size": 2, "entries": [
                {"type": "single", "kanji": "水", "kunyomi": ["mizu"]},
                {"type": "single", "kanji": "謎"}
            ]}"#,
        )
        .unwrap();

        let pool = KanjiProvider::from_path(&path).load_pool().unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].display(), "水");
    }
}
