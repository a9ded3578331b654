//! Practice tokens: plain kana words and kanji with annotated readings.

use crate::romaji::to_hiragana;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

/// Whether a token is typed as displayed or through an annotated reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Annotated,
}

/// A kanji item from the annotated word list. Readings are stored in romaji;
/// kunyomi entries may carry `.` okurigana separators ("ta.beru").
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KanjiEntry {
    Single {
        kanji: String,
        #[serde(default)]
        onyomi: Vec<String>,
        #[serde(default)]
        kunyomi: Vec<String>,
    },
    Word {
        kanji: String,
        #[serde(default)]
        reading: Vec<String>,
    },
}

impl KanjiEntry {
    pub fn glyph(&self) -> &str {
        match self {
            KanjiEntry::Single { kanji, .. } => kanji,
            KanjiEntry::Word { kanji, .. } => kanji,
        }
    }

    /// True when at least one reading pool is usable as a match target.
    pub fn has_reading(&self) -> bool {
        match self {
            KanjiEntry::Single { onyomi, kunyomi, .. } => {
                onyomi.iter().chain(kunyomi).any(|r| !r.trim().is_empty())
            }
            KanjiEntry::Word { reading, .. } => reading.iter().any(|r| !r.trim().is_empty()),
        }
    }
}

/// One practice item shown to the user.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Plain(String),
    Kanji(KanjiEntry),
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Plain(_) => TokenKind::Plain,
            Token::Kanji(_) => TokenKind::Annotated,
        }
    }

    /// The string rendered to the user (the word itself, or the kanji glyph).
    pub fn display(&self) -> &str {
        match self {
            Token::Plain(word) => word,
            Token::Kanji(entry) => entry.glyph(),
        }
    }

    /// Pick the active reading for this token.
    ///
    /// Plain tokens are their own target. For a single kanji, one of the
    /// non-empty reading categories (onyomi/kunyomi) is chosen uniformly,
    /// then a reading uniformly within it; compound words choose uniformly
    /// among their readings. Returns None when no usable reading exists.
    pub fn select_reading<R: Rng>(&self, rng: &mut R) -> Option<String> {
        match self {
            Token::Plain(word) => {
                if word.is_empty() {
                    None
                } else {
                    Some(word.clone())
                }
            }
            Token::Kanji(KanjiEntry::Single { onyomi, kunyomi, .. }) => {
                let pools: Vec<&Vec<String>> = [onyomi, kunyomi]
                    .into_iter()
                    .filter(|p| p.iter().any(|r| !r.trim().is_empty()))
                    .collect();
                let pool = pools.choose(rng)?;
                let candidates: Vec<&String> =
                    pool.iter().filter(|r| !r.trim().is_empty()).collect();
                let raw = candidates.choose(rng)?;
                Some(normalize_reading(raw.as_str()))
            }
            Token::Kanji(KanjiEntry::Word { reading, .. }) => {
                let candidates: Vec<&String> =
                    reading.iter().filter(|r| !r.trim().is_empty()).collect();
                let raw = candidates.choose(rng)?;
                Some(normalize_reading(raw.as_str()))
            }
        }
    }
}

/// Strip okurigana separators and transliterate a stored reading to kana.
fn normalize_reading(raw: &str) -> String {
    to_hiragana(&raw.replace('.', ""))
}
