use crate::WORD_LENGTH;
use crate::error::{Result, SolverError};
use crate::info_log;
use crate::word::Word;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const EMBEDDED_WORDLIST: &str = include_str!("resources/palavras.txt");

/// Lowercase `text` and strip diacritics (`"Avião"` becomes `"aviao"`).
#[must_use]
pub fn normalize_word(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn parse_line(line: &str) -> Option<Word> {
    let normalized = normalize_word(line);
    if normalized.chars().count() != WORD_LENGTH {
        return None;
    }
    Word::parse(&normalized).ok()
}

/// The non-empty, sorted, duplicate-free set of words a secret is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    words: Vec<Word>,
}

impl Corpus {
    pub fn from_words<I: IntoIterator<Item = Word>>(words: I) -> Result<Self> {
        Self::collect(words, "word list")
    }

    fn collect<I: IntoIterator<Item = Word>>(words: I, origin: &str) -> Result<Self> {
        let unique: BTreeSet<Word> = words.into_iter().collect();
        if unique.is_empty() {
            return Err(SolverError::EmptyCorpus {
                origin: origin.to_string(),
            });
        }
        Ok(Self {
            words: unique.into_iter().collect(),
        })
    }

    pub fn load_from_str(data: &str) -> Result<Self> {
        Self::collect(data.lines().filter_map(parse_line), "word list")
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let io_error = |source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        let reader = BufReader::new(file);
        let mut words = Vec::new();
        for line in reader.lines() {
            if let Some(word) = parse_line(&line.map_err(io_error)?) {
                words.push(word);
            }
        }
        let corpus = Self::collect(words, &format!("'{}'", path.display()))?;
        info_log!("Loaded {} words from '{}'", corpus.len(), path.display());
        Ok(corpus)
    }

    pub fn embedded() -> Result<Self> {
        Self::collect(
            EMBEDDED_WORDLIST.lines().filter_map(parse_line),
            "embedded word list",
        )
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.binary_search(word).is_ok()
    }

    /// Alphabetically first word; the corpus is never empty.
    #[must_use]
    pub fn first(&self) -> Word {
        self.words[0]
    }

    /// Draw a secret uniformly at random.
    pub fn choose_secret<R: Rng + ?Sized>(&self, rng: &mut R) -> Word {
        self.words.choose(rng).copied().unwrap_or_else(|| self.first())
    }
}
