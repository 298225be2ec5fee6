//! Sentence and word extraction.
//!
//! Segmentation follows the Unicode text segmentation rules (UAX #29) as
//! implemented by `unicode-segmentation`; this module only filters and
//! aligns the results.

use std::collections::BTreeSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::loader::Document;
use crate::normalize::Normalizer;

/// A sentence together with the label of the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub text: String,
    pub file: String,
}

/// Result of processing a single text.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Distinct normalized words.
    pub distinct: BTreeSet<String>,
    /// All normalized words in text order, with repetition.
    pub words: Vec<String>,
    pub sentences: Vec<String>,
}

/// Splits `text` into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Splits `text` into lowercased, purely alphabetic word tokens.
///
/// Tokens containing digits, punctuation or apostrophes are dropped
/// entirely rather than cleaned.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_word_bounds()
        .filter(|token| !token.is_empty() && token.chars().all(char::is_alphabetic))
        .map(str::to_lowercase)
        .collect()
}

pub fn process_text(text: &str, normalizer: &Normalizer) -> Extraction {
    let sentences = split_sentences(text);
    let words = normalizer.normalize(&tokenize(text));
    let distinct = words.iter().cloned().collect();
    Extraction {
        distinct,
        words,
        sentences,
    }
}

/// All documents of a run, flattened into parallel sentence/file arrays.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub distinct: BTreeSet<String>,
    pub words: Vec<String>,
    pub sentences: Vec<Sentence>,
}

impl Corpus {
    pub fn from_documents(documents: &[Document], normalizer: &Normalizer) -> Self {
        let mut corpus = Corpus::default();
        for doc in documents {
            corpus.push(doc, normalizer);
        }
        corpus
    }

    pub fn push(&mut self, doc: &Document, normalizer: &Normalizer) {
        let Extraction {
            distinct,
            words,
            sentences,
        } = process_text(&doc.text, normalizer);
        self.distinct.extend(distinct);
        self.words.extend(words);
        self.sentences.extend(sentences.into_iter().map(|text| Sentence {
            text,
            file: doc.label.clone(),
        }));
    }
}
