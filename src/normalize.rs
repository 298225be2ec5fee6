//! Word normalization: stop words, Snowball stemming and lemmatization.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use clap::ValueEnum;
use log::{info, warn};
use rust_stemmers::{Algorithm, Stemmer};
use stopwords::{Language, NLTK, Stopwords};

use crate::error::{Error, Result};

/// Languages with both a stop word list and a Snowball stemmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Lang {
    En,
    De,
    Fr,
    Es,
    It,
    Pt,
    Nl,
    Sv,
    Da,
    No,
    Fi,
    Ru,
    Hu,
    Ro,
    Tr,
}

impl Lang {
    fn algorithm(self) -> Algorithm {
        match self {
            Lang::En => Algorithm::English,
            Lang::De => Algorithm::German,
            Lang::Fr => Algorithm::French,
            Lang::Es => Algorithm::Spanish,
            Lang::It => Algorithm::Italian,
            Lang::Pt => Algorithm::Portuguese,
            Lang::Nl => Algorithm::Dutch,
            Lang::Sv => Algorithm::Swedish,
            Lang::Da => Algorithm::Danish,
            Lang::No => Algorithm::Norwegian,
            Lang::Fi => Algorithm::Finnish,
            Lang::Ru => Algorithm::Russian,
            Lang::Hu => Algorithm::Hungarian,
            Lang::Ro => Algorithm::Romanian,
            Lang::Tr => Algorithm::Turkish,
        }
    }

    fn stopword_language(self) -> Language {
        match self {
            Lang::En => Language::English,
            Lang::De => Language::German,
            Lang::Fr => Language::French,
            Lang::Es => Language::Spanish,
            Lang::It => Language::Italian,
            Lang::Pt => Language::Portuguese,
            Lang::Nl => Language::Dutch,
            Lang::Sv => Language::Swedish,
            Lang::Da => Language::Danish,
            Lang::No => Language::Norwegian,
            Lang::Fi => Language::Finnish,
            Lang::Ru => Language::Russian,
            Lang::Hu => Language::Hungarian,
            Lang::Ro => Language::Romanian,
            Lang::Tr => Language::Turkish,
        }
    }

    fn from_detected(lang: whatlang::Lang) -> Option<Lang> {
        use whatlang::Lang as W;
        Some(match lang {
            W::Eng => Lang::En,
            W::Deu => Lang::De,
            W::Fra => Lang::Fr,
            W::Spa => Lang::Es,
            W::Ita => Lang::It,
            W::Por => Lang::Pt,
            W::Nld => Lang::Nl,
            W::Swe => Lang::Sv,
            W::Dan => Lang::Da,
            W::Nob => Lang::No,
            W::Fin => Lang::Fi,
            W::Rus => Lang::Ru,
            W::Hun => Lang::Hu,
            W::Ron => Lang::Ro,
            W::Tur => Lang::Tr,
            _ => return None,
        })
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        f.write_str(&code)
    }
}

/// How the analysis language is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangMode {
    Force(Lang),
    Auto,
}

impl Default for LangMode {
    fn default() -> Self {
        LangMode::Force(Lang::En)
    }
}

impl LangMode {
    /// Resolves to a concrete language. `Auto` runs `whatlang` on `sample`
    /// and falls back to English when detection is unreliable or the
    /// detected language is unsupported.
    pub fn resolve(self, sample: &str) -> Lang {
        match self {
            LangMode::Force(lang) => lang,
            LangMode::Auto => match whatlang::detect(sample) {
                Some(info) if info.is_reliable() => match Lang::from_detected(info.lang()) {
                    Some(lang) => {
                        info!("detected language: {lang}");
                        lang
                    }
                    None => {
                        warn!(
                            "detected language {} is not supported, using English",
                            info.lang().eng_name()
                        );
                        Lang::En
                    }
                },
                _ => {
                    warn!("language detection failed, using English");
                    Lang::En
                }
            },
        }
    }
}

/// Lowercased stop word set.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Built-in NLTK list for `lang`.
    pub fn builtin(lang: Lang) -> Self {
        let words = match NLTK::stopwords(lang.stopword_language()) {
            Some(list) => list.iter().map(|w| w.to_lowercase()).collect(),
            None => {
                warn!("no built-in stop words for {lang}");
                HashSet::new()
            }
        };
        StopWords { words }
    }

    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    /// Adds the words of a stop word file: one per line, blank lines and
    /// `#` comments ignored.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        );
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lice", "louse"),
    ("data", "datum"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("phenomena", "phenomenon"),
    ("criteria", "criterion"),
    ("leaves", "leaf"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("calves", "calf"),
    ("loaves", "loaf"),
    ("thieves", "thief"),
    ("selves", "self"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("cacti", "cactus"),
    ("fungi", "fungus"),
    ("nuclei", "nucleus"),
    ("radii", "radius"),
    ("alumni", "alumnus"),
];

const MIN_LEMMA_LEN: usize = 3;

/// Reduces words to their dictionary form.
///
/// English uses a table of irregular plurals and noun suffix rules; a user
/// lemma map takes precedence over both and is the only source for other
/// languages.
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    map: HashMap<String, String>,
    rules: bool,
}

impl Lemmatizer {
    pub fn new(lang: Lang) -> Self {
        let rules = lang == Lang::En;
        let map = if rules {
            IRREGULAR_NOUNS
                .iter()
                .map(|(form, lemma)| (form.to_string(), lemma.to_string()))
                .collect()
        } else {
            HashMap::new()
        };
        Lemmatizer { map, rules }
    }

    /// Loads `form lemma` pairs (whitespace separated, one per line) on top of
    /// the built-in table.
    pub fn with_map_file(mut self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split_whitespace();
            match (cols.next(), cols.next()) {
                (Some(form), Some(lemma)) => {
                    self.map.insert(form.to_lowercase(), lemma.to_lowercase());
                }
                _ => warn!("{}: ignoring malformed lemma line {line:?}", path.display()),
            }
        }
        Ok(self)
    }

    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.map.get(word) {
            return lemma.clone();
        }
        if !self.rules {
            return word.to_string();
        }
        detach_noun_suffix(word).unwrap_or_else(|| word.to_string())
    }
}

fn detach_noun_suffix(word: &str) -> Option<String> {
    let candidate = if let Some(stem) = word.strip_suffix("sses") {
        format!("{stem}ss")
    } else if let Some(stem) = word.strip_suffix("ies") {
        format!("{stem}y")
    } else if word.ends_with("ches") || word.ends_with("shes") || word.ends_with("xes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    } else {
        word.strip_suffix('s')?.to_string()
    };
    (candidate.chars().count() >= MIN_LEMMA_LEN).then_some(candidate)
}

/// Stop word removal followed by optional stemming and lemmatization.
pub struct Normalizer {
    stop_words: StopWords,
    stemmer: Option<Stemmer>,
    lemmatizer: Option<Lemmatizer>,
}

impl Normalizer {
    pub fn new(stop_words: StopWords) -> Self {
        Normalizer {
            stop_words,
            stemmer: None,
            lemmatizer: None,
        }
    }

    pub fn with_stemming(mut self, lang: Lang) -> Self {
        self.stemmer = Some(Stemmer::create(lang.algorithm()));
        self
    }

    pub fn with_lemmatizer(mut self, lemmatizer: Lemmatizer) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    /// Normalizes one lowercased token, or `None` if it is a stop word.
    pub fn normalize_word(&self, token: &str) -> Option<String> {
        if self.stop_words.contains(token) {
            return None;
        }
        let mut word = match &self.stemmer {
            Some(stemmer) => stemmer.stem(token).into_owned(),
            None => token.to_string(),
        };
        if let Some(lemmatizer) = &self.lemmatizer {
            word = lemmatizer.lemmatize(&word);
        }
        Some(word)
    }

    pub fn normalize<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<String> {
        tokens
            .iter()
            .filter_map(|t| self.normalize_word(t.as_ref()))
            .collect()
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("stop_words", &self.stop_words.len())
            .field("stemming", &self.stemmer.is_some())
            .field("lemmatizer", &self.lemmatizer)
            .finish()
    }
}
