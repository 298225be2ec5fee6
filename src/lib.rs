//! # word_report
//!
//! Word frequency reports that cross-reference every distinct word with the
//! sentences and files it occurs in.
//!
//! Text is split into sentences and words, stop words are removed and the
//! remaining words are optionally stemmed (Snowball) and/or lemmatized. The
//! resulting [`Report`] has one row per word, sorted by frequency, and can be
//! rendered as a sortable HTML table, exported as CSV/TSV/JSON or expanded
//! into word-cloud input text.
//!
//! ## Example
//! ```
//! use word_report::{ReportOptions, analyze_text};
//!
//! let report = analyze_text("The fox ran. A fox and a dog.", &ReportOptions::default()).unwrap();
//! let fox = &report.rows[0];
//! assert_eq!(fox.word, "fox");
//! assert_eq!(fox.count, 2);
//! assert_eq!(fox.sentence_list.len(), 2);
//! ```

use std::path::PathBuf;

use log::{debug, info};

pub mod cloud;
pub mod error;
pub mod extract;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod render;
pub mod report;

pub use cloud::{words_for_cloud, write_cloud_text};
pub use error::{Error, Result};
pub use extract::{Corpus, Extraction, Sentence, process_text, split_sentences, tokenize};
pub use loader::{Document, collect_files, load_documents, read_text};
pub use normalize::{Lang, LangMode, Lemmatizer, Normalizer, StopWords};
pub use output::{
    ExportFormat, csv_safe_cell, export_report, open_in_browser, save_file, stem_for,
    timestamped_path, write_html, write_report,
};
pub use render::{HtmlOptions, render_html, render_table};
pub use report::{Report, ReportRow, compile_report, count_words, escape_html, highlight};

/// How words are filtered and normalized.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub lang: LangMode,
    /// Stop words added to the built-in list.
    pub extra_stop_words: Vec<String>,
    /// File with more stop words, one per line.
    pub stop_words_file: Option<PathBuf>,
    pub stemming: bool,
    pub lemmatizing: bool,
    /// `form lemma` pairs that override the built-in lemmatizer.
    pub lemma_map: Option<PathBuf>,
}

impl ReportOptions {
    /// Builds the normalizer for an already resolved language.
    pub fn normalizer(&self, lang: Lang) -> Result<Normalizer> {
        let mut stop_words = StopWords::builtin(lang);
        stop_words.extend(&self.extra_stop_words);
        if let Some(path) = &self.stop_words_file {
            stop_words.extend_from_file(path)?;
        }
        debug!("{} stop words for {lang}", stop_words.len());

        let mut normalizer = Normalizer::new(stop_words);
        if self.stemming {
            normalizer = normalizer.with_stemming(lang);
        }
        if self.lemmatizing {
            let mut lemmatizer = Lemmatizer::new(lang);
            if let Some(path) = &self.lemma_map {
                lemmatizer = lemmatizer.with_map_file(path)?;
            }
            normalizer = normalizer.with_lemmatizer(lemmatizer);
        }
        Ok(normalizer)
    }
}

/// Outcome of a run over files on disk.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub report: Report,
    /// Files that were found but could not be read, with the reason.
    pub failed_files: Vec<(PathBuf, String)>,
    /// Files that went into the report, in order.
    pub documents: Vec<PathBuf>,
    pub lang: Lang,
}

/// Compiles one report over all `documents`.
pub fn analyze_documents(documents: &[Document], options: &ReportOptions) -> Result<(Report, Lang)> {
    let sample: String = documents
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let lang = options.lang.resolve(&sample);
    let normalizer = options.normalizer(lang)?;

    let corpus = Corpus::from_documents(documents, &normalizer);
    debug!(
        "{} sentences, {} words, {} distinct",
        corpus.sentences.len(),
        corpus.words.len(),
        corpus.distinct.len()
    );
    let report = compile_report(&corpus.distinct, &corpus.words, &corpus.sentences);
    Ok((report, lang))
}

/// Report for a single in-memory text. Sentences are attributed to `<text>`.
pub fn analyze_text(text: &str, options: &ReportOptions) -> Result<Report> {
    let doc = Document::new("<text>", text);
    analyze_documents(std::slice::from_ref(&doc), options).map(|(report, _)| report)
}

/// Collects, loads and analyzes everything below `paths` as one corpus.
///
/// Unreadable files are skipped and listed in [`RunReport::failed_files`];
/// the run fails with [`Error::NoDocuments`] only if nothing could be read.
pub fn build_report(paths: &[PathBuf], options: &ReportOptions) -> Result<RunReport> {
    let files: Vec<PathBuf> = paths.iter().flat_map(|p| collect_files(p)).collect();
    info!("analyzing {} file(s)", files.len());

    let (documents, failed_files) = load_documents(&files);
    if documents.is_empty() {
        return Err(Error::NoDocuments);
    }
    let (report, lang) = analyze_documents(&documents, options)?;
    Ok(RunReport {
        report,
        failed_files,
        documents: documents.into_iter().map(|d| d.path).collect(),
        lang,
    })
}

/// Prints skipped files to stderr.
pub fn print_failed_files(failed: &[(PathBuf, String)]) {
    if failed.is_empty() {
        return;
    }
    eprintln!("Warnings ({} file(s) skipped):", failed.len());
    for (path, reason) in failed {
        eprintln!("  {}: {}", path.display(), reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_from_options_are_applied() {
        let options = ReportOptions {
            extra_stop_words: vec!["Fox".to_string()],
            ..ReportOptions::default()
        };
        let report = analyze_text("The fox and the dog.", &options).unwrap();
        assert!(report.get("fox").is_none());
        assert!(report.get("the").is_none());
        assert_eq!(report.get("dog").unwrap().count, 1);
    }

    #[test]
    fn stemming_merges_inflections() {
        let options = ReportOptions {
            stemming: true,
            ..ReportOptions::default()
        };
        let report = analyze_text("Running runners run. The runner runs.", &options).unwrap();
        let run = report.get("run").unwrap();
        assert_eq!(run.count, 3);
        assert_eq!(run.sentence_list.len(), 2);
        assert!(report.get("running").is_none());
    }

    #[test]
    fn lemmatizing_without_stemming() {
        let options = ReportOptions {
            lemmatizing: true,
            ..ReportOptions::default()
        };
        let report = analyze_text("Cities grow. A city sleeps.", &options).unwrap();
        assert_eq!(report.get("city").unwrap().count, 2);
        assert!(report.get("cities").is_none());
    }

    #[test]
    fn missing_stop_word_file_is_an_error() {
        let options = ReportOptions {
            stop_words_file: Some(PathBuf::from("/definitely/not/here.txt")),
            ..ReportOptions::default()
        };
        assert!(matches!(
            analyze_text("words", &options),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn empty_input_is_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_report(&[dir.path().to_path_buf()], &ReportOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NoDocuments));
    }
}
