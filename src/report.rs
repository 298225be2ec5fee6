//! Cross-referencing words with the sentences and files they occur in.

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use regex::RegexBuilder;
use serde::Serialize;

use crate::extract::Sentence;

/// One line of the report: a distinct word and where it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub word: String,
    pub count: u32,
    /// Originating files as an HTML fragment.
    #[serde(skip)]
    pub files: String,
    /// Matching sentences as an HTML fragment with the word in `<b>`.
    #[serde(skip)]
    pub sentences: String,
    #[serde(rename = "files")]
    pub file_list: Vec<String>,
    #[serde(rename = "sentences")]
    pub sentence_list: Vec<String>,
}

/// Rows ordered by descending count, then by word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReportRow> {
        self.rows.iter()
    }

    pub fn get(&self, word: &str) -> Option<&ReportRow> {
        self.rows.iter().find(|row| row.word == word)
    }

    /// Sum of all counts, i.e. the number of normalized words analyzed.
    pub fn total_words(&self) -> u64 {
        self.rows.iter().map(|row| u64::from(row.count)).sum()
    }
}

///Takes &[String] and counts the quantity of each word. Returns HashMap<String,u32>, with String being the word and u32 the quantity
/// # Example
/// ```
/// use word_report::count_words;
/// let words = vec!["one".to_string(), "two".to_string(), "two".to_string()];
/// let counted = count_words(&words);
/// assert_eq!(counted["one"], 1);
/// assert_eq!(counted["two"], 2);
/// ```
pub fn count_words(words: &[String]) -> HashMap<String, u32> {
    let mut frequency: HashMap<String, u32> = HashMap::new();
    for word in words {
        *frequency.entry(word.to_owned()).or_insert(0) += 1;
    }
    frequency
}

/// Builds the report for every word in `distinct`.
///
/// A sentence matches a word when its lowercased text contains the word as a
/// substring, so a stem like `run` also matches "running". `words` is only
/// used for counting; a distinct word absent from it gets a count of zero.
pub fn compile_report(
    distinct: &BTreeSet<String>,
    words: &[String],
    sentences: &[Sentence],
) -> Report {
    let frequency = count_words(words);
    let lowered: Vec<String> = sentences.iter().map(|s| s.text.to_lowercase()).collect();

    let mut rows: Vec<ReportRow> = distinct
        .par_iter()
        .map(|word| {
            let mut file_list: Vec<String> = Vec::new();
            let mut sentence_list: Vec<String> = Vec::new();
            for (sentence, lower) in sentences.iter().zip(&lowered) {
                if !lower.contains(word.as_str()) {
                    continue;
                }
                sentence_list.push(sentence.text.clone());
                if !file_list.contains(&sentence.file) {
                    file_list.push(sentence.file.clone());
                }
            }
            let files = escape_html(&file_list.join(", "));
            let sentences = highlight(&sentence_list.join("\n\n"), word);
            ReportRow {
                word: word.clone(),
                count: frequency.get(word).copied().unwrap_or(0),
                files,
                sentences,
                file_list,
                sentence_list,
            }
        })
        .collect();

    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    Report { rows }
}

/// Renders `text` as HTML with every case-insensitive occurrence of `word`
/// wrapped in `<b>`, keeping the original casing. Newlines become `<br>`.
pub fn highlight(text: &str, word: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    if !word.is_empty() {
        let re = RegexBuilder::new(&regex::escape(word))
            .case_insensitive(true)
            .build();
        if let Ok(re) = re {
            for m in re.find_iter(text) {
                out.push_str(&escape_html(&text[last..m.start()]));
                out.push_str("<b>");
                out.push_str(&escape_html(m.as_str()));
                out.push_str("</b>");
                last = m.end();
            }
        }
    }
    out.push_str(&escape_html(&text[last..]));
    out.replace('\n', "<br>")
}

/// Escapes the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str, file: &str) -> Sentence {
        Sentence {
            text: text.to_string(),
            file: file.to_string(),
        }
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_count() {
        let words = words(&["one", "two", "two", "three", "three", "three"]);
        let counted = count_words(&words);
        let mut words_map = HashMap::new();
        words_map.insert("one".to_string(), 1_u32);
        words_map.insert("two".to_string(), 2_u32);
        words_map.insert("three".to_string(), 3_u32);
        assert_eq!(counted, words_map);
    }

    #[test]
    fn highlight_is_case_insensitive_and_keeps_casing() {
        assert_eq!(
            highlight("Fox and fox and FOX", "fox"),
            "<b>Fox</b> and <b>fox</b> and <b>FOX</b>"
        );
    }

    #[test]
    fn highlight_escapes_markup_and_breaks_lines() {
        assert_eq!(
            highlight("a <cat> & cats\n\nnext", "cat"),
            "a &lt;<b>cat</b>&gt; &amp; <b>cat</b>s<br><br>next"
        );
    }

    #[test]
    fn highlight_does_not_touch_entities() {
        assert_eq!(highlight("salt & pepper", "amp"), "salt &amp; pepper");
    }

    #[test]
    fn report_rows_cross_reference_files_and_sentences() {
        let sentences = vec![
            sentence("The fox jumps.", "a.txt"),
            sentence("A lazy dog.", "a.txt"),
            sentence("Foxes are quick.", "b.txt"),
            sentence("The fox again.", "b.txt"),
        ];
        let all = words(&["fox", "jumps", "lazy", "dog", "foxes", "quick", "fox"]);
        let distinct: BTreeSet<String> = all.iter().cloned().collect();

        let report = compile_report(&distinct, &all, &sentences);
        assert_eq!(report.len(), 6);
        assert_eq!(report.total_words(), 7);

        let fox = &report.rows[0];
        assert_eq!(fox.word, "fox");
        assert_eq!(fox.count, 2);
        assert_eq!(fox.file_list, vec!["a.txt", "b.txt"]);
        assert_eq!(fox.files, "a.txt, b.txt");
        // substring match: "Foxes" contains "fox"
        assert_eq!(fox.sentence_list.len(), 3);
        assert_eq!(
            fox.sentences,
            "The <b>fox</b> jumps.<br><br><b>Fox</b>es are quick.<br><br>The <b>fox</b> again."
        );

        let dog = report.get("dog").unwrap();
        assert_eq!(dog.count, 1);
        assert_eq!(dog.file_list, vec!["a.txt"]);
    }

    #[test]
    fn rows_sorted_by_count_then_word() {
        let all = words(&["b", "a", "c", "c", "b", "c"]);
        let distinct: BTreeSet<String> = all.iter().cloned().collect();
        let report = compile_report(&distinct, &all, &[]);
        let order: Vec<(&str, u32)> = report
            .iter()
            .map(|r| (r.word.as_str(), r.count))
            .collect();
        assert_eq!(order, vec![("c", 3), ("b", 2), ("a", 1)]);

        let tied = words(&["pear", "apple", "fig"]);
        let distinct: BTreeSet<String> = tied.iter().cloned().collect();
        let report = compile_report(&distinct, &tied, &[]);
        let order: Vec<&str> = report.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(order, vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn word_without_sentences_has_empty_fragments() {
        let distinct: BTreeSet<String> = ["ghost".to_string()].into_iter().collect();
        let report = compile_report(&distinct, &words(&["ghost"]), &[sentence("Nothing.", "a")]);
        let row = &report.rows[0];
        assert_eq!(row.count, 1);
        assert!(row.files.is_empty());
        assert!(row.sentences.is_empty());
    }

    #[test]
    fn json_uses_plain_lists() {
        let sentences = vec![sentence("Hello <world>.", "x.txt")];
        let all = words(&["world"]);
        let distinct: BTreeSet<String> = all.iter().cloned().collect();
        let report = compile_report(&distinct, &all, &sentences);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json[0]["word"], "world");
        assert_eq!(json[0]["count"], 1);
        assert_eq!(json[0]["files"][0], "x.txt");
        assert_eq!(json[0]["sentences"][0], "Hello <world>.");
    }
}
