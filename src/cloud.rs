//! Flat text input for external word-cloud renderers.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::output::save_file;
use crate::report::Report;

/// Expands the report back into text: each word repeated `count` times,
/// in report order, every run followed by a single space.
///
/// # Example
/// ```
/// use word_report::{Report, ReportRow, words_for_cloud};
/// let row = |word: &str, count| ReportRow {
///     word: word.to_string(),
///     count,
///     files: String::new(),
///     sentences: String::new(),
///     file_list: Vec::new(),
///     sentence_list: Vec::new(),
/// };
/// let report = Report { rows: vec![row("fox", 3), row("dog", 1)] };
/// assert_eq!(words_for_cloud(&report), "fox fox fox dog ");
/// ```
pub fn words_for_cloud(report: &Report) -> String {
    let mut text = String::new();
    for row in report.iter() {
        let run = vec![row.word.as_str(); row.count as usize].join(" ");
        text.push_str(&run);
        text.push(' ');
    }
    text
}

pub fn write_cloud_text(report: &Report, path: &Path) -> Result<PathBuf> {
    save_file(&words_for_cloud(report), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportRow;

    fn row(word: &str, count: u32) -> ReportRow {
        ReportRow {
            word: word.to_string(),
            count,
            files: String::new(),
            sentences: String::new(),
            file_list: Vec::new(),
            sentence_list: Vec::new(),
        }
    }

    #[test]
    fn zero_count_rows_leave_a_lone_space() {
        let report = Report {
            rows: vec![row("a", 2), row("b", 0)],
        };
        assert_eq!(words_for_cloud(&report), "a a  ");
    }

    #[test]
    fn empty_report_gives_empty_text() {
        assert_eq!(words_for_cloud(&Report::default()), "");
    }

    #[test]
    fn cloud_text_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("cloud.txt");
        let report = Report {
            rows: vec![row("sun", 2)],
        };
        write_cloud_text(&report, &p).unwrap();
        assert_eq!(std::fs::read_to_string(p).unwrap(), "sun sun ");
    }
}
