//! Static HTML page around the report table.
//!
//! Sorting and pagination happen client-side in jQuery DataTables, loaded
//! from its CDN.

use std::fmt::Write as _;

use crate::report::{Report, escape_html};

pub const DEFAULT_PAGE_LENGTH: usize = 5;
pub const DEFAULT_TITLE: &str = "Word frequency report";

const JQUERY_JS: &str = "https://ajax.googleapis.com/ajax/libs/jquery/2.2.2/jquery.min.js";
const DATATABLES_CSS: &str = "https://cdn.datatables.net/1.10.16/css/jquery.dataTables.css";
const DATATABLES_JS: &str = "https://cdn.datatables.net/1.10.16/js/jquery.dataTables.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    pub title: String,
    /// Rows per page in the DataTables widget.
    pub page_length: usize,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            title: DEFAULT_TITLE.to_string(),
            page_length: DEFAULT_PAGE_LENGTH,
        }
    }
}

/// Renders the table body only.
pub fn render_table(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("<table border=\"1\" class=\"dataframe display\">\n");
    out.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
    for header in ["words", "count", "files", "sentences"] {
        let _ = writeln!(out, "      <th>{header}</th>");
    }
    out.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in report.iter() {
        let _ = write!(
            out,
            "    <tr>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n      <td>{}</td>\n    </tr>\n",
            escape_html(&row.word),
            row.count,
            row.files,
            row.sentences
        );
    }
    out.push_str("  </tbody>\n</table>");
    out
}

/// Renders a complete page that turns the report table into a sortable,
/// paginated DataTable ordered by count.
pub fn render_html(report: &Report, options: &HtmlOptions) -> String {
    let page_length = options.page_length.max(1);
    format!(
        r#"<!doctype html>
<html>
    <head>
        <meta http-equiv="Content-type" content="text/html; charset=utf-8">
        <title>{title}</title>
        <script type="text/javascript" src="{JQUERY_JS}"></script>
        <link rel="stylesheet" type="text/css" href="{DATATABLES_CSS}">
        <script type="text/javascript" src="{DATATABLES_JS}"></script>
    </head>
    <body>
        <h1>{title}</h1>
{table}
        <script type="text/javascript">
            $(document).ready(function(){{$('table').DataTable({{"pageLength": {page_length}, "order": [[1, "desc"]]}});}});
        </script>
    </body>
</html>
"#,
        title = escape_html(&options.title),
        table = render_table(report),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportRow;

    fn sample() -> Report {
        Report {
            rows: vec![ReportRow {
                word: "fox".to_string(),
                count: 2,
                files: "a.txt".to_string(),
                sentences: "The <b>fox</b>.".to_string(),
                file_list: vec!["a.txt".to_string()],
                sentence_list: vec!["The fox.".to_string()],
            }],
        }
    }

    #[test]
    fn page_loads_datatables_and_sets_page_length() {
        let html = render_html(&sample(), &HtmlOptions::default());
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("charset=utf-8"));
        assert!(html.contains("jquery.dataTables.js"));
        assert!(html.contains("jquery.dataTables.css"));
        assert!(html.contains(r#""pageLength": 5"#));
        assert!(html.contains("<title>Word frequency report</title>"));
    }

    #[test]
    fn table_keeps_fragments_and_escapes_words() {
        let mut report = sample();
        report.rows[0].word = "<x>".to_string();
        let table = render_table(&report);
        assert!(table.contains("<th>sentences</th>"));
        assert!(table.contains("<td>&lt;x&gt;</td>"));
        assert!(table.contains("<td>2</td>"));
        assert!(table.contains("<td>The <b>fox</b>.</td>"));
    }

    #[test]
    fn title_is_escaped_and_page_length_clamped() {
        let options = HtmlOptions {
            title: "Tom & Jerry".to_string(),
            page_length: 0,
        };
        let html = render_html(&Report::default(), &options);
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains(r#""pageLength": 1"#));
        assert!(html.contains("<tbody>\n  </tbody>"));
    }
}
