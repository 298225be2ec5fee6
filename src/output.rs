//! Writing reports to disk and handing HTML pages to the browser.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use csv::WriterBuilder;
use log::info;

use crate::error::{Error, Result};
use crate::render::{HtmlOptions, render_html};
use crate::report::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Html,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

/// Neutralizes spreadsheet formulas by prefixing risky cells with `'`.
///
/// Cells that already start with `'` are left alone.
pub fn csv_safe_cell(cell: String) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{cell}"),
        _ => cell,
    }
}

/// File-name-safe stem of `path`, used to name outputs.
pub fn stem_for(path: &Path) -> String {
    let raw = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem: String = raw
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "report".to_string()
    } else {
        stem
    }
}

/// `<dir>/<stem>_<YYYYmmdd_HHMMSS>_report.<ext>`
pub fn timestamped_path(dir: &Path, stem: &str, format: ExportFormat) -> PathBuf {
    let local: DateTime<Local> = Local::now();
    let name = format!(
        "{stem}_{}_report.{}",
        local.format("%Y%m%d_%H%M%S"),
        format.extension()
    );
    dir.join(name)
}

///save file to path. Return result.
pub fn save_file(content: &str, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    Ok(path.to_path_buf())
}

/// Writes the page to `target`, or to a fresh `.html` temp file that is kept
/// after the process exits.
pub fn write_html(html: &str, target: Option<&Path>) -> Result<PathBuf> {
    let path = match target {
        Some(path) => save_file(html, path)?,
        None => {
            let mut file = tempfile::Builder::new()
                .prefix("word_report_")
                .suffix(".html")
                .tempfile()
                .map_err(|e| Error::io(std::env::temp_dir(), e))?;
            let path = file.path().to_path_buf();
            file.write_all(html.as_bytes())
                .map_err(|e| Error::io(&path, e))?;
            file.keep().map_err(|e| Error::io(&path, e.error))?;
            path
        }
    };
    info!("wrote {}", path.display());
    Ok(path)
}

pub fn open_in_browser(path: &Path) -> Result<()> {
    webbrowser::open(&path.to_string_lossy()).map_err(|source| Error::Browser {
        path: path.to_path_buf(),
        source,
    })
}

/// Serializes the report into `writer`.
///
/// In the delimited formats files are joined with `; ` and sentences with
/// ` | `. HTML uses the default page options.
pub fn write_report<W: Write>(report: &Report, format: ExportFormat, mut writer: W) -> Result<()> {
    match format {
        ExportFormat::Html => {
            let html = render_html(report, &HtmlOptions::default());
            writer
                .write_all(html.as_bytes())
                .map_err(|e| Error::io("<html output>", e))?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(writer, report)?;
        }
        ExportFormat::Csv | ExportFormat::Tsv => {
            let delimiter = if format == ExportFormat::Tsv { b'\t' } else { b',' };
            let mut wtr = WriterBuilder::new().delimiter(delimiter).from_writer(writer);
            wtr.write_record(["word", "count", "files", "sentences"])?;
            for row in report.iter() {
                wtr.write_record([
                    csv_safe_cell(row.word.clone()),
                    row.count.to_string(),
                    csv_safe_cell(row.file_list.join("; ")),
                    csv_safe_cell(row.sentence_list.join(" | ")),
                ])?;
            }
            wtr.flush().map_err(csv::Error::from)?;
        }
    }
    Ok(())
}

/// Exports the report in `format` to `path`.
pub fn export_report(report: &Report, format: ExportFormat, path: &Path) -> Result<PathBuf> {
    let mut buf = Vec::new();
    write_report(report, format, &mut buf)?;
    let content = String::from_utf8_lossy(&buf);
    let path = save_file(&content, path)?;
    info!("exported {} rows to {}", report.len(), path.display());
    Ok(path)
}
