#![forbid(unsafe_code)]
//! # word_report CLI
//!
//! Command-line interface for the `word_report` crate. Builds one word
//! frequency report over all given files and shows it as a sortable HTML
//! table in the default browser, or exports it as CSV, TSV or JSON.
//!
//! ## Example
//! ```bash
//! cargo run --release -- path/to/texts --stem --stop-word chapter
//! ```
//!
//! See `--help` for all available options.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use log::{error, info, warn};
use word_report::{
    ExportFormat, HtmlOptions, Lang, LangMode, ReportOptions, RunReport, build_report,
    export_report, open_in_browser, print_failed_files, render_html, stem_for, timestamped_path,
    write_cloud_text, write_html,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Files or directories to analyze (directories are searched for .txt files)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Language for stop words and stemming
    #[arg(long, value_enum, default_value_t = Lang::En, conflicts_with = "detect_lang")]
    lang: Lang,

    /// Detect the language from the text instead of using --lang
    #[arg(long, default_value_t = false)]
    detect_lang: bool,

    /// Additional stop word (repeatable)
    #[arg(long = "stop-word", value_name = "WORD")]
    stop_words: Vec<String>,

    /// Optional path to additional stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Reduce words to their Snowball stem
    #[arg(long, default_value_t = false)]
    stem: bool,

    /// Reduce words to their dictionary form (applied after stemming)
    #[arg(long, default_value_t = false)]
    lemmatize: bool,

    /// File with `form lemma` pairs overriding the built-in lemmatizer
    #[arg(long, requires = "lemmatize")]
    lemma_map: Option<PathBuf>,

    /// Output format (html, csv, tsv, json)
    #[arg(long, value_enum, default_value_t = ExportFormat::Html)]
    export_format: ExportFormat,

    /// Output file. HTML defaults to a temp file, other formats to a
    /// timestamped file in --out-dir
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Directory for timestamped exports
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Rows per page in the HTML table
    #[arg(long, default_value_t = word_report::render::DEFAULT_PAGE_LENGTH)]
    page_length: usize,

    /// Title of the HTML page
    #[arg(long, default_value = word_report::render::DEFAULT_TITLE)]
    title: String,

    /// Also write word-cloud input text (each word repeated by its count) to this file
    #[arg(long, value_name = "FILE")]
    cloud: Option<PathBuf>,

    /// Do not open the HTML report in the browser
    #[arg(long, default_value_t = false)]
    no_open: bool,
}

impl Cli {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            lang: if self.detect_lang {
                LangMode::Auto
            } else {
                LangMode::Force(self.lang)
            },
            extra_stop_words: self.stop_words.clone(),
            stop_words_file: self.stopwords.clone(),
            stemming: self.stem,
            lemmatizing: self.lemmatize,
            lemma_map: self.lemma_map.clone(),
        }
    }

    fn output_stem(&self, run: &RunReport) -> String {
        match run.documents.as_slice() {
            [single] => stem_for(single),
            _ => "combined".to_string(),
        }
    }
}

fn run(cli: &Cli) -> word_report::Result<()> {
    let run = build_report(&cli.paths, &cli.report_options())?;
    print_failed_files(&run.failed_files);
    info!(
        "{} distinct words from {} document(s), language {}",
        run.report.len(),
        run.documents.len(),
        run.lang
    );

    if let Some(path) = &cli.cloud {
        let written = write_cloud_text(&run.report, path)?;
        println!("Word-cloud text: {}", written.display());
    }

    match cli.export_format {
        ExportFormat::Html => {
            let options = HtmlOptions {
                title: cli.title.clone(),
                page_length: cli.page_length,
            };
            let html = render_html(&run.report, &options);
            let path = write_html(&html, cli.output.as_deref())?;
            println!("Report: {}", path.display());
            if !cli.no_open {
                if let Err(e) = open_in_browser(&path) {
                    warn!("{e}");
                }
            }
        }
        format => {
            let path = match &cli.output {
                Some(path) => path.clone(),
                None => timestamped_path(Path::new(&cli.out_dir), &cli.output_stem(&run), format),
            };
            let written = export_report(&run.report, format, &path)?;
            println!("Report: {}", written.display());
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!("Error: {}", e);
        process::exit(1);
    }
}
