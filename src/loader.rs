//! Reading input documents from disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A loaded input file. `label` is what the report lists under "files".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub label: String,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Document {
            path,
            label,
            text: text.into(),
        }
    }
}

/// Reads the full contents of `path`, which must be UTF-8.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|_| Error::Utf8 {
        path: path.to_path_buf(),
    })
}

/// Collects the input files below `path`.
///
/// A file yields itself regardless of extension. A directory is walked
/// recursively and yields every `.txt` file, sorted by path. Paths that do
/// not exist yield nothing.
pub fn collect_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    if !path.is_dir() {
        warn!("{} does not exist", path.display());
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Loads every path, keeping going past unreadable files.
///
/// Returns the loaded documents in input order together with the files that
/// failed and why.
pub fn load_documents(paths: &[PathBuf]) -> (Vec<Document>, Vec<(PathBuf, String)>) {
    let mut documents = Vec::with_capacity(paths.len());
    let mut failed = Vec::new();
    for path in paths {
        match read_text(path) {
            Ok(text) => {
                debug!("loaded {} ({} bytes)", path.display(), text.len());
                documents.push(Document::new(path.clone(), text));
            }
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                failed.push((path.clone(), e.to_string()));
            }
        }
    }
    (documents, failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_txt_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip me").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.TXT"), "c").unwrap();

        let files = collect_files(dir.path());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.TXT"]);
    }

    #[test]
    fn single_file_is_taken_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("input.text");
        fs::write(&p, "hello").unwrap();
        assert_eq!(collect_files(&p), vec![p]);
    }

    #[test]
    fn missing_path_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_files(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn invalid_utf8_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.txt");
        fs::write(&good, "Fine text.").unwrap();
        fs::write(&bad, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        assert!(matches!(read_text(&bad), Err(Error::Utf8 { .. })));

        let (docs, failed) = load_documents(&[good.clone(), bad.clone()]);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path, good);
        assert_eq!(docs[0].text, "Fine text.");
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, bad);
    }
}
