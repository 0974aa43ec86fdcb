//! Local sheet sources.
//!
//! - [`JsonDocumentSource`]: one JSON file shaped like [`RawDocument`].
//! - [`CsvDirectorySource`]: a directory of `.csv`/`.tsv` exports, one worksheet per
//!   file, titled by the file stem.
//!
//! Both decode UTF-8 and UTF-16 with a byte order mark, which is what spreadsheet
//! exports tend to produce.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    error::Error,
    traits::SheetSource,
    types::{RawDocument, RawRow, RawTable},
};

/// Opens the source matching `path`: a directory is read as CSV/TSV exports,
/// anything else as a JSON document.
pub fn open_source(path: impl AsRef<Path>) -> Result<Box<dyn SheetSource + Send + Sync>, Error> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(Box::new(CsvDirectorySource::new(path)))
    } else if path.is_file() {
        Ok(Box::new(JsonDocumentSource::new(path)))
    } else {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("sheet source not found: {}", path.display()),
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonDocumentSource {
    path: PathBuf,
}

impl JsonDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SheetSource for JsonDocumentSource {
    fn fetch(&self) -> Result<RawDocument, Error> {
        let content = read_decoded(&self.path)?;
        parse_json_document(&content)
            .map_err(|e| Error::DocumentParse(format!("{}: {}", self.path.display(), e)))
    }
}

/// Parses a JSON sheet document (`{"worksheets":[{"title":..,"rows":[[..]]}]}`).
pub fn parse_json_document(content: &str) -> Result<RawDocument, Error> {
    serde_json::from_str(content).map_err(|e| Error::DocumentParse(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDirectorySource {
    directory: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The exported files, sorted by file name.
    fn table_files(&self) -> Result<Vec<(PathBuf, u8)>, Error> {
        let mut files = Vec::new();
        for dir_entry in std::fs::read_dir(&self.directory)? {
            let path = dir_entry?.path();
            if !path.is_file() {
                continue;
            }
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            match extension.as_deref() {
                Some("csv") => files.push((path, b',')),
                Some("tsv") => files.push((path, b'\t')),
                _ => {}
            }
        }
        files.sort_by(|(a, _), (b, _)| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

impl SheetSource for CsvDirectorySource {
    fn fetch(&self) -> Result<RawDocument, Error> {
        let worksheets = self
            .table_files()?
            .into_iter()
            .map(|(path, delimiter)| {
                let title = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let content = read_decoded(&path)?;
                read_table(title, content.as_bytes(), delimiter)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "read {} worksheets from {}",
            worksheets.len(),
            self.directory.display()
        );
        Ok(RawDocument::new(worksheets))
    }
}

/// Reads one delimited table. Empty cells become `None`; rows may differ in length.
pub fn read_table<R: Read>(
    title: impl Into<String>,
    reader: R,
    delimiter: u8,
) -> Result<RawTable, Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut rows: Vec<RawRow> = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|c| (!c.is_empty()).then(|| c.to_string()))
                .collect(),
        );
    }
    Ok(RawTable::new(title, rows))
}

pub(crate) fn read_decoded(path: &Path) -> Result<String, Error> {
    let file = File::open(path)?;
    // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);
    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    if decoded.starts_with('\u{feff}') {
        decoded.remove(0);
    }
    Ok(decoded)
}
