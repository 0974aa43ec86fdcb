//! Parses a fetched [`RawDocument`] into localization entries.
//!
//! The first row of every worksheet is its header. Platform identifier columns,
//! the requested language columns and the optional comment column are located by
//! exact title; every following row with at least one platform identifier becomes a
//! [`LocalizationEntry`].

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    error::Error,
    types::{
        LocalizationEntry, ParsedSheet, ParsedWorksheet, Platform, RawDocument, RawRow,
        RawTable, cell,
    },
};

/// Comment column titles, in order of preference. `Kommentar` is the title used by
/// older German sheets.
pub const COMMENT_TITLES: [&str; 2] = ["Comment", "Kommentar"];

/// Rows with fewer cells than this are stray annotations, not data.
const MIN_ROW_CELLS: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct SheetParser;

impl SheetParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses `document` for the given language column titles.
    ///
    /// If `worksheets` is `Some`, only worksheets whose title is listed are parsed,
    /// otherwise all of them. Worksheet and row order are preserved. Any structural
    /// problem in any worksheet fails the whole parse.
    pub fn parse(
        &self,
        document: &RawDocument,
        worksheets: Option<&[String]>,
        languages: &[String],
    ) -> Result<ParsedSheet, Error> {
        if let Some(filter) = worksheets {
            for title in filter {
                if document.find_worksheet(title).is_none() {
                    warn!("worksheet '{}' is not part of the sheet, skipping", title);
                }
            }
        }

        let worksheets = document
            .worksheets
            .iter()
            .filter(|table| worksheets.is_none_or(|filter| filter.contains(&table.title)))
            .map(|table| self.parse_worksheet(table, languages))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ParsedSheet { worksheets })
    }

    fn parse_worksheet(
        &self,
        table: &RawTable,
        languages: &[String],
    ) -> Result<ParsedWorksheet, Error> {
        let header = table.header().ok_or_else(|| Error::MissingHeader {
            worksheet: table.title.clone(),
        })?;
        let layout = ColumnLayout::resolve(&table.title, header, languages)?;

        let entries: Vec<LocalizationEntry> = table
            .rows
            .iter()
            .skip(1)
            .filter(|row| row.len() >= MIN_ROW_CELLS)
            .map(|row| layout.read_entry(row))
            .filter(LocalizationEntry::has_identifier)
            .collect();

        debug!(
            "worksheet '{}': {} of {} rows are localization entries",
            table.title,
            entries.len(),
            table.rows.len().saturating_sub(1)
        );

        Ok(ParsedWorksheet {
            title: table.title.clone(),
            entries,
        })
    }
}

/// Column indices resolved from a worksheet's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnLayout {
    platforms: Vec<(Platform, usize)>,
    languages: Vec<(String, usize)>,
    comment: Option<usize>,
}

impl ColumnLayout {
    fn resolve(worksheet: &str, header: &RawRow, languages: &[String]) -> Result<Self, Error> {
        let platforms: Vec<(Platform, usize)> = Platform::ALL
            .into_iter()
            .filter_map(|platform| {
                first_column_of(header, platform.header_titles()).map(|index| (platform, index))
            })
            .collect();

        if platforms.is_empty() {
            return Err(Error::NoPlatformColumn {
                worksheet: worksheet.to_string(),
                accepted: Platform::accepted_header_titles(),
            });
        }

        let languages = languages
            .iter()
            .map(|language| {
                column_of(header, language)
                    .map(|index| (language.clone(), index))
                    .ok_or_else(|| Error::MissingLanguageColumn {
                        worksheet: worksheet.to_string(),
                        language: language.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            platforms,
            languages,
            comment: first_column_of(header, &COMMENT_TITLES),
        })
    }

    fn read_entry(&self, row: &RawRow) -> LocalizationEntry {
        let text = |index: usize| cell(row, index).map(str::to_string);

        LocalizationEntry {
            identifiers: self
                .platforms
                .iter()
                .map(|&(platform, index)| (platform, text(index)))
                .collect::<BTreeMap<_, _>>(),
            values: self
                .languages
                .iter()
                .map(|(language, index)| (language.clone(), text(*index)))
                .collect::<BTreeMap<_, _>>(),
            comment: self.comment.and_then(text),
        }
    }
}

fn column_of(header: &RawRow, title: &str) -> Option<usize> {
    header.iter().position(|c| c.as_deref() == Some(title))
}

/// Index of the first of `titles` (in preference order) found in the header.
fn first_column_of(header: &RawRow, titles: &[&str]) -> Option<usize> {
    titles.iter().find_map(|title| column_of(header, title))
}
