//! Core types for sheetloc.
//!
//! Sheet sources decode into [`RawDocument`], the parser turns it into a
//! [`ParsedSheet`], and the transformer projects that onto [`TargetValue`]s for one
//! language which the generator serializes.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One row of raw cells. Missing trailing cells mean the same as `None`.
pub type RawRow = Vec<Option<String>>;

/// A fetched spreadsheet: named tables of optional text cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RawDocument {
    #[serde(default)]
    pub worksheets: Vec<RawTable>,
}

impl RawDocument {
    pub fn new(worksheets: Vec<RawTable>) -> Self {
        Self { worksheets }
    }

    pub fn find_worksheet(&self, title: &str) -> Option<&RawTable> {
        self.worksheets.iter().find(|w| w.title == title)
    }
}

/// A single worksheet ("tab") of a [`RawDocument`]. Row 0 is the header row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct RawTable {
    pub title: String,
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(title: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }

    pub fn header(&self) -> Option<&RawRow> {
        self.rows.first()
    }
}

/// Returns the text of a cell, treating short rows like explicitly empty cells.
pub(crate) fn cell(row: &RawRow, index: usize) -> Option<&str> {
    row.get(index).and_then(|c| c.as_deref())
}

/// The identifier namespaces a single logical string can be published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(rename = "ios")]
    Ios,
    Android,
    Web,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Ios, Platform::Android, Platform::Web];

    /// Header titles for this platform's identifier column, in order of preference.
    ///
    /// The web column was historically titled `Identifer Web`; that title is still
    /// accepted when the corrected one is missing.
    pub fn header_titles(&self) -> &'static [&'static str] {
        match self {
            Platform::Ios => &["Identifier iOS"],
            Platform::Android => &["Identifier Android"],
            Platform::Web => &["Identifier Web", "Identifer Web"],
        }
    }

    /// All header titles accepted for any platform.
    pub fn accepted_header_titles() -> Vec<String> {
        Platform::ALL
            .iter()
            .flat_map(|p| p.header_titles().iter().map(|t| t.to_string()))
            .collect()
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Ios => write!(f, "iOS"),
            Platform::Android => write!(f, "Android"),
            Platform::Web => write!(f, "Web"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "web" => Ok(Platform::Web),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// Plural quantity keywords understood by Android `<plurals>`.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKeyword {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl QuantityKeyword {
    pub const ALL: [QuantityKeyword; 6] = [
        QuantityKeyword::Zero,
        QuantityKeyword::One,
        QuantityKeyword::Two,
        QuantityKeyword::Few,
        QuantityKeyword::Many,
        QuantityKeyword::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuantityKeyword::Zero => "zero",
            QuantityKeyword::One => "one",
            QuantityKeyword::Two => "two",
            QuantityKeyword::Few => "few",
            QuantityKeyword::Many => "many",
            QuantityKeyword::Other => "other",
        }
    }

    /// Comma separated list of every keyword, for error messages.
    pub fn valid_keywords() -> String {
        QuantityKeyword::ALL
            .iter()
            .map(QuantityKeyword::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for QuantityKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantityKeyword {
    type Err = String;

    /// Keywords are matched exactly; `One` or ` one` are not quantity keywords.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuantityKeyword::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown plural quantity: {}", s))
    }
}

/// The localization entries of a whole spreadsheet, after header resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedSheet {
    pub worksheets: Vec<ParsedWorksheet>,
}

impl ParsedSheet {
    /// Iterates over every entry of every worksheet, in sheet order.
    pub fn entries(&self) -> impl Iterator<Item = &LocalizationEntry> {
        self.worksheets.iter().flat_map(|w| w.entries.iter())
    }

    /// Fails if an identifier of `platform` is used by more than one entry.
    ///
    /// Duplicates are reported once each, in the order they first repeat.
    pub fn ensure_unique_identifiers(&self, platform: Platform) -> Result<(), Error> {
        let mut seen = BTreeSet::new();
        let mut duplicates: Vec<String> = Vec::new();
        for identifier in self.entries().filter_map(|e| e.identifier(platform)) {
            if !seen.insert(identifier) && !duplicates.iter().any(|d| d == identifier) {
                duplicates.push(identifier.to_string());
            }
        }

        if duplicates.is_empty() {
            Ok(())
        } else {
            Err(Error::DuplicateIdentifier {
                platform: platform.to_string(),
                identifiers: duplicates,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedWorksheet {
    pub title: String,
    pub entries: Vec<LocalizationEntry>,
}

/// One data row of a worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LocalizationEntry {
    /// Identifier per platform. Only platforms with a header column are present;
    /// their value is `None` when the row has no identifier for that platform.
    pub identifiers: BTreeMap<Platform, Option<String>>,

    /// Raw value per requested language title.
    pub values: BTreeMap<String, Option<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl LocalizationEntry {
    pub fn identifier(&self, platform: Platform) -> Option<&str> {
        self.identifiers.get(&platform).and_then(|i| i.as_deref())
    }

    pub fn value(&self, language: &str) -> Option<&str> {
        self.values.get(language).and_then(|v| v.as_deref())
    }

    /// Whether at least one platform has an identifier for this entry.
    pub fn has_identifier(&self) -> bool {
        self.identifiers.values().any(Option::is_some)
    }
}

/// A value ready to be written to a resource file, for one language and platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TargetValue {
    Plain {
        identifier: String,
        text: String,
        comment: Option<String>,
    },
    Array {
        identifier: String,
        items: Vec<String>,
        comment: Option<String>,
    },
    Plural {
        identifier: String,
        entries: Vec<(QuantityKeyword, String)>,
        comment: Option<String>,
    },
    /// No value for this language.
    Blank {
        identifier: String,
        comment: Option<String>,
    },
}

impl TargetValue {
    pub fn identifier(&self) -> &str {
        match self {
            TargetValue::Plain { identifier, .. }
            | TargetValue::Array { identifier, .. }
            | TargetValue::Plural { identifier, .. }
            | TargetValue::Blank { identifier, .. } => identifier,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            TargetValue::Plain { comment, .. }
            | TargetValue::Array { comment, .. }
            | TargetValue::Plural { comment, .. }
            | TargetValue::Blank { comment, .. } => comment.as_deref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TargetValue::Plain { .. } => "plain",
            TargetValue::Array { .. } => "array",
            TargetValue::Plural { .. } => "plural",
            TargetValue::Blank { .. } => "blank",
        }
    }
}

impl Display for TargetValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetValue::Plain {
                identifier, text, ..
            } => write!(f, "{} = {}", identifier, text),
            TargetValue::Array {
                identifier, items, ..
            } => write!(f, "{} = [{}]", identifier, items.join(", ")),
            TargetValue::Plural {
                identifier,
                entries,
                ..
            } => write!(
                f,
                "{} = {{ {} }}",
                identifier,
                entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            TargetValue::Blank { identifier, .. } => write!(f, "{} = <blank>", identifier),
        }
    }
}
