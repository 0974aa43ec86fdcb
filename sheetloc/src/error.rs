//! All error types for the sheetloc crate.
//!
//! Structural sheet errors (header, platform and language columns), value format
//! errors, drift reports and the I/O failures around them share one enum so that the
//! pipeline can abort on the first one and the CLI can print it as is.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::QuantityKeyword;

#[derive(Error, Debug)]
pub enum Error {
    #[error("worksheet '{worksheet}' does not contain a header line")]
    MissingHeader { worksheet: String },

    #[error(
        "worksheet '{worksheet}'s first line (a.k.a. the header line) does not contain a column with any of '{}'. At least a header for one platform must be present.",
        .accepted.join(", ")
    )]
    NoPlatformColumn {
        worksheet: String,
        accepted: Vec<String>,
    },

    #[error(
        "worksheet '{worksheet}'s first line (a.k.a. the header line) does not contain a column with '{language}'"
    )]
    MissingLanguageColumn { worksheet: String, language: String },

    #[error(
        "entry '{identifier}' uses the unknown plural quantity '{keyword}'. Valid quantities are: {}",
        QuantityKeyword::valid_keywords()
    )]
    InvalidPluralKeyword { identifier: String, keyword: String },

    #[error("string array parse error: {0}")]
    ArrayParse(#[from] serde_json::Error),

    #[error("localizations are not up-to-date.\n\n{0}")]
    Drift(String),

    #[error("could not create {}: {source}", .path.display())]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("duplicate identifiers for {platform}: {}", .identifiers.join(", "))]
    DuplicateIdentifier {
        platform: String,
        identifiers: Vec<String>,
    },

    #[error("sheet document parse error: {0}")]
    DocumentParse(String),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("render error: {0}")]
    Render(String),
}

impl Error {
    /// Creates a new configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// Wraps an I/O failure that happened while creating an output directory or file.
    pub fn output_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::OutputIo {
            path: path.into(),
            source,
        }
    }

    /// Whether this error reports drift rather than a structural or I/O problem.
    pub fn is_drift(&self) -> bool {
        matches!(self, Error::Drift(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_missing_header_error() {
        let error = Error::MissingHeader {
            worksheet: "Main".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "worksheet 'Main' does not contain a header line"
        );
    }

    #[test]
    fn test_no_platform_column_lists_accepted_titles() {
        let error = Error::NoPlatformColumn {
            worksheet: "Main".to_string(),
            accepted: vec![
                "Identifier iOS".to_string(),
                "Identifier Android".to_string(),
            ],
        };
        let message = error.to_string();
        assert!(message.contains("'Main'"));
        assert!(message.contains("Identifier iOS, Identifier Android"));
    }

    #[test]
    fn test_missing_language_column_error() {
        let error = Error::MissingLanguageColumn {
            worksheet: "Main".to_string(),
            language: "fr".to_string(),
        };
        assert!(error.to_string().contains("'fr'"));
        assert!(error.to_string().contains("'Main'"));
    }

    #[test]
    fn test_invalid_plural_keyword_lists_valid_keywords() {
        let error = Error::InvalidPluralKeyword {
            identifier: "apples".to_string(),
            keyword: "several".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'apples'"));
        assert!(message.contains("'several'"));
        assert!(message.contains("zero, one, two, few, many, other"));
    }

    #[test]
    fn test_array_parse_error() {
        let json_error = serde_json::from_str::<Vec<String>>("[\"a\", ]").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().contains("string array parse error"));
    }

    #[test]
    fn test_output_io_error_names_path() {
        let error = Error::output_io(
            "/tmp/res/values",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = error.to_string();
        assert!(message.contains("/tmp/res/values"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_drift_error() {
        let error = Error::Drift("--- a\n+++ b".to_string());
        assert!(error.is_drift());
        assert!(error.to_string().starts_with("localizations are not up-to-date."));
        assert!(!Error::Render("x".to_string()).is_drift());
    }

    #[test]
    fn test_config_error() {
        let error = Error::config_error("'sheet' not set.");
        assert_eq!(error.to_string(), "configuration error: 'sheet' not set.");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::MissingHeader {
            worksheet: "test".to_string(),
        };
        let debug = format!("{:?}", error);
        assert!(debug.contains("MissingHeader"));
        assert!(debug.contains("test"));
    }
}
