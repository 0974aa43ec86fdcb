//! Output formats generated from projected sheet values.

pub mod android_strings;

pub use android_strings::{RenderOptions, escape_text, render, write_strings_xml};

use std::path::{Path, PathBuf};

/// Name of the Android string resource file inside a `values*` directory.
pub const STRINGS_XML_FILE_NAME: &str = "strings.xml";

/// Directory name for `language`: `values` for the base language, otherwise
/// `values-<language>`.
pub fn values_directory_name(language: &str, base_language: &str) -> String {
    if language == base_language {
        "values".to_string()
    } else {
        format!("values-{}", language)
    }
}

/// Path of the `strings.xml` file of `language` below `localization_path`.
pub fn strings_xml_path(localization_path: &Path, language: &str, base_language: &str) -> PathBuf {
    localization_path
        .join(values_directory_name(language, base_language))
        .join(STRINGS_XML_FILE_NAME)
}
