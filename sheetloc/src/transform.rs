//! Projects a [`ParsedSheet`] onto the values of one language.
//!
//! Sheet cells carry no explicit type, so the kind of each value is sniffed from
//! its content, in this order:
//!
//! 1. **Plural**: some line reads `<quantity>|<text>`, e.g. `one|%d hour`.
//! 2. **Array**: the text is a JSON string array, `["a", "b"]`.
//! 3. **Plain**: anything else.
//!
//! A missing cell becomes [`TargetValue::Blank`].

use std::str::FromStr;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::{
    error::Error,
    types::{ParsedSheet, Platform, QuantityKeyword, TargetValue},
};

/// Separates the quantity keyword from its text in a plural line.
pub const PLURAL_SEPARATOR: char = '|';

lazy_static! {
    static ref PLURAL_LINE_REGEX: Regex =
        Regex::new(r"^(zero|one|two|few|many|other)\|").unwrap();
}

/// Decodes the text of an array cell into its items.
pub trait ArrayDecoder: Send + Sync {
    fn decode(&self, text: &str) -> Result<Vec<String>, Error>;
}

/// Decodes array cells as JSON arrays of strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArrayDecoder;

impl ArrayDecoder for JsonArrayDecoder {
    fn decode(&self, text: &str) -> Result<Vec<String>, Error> {
        serde_json::from_str::<Vec<String>>(text).map_err(Error::ArrayParse)
    }
}

/// Whether any line of `text` starts with a quantity keyword and the separator.
pub fn is_plural_block(text: &str) -> bool {
    text.split('\n').any(|line| PLURAL_LINE_REGEX.is_match(line))
}

/// Whether `text` looks like a JSON string array.
pub fn is_array_literal(text: &str) -> bool {
    text.starts_with("[\"") && text.ends_with("\"]")
}

#[derive(Debug, Clone, Default)]
pub struct ValueTransformer<D = JsonArrayDecoder> {
    decoder: D,
}

impl ValueTransformer<JsonArrayDecoder> {
    pub fn new() -> Self {
        Self {
            decoder: JsonArrayDecoder,
        }
    }
}

impl<D: ArrayDecoder> ValueTransformer<D> {
    pub fn with_decoder(decoder: D) -> Self {
        Self { decoder }
    }

    /// Collects the values of `language` for every entry that has an identifier for
    /// `platform`, in sheet order.
    ///
    /// Fails on the first value that cannot be decoded; no partial list is returned.
    pub fn project(
        &self,
        language: &str,
        sheet: &ParsedSheet,
        platform: Platform,
    ) -> Result<Vec<TargetValue>, Error> {
        let values = sheet
            .entries()
            .filter_map(|entry| {
                entry
                    .identifier(platform)
                    .map(|identifier| (identifier, entry))
            })
            .map(|(identifier, entry)| {
                self.classify(identifier, entry.value(language), entry.comment.as_deref())
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "projected {} {} values for language '{}'",
            values.len(),
            platform,
            language
        );
        Ok(values)
    }

    /// Same as [`project`](Self::project) for Android identifiers.
    pub fn project_android(
        &self,
        language: &str,
        sheet: &ParsedSheet,
    ) -> Result<Vec<TargetValue>, Error> {
        self.project(language, sheet, Platform::Android)
    }

    /// Turns one raw cell into a typed value.
    pub fn classify(
        &self,
        identifier: &str,
        raw: Option<&str>,
        comment: Option<&str>,
    ) -> Result<TargetValue, Error> {
        let identifier = identifier.to_string();
        let comment = comment.map(str::to_string);

        let Some(text) = raw else {
            return Ok(TargetValue::Blank {
                identifier,
                comment,
            });
        };

        if is_plural_block(text) {
            let entries = parse_plural_entries(&identifier, text)?;
            Ok(TargetValue::Plural {
                identifier,
                entries,
                comment,
            })
        } else if is_array_literal(text) {
            Ok(TargetValue::Array {
                identifier,
                items: self.decoder.decode(text)?,
                comment,
            })
        } else {
            Ok(TargetValue::Plain {
                identifier,
                text: text.to_string(),
                comment,
            })
        }
    }
}

/// Splits a plural block into `(quantity, text)` pairs.
///
/// Lines without a separator are ignored. Order and duplicates are kept as written.
fn parse_plural_entries(
    identifier: &str,
    text: &str,
) -> Result<Vec<(QuantityKeyword, String)>, Error> {
    text.split('\n')
        .filter_map(|line| line.split_once(PLURAL_SEPARATOR))
        .map(|(keyword, value)| {
            QuantityKeyword::from_str(keyword)
                .map(|quantity| (quantity, value.to_string()))
                .map_err(|_| Error::InvalidPluralKeyword {
                    identifier: identifier.to_string(),
                    keyword: keyword.to_string(),
                })
        })
        .collect()
}
