//! Run configuration, read from a TOML file.
//!
//! ```toml
//! sheet = "translations.json"
//! language_titles = ["en", "de"]
//! base_language = "en"
//! localization_path = "./src/main/res"
//!
//! [products.free]
//! localization_path = "./src/free/res"
//! ```
//!
//! Without `[products.*]` tables the file yields a single [`LocalizationConfig`].
//! Otherwise every product yields one, its fields overriding the top-level ones.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;

use crate::{error::Error, formats::RenderOptions};

pub const DEFAULT_CONFIG_FILE_NAME: &str = "localize.toml";
pub const DEFAULT_BASE_LANGUAGE: &str = "en";
pub const DEFAULT_LOCALIZATION_PATH: &str = "./src/main/res";

/// The fields shared by the top level of the file and each product table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFields {
    pub sheet: Option<String>,
    pub language_titles: Option<Vec<String>>,
    pub base_language: Option<String>,
    pub localization_path: Option<String>,
    pub worksheets: Option<Vec<String>>,
    pub add_comments: Option<bool>,
    pub escape_apostrophes: Option<bool>,
    pub generate_empty_values: Option<bool>,
    pub abort_on_duplicate_keys: Option<bool>,
}

impl ConfigFields {
    /// `self` with every unset field taken from `base`.
    fn or(&self, base: &ConfigFields) -> ConfigFields {
        ConfigFields {
            sheet: self.sheet.clone().or_else(|| base.sheet.clone()),
            language_titles: self
                .language_titles
                .clone()
                .or_else(|| base.language_titles.clone()),
            base_language: self
                .base_language
                .clone()
                .or_else(|| base.base_language.clone()),
            localization_path: self
                .localization_path
                .clone()
                .or_else(|| base.localization_path.clone()),
            worksheets: self.worksheets.clone().or_else(|| base.worksheets.clone()),
            add_comments: self.add_comments.or(base.add_comments),
            escape_apostrophes: self.escape_apostrophes.or(base.escape_apostrophes),
            generate_empty_values: self.generate_empty_values.or(base.generate_empty_values),
            abort_on_duplicate_keys: self
                .abort_on_duplicate_keys
                .or(base.abort_on_duplicate_keys),
        }
    }
}

/// A parsed configuration file, before defaults and products are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub base: ConfigFields,
    pub products: BTreeMap<String, ConfigFields>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self, Error> {
        let mut table: toml::Table = toml::from_str(content)?;
        let products = match table.remove("products") {
            Some(products) => BTreeMap::<String, ConfigFields>::deserialize(products)?,
            None => BTreeMap::new(),
        };
        let base = ConfigFields::deserialize(toml::Value::Table(table))?;
        Ok(Self { base, products })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Product names, sorted.
    pub fn product_names(&self) -> Vec<&str> {
        self.products.keys().map(String::as_str).collect()
    }

    /// Applies products and defaults.
    ///
    /// With `product` set, only that product is resolved. Relative paths are
    /// resolved against `base_dir`. Identical results are returned once.
    pub fn resolve(
        &self,
        base_dir: &Path,
        product: Option<&str>,
    ) -> Result<Vec<LocalizationConfig>, Error> {
        let merged: Vec<(Option<&str>, ConfigFields)> = match product {
            Some(name) => {
                let fields = self.products.get(name).ok_or_else(|| {
                    Error::config_error(format!(
                        "unknown product '{}'. Defined products: [{}]. Declare it like:\n\n[products.{}]\nlocalization_path = \"./src/{}/res\"",
                        name,
                        self.product_names().join(", "),
                        name,
                        name
                    ))
                })?;
                vec![(Some(name), fields.or(&self.base))]
            }
            None if self.products.is_empty() => vec![(None, self.base.clone())],
            None => self
                .products
                .iter()
                .map(|(name, fields)| (Some(name.as_str()), fields.or(&self.base)))
                .collect(),
        };

        let mut configs: Vec<LocalizationConfig> = Vec::new();
        for (name, fields) in merged {
            let config = LocalizationConfig::from_fields(&fields, base_dir, name)?;
            if configs.contains(&config) {
                debug!(
                    "product '{}' resolves to an already listed configuration",
                    name.unwrap_or_default()
                );
            } else {
                configs.push(config);
            }
        }
        Ok(configs)
    }
}

/// Loads the file at `path`, resolves it and verifies every resulting config.
pub fn load_configs(
    path: impl AsRef<Path>,
    product: Option<&str>,
) -> Result<Vec<LocalizationConfig>, Error> {
    let path = path.as_ref();
    let file = ConfigFile::load(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let configs = file.resolve(base_dir, product)?;
    for config in &configs {
        config.verify()?;
    }
    Ok(configs)
}

/// Everything one generation or check run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizationConfig {
    /// JSON document or directory of CSV/TSV exports.
    pub sheet: PathBuf,
    pub language_titles: Vec<String>,
    pub base_language: String,
    pub localization_path: PathBuf,
    /// Worksheet titles to read; `None` reads all.
    pub worksheets: Option<Vec<String>>,
    pub add_comments: bool,
    pub escape_apostrophes: bool,
    pub generate_empty_values: bool,
    pub abort_on_duplicate_keys: bool,
}

impl LocalizationConfig {
    pub fn new(sheet: impl Into<PathBuf>, language_titles: Vec<String>) -> Self {
        Self {
            sheet: sheet.into(),
            language_titles,
            base_language: DEFAULT_BASE_LANGUAGE.to_string(),
            localization_path: PathBuf::from(DEFAULT_LOCALIZATION_PATH),
            worksheets: None,
            add_comments: true,
            escape_apostrophes: true,
            generate_empty_values: true,
            abort_on_duplicate_keys: false,
        }
    }

    pub fn with_base_language(mut self, base_language: impl Into<String>) -> Self {
        self.base_language = base_language.into();
        self
    }

    pub fn with_localization_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.localization_path = path.into();
        self
    }

    pub fn with_worksheets(mut self, worksheets: Vec<String>) -> Self {
        self.worksheets = Some(worksheets);
        self
    }

    pub fn with_duplicate_check(mut self, abort_on_duplicate_keys: bool) -> Self {
        self.abort_on_duplicate_keys = abort_on_duplicate_keys;
        self
    }

    fn from_fields(
        fields: &ConfigFields,
        base_dir: &Path,
        product: Option<&str>,
    ) -> Result<Self, Error> {
        let sheet = fields.sheet.as_deref().ok_or_else(|| {
            let scope = match product {
                Some(name) => format!("product '{}'", name),
                None => "configuration".to_string(),
            };
            Error::config_error(format!(
                "no sheet set for {}. Point it to a JSON export or a directory of CSV files:\n\nsheet = \"translations.json\"",
                scope
            ))
        })?;

        Ok(Self {
            sheet: resolve_path(base_dir, sheet),
            language_titles: fields.language_titles.clone().unwrap_or_default(),
            base_language: fields
                .base_language
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_LANGUAGE.to_string()),
            localization_path: resolve_path(
                base_dir,
                fields
                    .localization_path
                    .as_deref()
                    .unwrap_or(DEFAULT_LOCALIZATION_PATH),
            ),
            worksheets: fields.worksheets.clone(),
            add_comments: fields.add_comments.unwrap_or(true),
            escape_apostrophes: fields.escape_apostrophes.unwrap_or(true),
            generate_empty_values: fields.generate_empty_values.unwrap_or(true),
            abort_on_duplicate_keys: fields.abort_on_duplicate_keys.unwrap_or(false),
        })
    }

    /// Checks that the config can drive a run, before any work is done.
    pub fn verify(&self) -> Result<(), Error> {
        if self.sheet.as_os_str().is_empty() {
            return Err(Error::config_error(
                "sheet is empty. Point it to a JSON export or a directory of CSV files:\n\nsheet = \"translations.json\"",
            ));
        }
        if !self.sheet.exists() {
            return Err(Error::config_error(format!(
                "sheet '{}' does not exist. Paths are relative to the configuration file:\n\nsheet = \"translations.json\"",
                self.sheet.display()
            )));
        }
        if self.language_titles.is_empty() {
            return Err(Error::config_error(
                "language_titles is empty. List the language column titles of the sheet:\n\nlanguage_titles = [\"en\", \"de\"]",
            ));
        }
        if self.base_language.trim().is_empty() {
            return Err(Error::config_error(
                "base_language is blank. Set the language written to the 'values' folder:\n\nbase_language = \"en\"",
            ));
        }
        if !self.language_titles.contains(&self.base_language) {
            return Err(Error::config_error(format!(
                "base_language '{}' is not one of language_titles [{}]. Add it:\n\nlanguage_titles = [\"{}\", ...]\nbase_language = \"{}\"",
                self.base_language,
                self.language_titles.join(", "),
                self.base_language,
                self.base_language
            )));
        }
        if self.localization_path.as_os_str().is_empty() {
            return Err(Error::config_error(
                "localization_path is empty. Set the Android resource directory:\n\nlocalization_path = \"./src/main/res\"",
            ));
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .with_comments(self.add_comments)
            .with_escape_apostrophes(self.escape_apostrophes)
            .with_empty_values(self.generate_empty_values)
    }
}

fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() || base_dir.as_os_str().is_empty() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
