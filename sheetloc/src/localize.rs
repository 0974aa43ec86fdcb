//! Generation and drift checking of a whole configuration.
//!
//! The sheet is fetched and parsed once. Afterwards every language is transformed,
//! rendered and written (or compared) on its own rayon task. All tasks run to the
//! end before the outcome is reported: the first per-language error if any,
//! otherwise every drift at once.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use log::{debug, info};
use rayon::prelude::*;

use crate::{
    config::LocalizationConfig,
    drift::{self, LanguageDrift},
    error::Error,
    formats::{self, strings_xml_path},
    parser::SheetParser,
    sources::{open_source, read_decoded},
    transform::{ArrayDecoder, JsonArrayDecoder, ValueTransformer},
    types::{ParsedSheet, Platform, RawDocument},
};

/// The rendered `strings.xml` of one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLanguage {
    pub language: String,
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct Localizer<D = JsonArrayDecoder> {
    parser: SheetParser,
    transformer: ValueTransformer<D>,
}

impl Localizer<JsonArrayDecoder> {
    pub fn new() -> Self {
        Self {
            parser: SheetParser::new(),
            transformer: ValueTransformer::new(),
        }
    }
}

impl<D: ArrayDecoder> Localizer<D> {
    pub fn with_transformer(transformer: ValueTransformer<D>) -> Self {
        Self {
            parser: SheetParser::new(),
            transformer,
        }
    }

    pub fn transformer(&self) -> &ValueTransformer<D> {
        &self.transformer
    }

    /// Fetches the configured sheet and writes one `strings.xml` per language.
    ///
    /// Returns the written paths in the order of `language_titles`.
    pub fn localize(&self, config: &LocalizationConfig) -> Result<Vec<PathBuf>, Error> {
        let document = open_source(&config.sheet)?.fetch()?;
        self.localize_document(&document, config)
    }

    /// Fetches the configured sheet and fails with [`Error::Drift`] if any
    /// `strings.xml` differs from what would be generated.
    pub fn check(&self, config: &LocalizationConfig) -> Result<(), Error> {
        let document = open_source(&config.sheet)?.fetch()?;
        self.check_document(&document, config)
    }

    pub fn localize_document(
        &self,
        document: &RawDocument,
        config: &LocalizationConfig,
    ) -> Result<Vec<PathBuf>, Error> {
        let sheet = self.parse_sheet(document, config)?;
        let results: Vec<Result<PathBuf, Error>> = config
            .language_titles
            .par_iter()
            .map(|language| {
                let rendered = self.render_language(&sheet, config, language)?;
                write_output(&rendered)?;
                Ok(rendered.path)
            })
            .collect();
        results.into_iter().collect()
    }

    pub fn check_document(
        &self,
        document: &RawDocument,
        config: &LocalizationConfig,
    ) -> Result<(), Error> {
        let sheet = self.parse_sheet(document, config)?;
        let results: Vec<Result<Option<LanguageDrift>, Error>> = config
            .language_titles
            .par_iter()
            .map(|language| {
                let rendered = self.render_language(&sheet, config, language)?;
                let on_disk = read_output(&rendered.path)?;
                Ok(drift::check_language(
                    language,
                    &rendered.path,
                    &rendered.content,
                    &on_disk,
                ))
            })
            .collect();

        let mut drifts = Vec::new();
        for result in results {
            if let Some(drift) = result? {
                debug!("'{}' drifted from the sheet", drift.path.display());
                drifts.push(drift);
            }
        }
        drift::ensure_no_drift(&drifts)
    }

    /// Parses the configured worksheets and languages, checking Android identifiers
    /// for duplicates if the config asks for it.
    pub fn parse_sheet(
        &self,
        document: &RawDocument,
        config: &LocalizationConfig,
    ) -> Result<ParsedSheet, Error> {
        let sheet = self.parser.parse(
            document,
            config.worksheets.as_deref(),
            &config.language_titles,
        )?;
        if config.abort_on_duplicate_keys {
            sheet.ensure_unique_identifiers(Platform::Android)?;
        }
        Ok(sheet)
    }

    pub fn render_language(
        &self,
        sheet: &ParsedSheet,
        config: &LocalizationConfig,
        language: &str,
    ) -> Result<RenderedLanguage, Error> {
        let values = self.transformer.project_android(language, sheet)?;
        let content = formats::render(&values, &config.render_options())?;
        Ok(RenderedLanguage {
            language: language.to_string(),
            path: strings_xml_path(&config.localization_path, language, &config.base_language),
            content,
        })
    }
}

/// Creates the parent directories and the file itself if absent.
fn ensure_output_file(path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::output_io(parent, e))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::output_io(path, e))?;
    Ok(())
}

fn write_output(rendered: &RenderedLanguage) -> Result<(), Error> {
    ensure_output_file(&rendered.path)?;
    fs::write(&rendered.path, &rendered.content)
        .map_err(|e| Error::output_io(&rendered.path, e))?;
    info!(
        "wrote '{}' for language '{}'",
        rendered.path.display(),
        rendered.language
    );
    Ok(())
}

fn read_output(path: &Path) -> Result<String, Error> {
    ensure_output_file(path)?;
    read_decoded(path)
}
