//! Traits for pluggable sheet retrieval.

use crate::{error::Error, types::RawDocument};

/// Something that can hand out the current content of a translation sheet.
///
/// Implementations fetch the whole document on every call; nothing is cached
/// between runs.
///
/// # Example
///
/// ```rust,no_run
/// use sheetloc::traits::SheetSource;
/// use sheetloc::sources::JsonDocumentSource;
///
/// let document = JsonDocumentSource::new("translations.json").fetch()?;
/// println!("{} worksheets", document.worksheets.len());
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait SheetSource {
    fn fetch(&self) -> Result<RawDocument, Error>;
}

/// An already fetched document is its own source.
impl SheetSource for RawDocument {
    fn fetch(&self) -> Result<RawDocument, Error> {
        Ok(self.clone())
    }
}

impl<S: SheetSource + ?Sized> SheetSource for Box<S> {
    fn fetch(&self) -> Result<RawDocument, Error> {
        (**self).fetch()
    }
}
