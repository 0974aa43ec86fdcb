//! Android `strings.xml` generation.
//!
//! Every text is wrapped in CDATA, so only apostrophes and line breaks need Android
//! specific escaping. The layout (four space indentation, one element per line,
//! trailing newline) is fixed: drift checks compare the output line by line.

use std::io::Write;

use quick_xml::{
    Writer,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{error::Error, types::TargetValue};

const INDENT: &str = "    ";

/// Options for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit the sheet comment of a value as an XML comment above it.
    pub add_comments: bool,
    /// Prefix every `'` with a backslash. Sheets migrated from older tooling may
    /// already contain escaped apostrophes and turn this off.
    pub escape_apostrophes: bool,
    /// Emit `<string name="..."></string>` for values missing in this language.
    /// When off, nothing is emitted so Android falls back to the default language.
    pub generate_empty_values: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            add_comments: true,
            escape_apostrophes: true,
            generate_empty_values: true,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments(mut self, add_comments: bool) -> Self {
        self.add_comments = add_comments;
        self
    }

    pub fn with_escape_apostrophes(mut self, escape_apostrophes: bool) -> Self {
        self.escape_apostrophes = escape_apostrophes;
        self
    }

    pub fn with_empty_values(mut self, generate_empty_values: bool) -> Self {
        self.generate_empty_values = generate_empty_values;
        self
    }
}

/// Renders `values` as the content of a `strings.xml` file.
pub fn render(values: &[TargetValue], options: &RenderOptions) -> Result<String, Error> {
    let mut buffer = Vec::new();
    write_strings_xml(values, options, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| Error::Render(e.to_string()))
}

/// Writes `values` as a `strings.xml` document to any writer.
pub fn write_strings_xml<W: Write>(
    values: &[TargetValue],
    options: &RenderOptions,
    writer: W,
) -> Result<(), Error> {
    let mut xml = StringsXmlWriter {
        inner: Writer::new(writer),
        options,
    };

    xml.inner
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    xml.text("\n")?;
    xml.inner
        .write_event(Event::Start(BytesStart::new("resources")))?;
    xml.text("\n")?;

    for value in values {
        xml.write_value(value)?;
    }

    xml.inner
        .write_event(Event::End(BytesEnd::new("resources")))?;
    xml.text("\n")?;
    Ok(())
}

/// Escapes a text for Android resources: `'` becomes `\'` (when enabled) and line
/// breaks become the two characters `\n`.
///
/// This is a single pass; an already escaped `\'` turns into `\\'`.
pub fn escape_text(text: &str, escape_apostrophes: bool) -> String {
    let text = if escape_apostrophes {
        text.replace('\'', "\\'")
    } else {
        text.to_string()
    };
    text.replace('\n', "\\n")
}

struct StringsXmlWriter<'a, W: Write> {
    inner: Writer<W>,
    options: &'a RenderOptions,
}

impl<W: Write> StringsXmlWriter<'_, W> {
    fn write_value(&mut self, value: &TargetValue) -> Result<(), Error> {
        match value {
            TargetValue::Blank {
                identifier,
                comment,
            } => {
                if !self.options.generate_empty_values {
                    return Ok(());
                }
                self.comment(comment.as_deref())?;
                self.text(INDENT)?;
                self.inner.write_event(Event::Start(named("string", identifier)))?;
                self.inner.write_event(Event::End(BytesEnd::new("string")))?;
                self.text("\n")?;
            }
            TargetValue::Plain {
                identifier,
                text,
                comment,
            } => {
                self.comment(comment.as_deref())?;
                self.text(INDENT)?;
                self.leaf(named("string", identifier), "string", text)?;
            }
            TargetValue::Array {
                identifier,
                items,
                comment,
            } => {
                self.comment(comment.as_deref())?;
                self.text(INDENT)?;
                self.inner
                    .write_event(Event::Start(named("string-array", identifier)))?;
                self.text("\n")?;
                for item in items {
                    self.text(INDENT)?;
                    self.text(INDENT)?;
                    self.leaf(BytesStart::new("item"), "item", item)?;
                }
                self.text(INDENT)?;
                self.inner
                    .write_event(Event::End(BytesEnd::new("string-array")))?;
                self.text("\n")?;
            }
            TargetValue::Plural {
                identifier,
                entries,
                comment,
            } => {
                self.comment(comment.as_deref())?;
                self.text(INDENT)?;
                self.inner
                    .write_event(Event::Start(named("plurals", identifier)))?;
                self.text("\n")?;
                for (quantity, text) in entries {
                    let mut item = BytesStart::new("item");
                    item.push_attribute(("quantity", quantity.as_str()));
                    self.text(INDENT)?;
                    self.text(INDENT)?;
                    self.leaf(item, "item", text)?;
                }
                self.text(INDENT)?;
                self.inner
                    .write_event(Event::End(BytesEnd::new("plurals")))?;
                self.text("\n")?;
            }
        }
        Ok(())
    }

    /// `<tag ...><![CDATA[escaped text]]></tag>` followed by a line break.
    fn leaf(&mut self, start: BytesStart<'_>, tag: &str, text: &str) -> Result<(), Error> {
        let escaped = escape_text(text, self.options.escape_apostrophes);
        self.inner.write_event(Event::Start(start))?;
        self.inner
            .write_event(Event::CData(BytesCData::new(escaped.as_str())))?;
        self.inner.write_event(Event::End(BytesEnd::new(tag)))?;
        self.text("\n")
    }

    fn comment(&mut self, comment: Option<&str>) -> Result<(), Error> {
        match comment {
            Some(comment) if self.options.add_comments => {
                self.text(INDENT)?;
                self.inner
                    .write_event(Event::Comment(BytesText::from_escaped(format!(
                        " {} ",
                        comment
                    ))))?;
                self.text("\n")
            }
            _ => Ok(()),
        }
    }

    fn text(&mut self, text: &str) -> Result<(), Error> {
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }
}

fn named<'a>(tag: &'a str, identifier: &'a str) -> BytesStart<'a> {
    let mut start = BytesStart::new(tag);
    start.push_attribute(("name", identifier));
    start
}
