//! TS document reader built on `quick-xml` events.
//!
//! The reader walks the element tree by hand instead of deserializing into
//! derived structs: text must be kept byte for byte (leading spaces, blank
//! lines, `<byte>` escapes), unknown elements must be skipped, and errors
//! need positions.

use std::str::from_utf8;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};

use super::error::ParseError;
use crate::types::{
    Context, DEFAULT_VERSION, Location, MessageEntry, Translation, TranslationCatalog,
    TranslationStatus,
};

/// Parse a TS document into a catalog.
///
/// # Example
///
/// ```
/// use tscat::parser::parse_catalog;
///
/// let catalog = parse_catalog(r#"<TS language="pl" version="2.1">
/// <context>
///     <name>AddressBookPage</name>
///     <message>
///         <source>&amp;Copy</source>
///         <translation>&amp;Kopiuj</translation>
///     </message>
/// </context>
/// </TS>"#).unwrap();
///
/// assert_eq!(catalog.language(), "pl");
/// let entry = catalog.find("AddressBookPage", "&Copy", "").unwrap();
/// assert_eq!(entry.text(), Some("&Kopiuj"));
/// ```
pub fn parse_catalog(input: &str) -> Result<TranslationCatalog, ParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let catalog = TsReader::new(input).document()?;
    tracing::debug!(
        language = catalog.language(),
        contexts = catalog.contexts().len(),
        messages = catalog.message_count(),
        "parsed TS catalog"
    );
    Ok(catalog)
}

/// Parse a TS document from raw bytes, which must be UTF-8.
pub fn parse_catalog_bytes(input: &[u8]) -> Result<TranslationCatalog, ParseError> {
    let text = from_utf8(input).map_err(|_| ParseError::InvalidUtf8)?;
    parse_catalog(text)
}

/// Attributes of the `<TS>` root element.
struct Header {
    language: String,
    source_language: Option<String>,
    version: String,
}

struct TsReader<'a> {
    input: &'a str,
    reader: Reader<&'a [u8]>,
}

impl<'a> TsReader<'a> {
    fn new(input: &'a str) -> Self {
        TsReader {
            input,
            reader: Reader::from_str(input),
        }
    }

    fn next_event(&mut self) -> Result<Event<'a>, ParseError> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(err) => Err(self.xml_error(&err)),
        }
    }

    fn document(mut self) -> Result<TranslationCatalog, ParseError> {
        loop {
            match self.next_event()? {
                Event::Start(element) => {
                    let header = self.root(&element)?;
                    let contexts = self.contexts()?;
                    self.trailing()?;
                    return Ok(build_catalog(header, contexts));
                }
                Event::Empty(element) => {
                    let header = self.root(&element)?;
                    self.trailing()?;
                    return Ok(build_catalog(header, Vec::new()));
                }
                Event::Text(text) if is_blank(&text) => {}
                Event::Text(_) | Event::CData(_) => {
                    return Err(self.structure("text outside of the <TS> element"));
                }
                Event::End(_) => return Err(self.structure("unexpected closing tag")),
                Event::Eof => return Err(self.structure("missing <TS> root element")),
                _ => {}
            }
        }
    }

    /// Validate the root element and read its attributes.
    fn root(&self, element: &BytesStart<'_>) -> Result<Header, ParseError> {
        if element.name().as_ref() != b"TS" {
            let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
            return Err(self.structure(format!("expected <TS> root element, found <{name}>")));
        }
        Ok(Header {
            language: self.attribute(element, b"language")?.unwrap_or_default(),
            source_language: self.attribute(element, b"sourcelanguage")?,
            version: self
                .attribute(element, b"version")?
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        })
    }

    /// Allow only whitespace, comments and processing instructions after `</TS>`.
    fn trailing(&mut self) -> Result<(), ParseError> {
        loop {
            match self.next_event()? {
                Event::Eof => return Ok(()),
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                _ => return Err(self.structure("content after the </TS> element")),
            }
        }
    }

    fn contexts(&mut self) -> Result<Vec<Context>, ParseError> {
        let mut contexts = Vec::new();
        loop {
            match self.next_event()? {
                Event::Start(element) => match element.name().as_ref() {
                    b"context" => contexts.push(self.context()?),
                    _ => self.skip(&element)?,
                },
                Event::Empty(element) if element.name().as_ref() == b"context" => {
                    return Err(self.structure("<context> without <name>"));
                }
                Event::End(_) => return Ok(contexts),
                Event::Eof => return Err(self.unexpected_eof("TS")),
                _ => {}
            }
        }
    }

    fn context(&mut self) -> Result<Context, ParseError> {
        let mut name = None;
        let mut comment = None;
        let mut messages = Vec::new();
        loop {
            match self.next_event()? {
                Event::Start(element) => match element.name().as_ref() {
                    b"name" => name = Some(self.text_content()?),
                    b"comment" => comment = Some(self.text_content()?),
                    b"message" => messages.push(self.message(&element)?),
                    _ => self.skip(&element)?,
                },
                Event::Empty(element) => match element.name().as_ref() {
                    b"name" => name = Some(String::new()),
                    b"comment" => comment = Some(String::new()),
                    b"message" => return Err(self.structure("<message> without <source>")),
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("context")),
                _ => {}
            }
        }
        let name = name.ok_or_else(|| self.structure("<context> without <name>"))?;
        Ok(Context {
            name,
            comment,
            messages,
        })
    }

    fn message(&mut self, start: &BytesStart<'_>) -> Result<MessageEntry, ParseError> {
        let numerus = self.attribute(start, b"numerus")?.as_deref() == Some("yes");
        let id = self.attribute(start, b"id")?;

        let mut source = None;
        let mut old_source = None;
        let mut comment = None;
        let mut extra_comment = None;
        let mut translator_comment = None;
        let mut locations = Vec::new();
        let mut translation = None;
        let mut status = TranslationStatus::Finished;

        loop {
            match self.next_event()? {
                Event::Start(element) => match element.name().as_ref() {
                    b"source" => source = Some(self.text_content()?),
                    b"oldsource" => old_source = Some(self.text_content()?),
                    b"comment" => comment = Some(self.text_content()?),
                    b"extracomment" => extra_comment = Some(self.text_content()?),
                    b"translatorcomment" => translator_comment = Some(self.text_content()?),
                    b"location" => {
                        locations.push(self.location(&element)?);
                        self.skip(&element)?;
                    }
                    b"translation" => {
                        status = self.status(&element)?;
                        translation = Some(self.translation(numerus)?);
                    }
                    _ => self.skip(&element)?,
                },
                Event::Empty(element) => match element.name().as_ref() {
                    b"source" => source = Some(String::new()),
                    b"oldsource" => old_source = Some(String::new()),
                    b"comment" => comment = Some(String::new()),
                    b"extracomment" => extra_comment = Some(String::new()),
                    b"translatorcomment" => translator_comment = Some(String::new()),
                    b"location" => locations.push(self.location(&element)?),
                    b"translation" => {
                        status = self.status(&element)?;
                        translation = Some(empty_translation(numerus));
                    }
                    _ => {}
                },
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("message")),
                _ => {}
            }
        }

        let source = source.ok_or_else(|| self.structure("<message> without <source>"))?;
        Ok(MessageEntry {
            source,
            translation: translation.unwrap_or_else(|| empty_translation(numerus)),
            comment,
            numerus,
            extra_comment,
            translator_comment,
            old_source,
            id,
            locations,
            status,
        })
    }

    fn translation(&mut self, numerus: bool) -> Result<Translation, ParseError> {
        if !numerus {
            return Ok(Translation::Single(self.text_content()?));
        }

        let mut forms = Vec::new();
        let mut stray = String::new();
        loop {
            match self.next_event()? {
                Event::Start(element) if element.name().as_ref() == b"numerusform" => {
                    forms.push(self.text_content()?);
                }
                Event::Empty(element) if element.name().as_ref() == b"numerusform" => {
                    forms.push(String::new());
                }
                Event::Start(element) => self.skip(&element)?,
                Event::Text(text) => stray.push_str(&self.unescape(&text)?),
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("translation")),
                _ => {}
            }
        }

        // A plural message translated as plain text keeps that text as its only form.
        if forms.is_empty() && !stray.trim().is_empty() {
            forms.push(stray);
        }
        Ok(Translation::Numerus(forms))
    }

    /// Collect the text of the current element up to its closing tag.
    ///
    /// `<byte value="..."/>` decodes to a character. When the element holds
    /// `<lengthvariant>` children the first variant is the text.
    fn text_content(&mut self) -> Result<String, ParseError> {
        let mut text = String::new();
        let mut variant = None;
        loop {
            match self.next_event()? {
                Event::Text(chunk) => text.push_str(&self.unescape(&chunk)?),
                Event::CData(chunk) => {
                    text.push_str(from_utf8(&chunk).map_err(|_| ParseError::InvalidUtf8)?);
                }
                Event::Empty(element) if element.name().as_ref() == b"byte" => {
                    text.push(self.byte_value(&element)?);
                }
                Event::Start(element) if element.name().as_ref() == b"lengthvariant" => {
                    let value = self.text_content()?;
                    variant.get_or_insert(value);
                }
                Event::Start(element) => self.skip(&element)?,
                Event::End(_) => break,
                Event::Eof => return Err(self.unexpected_eof("text")),
                _ => {}
            }
        }
        Ok(variant.unwrap_or(text))
    }

    fn location(&self, element: &BytesStart<'_>) -> Result<Location, ParseError> {
        Ok(Location {
            filename: self.attribute(element, b"filename")?,
            line: self.attribute(element, b"line")?,
        })
    }

    fn status(&self, element: &BytesStart<'_>) -> Result<TranslationStatus, ParseError> {
        let Some(value) = self.attribute(element, b"type")? else {
            return Ok(TranslationStatus::Finished);
        };
        Ok(TranslationStatus::from_attribute(&value).unwrap_or_else(|| {
            tracing::debug!(value = %value, "unknown translation type, treating as finished");
            TranslationStatus::Finished
        }))
    }

    fn byte_value(&self, element: &BytesStart<'_>) -> Result<char, ParseError> {
        let value = self
            .attribute(element, b"value")?
            .ok_or_else(|| self.structure("<byte> without value"))?;
        let code = match value.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => value.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .ok_or_else(|| self.structure(format!("invalid <byte> value '{value}'")))
    }

    fn attribute(
        &self,
        element: &BytesStart<'_>,
        name: &[u8],
    ) -> Result<Option<String>, ParseError> {
        for attribute in element.attributes() {
            let attribute = attribute.map_err(|err| self.malformed(err.to_string()))?;
            if attribute.key.as_ref() == name {
                let value = attribute
                    .unescape_value()
                    .map_err(|err| self.malformed(err.to_string()))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn unescape(&self, text: &BytesText<'_>) -> Result<String, ParseError> {
        text.unescape()
            .map(|value| value.into_owned())
            .map_err(|err| self.malformed(err.to_string()))
    }

    /// Skip an element and everything inside it.
    fn skip(&mut self, element: &BytesStart<'_>) -> Result<(), ParseError> {
        let end = element.to_end().into_owned();
        match self.reader.read_to_end(end.name()) {
            Ok(_) => Ok(()),
            Err(err) => Err(self.xml_error(&err)),
        }
    }

    fn position(&self) -> usize {
        usize::try_from(self.reader.buffer_position()).unwrap_or(self.input.len())
    }

    fn xml_error(&self, err: &quick_xml::Error) -> ParseError {
        let offset = usize::try_from(self.reader.error_position()).unwrap_or(self.input.len());
        let (line, column, offset) = locate(self.input, offset);
        ParseError::Xml {
            line,
            column,
            offset,
            message: err.to_string(),
        }
    }

    fn malformed(&self, message: impl Into<String>) -> ParseError {
        let (line, column, offset) = locate(self.input, self.position());
        ParseError::Xml {
            line,
            column,
            offset,
            message: message.into(),
        }
    }

    fn structure(&self, message: impl Into<String>) -> ParseError {
        let (line, column, offset) = locate(self.input, self.position());
        ParseError::Structure {
            line,
            column,
            offset,
            message: message.into(),
        }
    }

    fn unexpected_eof(&self, element: &str) -> ParseError {
        self.structure(format!("unexpected end of file inside <{element}>"))
    }
}

fn build_catalog(header: Header, contexts: Vec<Context>) -> TranslationCatalog {
    TranslationCatalog::new(header.language, contexts)
        .with_source_language(header.source_language)
        .with_version(header.version)
}

fn empty_translation(numerus: bool) -> Translation {
    if numerus {
        Translation::Numerus(Vec::new())
    } else {
        Translation::Single(String::new())
    }
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

/// Clamp `offset` to a char boundary and compute its 1-based line and column.
fn locate(input: &str, offset: usize) -> (usize, usize, usize) {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }
    let consumed = input.get(..offset).unwrap_or_default();
    let line = consumed.matches('\n').count() + 1;
    let line_start = consumed.rfind('\n').map_or(0, |pos| pos + 1);
    let column = consumed.get(line_start..).unwrap_or_default().chars().count() + 1;
    (line, column, offset)
}
