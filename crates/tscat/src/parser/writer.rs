//! TS document writer producing the layout of Qt's own tools.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::error::WriteError;
use crate::types::{Context, MessageEntry, Translation, TranslationCatalog};

/// Serialize a catalog as a TS document.
///
/// Reading the result back with [`parse_catalog`](super::parse_catalog)
/// yields a catalog equal to the input. Characters that XML 1.0 cannot carry
/// (control characters other than tab, newline and carriage return) are
/// written as `<byte value="x.."/>`.
///
/// # Example
///
/// ```
/// use tscat::parser::{parse_catalog, write_catalog};
///
/// let catalog = parse_catalog(r#"<TS language="hr_HR" version="2.1">
/// <context><name>TopBar</name>
/// <message><source>Pending</source><translation>Na čekanju</translation></message>
/// </context></TS>"#).unwrap();
///
/// let written = write_catalog(&catalog).unwrap();
/// assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n"));
/// assert!(written.contains("        <translation>Na čekanju</translation>\n"));
/// assert_eq!(parse_catalog(&written).unwrap(), catalog);
/// ```
pub fn write_catalog(catalog: &TranslationCatalog) -> Result<String, WriteError> {
    let mut writer = TsWriter::new();
    writer.document(catalog)?;
    let mut output =
        String::from_utf8(writer.inner.into_inner()).map_err(|err| WriteError::new(err.to_string()))?;
    output.push('\n');
    Ok(output)
}

struct TsWriter {
    inner: Writer<Vec<u8>>,
}

impl TsWriter {
    fn new() -> Self {
        TsWriter {
            inner: Writer::new_with_indent(Vec::new(), b' ', 4),
        }
    }

    fn emit<'e>(&mut self, event: impl Into<Event<'e>>) -> Result<(), WriteError> {
        self.inner
            .write_event(event)
            .map_err(|err| WriteError::new(err.to_string()))
    }

    fn document(&mut self, catalog: &TranslationCatalog) -> Result<(), WriteError> {
        self.emit(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.emit(Event::DocType(BytesText::from_escaped("TS")))?;

        let mut root = BytesStart::new("TS");
        root.push_attribute(("version", catalog.version()));
        if !catalog.language().is_empty() {
            root.push_attribute(("language", catalog.language()));
        }
        if let Some(source_language) = catalog.source_language() {
            root.push_attribute(("sourcelanguage", source_language));
        }
        // Qt keeps <context> at column 0, so the root bypasses the indenter.
        let out = self.inner.get_mut();
        out.extend_from_slice(b"\n<");
        out.extend_from_slice(&root);
        out.push(b'>');
        for context in catalog.contexts() {
            self.context(context)?;
        }
        self.inner.get_mut().extend_from_slice(b"\n</TS>");
        Ok(())
    }

    fn context(&mut self, context: &Context) -> Result<(), WriteError> {
        self.emit(Event::Start(BytesStart::new("context")))?;
        self.text_element("name", &context.name)?;
        if let Some(comment) = &context.comment {
            self.text_element("comment", comment)?;
        }
        for message in &context.messages {
            self.message(message)?;
        }
        self.emit(Event::End(BytesEnd::new("context")))
    }

    fn message(&mut self, message: &MessageEntry) -> Result<(), WriteError> {
        let mut start = BytesStart::new("message");
        if let Some(id) = &message.id {
            start.push_attribute(("id", id.as_str()));
        }
        if message.numerus {
            start.push_attribute(("numerus", "yes"));
        }
        self.emit(Event::Start(start))?;

        for location in &message.locations {
            let mut element = BytesStart::new("location");
            if let Some(filename) = &location.filename {
                element.push_attribute(("filename", filename.as_str()));
            }
            if let Some(line) = &location.line {
                element.push_attribute(("line", line.as_str()));
            }
            self.emit(Event::Empty(element))?;
        }

        self.text_element("source", &message.source)?;
        let optional = [
            ("oldsource", &message.old_source),
            ("comment", &message.comment),
            ("extracomment", &message.extra_comment),
            ("translatorcomment", &message.translator_comment),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                self.text_element(name, value)?;
            }
        }

        let mut translation = BytesStart::new("translation");
        if let Some(status) = message.status.as_attribute() {
            translation.push_attribute(("type", status));
        }
        match &message.translation {
            Translation::Single(text) => {
                self.emit(Event::Start(translation))?;
                self.text(text)?;
            }
            Translation::Numerus(forms) => {
                self.emit(Event::Start(translation))?;
                if forms.is_empty() {
                    self.text("")?;
                }
                for form in forms {
                    self.text_element("numerusform", form)?;
                }
            }
        }
        self.emit(Event::End(BytesEnd::new("translation")))?;
        self.emit(Event::End(BytesEnd::new("message")))
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), WriteError> {
        self.emit(Event::Start(BytesStart::new(name)))?;
        self.text(text)?;
        self.emit(Event::End(BytesEnd::new(name)))
    }

    /// Write element text, always ending on a text event.
    ///
    /// The indenting writer puts a line break before a closing tag that
    /// follows another tag, which would add whitespace to the content. A
    /// trailing (possibly empty) text event keeps the closing tag inline.
    fn text(&mut self, text: &str) -> Result<(), WriteError> {
        let mut run_start = 0;
        for (index, ch) in text.char_indices() {
            if is_xml_char(ch) {
                continue;
            }
            self.emit(Event::Text(BytesText::new(
                text.get(run_start..index).unwrap_or_default(),
            )))?;
            let mut byte = BytesStart::new("byte");
            byte.push_attribute(("value", format!("x{:x}", u32::from(ch)).as_str()));
            self.emit(Event::Empty(byte))?;
            run_start = index + ch.len_utf8();
        }
        self.emit(Event::Text(BytesText::new(
            text.get(run_start..).unwrap_or_default(),
        )))
    }
}

fn is_xml_char(ch: char) -> bool {
    !ch.is_control() || matches!(ch, '\t' | '\n' | '\r') || u32::from(ch) >= 0x7f
}
