//! Support for Android `strings.xml` resource files.
//!
//! Handles `<string>`, `<plurals>` and `<string-array>` elements. Values are
//! written as given (already run through the formatter pipeline); only the
//! XML-significant `<`, `>` and `&` are escaped.

use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::Quantity};

pub const TOOLS_NAMESPACE: &str = "http://schemas.android.com/tools";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// Declare `xmlns:tools` on `<resources>`; set for the default locale.
    pub tools_namespace: bool,
    pub elements: Vec<Element>,
}

/// A child of `<resources>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// `<string name="dragon">Trogdor the Burninator</string>`
    String { name: String, value: String },
    /// ```xml
    /// <plurals name="numberOfSongsAvailable">
    ///     <item quantity="one">Znaleziono %d piosenkę.</item>
    ///     <item quantity="few">Znaleziono %d piosenki.</item>
    ///     <item quantity="other">Znaleziono %d piosenek.</item>
    /// </plurals>
    /// ```
    Plurals {
        name: String,
        items: Vec<(Quantity, String)>,
    },
    /// ```xml
    /// <string-array name="country_names">
    ///     <item>France</item>
    ///     <item>Germany</item>
    /// </string-array>
    /// ```
    StringArray { name: String, items: Vec<String> },
}

impl Element {
    pub fn name(&self) -> &str {
        match self {
            Element::String { name, .. }
            | Element::Plurals { name, .. }
            | Element::StringArray { name, .. } => name,
        }
    }
}

impl Format {
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name() == name)
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut format = Format::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"resources" => {
                        format.tools_namespace = attribute(e, b"xmlns:tools")?.is_some();
                    }
                    b"string" => {
                        let name = required_name(e, "string")?;
                        let value = read_text(&mut xml_reader)?;
                        format.elements.push(Element::String { name, value });
                    }
                    b"plurals" => {
                        let name = required_name(e, "plurals")?;
                        let items = read_items(&mut xml_reader, b"plurals")?
                            .into_iter()
                            .map(|(quantity, text)| {
                                let quantity = quantity.ok_or_else(|| {
                                    Error::InvalidResource(format!(
                                        "plurals `{}` item missing 'quantity'",
                                        name
                                    ))
                                })?;
                                Ok((quantity.parse::<Quantity>()?, text))
                            })
                            .collect::<Result<Vec<_>, Error>>()?;
                        format.elements.push(Element::Plurals { name, items });
                    }
                    b"string-array" => {
                        let name = required_name(e, "string-array")?;
                        let items = read_items(&mut xml_reader, b"string-array")?
                            .into_iter()
                            .map(|(_, text)| text)
                            .collect();
                        format.elements.push(Element::StringArray { name, items });
                    }
                    _ => {}
                },
                Ok(Event::Empty(ref e)) if e.name().as_ref() == b"resources" => {
                    format.tools_namespace = attribute(e, b"xmlns:tools")?.is_some();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }
        Ok(format)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 4);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut resources_start = BytesStart::new("resources");
        if self.tools_namespace {
            resources_start.push_attribute(("xmlns:tools", TOOLS_NAMESPACE));
        }
        xml_writer.write_event(Event::Start(resources_start))?;

        for element in &self.elements {
            match element {
                Element::String { name, value } => {
                    let mut elem = BytesStart::new("string");
                    elem.push_attribute(("name", name.as_str()));
                    write_text_element(&mut xml_writer, elem, value)?;
                }
                Element::Plurals { name, items } => {
                    let mut elem = BytesStart::new("plurals");
                    elem.push_attribute(("name", name.as_str()));
                    xml_writer.write_event(Event::Start(elem))?;
                    for (quantity, text) in items {
                        let mut item = BytesStart::new("item");
                        item.push_attribute(("quantity", quantity.label()));
                        write_text_element(&mut xml_writer, item, text)?;
                    }
                    xml_writer.write_event(Event::End(BytesEnd::new("plurals")))?;
                }
                Element::StringArray { name, items } => {
                    let mut elem = BytesStart::new("string-array");
                    elem.push_attribute(("name", name.as_str()));
                    xml_writer.write_event(Event::Start(elem))?;
                    for text in items {
                        write_text_element(&mut xml_writer, BytesStart::new("item"), text)?;
                    }
                    xml_writer.write_event(Event::End(BytesEnd::new("string-array")))?;
                }
            }
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    start: BytesStart,
    text: &str,
) -> Result<(), Error> {
    let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    xml_writer.write_event(Event::Start(start))?;
    xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    xml_writer.write_event(Event::End(end))?;
    Ok(())
}

fn attribute(e: &BytesStart, key: &[u8]) -> Result<Option<String>, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::DataMismatch(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.to_string()));
        }
    }
    Ok(None)
}

fn required_name(e: &BytesStart, tag: &str) -> Result<String, Error> {
    attribute(e, b"name")?
        .ok_or_else(|| Error::InvalidResource(format!("{} tag missing 'name'", tag)))
}

/// Reads the text of the element whose start tag was just consumed.
fn read_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => value.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::CData(e)) => value.push_str(&String::from_utf8_lossy(&e)),
            Ok(Event::End(_)) => return Ok(value),
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
}

/// Reads `<item>` children up to the closing `parent` tag, returning each
/// item's `quantity` attribute (if any) and text.
fn read_items<R: BufRead>(
    xml_reader: &mut Reader<R>,
    parent: &[u8],
) -> Result<Vec<(Option<String>, String)>, Error> {
    let mut buf = Vec::new();
    let mut items = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"item" => {
                let quantity = attribute(e, b"quantity")?;
                let text = read_text(xml_reader)?;
                items.push((quantity, text));
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"item" => {
                items.push((attribute(e, b"quantity")?, String::new()));
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == parent => return Ok(items),
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
}
