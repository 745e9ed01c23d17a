//! Support for Apple `.stringsdict` plural files.
//!
//! Each plural becomes a dictionary whose format key references a single
//! `NSStringPluralRuleType` variable holding one string per quantity.

use quick_xml::{
    Reader, Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};

use crate::{error::Error, traits::Parser, types::Quantity};

const PLIST_DOCTYPE: &str = r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;
const FORMAT_KEY: &str = "NSStringLocalizedFormatKey";
const SPEC_TYPE_KEY: &str = "NSStringFormatSpecTypeKey";
const VALUE_TYPE_KEY: &str = "NSStringFormatValueTypeKey";
const PLURAL_RULE_TYPE: &str = "NSStringPluralRuleType";
const VARIABLE: &str = "value";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    pub plurals: Vec<PluralEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralEntry {
    pub key: String,
    pub items: Vec<(Quantity, String)>,
}

impl Format {
    pub fn find(&self, key: &str) -> Option<&PluralEntry> {
        self.plurals.iter().find(|p| p.key == key)
    }
}

impl Parser for Format {
    /// Reads back the quantity strings of every plural; the format key and
    /// value type are not kept.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut plurals: Vec<PluralEntry> = Vec::new();
        let mut depth = 0usize;
        let mut last_key: Option<String> = None;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => match e.name().as_ref() {
                    b"dict" => {
                        depth += 1;
                        // Depth 2 is the dictionary of one plural, named by the preceding key.
                        if depth == 2 {
                            let key = last_key.take().ok_or_else(|| {
                                Error::InvalidResource("plural dict without key".to_string())
                            })?;
                            plurals.push(PluralEntry {
                                key,
                                items: Vec::new(),
                            });
                        }
                    }
                    b"key" => last_key = Some(read_text(&mut xml_reader)?),
                    b"string" => {
                        let text = read_text(&mut xml_reader)?;
                        let key = last_key.take();
                        if depth == 3 {
                            if let (Some(quantity), Some(entry)) = (
                                key.and_then(|k| k.parse::<Quantity>().ok()),
                                plurals.last_mut(),
                            ) {
                                entry.items.push((quantity, text));
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::End(ref e)) if e.name().as_ref() == b"dict" => {
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }

        Ok(Format { plurals })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new_with_indent(&mut writer, b' ', 4);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml_writer.write_event(Event::DocType(BytesText::from_escaped(PLIST_DOCTYPE)))?;

        let mut plist = BytesStart::new("plist");
        plist.push_attribute(("version", "1.0"));
        xml_writer.write_event(Event::Start(plist))?;
        xml_writer.write_event(Event::Start(BytesStart::new("dict")))?;

        for plural in &self.plurals {
            write_text_element(&mut xml_writer, "key", &plural.key)?;
            xml_writer.write_event(Event::Start(BytesStart::new("dict")))?;
            write_text_element(&mut xml_writer, "key", FORMAT_KEY)?;
            write_text_element(&mut xml_writer, "string", &format!("%#@{}@", VARIABLE))?;
            write_text_element(&mut xml_writer, "key", VARIABLE)?;

            xml_writer.write_event(Event::Start(BytesStart::new("dict")))?;
            write_text_element(&mut xml_writer, "key", SPEC_TYPE_KEY)?;
            write_text_element(&mut xml_writer, "string", PLURAL_RULE_TYPE)?;
            write_text_element(&mut xml_writer, "key", VALUE_TYPE_KEY)?;
            write_text_element(&mut xml_writer, "string", "d")?;
            for (quantity, text) in &plural.items {
                write_text_element(&mut xml_writer, "key", quantity.label())?;
                write_text_element(&mut xml_writer, "string", text)?;
            }
            xml_writer.write_event(Event::End(BytesEnd::new("dict")))?;

            xml_writer.write_event(Event::End(BytesEnd::new("dict")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("dict")))?;
        xml_writer.write_event(Event::End(BytesEnd::new("plist")))?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn write_text_element<W: Write>(
    xml_writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), Error> {
    xml_writer.write_event(Event::Start(BytesStart::new(tag)))?;
    xml_writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    xml_writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn read_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => value.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::End(_)) => return Ok(value),
            Ok(Event::Eof) => return Err(Error::InvalidResource("Unexpected EOF".to_string())),
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;

    fn sample() -> Format {
        Format {
            plurals: vec![
                PluralEntry {
                    key: "songs".to_string(),
                    items: vec![
                        (Quantity::One, "%d song".to_string()),
                        (Quantity::Other, "%d songs".to_string()),
                    ],
                },
                PluralEntry {
                    key: "apples".to_string(),
                    items: vec![(Quantity::Other, "%d apples & pears".to_string())],
                },
            ],
        }
    }

    #[test]
    fn test_write_plist_structure() {
        let mut out = Vec::new();
        sample().to_writer(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(out.contains("<!DOCTYPE plist PUBLIC"));
        assert!(out.contains(r#"<plist version="1.0">"#));
        assert!(out.contains("<key>songs</key>"));
        assert!(out.contains("<string>%#@value@</string>"));
        assert!(out.contains("<string>NSStringPluralRuleType</string>"));
        assert!(out.contains("<key>one</key>"));
        assert!(out.contains("<string>%d apples &amp; pears</string>"));
    }

    #[test]
    fn test_round_trip_serialization() {
        let format = sample();
        let mut out = Vec::new();
        format.to_writer(&mut out).unwrap();
        let reparsed = Format::from_bytes(&out).unwrap();
        assert_eq!(reparsed, format);
    }

    #[test]
    fn test_empty_dictionary() {
        let mut out = Vec::new();
        Format::default().to_writer(&mut out).unwrap();
        let reparsed = Format::from_bytes(&out).unwrap();
        assert!(reparsed.plurals.is_empty());
    }
}
