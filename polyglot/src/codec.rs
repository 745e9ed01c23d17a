//! The flat store codec: maps typed resources to and from flat `key=value`
//! records.
//!
//! Keys are encoded as follows:
//!
//! | resource     | key                     | value            |
//! |--------------|-------------------------|------------------|
//! | string       | `<id>`                  | text             |
//! | plural       | `<id>.<quantity label>` | text of the form |
//! | string array | `<id>.<index>`          | text of the item |
//!
//! Each resource type is stored in one file per locale
//! (`<type>.<locale>.properties`). Metadata is stored without a locale
//! dimension in `metadata.<type>.properties` as `group|PLATFORMS[|extra]`, and
//! declared array sizes in `sizes.arrays.properties`.
//!
//! Records that cannot be decoded are skipped: they are logged and returned
//! alongside the decoded value instead of failing the whole file.

use std::collections::{BTreeMap, BTreeSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::{
    formats::PropertiesFormat,
    locale::LocaleCode,
    types::{
        LocalizedResources, Metadata, MetadataDetail, Platform, Plural, Quantity, Resource,
        ResourceId, ResourceType, Resources,
    },
};

/// File holding the declared size of every string array.
pub const ARRAY_SIZES_FILE: &str = "sizes.arrays.properties";

/// Highest array index accepted when decoding; larger suffixes are treated as
/// malformed instead of allocating the gap.
pub const MAX_ARRAY_INDEX: usize = 4096;

lazy_static! {
    static ref RESOURCES_FILE_REGEX: Regex =
        Regex::new(r"^(strings|plurals|arrays)\.([^.]+)\.properties$").unwrap();
}

/// A record that could not be decoded and was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub key: String,
    pub reason: String,
}

impl SkippedRecord {
    fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        let skipped = Self {
            key: key.into(),
            reason: reason.into(),
        };
        warn!(key = %skipped.key, reason = %skipped.reason, "skipping record");
        skipped
    }
}

/// The result of decoding: the value plus the records that were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    pub value: T,
    pub skipped: Vec<SkippedRecord>,
}

/// `strings.de.properties` for `(Strings, de)`.
pub fn resources_file_name(resource_type: ResourceType, locale: &LocaleCode) -> String {
    format!("{}.{}.properties", resource_type.title(), locale)
}

/// Recovers the locale from a resource file name of the given type.
pub fn parse_resources_file_name(resource_type: ResourceType, file_name: &str) -> Option<LocaleCode> {
    let captures = RESOURCES_FILE_REGEX.captures(file_name)?;
    (&captures[1] == resource_type.title()).then(|| LocaleCode::new(&captures[2]))
}

/// `metadata.plurals.properties` for `Plurals`.
pub fn metadata_file_name(resource_type: ResourceType) -> String {
    format!("metadata.{}.properties", resource_type.title())
}

/// Encodes the resources of one locale into flat records.
pub fn encode_resources(resources: &Resources) -> PropertiesFormat {
    let mut records = PropertiesFormat::new();
    for (id, resource) in resources {
        match resource {
            Resource::Str(text) => records.insert(id.clone(), text.clone()),
            Resource::Plural(plural) => {
                warn_on_compound_id(id);
                for (quantity, text) in plural.items() {
                    records.insert(format!("{}.{}", id, quantity.label()), text.clone());
                }
            }
            Resource::StringArray(items) => {
                warn_on_compound_id(id);
                if items.is_empty() {
                    warn!(id = %id, "empty string array has no records to store");
                }
                for (index, text) in items.iter().enumerate() {
                    records.insert(format!("{}.{}", id, index), text.clone());
                }
            }
        }
    }
    records
}

fn warn_on_compound_id(id: &str) {
    if id.contains('.') {
        warn!(id, "resource id contains '.', it will not decode back to the same id");
    }
}

/// Encodes every locale, one record set per locale.
pub fn encode(
    localized: &LocalizedResources,
    resource_type: ResourceType,
) -> BTreeMap<LocaleCode, PropertiesFormat> {
    localized
        .iter()
        .map(|(locale, resources)| {
            let comment = format!(
                "Localized {} in {}",
                resource_type.title(),
                locale.display_name()
            );
            (locale.clone(), encode_resources(resources).with_comment(comment))
        })
        .collect()
}

/// Decodes the records of one locale as resources of `resource_type`.
pub fn decode_resources(records: &PropertiesFormat, resource_type: ResourceType) -> Decoded<Resources> {
    match resource_type {
        ResourceType::Strings => Decoded {
            value: records
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), Resource::Str(v.clone())))
                .collect(),
            skipped: Vec::new(),
        },
        ResourceType::Plurals => decode_plurals(records),
        ResourceType::Arrays => decode_arrays(records),
    }
}

fn decode_plurals(records: &PropertiesFormat) -> Decoded<Resources> {
    let mut skipped = Vec::new();
    let mut grouped: BTreeMap<ResourceId, BTreeMap<Quantity, String>> = BTreeMap::new();

    for (key, text) in &records.entries {
        let Some((id, label)) = key.split_once('.') else {
            skipped.push(SkippedRecord::new(key, "missing quantity suffix"));
            continue;
        };
        match label.parse::<Quantity>() {
            Ok(quantity) => {
                grouped
                    .entry(id.to_string())
                    .or_default()
                    .insert(quantity, text.clone());
            }
            Err(e) => skipped.push(SkippedRecord::new(key, e.to_string())),
        }
    }

    let value = grouped
        .into_iter()
        .map(|(id, items)| {
            if !items.contains_key(&Quantity::Other) {
                warn!(id = %id, "plural has no `other` form; treating it as untranslated");
            }
            let plural = items
                .into_iter()
                .fold(Plural::from_other(""), |plural, (quantity, text)| {
                    plural.with(quantity, text)
                });
            (id, Resource::Plural(plural))
        })
        .collect();

    Decoded { value, skipped }
}

fn decode_arrays(records: &PropertiesFormat) -> Decoded<Resources> {
    let mut skipped = Vec::new();
    let mut grouped: BTreeMap<ResourceId, BTreeMap<usize, String>> = BTreeMap::new();

    for (key, text) in &records.entries {
        let Some((id, suffix)) = key.split_once('.') else {
            skipped.push(SkippedRecord::new(key, "missing array index suffix"));
            continue;
        };
        match suffix.parse::<usize>() {
            Ok(index) if index <= MAX_ARRAY_INDEX => {
                grouped
                    .entry(id.to_string())
                    .or_default()
                    .insert(index, text.clone());
            }
            Ok(index) => skipped.push(SkippedRecord::new(
                key,
                format!("array index {} exceeds {}", index, MAX_ARRAY_INDEX),
            )),
            Err(_) => skipped.push(SkippedRecord::new(
                key,
                format!("non-numeric array index `{}`", suffix),
            )),
        }
    }

    let value = grouped
        .into_iter()
        .map(|(id, indexed)| {
            let len = indexed.keys().next_back().map_or(0, |last| last + 1);
            if len != indexed.len() {
                warn!(id = %id, "array has missing indices; filling them as untranslated");
            }
            let mut items = vec![String::new(); len];
            for (index, text) in indexed {
                items[index] = text;
            }
            (id, Resource::StringArray(items))
        })
        .collect();

    Decoded { value, skipped }
}

/// Decodes every locale's records as resources of `resource_type`.
pub fn decode(
    records: &BTreeMap<LocaleCode, PropertiesFormat>,
    resource_type: ResourceType,
) -> Decoded<LocalizedResources> {
    let mut skipped = Vec::new();
    let value = records
        .iter()
        .map(|(locale, records)| {
            let decoded = decode_resources(records, resource_type);
            skipped.extend(decoded.skipped);
            (locale.clone(), decoded.value)
        })
        .collect();
    Decoded { value, skipped }
}

/// Encodes metadata as `group|PLATFORMS[|extra]` lines.
pub fn encode_metadata(
    metadata: &BTreeMap<ResourceId, Metadata>,
    resource_type: ResourceType,
) -> PropertiesFormat {
    let mut records = PropertiesFormat::new()
        .with_comment(format!("Resource metadata for {}", resource_type.title()));
    for (id, meta) in metadata {
        let platforms = meta
            .platforms
            .iter()
            .map(Platform::name)
            .collect::<Vec<_>>()
            .join(",");
        let extra = match &meta.detail {
            MetadataDetail::Str => String::new(),
            MetadataDetail::Plural { quantities } => format!(
                "|{}",
                quantities
                    .iter()
                    .map(Quantity::name)
                    .collect::<Vec<_>>()
                    .join(",")
            ),
            MetadataDetail::StringArray { size } => format!("|{}", size),
        };
        records.insert(id.clone(), format!("{}|{}{}", meta.group, platforms, extra));
    }
    records
}

/// Decodes metadata lines for `resource_type`.
///
/// For arrays the declared size comes from `array_sizes` when present there,
/// then from the metadata line, and defaults to 1.
pub fn decode_metadata(
    records: &PropertiesFormat,
    resource_type: ResourceType,
    array_sizes: &BTreeMap<ResourceId, usize>,
) -> Decoded<BTreeMap<ResourceId, Metadata>> {
    let mut skipped = Vec::new();
    let mut value = BTreeMap::new();

    for (id, line) in &records.entries {
        let mut fields = line.split('|');
        let group = fields.next().unwrap_or_default().to_string();

        let platforms = match fields.next() {
            None => Platform::all(),
            Some(names) => names
                .split(',')
                .filter(|name| !name.is_empty())
                .filter_map(|name| match name.parse::<Platform>() {
                    Ok(platform) => Some(platform),
                    Err(e) => {
                        skipped.push(SkippedRecord::new(id, e.to_string()));
                        None
                    }
                })
                .collect::<BTreeSet<_>>(),
        };

        let extra = fields.next();
        let detail = match resource_type {
            ResourceType::Strings => MetadataDetail::Str,
            ResourceType::Plurals => MetadataDetail::Plural {
                quantities: match extra {
                    None => vec![Quantity::One, Quantity::Other],
                    Some(names) => names
                        .split(',')
                        .filter(|name| !name.is_empty())
                        .filter_map(|name| match name.parse::<Quantity>() {
                            Ok(quantity) => Some(quantity),
                            Err(e) => {
                                skipped.push(SkippedRecord::new(id, e.to_string()));
                                None
                            }
                        })
                        .collect(),
                },
            },
            ResourceType::Arrays => MetadataDetail::StringArray {
                size: array_sizes
                    .get(id)
                    .copied()
                    .or_else(|| extra.and_then(|size| size.trim().parse().ok()))
                    .unwrap_or(1),
            },
        };

        value.insert(
            id.clone(),
            Metadata {
                group,
                platforms,
                detail,
            },
        );
    }

    Decoded { value, skipped }
}

/// Encodes the declared array sizes side-table.
pub fn encode_array_sizes(sizes: &BTreeMap<ResourceId, usize>) -> PropertiesFormat {
    let mut records = PropertiesFormat::new()
        .with_comment(format!("Required sizes for {}", ResourceType::Arrays.title()));
    for (id, size) in sizes {
        records.insert(id.clone(), size.to_string());
    }
    records
}

/// Decodes the declared array sizes; unparsable sizes become 1.
pub fn decode_array_sizes(records: &PropertiesFormat) -> BTreeMap<ResourceId, usize> {
    records
        .entries
        .iter()
        .map(|(id, size)| {
            let size = size.trim().parse().unwrap_or_else(|_| {
                warn!(id = %id, size = %size, "unparsable array size; using 1");
                1
            });
            (id.clone(), size)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(pairs: &[(&str, &str)]) -> PropertiesFormat {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_encode_strings() {
        let resources = Resources::from([("hello".to_string(), Resource::Str("Hi".to_string()))]);
        let encoded = encode_resources(&resources);
        assert_eq!(encoded.get("hello"), Some("Hi"));
        assert_eq!(encoded.len(), 1);
    }

    #[test]
    fn test_encode_plural_keys() {
        let plural = Plural::from_other("%d books").with(Quantity::One, "%d book");
        let resources = Resources::from([("books".to_string(), Resource::Plural(plural))]);
        let encoded = encode_resources(&resources);
        assert_eq!(encoded.get("books.one"), Some("%d book"));
        assert_eq!(encoded.get("books.other"), Some("%d books"));
        assert_eq!(encoded.len(), 2);
    }

    #[test]
    fn test_encode_empty_array_has_no_records() {
        let resources = Resources::from([
            ("empty".to_string(), Resource::StringArray(vec![])),
            ("days".to_string(), Resource::StringArray(vec!["Mon".into()])),
        ]);
        let encoded = encode_resources(&resources);
        assert_eq!(encoded.len(), 1);
        assert_eq!(encoded.get("days.0"), Some("Mon"));

        let decoded = decode_resources(&encoded, ResourceType::Arrays);
        assert!(!decoded.value.contains_key("empty"));
    }

    #[test]
    fn test_decode_arrays_sorts_numerically() {
        let items: Vec<(String, String)> = (0..12)
            .map(|i| (format!("days.{}", i), format!("day {}", i)))
            .collect();
        let decoded = decode_resources(
            &items.into_iter().collect::<PropertiesFormat>(),
            ResourceType::Arrays,
        );
        let Resource::StringArray(days) = &decoded.value["days"] else {
            panic!("expected an array");
        };
        let expected: Vec<String> = (0..12).map(|i| format!("day {}", i)).collect();
        assert_eq!(days, &expected);
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn test_decode_arrays_skips_malformed_and_fills_gaps() {
        let decoded = decode_resources(
            &records(&[
                ("menu.0", "File"),
                ("menu.2", "View"),
                ("menu.x", "Broken"),
                ("menu", "No suffix"),
                ("menu.99999", "Too far"),
            ]),
            ResourceType::Arrays,
        );
        assert_eq!(
            decoded.value["menu"],
            Resource::StringArray(vec!["File".into(), "".into(), "View".into()])
        );
        let keys: Vec<&str> = decoded.skipped.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["menu", "menu.99999", "menu.x"]);
    }

    #[test]
    fn test_decode_plurals_skips_unknown_quantity_and_fills_other() {
        let decoded = decode_resources(
            &records(&[
                ("apples.one", "One apple"),
                ("apples.several", "Some apples"),
                ("pears.other", "%d pears"),
                ("bare", "no suffix"),
            ]),
            ResourceType::Plurals,
        );
        assert_eq!(decoded.skipped.len(), 2);
        let Resource::Plural(apples) = &decoded.value["apples"] else {
            panic!("expected a plural");
        };
        assert_eq!(apples.get(Quantity::One), Some("One apple"));
        assert_eq!(apples.other(), "");
        assert!(!decoded.value["apples"].is_translated());
        assert!(decoded.value["pears"].is_translated());
    }

    #[test]
    fn test_decode_strings_keeps_whole_key() {
        let decoded = decode_resources(&records(&[("a.b", "dotted")]), ResourceType::Strings);
        assert_eq!(decoded.value["a.b"], Resource::Str("dotted".into()));
    }

    #[test]
    fn test_resources_file_names() {
        let de = LocaleCode::from("de");
        assert_eq!(resources_file_name(ResourceType::Strings, &de), "strings.de.properties");
        assert_eq!(
            parse_resources_file_name(ResourceType::Plurals, "plurals.pt-BR.properties"),
            Some(LocaleCode::from("pt-BR"))
        );
        assert_eq!(parse_resources_file_name(ResourceType::Strings, "plurals.de.properties"), None);
        assert_eq!(
            parse_resources_file_name(ResourceType::Strings, "metadata.strings.properties"),
            None
        );
        assert_eq!(parse_resources_file_name(ResourceType::Arrays, ARRAY_SIZES_FILE), None);
    }

    #[test]
    fn test_metadata_encoding() {
        let metadata = BTreeMap::from([
            (
                "hello".to_string(),
                Metadata::new(ResourceType::Plurals).with_group("home"),
            ),
            (
                "ios_only".to_string(),
                Metadata::new(ResourceType::Plurals).with_platforms([Platform::Ios]),
            ),
        ]);
        let encoded = encode_metadata(&metadata, ResourceType::Plurals);
        assert_eq!(encoded.get("hello"), Some("home|ANDROID,IOS|ONE,OTHER"));
        assert_eq!(encoded.get("ios_only"), Some("|IOS|ONE,OTHER"));

        let decoded = decode_metadata(&encoded, ResourceType::Plurals, &BTreeMap::new());
        assert_eq!(decoded.value, metadata);
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn test_metadata_decoding_edge_cases() {
        let decoded = decode_metadata(
            &records(&[
                ("legacy", "group"),
                ("nowhere", "|"),
                ("odd", "g|ANDROID,WEB"),
            ]),
            ResourceType::Strings,
            &BTreeMap::new(),
        );
        assert_eq!(decoded.value["legacy"].platforms, Platform::all());
        assert_eq!(decoded.value["legacy"].group, "group");
        assert!(decoded.value["nowhere"].platforms.is_empty());
        assert_eq!(decoded.value["odd"].platforms, Platform::Android.only());
        assert_eq!(decoded.skipped.len(), 1);
    }

    #[test]
    fn test_array_size_side_table_wins() {
        let sizes = decode_array_sizes(&records(&[("menu", "3"), ("broken", "many")]));
        assert_eq!(sizes["menu"], 3);
        assert_eq!(sizes["broken"], 1);

        let decoded = decode_metadata(
            &records(&[("menu", "|ANDROID|5"), ("other", "|ANDROID|5"), ("plain", "|IOS")]),
            ResourceType::Arrays,
            &sizes,
        );
        assert_eq!(decoded.value["menu"].detail, MetadataDetail::StringArray { size: 3 });
        assert_eq!(decoded.value["other"].detail, MetadataDetail::StringArray { size: 5 });
        assert_eq!(decoded.value["plain"].detail, MetadataDetail::StringArray { size: 1 });

        let encoded = encode_array_sizes(&sizes);
        assert_eq!(encoded.get("menu"), Some("3"));
    }
}
