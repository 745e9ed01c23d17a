//! Core, platform-agnostic types for polyglot.
//! The flat store decodes into these; generators render these.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{error::Error, locale::LocaleCode};

/// Identifier of a translatable unit; unique within a resource type and stable
/// across locales.
pub type ResourceId = String;

/// Resources of one type, keyed by id, for a single locale.
pub type Resources = BTreeMap<ResourceId, Resource>;

/// Resources of one type for every locale of a project.
pub type LocalizedResources = BTreeMap<LocaleCode, Resources>;

/// A unit of localized content: a string, a plural, or a string array.
///
/// Strings, plurals and arrays each require different encodings on Android
/// and iOS, so generators dispatch on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Str(String),
    Plural(Plural),
    StringArray(Vec<String>),
}

impl Resource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::Str(_) => ResourceType::Strings,
            Resource::Plural(_) => ResourceType::Plurals,
            Resource::StringArray(_) => ResourceType::Arrays,
        }
    }

    /// Whether this value counts as translated for its locale.
    ///
    /// A string needs non-blank text, a plural a non-blank `other` form and
    /// an array non-blank text in every item.
    pub fn is_translated(&self) -> bool {
        match self {
            Resource::Str(text) => !is_blank(text),
            Resource::Plural(plural) => !is_blank(plural.other()),
            Resource::StringArray(items) => {
                !items.is_empty() && items.iter().all(|item| !is_blank(item))
            }
        }
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// All quantity forms of a plural resource for one locale.
///
/// `other` is always present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "BTreeMap<Quantity, String>", into = "BTreeMap<Quantity, String>")]
pub struct Plural {
    items: BTreeMap<Quantity, String>,
}

impl Plural {
    /// Builds a plural from its quantity forms, rejecting a map without `other`.
    pub fn new(items: BTreeMap<Quantity, String>) -> Result<Self, Error> {
        if !items.contains_key(&Quantity::Other) {
            return Err(Error::InvalidResource(
                "plural must contain the `other` quantity".to_string(),
            ));
        }
        Ok(Self { items })
    }

    /// Builds a plural that only has an `other` form.
    pub fn from_other(other: impl Into<String>) -> Self {
        Self {
            items: BTreeMap::from([(Quantity::Other, other.into())]),
        }
    }

    /// Returns a copy with `quantity` set to `text`.
    pub fn with(mut self, quantity: Quantity, text: impl Into<String>) -> Self {
        self.items.insert(quantity, text.into());
        self
    }

    pub fn get(&self, quantity: Quantity) -> Option<&str> {
        self.items.get(&quantity).map(String::as_str)
    }

    pub fn other(&self) -> &str {
        self.get(Quantity::Other).unwrap_or_default()
    }

    /// Quantity forms in grammatical order (zero first, other last).
    pub fn items(&self) -> &BTreeMap<Quantity, String> {
        &self.items
    }
}

impl TryFrom<BTreeMap<Quantity, String>> for Plural {
    type Error = Error;

    fn try_from(items: BTreeMap<Quantity, String>) -> Result<Self, Self::Error> {
        Plural::new(items)
    }
}

impl From<Plural> for BTreeMap<Quantity, String> {
    fn from(plural: Plural) -> Self {
        plural.items
    }
}

/// Grammatical plural categories.
///
/// Not all languages use all of them; some, like Chinese, only use `other`.
/// See <https://developer.android.com/guide/topics/resources/string-resource#Plurals>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Quantity {
    pub const ALL: [Quantity; 6] = [
        Quantity::Zero,
        Quantity::One,
        Quantity::Two,
        Quantity::Few,
        Quantity::Many,
        Quantity::Other,
    ];

    /// Lowercase label used in flat-store keys and platform files.
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::Zero => "zero",
            Quantity::One => "one",
            Quantity::Two => "two",
            Quantity::Few => "few",
            Quantity::Many => "many",
            Quantity::Other => "other",
        }
    }

    /// Uppercase name used in metadata files.
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Zero => "ZERO",
            Quantity::One => "ONE",
            Quantity::Two => "TWO",
            Quantity::Few => "FEW",
            Quantity::Many => "MANY",
            Quantity::Other => "OTHER",
        }
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ZERO" => Ok(Quantity::Zero),
            "ONE" => Ok(Quantity::One),
            "TWO" => Ok(Quantity::Two),
            "FEW" => Ok(Quantity::Few),
            "MANY" => Ok(Quantity::Many),
            "OTHER" => Ok(Quantity::Other),
            _ => Err(Error::UnknownQuantity(s.to_string())),
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The three kinds of resource tables a project stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Strings,
    Plurals,
    Arrays,
}

impl ResourceType {
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Strings,
        ResourceType::Plurals,
        ResourceType::Arrays,
    ];

    /// Title used in every file name of this type.
    pub fn title(&self) -> &'static str {
        match self {
            ResourceType::Strings => "strings",
            ResourceType::Plurals => "plurals",
            ResourceType::Arrays => "arrays",
        }
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strings" | "string" | "str" => Ok(ResourceType::Strings),
            "plurals" | "plural" => Ok(ResourceType::Plurals),
            "arrays" | "array" | "string-array" => Ok(ResourceType::Arrays),
            other => Err(Error::UnknownResourceType(other.to_string())),
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Ios];

    /// Uppercase name used in metadata files.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Android => "ANDROID",
            Platform::Ios => "IOS",
        }
    }

    pub fn all() -> BTreeSet<Platform> {
        Platform::ALL.into_iter().collect()
    }

    pub fn only(self) -> BTreeSet<Platform> {
        BTreeSet::from([self])
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ANDROID" => Ok(Platform::Android),
            "IOS" => Ok(Platform::Ios),
            _ => Err(Error::UnknownPlatform(s.to_string())),
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
        }
    }
}

/// Non-localized attributes of a resource id, shared by every locale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    /// Organizational bucket; empty when ungrouped.
    #[serde(default)]
    pub group: String,

    /// Platforms whose exports include this resource.
    pub platforms: BTreeSet<Platform>,

    /// Structure declared for the resource type.
    pub detail: MetadataDetail,
}

/// Type-specific part of [`Metadata`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataDetail {
    Str,
    Plural { quantities: Vec<Quantity> },
    StringArray { size: usize },
}

impl Metadata {
    /// Default metadata for a freshly created resource of `resource_type`.
    pub fn new(resource_type: ResourceType) -> Self {
        let detail = match resource_type {
            ResourceType::Strings => MetadataDetail::Str,
            ResourceType::Plurals => MetadataDetail::Plural {
                quantities: vec![Quantity::One, Quantity::Other],
            },
            ResourceType::Arrays => MetadataDetail::StringArray { size: 1 },
        };
        Self {
            group: String::new(),
            platforms: Platform::all(),
            detail,
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self.detail {
            MetadataDetail::Str => ResourceType::Strings,
            MetadataDetail::Plural { .. } => ResourceType::Plurals,
            MetadataDetail::StringArray { .. } => ResourceType::Arrays,
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_platforms(mut self, platforms: impl IntoIterator<Item = Platform>) -> Self {
        self.platforms = platforms.into_iter().collect();
        self
    }

    pub fn targets(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}
