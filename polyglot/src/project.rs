//! The project aggregate: settings, resource tables and export.
//!
//! A project lives in `<projects dir>/<name>/`:
//!
//! ```text
//! project.properties            settings
//! strings.<locale>.properties   one content file per type and locale
//! metadata.<type>.properties    one metadata file per type
//! sizes.arrays.properties       declared array sizes
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    codec::{self, ARRAY_SIZES_FILE, Decoded, SkippedRecord},
    error::Error,
    formats::PropertiesFormat,
    formatter::StringFormatter,
    generators,
    locale::{LocaleCode, sort_by_display_name},
    report::Report,
    traits::Parser,
    types::{
        LocalizedResources, Metadata, MetadataDetail, Platform, Resource, ResourceId,
        ResourceType, Resources,
    },
};

pub const PROJECT_FILE: &str = "project.properties";
pub const DEFAULT_ANDROID_OUTPUT: &str = "output/android";
pub const DEFAULT_IOS_OUTPUT: &str = "output/ios";
pub const DEFAULT_LOCALE: &str = "en";

const PROP_ANDROID_OUTPUT: &str = "androidOutputUrl";
const PROP_IOS_OUTPUT: &str = "iosOutputUrl";
const PROP_DEFAULT_LOCALE: &str = "defaultLocale";
const PROP_LOCALES: &str = "locales";

/// Settings of a named project.
///
/// The default locale is the fallback when a translation is missing. Android
/// puts it in the base `values` folder; iOS has no base folder and gives every
/// locale, the default included, its own `<locale>.lproj`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    folder: PathBuf,
    /// Output folder of the Android export; relative paths resolve against
    /// the working directory.
    pub android_output_url: String,
    pub ios_output_url: String,
    pub default_locale: LocaleCode,
    /// Ordered by display name.
    pub locales: Vec<LocaleCode>,
}

impl Project {
    /// A project with default settings; nothing is written.
    pub fn new(projects_dir: impl AsRef<Path>, name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        validate_name(&name)?;
        let default_locale = LocaleCode::from(DEFAULT_LOCALE);
        Ok(Self {
            folder: projects_dir.as_ref().join(&name),
            name,
            android_output_url: DEFAULT_ANDROID_OUTPUT.to_string(),
            ios_output_url: DEFAULT_IOS_OUTPUT.to_string(),
            locales: vec![default_locale.clone()],
            default_locale,
        })
    }

    /// Creates the project folder and persists `self`'s settings.
    ///
    /// Fails if the project already has a settings file.
    pub fn create(&self) -> Result<(), Error> {
        let settings = self.settings_file();
        if settings.exists() {
            return Err(Error::validation_error(format!(
                "project `{}` already exists",
                self.name
            )));
        }
        fs::create_dir_all(&self.folder)?;
        self.write_settings()?;
        info!(project = %self.name, folder = %self.folder.display(), "created project");
        Ok(())
    }

    /// Loads the settings of `name`; missing keys fall back to the defaults.
    pub fn load(projects_dir: impl AsRef<Path>, name: impl Into<String>) -> Result<Self, Error> {
        let mut project = Self::new(projects_dir, name)?;
        if !project.folder.is_dir() {
            return Err(Error::validation_error(format!(
                "project `{}` not found in {}",
                project.name,
                project.folder.display()
            )));
        }

        let settings_file = project.settings_file();
        let settings = if settings_file.exists() {
            PropertiesFormat::read_from(&settings_file)?
        } else {
            debug!(project = %project.name, "no settings file; using defaults");
            PropertiesFormat::new()
        };

        if let Some(url) = settings.get(PROP_ANDROID_OUTPUT) {
            project.android_output_url = url.to_string();
        }
        if let Some(url) = settings.get(PROP_IOS_OUTPUT) {
            project.ios_output_url = url.to_string();
        }
        if let Some(locale) = settings.get(PROP_DEFAULT_LOCALE).filter(|l| !l.is_empty()) {
            project.default_locale = LocaleCode::from(locale);
        }
        let locales = settings
            .get(PROP_LOCALES)
            .map(|codes| {
                codes
                    .split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(LocaleCode::from)
                    .collect::<Vec<_>>()
            })
            .unwrap_or_else(|| vec![LocaleCode::from(DEFAULT_LOCALE)]);
        project.set_locales(locales);

        Ok(project)
    }

    /// Replaces the locale set, keeping the default locale in it and ordering
    /// it by display name.
    pub fn set_locales(&mut self, locales: impl IntoIterator<Item = LocaleCode>) {
        let mut locales: Vec<LocaleCode> = locales
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !locales.contains(&self.default_locale) {
            debug!(locale = %self.default_locale, "adding default locale to the locale set");
            locales.push(self.default_locale.clone());
        }
        sort_by_display_name(&mut locales);
        self.locales = locales;
    }

    pub fn set_default_locale(&mut self, locale: LocaleCode) {
        self.default_locale = locale;
        let locales = std::mem::take(&mut self.locales);
        self.set_locales(locales);
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn settings_file(&self) -> PathBuf {
        self.folder.join(PROJECT_FILE)
    }

    pub fn output_dir(&self, platform: Platform) -> PathBuf {
        match platform {
            Platform::Android => PathBuf::from(&self.android_output_url),
            Platform::Ios => PathBuf::from(&self.ios_output_url),
        }
    }

    /// Persists the settings file.
    pub fn save(&self) -> Report {
        let mut report = Report::new();
        report.record(self.settings_file(), self.write_settings());
        report
    }

    fn write_settings(&self) -> Result<(), Error> {
        let mut settings =
            PropertiesFormat::new().with_comment(format!("Project settings for {}", self.name));
        settings.insert(PROP_ANDROID_OUTPUT, self.android_output_url.as_str());
        settings.insert(PROP_IOS_OUTPUT, self.ios_output_url.as_str());
        settings.insert(PROP_DEFAULT_LOCALE, self.default_locale.as_str());
        let mut locales = self.locales.clone();
        sort_by_display_name(&mut locales);
        settings.insert(
            PROP_LOCALES,
            locales
                .iter()
                .map(LocaleCode::as_str)
                .collect::<Vec<_>>()
                .join(","),
        );
        settings.write_to(self.settings_file())
    }

    fn resources_file(&self, resource_type: ResourceType, locale: &LocaleCode) -> PathBuf {
        self.folder
            .join(codec::resources_file_name(resource_type, locale))
    }

    fn metadata_file(&self, resource_type: ResourceType) -> PathBuf {
        self.folder.join(codec::metadata_file_name(resource_type))
    }

    fn array_sizes_file(&self) -> PathBuf {
        self.folder.join(ARRAY_SIZES_FILE)
    }

    /// Loads every locale file of `resource_type` found in the project folder.
    pub fn load_resources(
        &self,
        resource_type: ResourceType,
    ) -> Result<Decoded<LocalizedResources>, Error> {
        let mut records = BTreeMap::new();
        for entry in fs::read_dir(&self.folder)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(locale) = file_name
                .to_str()
                .and_then(|name| codec::parse_resources_file_name(resource_type, name))
            else {
                continue;
            };
            records.insert(locale, PropertiesFormat::read_from(entry.path())?);
        }
        debug!(
            project = %self.name,
            resource_type = %resource_type,
            locales = records.len(),
            "loaded resources"
        );
        Ok(codec::decode(&records, resource_type))
    }

    /// Writes one content file per locale; resources of another type are left
    /// out with a warning.
    pub fn save_resources(
        &self,
        resource_type: ResourceType,
        localized: &LocalizedResources,
    ) -> Report {
        let mut report = Report::new();
        let matching: LocalizedResources = localized
            .iter()
            .map(|(locale, resources)| {
                let resources: Resources = resources
                    .iter()
                    .filter(|(id, resource)| {
                        let matches = resource.resource_type() == resource_type;
                        if !matches {
                            warn!(
                                id = %id,
                                locale = %locale,
                                expected = %resource_type,
                                found = %resource.resource_type(),
                                "resource type mismatch; not saving"
                            );
                        }
                        matches
                    })
                    .map(|(id, resource)| (id.clone(), resource.clone()))
                    .collect();
                (locale.clone(), resources)
            })
            .collect();

        for (locale, records) in codec::encode(&matching, resource_type) {
            let path = self.resources_file(resource_type, &locale);
            report.record(&path, records.write_to(&path));
        }
        report
    }

    /// Loads the metadata of `resource_type`; a missing file means none.
    pub fn load_metadata(
        &self,
        resource_type: ResourceType,
        array_sizes: &BTreeMap<ResourceId, usize>,
    ) -> Result<Decoded<BTreeMap<ResourceId, Metadata>>, Error> {
        let path = self.metadata_file(resource_type);
        if !path.exists() {
            return Ok(Decoded {
                value: BTreeMap::new(),
                skipped: Vec::new(),
            });
        }
        let records = PropertiesFormat::read_from(&path)?;
        Ok(codec::decode_metadata(&records, resource_type, array_sizes))
    }

    pub fn save_metadata(
        &self,
        resource_type: ResourceType,
        metadata: &BTreeMap<ResourceId, Metadata>,
    ) -> Report {
        let mut report = Report::new();
        let path = self.metadata_file(resource_type);
        report.record(
            &path,
            codec::encode_metadata(metadata, resource_type).write_to(&path),
        );
        report
    }

    /// Loads the declared array sizes; a missing file means none.
    pub fn load_array_sizes(&self) -> Result<BTreeMap<ResourceId, usize>, Error> {
        let path = self.array_sizes_file();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        Ok(codec::decode_array_sizes(&PropertiesFormat::read_from(
            &path,
        )?))
    }

    pub fn save_array_sizes(&self, sizes: &BTreeMap<ResourceId, usize>) -> Report {
        let mut report = Report::new();
        let path = self.array_sizes_file();
        report.record(&path, codec::encode_array_sizes(sizes).write_to(&path));
        report
    }

    /// Loads metadata and content of every resource type.
    pub fn load_content(&self) -> Result<Decoded<ProjectContent>, Error> {
        let array_sizes = self.load_array_sizes()?;
        let mut content = ProjectContent::default();
        let mut skipped: Vec<SkippedRecord> = Vec::new();

        for resource_type in ResourceType::ALL {
            let metadata = self.load_metadata(resource_type, &array_sizes)?;
            let localized = self.load_resources(resource_type)?;
            skipped.extend(metadata.skipped);
            skipped.extend(localized.skipped);
            *content.table_mut(resource_type) = ResourceTable {
                metadata: metadata.value,
                localized: localized.value,
            };
        }

        Ok(Decoded {
            value: content,
            skipped,
        })
    }

    /// Persists metadata, array sizes and content of every resource type.
    pub fn save_content(&self, content: &ProjectContent) -> Report {
        let mut report = Report::new();
        for resource_type in ResourceType::ALL {
            let table = content.table(resource_type);
            report.merge(self.save_metadata(resource_type, &table.metadata));
            report.merge(self.save_resources(resource_type, &table.localized));
        }
        report.merge(self.save_array_sizes(&content.array_sizes()));
        info!(
            project = %self.name,
            written = report.written.len(),
            failed = report.failures.len(),
            "saved project content"
        );
        report
    }

    /// Generates the `platform` output of every project locale.
    ///
    /// Resources whose metadata excludes `platform` are left out; resources
    /// without metadata target every platform. A locale that fails to
    /// generate is recorded and the remaining locales still run.
    pub fn export(
        &self,
        platform: Platform,
        content: &ProjectContent,
        formatters: &[StringFormatter],
    ) -> Report {
        let output_dir = self.output_dir(platform);
        let mut report = Report::new();

        for locale in &self.locales {
            let mut generator = generators::for_platform(
                platform,
                &output_dir,
                locale.clone(),
                *locale == self.default_locale,
                formatters.to_vec(),
            );
            for resource_type in ResourceType::ALL {
                generator.add_all(&content.table(resource_type).resources_for(locale, platform));
            }
            match generator.generate_files() {
                Ok(paths) => paths.into_iter().for_each(|p| report.record_written(p)),
                Err(err) => report.record_failure(generator.output_folder(), &err),
            }
        }

        info!(
            project = %self.name,
            platform = %platform,
            output = %output_dir.display(),
            written = report.written.len(),
            failed = report.failures.len(),
            "exported project"
        );
        report
    }

    /// Runs [`Project::export`] for every platform.
    pub fn export_all(&self, content: &ProjectContent, formatters: &[StringFormatter]) -> Report {
        let mut report = Report::new();
        for platform in Platform::ALL {
            report.merge(self.export(platform, content, formatters));
        }
        report
    }
}

fn validate_name(name: &str) -> Result<(), Error> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || name.contains(['/', '\\'])
    {
        return Err(Error::validation_error(format!(
            "invalid project name `{}`",
            name
        )));
    }
    Ok(())
}

/// Metadata and per-locale content of one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceTable {
    pub metadata: BTreeMap<ResourceId, Metadata>,
    pub localized: LocalizedResources,
}

impl ResourceTable {
    /// Every id known to the table, from metadata or any locale.
    pub fn ids(&self) -> BTreeSet<&ResourceId> {
        self.metadata
            .keys()
            .chain(self.localized.values().flat_map(|resources| resources.keys()))
            .collect()
    }

    pub fn get(&self, locale: &LocaleCode, id: &str) -> Option<&Resource> {
        self.localized.get(locale)?.get(id)
    }

    /// The resources of `locale` that target `platform`.
    pub fn resources_for(&self, locale: &LocaleCode, platform: Platform) -> Resources {
        self.localized
            .get(locale)
            .map(|resources| {
                resources
                    .iter()
                    .filter(|(id, _)| {
                        self.metadata
                            .get(*id)
                            .is_none_or(|metadata| metadata.targets(platform))
                    })
                    .map(|(id, resource)| (id.clone(), resource.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The in-memory working copy of a project's resources.
///
/// Edits go through these methods so metadata and the array sizes stay in
/// step with the content; nothing is written until
/// [`Project::save_content`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContent {
    pub strings: ResourceTable,
    pub plurals: ResourceTable,
    pub arrays: ResourceTable,
}

impl ProjectContent {
    pub fn table(&self, resource_type: ResourceType) -> &ResourceTable {
        match resource_type {
            ResourceType::Strings => &self.strings,
            ResourceType::Plurals => &self.plurals,
            ResourceType::Arrays => &self.arrays,
        }
    }

    pub fn table_mut(&mut self, resource_type: ResourceType) -> &mut ResourceTable {
        match resource_type {
            ResourceType::Strings => &mut self.strings,
            ResourceType::Plurals => &mut self.plurals,
            ResourceType::Arrays => &mut self.arrays,
        }
    }

    /// Sets the value of `id` for `locale`, creating default metadata for a
    /// new id. Array metadata grows to fit the inserted items.
    pub fn insert(&mut self, locale: LocaleCode, id: impl Into<ResourceId>, resource: Resource) {
        let id = id.into();
        let resource_type = resource.resource_type();
        let table = self.table_mut(resource_type);
        let metadata = table
            .metadata
            .entry(id.clone())
            .or_insert_with(|| Metadata::new(resource_type));

        match (&mut metadata.detail, &resource) {
            (MetadataDetail::StringArray { size }, Resource::StringArray(items)) => {
                *size = (*size).max(items.len());
            }
            (MetadataDetail::Plural { quantities }, Resource::Plural(plural)) => {
                for quantity in plural.items().keys() {
                    if !quantities.contains(quantity) {
                        quantities.push(*quantity);
                    }
                }
                quantities.sort();
            }
            _ => {}
        }

        table.localized.entry(locale).or_default().insert(id, resource);
    }

    /// Removes `id` from every locale and its metadata; returns whether it
    /// existed.
    pub fn remove(&mut self, resource_type: ResourceType, id: &str) -> bool {
        let table = self.table_mut(resource_type);
        let mut existed = table.metadata.remove(id).is_some();
        for resources in table.localized.values_mut() {
            existed |= resources.remove(id).is_some();
        }
        existed
    }

    /// Changes the declared size of array `id`, truncating or padding every
    /// locale's items with untranslated entries.
    pub fn resize_array(&mut self, id: &str, size: usize) -> Result<(), Error> {
        let table = &mut self.arrays;
        let metadata = table.metadata.get_mut(id).ok_or_else(|| {
            Error::validation_error(format!("unknown string array `{}`", id))
        })?;
        metadata.detail = MetadataDetail::StringArray { size };
        for resources in table.localized.values_mut() {
            if let Some(Resource::StringArray(items)) = resources.get_mut(id) {
                items.resize(size, String::new());
            }
        }
        Ok(())
    }

    /// Replaces the metadata of `id` in the table of the metadata's type.
    pub fn set_metadata(&mut self, id: impl Into<ResourceId>, metadata: Metadata) {
        self.table_mut(metadata.resource_type())
            .metadata
            .insert(id.into(), metadata);
    }

    /// Declared sizes of every string array.
    pub fn array_sizes(&self) -> BTreeMap<ResourceId, usize> {
        self.arrays
            .metadata
            .iter()
            .filter_map(|(id, metadata)| match metadata.detail {
                MetadataDetail::StringArray { size } => Some((id.clone(), size)),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        formatter::default_formatters,
        types::{Plural, Quantity},
    };
    use tempfile::TempDir;

    fn project(dir: &TempDir) -> Project {
        let mut project = Project::new(dir.path().join("projects"), "demo").unwrap();
        project.android_output_url = dir.path().join("android").display().to_string();
        project.ios_output_url = dir.path().join("ios").display().to_string();
        project.set_locales([LocaleCode::from("en"), LocaleCode::from("de")]);
        project.create().unwrap();
        project
    }

    #[test]
    fn test_invalid_names_are_rejected() {
        for name in ["", "  ", "..", "a/b", "a\\b"] {
            assert!(Project::new("projects", name).is_err(), "{:?}", name);
        }
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = TempDir::new().unwrap();
        let project = project(&dir);
        let settings = fs::read_to_string(project.settings_file()).unwrap();
        assert!(settings.starts_with("# Project settings for demo\n"));
        assert!(settings.contains("locales=en,de\n"));

        let loaded = Project::load(dir.path().join("projects"), "demo").unwrap();
        assert_eq!(loaded, project);
        assert_eq!(loaded.locales, vec![LocaleCode::from("en"), LocaleCode::from("de")]);
    }

    #[test]
    fn test_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        let project = project(&dir);
        assert!(matches!(project.create(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_load_defaults_and_missing_project() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("bare")).unwrap();
        let loaded = Project::load(dir.path(), "bare").unwrap();
        assert_eq!(loaded.android_output_url, DEFAULT_ANDROID_OUTPUT);
        assert_eq!(loaded.ios_output_url, DEFAULT_IOS_OUTPUT);
        assert_eq!(loaded.default_locale, LocaleCode::from("en"));
        assert_eq!(loaded.locales, vec![LocaleCode::from("en")]);

        assert!(Project::load(dir.path(), "missing").is_err());
    }

    #[test]
    fn test_default_locale_stays_in_locale_set() {
        let mut project = Project::new("projects", "demo").unwrap();
        project.set_default_locale(LocaleCode::from("fr"));
        assert!(project.locales.contains(&LocaleCode::from("fr")));
        assert!(project.locales.contains(&LocaleCode::from("en")));
    }

    #[test]
    fn test_content_insert_keeps_metadata_in_step() {
        let mut content = ProjectContent::default();
        let en = LocaleCode::from("en");
        content.insert(
            en.clone(),
            "days",
            Resource::StringArray(vec!["Mon".into(), "Tue".into()]),
        );
        content.insert(
            en.clone(),
            "apples",
            Resource::Plural(Plural::from_other("%d apples").with(Quantity::Few, "%d")),
        );
        assert_eq!(
            content.arrays.metadata["days"].detail,
            MetadataDetail::StringArray { size: 2 }
        );
        assert_eq!(
            content.plurals.metadata["apples"].detail,
            MetadataDetail::Plural {
                quantities: vec![Quantity::One, Quantity::Few, Quantity::Other]
            }
        );

        content.resize_array("days", 3).unwrap();
        assert_eq!(
            content.arrays.get(&en, "days"),
            Some(&Resource::StringArray(vec!["Mon".into(), "Tue".into(), "".into()]))
        );
        assert_eq!(content.array_sizes()["days"], 3);
        assert!(content.resize_array("nope", 1).is_err());

        assert!(content.remove(ResourceType::Arrays, "days"));
        assert!(!content.remove(ResourceType::Arrays, "days"));
        assert!(content.arrays.ids().is_empty());
    }

    #[test]
    fn test_content_round_trip() {
        let dir = TempDir::new().unwrap();
        let project = project(&dir);
        let en = LocaleCode::from("en");
        let de = LocaleCode::from("de");

        let mut content = ProjectContent::default();
        content.insert(en.clone(), "hello", Resource::Str("Hi".into()));
        content.insert(de.clone(), "hello", Resource::Str("Hallo".into()));
        content.insert(
            en.clone(),
            "songs",
            Resource::Plural(Plural::from_other("%d songs").with(Quantity::One, "%d song")),
        );
        content.insert(
            en.clone(),
            "days",
            Resource::StringArray(vec!["Mon".into(), "Tue".into()]),
        );
        content.set_metadata(
            "hello",
            Metadata::new(ResourceType::Strings)
                .with_group("home")
                .with_platforms([Platform::Android]),
        );

        let report = project.save_content(&content);
        assert!(report.is_ok(), "{:?}", report);
        assert!(project.folder().join("strings.de.properties").exists());
        assert!(project.folder().join("sizes.arrays.properties").exists());

        let loaded = project.load_content().unwrap();
        assert!(loaded.skipped.is_empty());
        assert_eq!(loaded.value, content);
    }

    #[test]
    fn test_save_resources_skips_mismatched_types() {
        let dir = TempDir::new().unwrap();
        let project = project(&dir);
        let localized = LocalizedResources::from([(
            LocaleCode::from("en"),
            Resources::from([
                ("hello".to_string(), Resource::Str("Hi".into())),
                ("days".to_string(), Resource::StringArray(vec!["Mon".into()])),
            ]),
        )]);
        assert!(project.save_resources(ResourceType::Strings, &localized).is_ok());
        let loaded = project.load_resources(ResourceType::Strings).unwrap();
        let en = &loaded.value[&LocaleCode::from("en")];
        assert_eq!(en.len(), 1);
        assert!(en.contains_key("hello"));
    }

    #[test]
    fn test_export_filters_platforms() {
        let dir = TempDir::new().unwrap();
        let project = project(&dir);
        let en = LocaleCode::from("en");
        let mut content = ProjectContent::default();
        content.insert(en.clone(), "shared", Resource::Str("Shared".into()));
        content.insert(en.clone(), "droid", Resource::Str("Droid".into()));
        content.set_metadata(
            "droid",
            Metadata::new(ResourceType::Strings).with_platforms([Platform::Android]),
        );

        let report = project.export_all(&content, default_formatters());
        assert!(report.is_ok(), "{:?}", report);
        // en and de, one file on Android and two on iOS
        assert_eq!(report.written.len(), 6);

        let android = fs::read_to_string(dir.path().join("android/values/strings.xml")).unwrap();
        assert!(android.contains(r#"<string name="droid">Droid</string>"#));
        let ios = fs::read_to_string(dir.path().join("ios/en.lproj/Localizable.strings")).unwrap();
        assert!(ios.contains(r#""shared" = "Shared";"#));
        assert!(!ios.contains("droid"));
    }

    #[test]
    fn test_empty_array_keeps_only_its_metadata() {
        let dir = TempDir::new().unwrap();
        let project = project(&dir);
        let en = LocaleCode::from("en");
        let mut content = ProjectContent::default();
        content.insert(en.clone(), "empty", Resource::StringArray(vec![]));

        assert!(project.save_content(&content).is_ok());
        let loaded = project.load_content().unwrap().value;
        assert!(loaded.arrays.metadata.contains_key("empty"));
        assert_eq!(loaded.arrays.get(&en, "empty"), None);
    }

    #[test]
    fn test_save_failure_is_reported_and_save_continues() {
        let dir = TempDir::new().unwrap();
        let project = project(&dir);
        let (en, de) = (LocaleCode::from("en"), LocaleCode::from("de"));
        let mut content = ProjectContent::default();
        content.insert(en.clone(), "hello", Resource::Str("Hello".into()));
        content.insert(de.clone(), "hello", Resource::Str("Hallo".into()));
        content.insert(de.clone(), "days", Resource::StringArray(vec!["Mo".into()]));

        // A folder where the German strings file should be.
        let blocked = project.folder().join("strings.de.properties");
        fs::create_dir_all(blocked.join("occupied")).unwrap();

        let report = project.save_content(&content);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].path, blocked);
        assert!(report.written.contains(&project.folder().join("strings.en.properties")));
        assert!(report.written.contains(&project.folder().join("arrays.de.properties")));
        assert!(report.written.contains(&project.folder().join("metadata.strings.properties")));
        assert!(!report.written.contains(&blocked));

        let loaded = project.load_resources(ResourceType::Arrays).unwrap();
        assert_eq!(
            loaded.value[&de]["days"],
            Resource::StringArray(vec!["Mo".into()])
        );
    }

    #[test]
    fn test_export_failure_is_reported_per_locale() {
        let dir = TempDir::new().unwrap();
        let mut project = project(&dir);
        // A file where the output folder should be makes every write fail.
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a folder").unwrap();
        project.android_output_url = blocker.display().to_string();

        let report = project.export(Platform::Android, &ProjectContent::default(), default_formatters());
        assert_eq!(report.failures.len(), 2);
        assert!(report.written.is_empty());
    }
}
