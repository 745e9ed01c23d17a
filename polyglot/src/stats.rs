//! Translation progress per locale.

use serde::Serialize;

use crate::{
    locale::LocaleCode,
    project::{Project, ProjectContent},
    types::ResourceType,
};

/// Progress of one resource type in one locale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeStats {
    pub resource_type: ResourceType,
    /// Ids known to the project for this type, across all locales.
    pub total: usize,
    pub translated: usize,
    pub completion_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocaleStats {
    pub locale: LocaleCode,
    pub display_name: String,
    pub is_default: bool,
    pub by_type: Vec<TypeStats>,
}

impl LocaleStats {
    pub fn total(&self) -> usize {
        self.by_type.iter().map(|s| s.total).sum()
    }

    pub fn translated(&self) -> usize {
        self.by_type.iter().map(|s| s.translated).sum()
    }

    pub fn completion_percent(&self) -> f64 {
        percent(self.translated(), self.total())
    }
}

/// Counts translated resources for every project locale.
///
/// A resource counts as translated by the same rule the generators use to
/// decide whether to emit it.
pub fn collect(project: &Project, content: &ProjectContent) -> Vec<LocaleStats> {
    project
        .locales
        .iter()
        .map(|locale| {
            let by_type = ResourceType::ALL
                .into_iter()
                .map(|resource_type| {
                    let table = content.table(resource_type);
                    let ids = table.ids();
                    let translated = ids
                        .iter()
                        .filter(|id| {
                            table
                                .get(locale, id.as_str())
                                .is_some_and(|resource| resource.is_translated())
                        })
                        .count();
                    TypeStats {
                        resource_type,
                        total: ids.len(),
                        translated,
                        completion_percent: percent(translated, ids.len()),
                    }
                })
                .collect();
            LocaleStats {
                locale: locale.clone(),
                display_name: locale.display_name(),
                is_default: *locale == project.default_locale,
                by_type,
            }
        })
        .collect()
}

fn percent(translated: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        ((translated as f64) * 100.0 / (total as f64) * 100.0).round() / 100.0
    }
}
