use polyglot::{LocaleCode, Project, ProjectContent, Resource, ResourceType};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_VALUE_WIDTH: usize = 50;

/// Print the resources of a project, grouped by type, one line per locale.
///
/// Returns an error message when `lang_filter` is not one of the project's
/// locales.
pub fn print_view(
    project: &Project,
    content: &ProjectContent,
    lang_filter: Option<&str>,
    type_filter: Option<ResourceType>,
    full: bool,
) -> Result<(), String> {
    let locales: Vec<&LocaleCode> = match lang_filter {
        Some(lang) => {
            let locale = project
                .locales
                .iter()
                .find(|l| l.as_str() == lang)
                .ok_or_else(|| format!("No locale `{}` in project {}", lang, project.name))?;
            vec![locale]
        }
        None => project.locales.iter().collect(),
    };

    println!("=== Project {} ===", project.name);
    println!("Default locale: {}", project.default_locale);
    println!(
        "Locales: {}",
        project
            .locales
            .iter()
            .map(|l| format!("{} ({})", l.display_name(), l))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let types: Vec<ResourceType> = match type_filter {
        Some(resource_type) => vec![resource_type],
        None => ResourceType::ALL.to_vec(),
    };

    for resource_type in types {
        let table = content.table(resource_type);
        let ids = table.ids();
        println!("\n=== {} ({}) ===", resource_type, ids.len());

        for id in ids {
            match table.metadata.get(id) {
                Some(metadata) => println!(
                    "\n  {} [group: {}] [platforms: {}]",
                    id,
                    if metadata.group.is_empty() { "-" } else { metadata.group.as_str() },
                    metadata
                        .platforms
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
                None => println!("\n  {}", id),
            }

            for locale in &locales {
                match table.get(locale, id) {
                    None => println!("    {}: <missing>", locale),
                    Some(Resource::Str(text)) => {
                        println!("    {}: {}", locale, display_value(text, full))
                    }
                    Some(Resource::Plural(plural)) => {
                        println!("    {}:", locale);
                        for (quantity, text) in plural.items() {
                            println!("      {}: {}", quantity, display_value(text, full));
                        }
                    }
                    Some(Resource::StringArray(items)) => {
                        println!("    {}:", locale);
                        for (index, text) in items.iter().enumerate() {
                            println!("      [{}] {}", index, display_value(text, full));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

fn display_value(text: &str, full: bool) -> String {
    let escaped = text.replace('\n', "\\n");
    if escaped.trim().is_empty() {
        return "<untranslated>".to_string();
    }
    if full {
        return escaped;
    }
    truncate(&escaped, MAX_VALUE_WIDTH)
}

/// Cuts `text` to `max_width` terminal columns, adding `...` when cut.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
