use polyglot::{Project, ProjectContent, stats::collect};
use serde_json::json;

pub fn print_stats(project: &Project, content: &ProjectContent, json_output: bool) {
    let stats = collect(project, content);
    let unique_ids: usize = polyglot::ResourceType::ALL
        .into_iter()
        .map(|resource_type| content.table(resource_type).ids().len())
        .sum();

    if json_output {
        let per_locale: Vec<_> = stats
            .iter()
            .map(|locale| {
                json!({
                    "locale": locale.locale,
                    "display_name": locale.display_name,
                    "is_default": locale.is_default,
                    "total": locale.total(),
                    "translated": locale.translated(),
                    "completion_percent": locale.completion_percent(),
                    "by_type": locale.by_type,
                })
            })
            .collect();
        let body = json!({
            "summary": {
                "project": project.name,
                "locales": stats.len(),
                "unique_ids": unique_ids,
            },
            "locales": per_locale,
        });
        match serde_json::to_string_pretty(&body) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
        return;
    }

    println!("=== Stats ===");
    println!("Project: {}", project.name);
    println!("Locales: {}", stats.len());
    println!("Unique ids: {}", unique_ids);

    for locale in &stats {
        println!(
            "\nLocale: {} ({}){}",
            locale.display_name,
            locale.locale,
            if locale.is_default { " [default]" } else { "" }
        );
        for type_stats in &locale.by_type {
            println!(
                "  {}: {}/{} ({:.2}%)",
                type_stats.resource_type,
                type_stats.translated,
                type_stats.total,
                type_stats.completion_percent
            );
        }
        println!("  Completion: {:.2}%", locale.completion_percent());
    }
}
