use polyglot::{Project, ProjectContent, Report, default_formatters};
use tracing::info;

use crate::platforms::PlatformArg;

/// Export the project for the selected platforms with the default formatters.
pub fn run_generate(project: &Project, content: &ProjectContent, platform: PlatformArg) -> Report {
    let mut report = Report::new();
    for platform in platform.platforms() {
        info!(project = %project.name, %platform, "generating");
        report.merge(project.export(platform, content, default_formatters()));
    }
    report
}

/// Print what was written and what failed.
pub fn print_report(report: &Report) {
    for path in &report.written {
        println!("✅ {}", path.display());
    }
    for failure in &report.failures {
        eprintln!("❌ {}: {}", failure.path.display(), failure.message);
    }
    println!(
        "Generated {} file(s), {} failure(s)",
        report.written.len(),
        report.failures.len()
    );
}
