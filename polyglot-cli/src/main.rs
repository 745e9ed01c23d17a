use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use polyglot::{Decoded, LocaleCode, Project, ProjectContent};
use polyglot_cli::{
    PlatformArg, ResourceTypeArg, print_report, run_generate, stats::print_stats, view::print_view,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder holding one sub-folder per project
    #[arg(long, global = true, default_value = "projects")]
    projects_dir: PathBuf,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new project with default settings.
    New {
        /// Name of the project folder
        name: String,

        /// Locale used as fallback and written to the base `values` folder
        #[arg(long, default_value = "en")]
        default_locale: String,

        /// Comma-separated locales of the project
        #[arg(long, value_delimiter = ',')]
        locales: Vec<String>,

        /// Output folder of the Android export
        #[arg(long)]
        android_output: Option<String>,

        /// Output folder of the iOS export
        #[arg(long)]
        ios_output: Option<String>,
    },

    /// View the resources of a project.
    View {
        name: String,

        /// Optional locale code to show values for
        #[arg(short, long)]
        lang: Option<String>,

        /// Only show one resource type
        #[arg(short = 't', long = "type", value_enum)]
        resource_type: Option<ResourceTypeArg>,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },

    /// Show translation progress per locale.
    Stats {
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export Android and/or iOS resources.
    Generate {
        name: String,

        #[arg(short, long, value_enum, default_value = "all")]
        platform: PlatformArg,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn load(projects_dir: &Path, name: &str) -> (Project, ProjectContent) {
    let project = Project::load(projects_dir, name).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let Decoded { value, skipped } = project.load_content().unwrap_or_else(|e| {
        eprintln!("Error: failed to load project {}: {}", name, e);
        std::process::exit(1);
    });
    if !skipped.is_empty() {
        warn!(count = skipped.len(), "skipped malformed records while loading");
    }
    (project, value)
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.commands {
        Commands::New {
            name,
            default_locale,
            locales,
            android_output,
            ios_output,
        } => {
            let mut project = Project::new(&args.projects_dir, name).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            if let Some(url) = android_output {
                project.android_output_url = url;
            }
            if let Some(url) = ios_output {
                project.ios_output_url = url;
            }
            project.default_locale = LocaleCode::from(default_locale);
            let locales: Vec<LocaleCode> = locales
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .map(LocaleCode::from)
                .collect();
            project.set_locales(locales);
            if let Err(e) = project.create() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            println!(
                "✅ Created project {} in {}",
                project.name,
                project.folder().display()
            );
        }
        Commands::View {
            name,
            lang,
            resource_type,
            full,
        } => {
            let (project, content) = load(&args.projects_dir, &name);
            if let Err(e) = print_view(
                &project,
                &content,
                lang.as_deref(),
                resource_type.map(Into::into),
                full,
            ) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Stats { name, json } => {
            let (project, content) = load(&args.projects_dir, &name);
            print_stats(&project, &content, json);
        }
        Commands::Generate { name, platform } => {
            let (project, content) = load(&args.projects_dir, &name);
            let report = run_generate(&project, &content, platform);
            print_report(&report);
            if !report.is_ok() {
                std::process::exit(1);
            }
        }
    }
}
