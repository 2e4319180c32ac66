//! uifor CLI - inspect the component catalogue

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::Serialize;

use uifor::{builtins, Catalogue, CatalogueError, FieldInfo, FixSuggestion};

#[allow(dead_code)]
mod samples;

#[derive(Parser)]
#[command(name = "uifor")]
#[command(about = "Inspect which UI component renders a bound field")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered components per value type
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Resolve the component for a field of a sample model
    Resolve {
        /// Owner type (Order, Customer)
        owner: String,

        /// Field name (e.g. ItemCount)
        field: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = catalogue().and_then(|catalogue| match cli.command {
        Commands::List { format } => list(&catalogue, format),
        Commands::Resolve { owner, field } => resolve(&catalogue, &owner, &field),
    });

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

/// Catalogue with the built-in editors and the sample host assembly
fn catalogue() -> Result<Catalogue, CatalogueError> {
    let catalogue = Catalogue::new();
    catalogue.scan_all(&samples::assembly(), [Some(&builtins::assembly())])?;
    Ok(catalogue)
}

fn list(catalogue: &Catalogue, format: Format) -> Result<(), CatalogueError> {
    let summary = catalogue.summary();

    match format {
        Format::Json => {
            println!("{}", to_json(&summary)?);
        }
        Format::Text => {
            println!(
                "{} {}",
                "Assemblies:".cyan().bold(),
                summary.scanned_assemblies.join(", ")
            );
            for entry in &summary.value_types {
                let shared = summary
                    .value_types
                    .iter()
                    .filter(|other| other.value_type == entry.value_type)
                    .count()
                    > 1;
                if shared {
                    println!("{} {}", entry.value_type.bold(), format!("({})", entry.type_name).dimmed());
                } else {
                    println!("{}", entry.value_type.bold());
                }
                for (position, candidate) in entry.candidates.iter().enumerate() {
                    println!("  {}. {}", position + 1, candidate);
                }
            }
        }
    }

    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CatalogueError> {
    serde_json::to_string_pretty(value).map_err(|e| CatalogueError::InvalidJson {
        details: e.to_string(),
    })
}

fn resolve(catalogue: &Catalogue, owner_name: &str, field_name: &str) -> Result<(), CatalogueError> {
    let owner = samples::owner(owner_name).ok_or_else(|| CatalogueError::UnknownOwner {
        owner: owner_name.to_string(),
    })?;

    // The declared value type comes from the model's own field table
    let field = owner
        .field(field_name)
        .ok_or_else(|| CatalogueError::UnknownField {
            owner: owner.name().to_string(),
            field: field_name.to_string(),
        })?;

    match catalogue.resolve(&owner, field_name, field.value_type())? {
        Some(resolution) => {
            println!(
                "{} {} {}",
                describe(&field).bold(),
                "→".cyan(),
                resolution.component().to_string().green().bold()
            );
            Ok(())
        }
        None => Err(CatalogueError::NoComponent {
            owner: owner.name().to_string(),
            field: field_name.to_string(),
        }),
    }
}

fn describe(field: &FieldInfo) -> String {
    if field.is_public() {
        field.to_string()
    } else {
        format!("{field} (private)")
    }
}
