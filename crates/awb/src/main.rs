//! Allocation Workbench - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `awb validate <snapshot>` | Run every data check and print the report |
//! | `awb fix <snapshot>` | Apply every auto-fix and write the repaired snapshot |
//! | `awb query <snapshot> <text>` | Parse free text and list matching records |
//! | `awb suggest <snapshot>` | Example queries for the snapshot |
//! | `awb rules check <path>` | Check a rule file or directory for errors and conflicts |
//! | `awb rules export <path>` | Write the enabled rules as a manifest |
//! | `awb rules draft <snapshot> <request>` | Ask the advisor for a rule and gate it |

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use awb::commands;
use awb::domain::EntityType;
use awb::infrastructure::config::{AppConfig, ReportFormat};
use awb::infrastructure::logging::log_config_loaded;
use awb::infrastructure::{
    ConfigLoader, DraftOutcome, RuleDraftingService, advisor_from_config, init_logging,
    load_snapshot, write_snapshot,
};
use awb::validation::rules::RuleFileLoader;
use awb::{RuleRegistry, generate_rule_set, generate_suggestions, validate};

/// Command line interface for Allocation Workbench
#[derive(Parser, Debug)]
#[command(name = "awb")]
#[command(about = "Allocation Workbench - validate, query and constrain scheduling data")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every data check on a snapshot
    Validate {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Output format (default from configuration)
        #[arg(long, value_enum)]
        format: Option<Format>,

        /// Only report issues of one collection
        #[arg(long)]
        entity: Option<EntityType>,
    },

    /// Apply every auto-fix and write the repaired snapshot
    Fix {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Where to write the repaired snapshot (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// List the fixes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse free text and list the matching records
    Query {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Query text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Print the parsed query and matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Example queries built from the snapshot
    Suggest {
        /// Snapshot JSON file
        snapshot: PathBuf,
    },

    /// Rule file commands
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// Check rules for structural errors and conflicts
    Check {
        /// Rule file (JSON or YAML) or directory of rule files
        rules: PathBuf,
    },

    /// Write the enabled rules as a manifest
    Export {
        /// Rule file or directory
        rules: PathBuf,

        /// Manifest path; `.json`, `.yaml` or `.yml`
        #[arg(short, long, default_value = "rules-manifest.json")]
        output: PathBuf,
    },

    /// Ask the advisor for a rule and check it against the current rules
    Draft {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Request text
        #[arg(required = true, num_args = 1..)]
        request: Vec<String>,

        /// Existing rules to check the draft against
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Also ask for a plain-English explanation
        #[arg(long)]
        explain: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Human,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => Self::Human,
            Format::Json => Self::Json,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("loading configuration")?;
    init_logging(&config.logging).context("initialising logging")?;
    if let Some(path) = loader.source_path() {
        log_config_loaded(&path, path.exists());
    }

    match cli.command {
        Command::Validate {
            snapshot,
            format,
            entity,
        } => run_validate(&config, &snapshot, format, entity),
        Command::Fix {
            snapshot,
            output,
            dry_run,
        } => run_fix(&snapshot, output.as_deref(), dry_run),
        Command::Query {
            snapshot,
            text,
            json,
        } => run_query(&config, &snapshot, &text.join(" "), json),
        Command::Suggest { snapshot } => {
            let snapshot = load_snapshot(&snapshot)?;
            for suggestion in generate_suggestions(&snapshot) {
                println!("{suggestion}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Rules { command } => run_rules(&config, command).await,
    }
}

fn run_validate(
    config: &AppConfig,
    path: &Path,
    format: Option<Format>,
    entity: Option<EntityType>,
) -> Result<ExitCode> {
    let snapshot = load_snapshot(path)?;
    let mut result = validate(&snapshot);
    if let Some(entity) = entity {
        result = result.for_entity(entity);
    }
    let format = format.map_or(config.report.format, ReportFormat::from);
    println!("{}", commands::render_validation(&result, format));
    tracing::info!(
        path = %path.display(),
        errors = result.summary.total_errors,
        warnings = result.summary.total_warnings,
        "validation finished"
    );
    Ok(exit_code(commands::validation_passed(
        &result,
        config.report.fail_on_warnings,
    )))
}

fn run_fix(path: &Path, output: Option<&Path>, dry_run: bool) -> Result<ExitCode> {
    let snapshot = load_snapshot(path)?;
    let report = commands::fix_snapshot(&snapshot);
    print!("{}", commands::render_fixes(&report));
    if !dry_run && !report.proposals.is_empty() {
        let target = output.unwrap_or(path);
        write_snapshot(target, &report.fixed)?;
        println!("Wrote {}", target.display());
    }
    Ok(exit_code(report.remaining.is_valid))
}

fn run_query(config: &AppConfig, path: &Path, text: &str, json: bool) -> Result<ExitCode> {
    let snapshot = load_snapshot(path)?;
    let (query, result) = commands::run_query(&snapshot, text);
    if json {
        let document = serde_json::json!({ "query": query, "result": result });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!(
            "{}",
            commands::render_query(&query, &result, config.query.min_confidence)
        );
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_rules(config: &AppConfig, command: RulesCommand) -> Result<ExitCode> {
    let files = RuleFileLoader::default();
    match command {
        RulesCommand::Check { rules } => {
            let rules = load_rules(&files, &rules)?;
            let checks = commands::check_collection(&rules);
            print!("{}", commands::render_rule_checks(&checks));
            Ok(exit_code(checks.iter().all(|(_, check)| check.valid)))
        }
        RulesCommand::Export { rules, output } => {
            let rules = load_rules(&files, &rules)?;
            let manifest = generate_rule_set(&rules);
            files.write_manifest(&output, &manifest)?;
            println!(
                "Exported {} of {} rule(s) to {}",
                manifest.metadata.enabled_rules,
                manifest.metadata.total_rules,
                output.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        RulesCommand::Draft {
            snapshot,
            request,
            rules,
            explain,
        } => {
            let snapshot = load_snapshot(&snapshot)?;
            let registry = match rules {
                Some(path) => RuleRegistry::from_rules(load_rules(&files, &path)?)?,
                None => RuleRegistry::new(),
            };
            let service = RuleDraftingService::new(
                advisor_from_config(&config.advisor)?,
                config.advisor.timeout(),
            );
            let Some(outcome) = service.draft(&request.join(" "), &snapshot, &registry).await
            else {
                println!("No recommendation.");
                return Ok(ExitCode::SUCCESS);
            };
            println!("{}", serde_json::to_string_pretty(outcome.rule())?);
            if let DraftOutcome::Rejected { reasons, .. } = &outcome {
                println!("Rejected:");
                for reason in reasons {
                    println!("  -> {reason}");
                }
            }
            if explain && let Some(text) = service.explain(outcome.rule()).await {
                println!("\n{text}");
            }
            Ok(exit_code(outcome.is_accepted()))
        }
    }
}

fn load_rules(files: &RuleFileLoader, path: &Path) -> Result<Vec<awb::Rule>> {
    let rules = if path.is_dir() {
        files.load_dir(path)?
    } else {
        files.load_file(path)?
    };
    Ok(rules)
}

fn exit_code(passed: bool) -> ExitCode {
    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
