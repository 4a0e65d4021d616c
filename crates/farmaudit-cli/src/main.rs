//! farmaudit CLI: one subcommand per pipeline stage, plus the workflow runner.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use farmaudit_analysis::reporters::{available_formats, create_reporter};
use farmaudit_analysis::workflow::{Preset, StepStatus};
use farmaudit_core::config::{ApplyMode, CliOverrides};
use farmaudit_core::constants::DEFAULT_LOG_FILTER;
use farmaudit_core::{FarmauditErrorCode, WorkflowStep};

use commands::Context;

#[derive(Parser)]
#[command(name = "farmaudit")]
#[command(about = "Audit, validate, fix and generate tests for the myfarmstand service layer")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Audit target list, relative to the root
    #[arg(long, global = true)]
    audit_config: Option<PathBuf>,

    /// Where reports are written, relative to the root
    #[arg(long, global = true)]
    reports_dir: Option<PathBuf>,

    /// Debug logging (when FARMAUDIT_LOG is unset)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score services and hooks against the conventions
    Audit,

    /// Cross-check service field accesses against the SQL schema
    Validate,

    /// Describe fixes for audit gaps and schema mismatches
    Fix {
        /// Rewrite the files in place (after a backup)
        #[arg(long)]
        apply: bool,

        /// How a file's patches are applied
        #[arg(long, value_enum)]
        apply_mode: Option<ApplyModeArg>,
    },

    /// Write jest skeletons for every audit target
    GenerateTests,

    /// Run several stages in order
    Workflow {
        /// Named step selection (quick, full, audit, fix)
        #[arg(long, value_parser = parse_preset)]
        preset: Option<Preset>,

        /// Comma-separated steps, overriding the preset's
        #[arg(long, value_delimiter = ',', value_parser = parse_step)]
        steps: Vec<WorkflowStep>,

        /// Keep going after a failed step
        #[arg(long)]
        no_fail_on_errors: bool,

        /// Summary format printed at the end
        #[arg(long, default_value = "console", value_parser = parse_format)]
        format: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ApplyModeArg {
    Atomic,
    Sequential,
}

impl From<ApplyModeArg> for ApplyMode {
    fn from(arg: ApplyModeArg) -> Self {
        match arg {
            ApplyModeArg::Atomic => ApplyMode::Atomic,
            ApplyModeArg::Sequential => ApplyMode::Sequential,
        }
    }
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    Preset::parse_str(s).ok_or_else(|| format!("unknown preset '{s}' (expected quick, full, audit, fix)"))
}

fn parse_step(s: &str) -> Result<WorkflowStep, String> {
    WorkflowStep::parse_str(s)
        .ok_or_else(|| format!("unknown step '{s}' (expected audit, validate, fix, test, verify)"))
}

fn parse_format(s: &str) -> Result<String, String> {
    match create_reporter(s) {
        Some(_) => Ok(s.to_string()),
        None => Err(format!(
            "unknown format '{s}' (expected {})",
            available_formats().join(", ")
        )),
    }
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            audit_config: self.audit_config.clone(),
            reports_dir: self.reports_dir.clone(),
            ..CliOverrides::default()
        };
        match &self.command {
            Commands::Fix { apply, apply_mode } => {
                if *apply {
                    overrides.auto_apply = Some(true);
                }
                overrides.apply_mode = apply_mode.map(ApplyMode::from);
            }
            Commands::Workflow {
                no_fail_on_errors: true,
                ..
            } => overrides.fail_on_errors = Some(false),
            _ => {}
        }
        overrides
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "farmaudit=debug"
    } else {
        DEFAULT_LOG_FILTER
    };
    farmaudit_core::tracing::init_tracing_with_default(filter);

    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let outcome = Context::load(&root, &cli.overrides()).and_then(|ctx| match cli.command {
        Commands::Audit => commands::audit(&ctx),
        Commands::Validate => commands::validate(&ctx),
        Commands::Fix { .. } => commands::fix(&ctx),
        Commands::GenerateTests => commands::generate_tests(&ctx),
        Commands::Workflow {
            preset,
            steps,
            format,
            ..
        } => commands::workflow(&ctx, preset, steps, &format),
    });

    match outcome {
        Ok(StepStatus::Failed) => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "farmaudit failed");
            eprintln!("{}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}
