use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use contract_parity::cli::{self, ReportFormat};
use contract_parity::interface::{
    generate_difference_report, InterfaceContractValidator, InterfaceValidator, ValidatorConfig,
};
use contract_parity::platform::Platform;
use contract_parity::reporter::ValidationReporter;
use contract_parity::tokens::TokenComparisonOptions;

#[derive(Parser)]
#[command(name = "contract-parity", version, about)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate interface definitions and print the detailed report
    Validate {
        /// JSON array of interface definitions, one per platform
        definitions: PathBuf,
        /// Report format: text, json or markdown
        #[arg(long, default_value = "text")]
        format: ReportFormat,
        /// Platform to compare against instead of the first definition
        #[arg(long)]
        reference: Option<Platform>,
        /// Validator config JSON (severity policy, advisories)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Print the grouped API difference report
    Diff {
        definitions: PathBuf,
        #[arg(long)]
        reference: Option<Platform>,
    },

    /// Check token consistency and print the cross-platform report
    Tokens {
        /// Token set JSON, or a bare array of tokens
        tokens: PathBuf,
        /// Interface definition files to include in the report
        #[arg(long = "definitions")]
        definitions: Vec<PathBuf>,
        /// Maximum accepted deviation
        #[arg(long, default_value_t = 0.01)]
        tolerance: f64,
        /// Compare absolute differences instead of relative ones
        #[arg(long)]
        absolute: bool,
        #[arg(long, default_value = "text")]
        format: ReportFormat,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn emit(artifact: &str, output: Option<&PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let written = cli::write_output(path, artifact)?;
            info!(path = %written.display(), "report written");
        }
        None => print!("{}", artifact),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let valid = match args.cmd {
        Command::Validate {
            definitions,
            format,
            reference,
            config,
            output,
        } => {
            let defs = cli::load_definitions(&definitions)?;
            let config = match config {
                Some(path) => cli::load_config(&path)?,
                None => ValidatorConfig::default(),
            };
            let validator = InterfaceValidator::with_config(config);
            let report = match reference {
                Some(platform) => validator.validate_with_reference(&defs, platform),
                None => validator.validate_interfaces(&defs),
            }
            .with_context(|| format!("validating {}", definitions.display()))?;

            let detailed = ValidationReporter::new().generate_report(&report);
            emit(&cli::render_report(&detailed, format)?, output.as_ref())?;
            detailed.valid
        }
        Command::Diff {
            definitions,
            reference,
        } => {
            let defs = cli::load_definitions(&definitions)?;
            let validator = InterfaceContractValidator::new();
            let result = match reference {
                Some(platform) => validator.validate_with_reference(&defs, platform),
                None => validator.validate_interface_contracts(&defs),
            }
            .with_context(|| format!("validating {}", definitions.display()))?;

            print!("{}", generate_difference_report(&result));
            result.valid
        }
        Command::Tokens {
            tokens,
            definitions,
            tolerance,
            absolute,
            format,
            output,
        } => {
            let set = cli::load_token_set(&tokens)?;
            let mut options = TokenComparisonOptions::default().with_tolerance(tolerance);
            if absolute {
                options = options.absolute();
            }

            let validator = InterfaceContractValidator::new();
            let mut contracts = Vec::with_capacity(definitions.len());
            for path in &definitions {
                let defs = cli::load_definitions(path)?;
                let contract = validator
                    .validate_interface_contracts(&defs)
                    .with_context(|| format!("validating {}", path.display()))?;
                contracts.push(contract);
            }

            let report = cli::cross_platform_report(&set, options, &contracts)
                .with_context(|| format!("checking tokens in {}", tokens.display()))?;
            emit(&cli::render_cross_platform(&report, format)?, output.as_ref())?;
            report.valid
        }
    };

    if !valid {
        std::process::exit(1);
    }
    Ok(())
}
