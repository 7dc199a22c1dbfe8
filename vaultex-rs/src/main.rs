//! Vaultex CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use vaultex::cli::args::{Cli, Commands};
use vaultex::cli::output::Output;
use vaultex::cli::{export, tags};
use vaultex::config::Config;
use vaultex::error::{ExitCode as VaultexExitCode, ExportError};
use vaultex::logging;
use vaultex::vault::Vault;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<VaultexExitCode, ExportError> {
    let output = Output::new(cli.output_format(), cli.quiet);

    // Needs neither config nor vault
    if let Commands::Decompose(args) = &cli.command {
        return tags::decompose_tag(args, &output);
    }

    let config = Config::load()?;
    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::new(vault_path)?;
    tracing::debug!(vault = %vault.root.display(), "opened vault");

    match &cli.command {
        Commands::Export(args) => export::export(vault, args, &config.export, &output),
        Commands::Select(args) => export::select(vault, args, &config.export, &output),
        Commands::Tags(args) => tags::tags(vault, args, &output),
        Commands::Decompose(args) => tags::decompose_tag(args, &output),
    }
}
