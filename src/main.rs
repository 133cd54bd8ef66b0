//! cmdkit CLI entry point
//!
//! Usage:
//!   cmdkit run <command>         Run a command, streaming stdout
//!   cmdkit exec <command>        Run a command, print captured stdout
//!   cmdkit which <name>          Find an executable on PATH
//!   cmdkit copy <src> <dst>      Copy a file byte-for-byte
//!   cmdkit config                Show resolved configuration

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use cmdkit::cli::{
    commands::{ConfigArgs, ConfigFormat, CopyArgs, ExecArgs, OutputFormat, RunArgs, WhichArgs},
    Cli, Commands,
};
use cmdkit::config::{expand_path, find_config_files, load_config, Config};
use cmdkit::error::ErrorInfo;
use cmdkit::logging::init_logging;
use cmdkit::{find_executable_in_path, load_file, write_file, CommandRunner, ToolError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(
        &config.logging.level,
        cli.log_format.unwrap_or(config.logging.format),
        cli.verbose,
    )?;

    match cli.command {
        Commands::Run(args) => run_streaming(args, &config, cli.verbose).await,
        Commands::Exec(args) => exec_captured(args, &config).await,
        Commands::Which(args) => which(args),
        Commands::Copy(args) => copy(args, cli.verbose),
        Commands::Config(args) => show_config(args, &config),
    }
}

/// Run a command, forwarding its stdout to ours as it arrives
async fn run_streaming(args: RunArgs, config: &Config, verbose: bool) -> Result<ExitCode> {
    let mut runner = CommandRunner::from_config(&config.exec)?;
    if let Some(chunk_size) = args.chunk_size {
        runner = runner.with_chunk_size(chunk_size);
    }

    let command = args.command_line();
    let mut handle = runner.run_async(command, tokio::io::stdout());
    let summary = handle.wait().await?;

    if verbose {
        eprintln!(
            "{}: exit {} after {}ms, {} bytes in {} chunks",
            "done".green(),
            summary
                .exit_code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "by signal".to_string()),
            summary.duration_ms,
            summary.bytes_forwarded,
            summary.chunks_forwarded
        );
    }

    Ok(exit_code_of(summary.exit_code))
}

/// Run a command to completion and print what it wrote
async fn exec_captured(args: ExecArgs, config: &Config) -> Result<ExitCode> {
    let runner = CommandRunner::from_config(&config.exec)?;
    let result = runner.capture(&args.command_line()).await;

    match args.format {
        OutputFormat::Plain => {
            let captured = result?;
            print!("{}", captured.stdout);
            Ok(exit_code_of(captured.summary.exit_code))
        }
        OutputFormat::Json => match result {
            Ok(captured) => {
                println!("{}", serde_json::to_string_pretty(&captured)?);
                Ok(exit_code_of(captured.summary.exit_code))
            }
            Err(e) => {
                let info = ErrorInfo::from(&e);
                println!("{}", serde_json::to_string_pretty(&info)?);
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

/// Look up an executable on PATH
fn which(args: WhichArgs) -> Result<ExitCode> {
    let found = find_executable_in_path(&args.name);

    match args.format {
        OutputFormat::Plain => {
            if let Some(ref path) = found {
                println!("{}", path.display());
            } else {
                eprintln!("{}: {} not found in PATH", "which".yellow(), args.name);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "name": args.name,
                "found": found.is_some(),
                "path": found.as_ref().map(|p| p.display().to_string()),
            }))?;
            println!("{}", json);
        }
    }

    Ok(if found.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Copy a file as a raw blob
fn copy(args: CopyArgs, verbose: bool) -> Result<ExitCode> {
    let source = expand_path(&args.source);
    let destination = expand_path(&args.destination);

    let data = load_file(&source).map_err(describe)?;
    write_file(&destination, &data).map_err(describe)?;

    if verbose {
        eprintln!(
            "{}: {} bytes {} -> {}",
            "copied".green(),
            data.len(),
            source.display(),
            destination.display()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Show resolved configuration
fn show_config(args: ConfigArgs, config: &Config) -> Result<ExitCode> {
    match args.format {
        ConfigFormat::Toml => {
            let rendered =
                toml::to_string_pretty(config).context("Failed to render configuration")?;
            print!("{}", rendered);
        }
        ConfigFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    }

    if args.sources {
        eprintln!("{}:", "Config Files".cyan());
        let files = find_config_files();
        if files.is_empty() {
            eprintln!("  None");
        }
        for file in files {
            eprintln!("  - {}", file.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Attach the suggestion, if any, to a tool error
fn describe(err: ToolError) -> anyhow::Error {
    let info = ErrorInfo::from(&err);
    match info.suggestion {
        Some(suggestion) => anyhow::anyhow!("{} ({})", err, suggestion),
        None => anyhow::Error::new(err),
    }
}

/// Map a child exit code to ours; signals and out-of-range codes become failure
fn exit_code_of(code: Option<i32>) -> ExitCode {
    match code.and_then(|c| u8::try_from(c).ok()) {
        Some(c) => ExitCode::from(c),
        None => ExitCode::FAILURE,
    }
}
