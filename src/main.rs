//! pagedock - open documents and dispatch them to rendering backends.
//!
//! This binary wires the registry, capabilities and dispatcher together
//! behind a small CLI.

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagedock::{
    detect, BackendsConfig, Capabilities, Cli, Command, DetectConfig, Document, DocumentFormat,
    MappedFile, OpenConfig, OutputFormat, Registry,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Detect(config) => run_detect(config),
        Command::Open(config) => run_open(config),
        Command::Backends(config) => run_backends(config),
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Diagnostics go to stderr so JSON output on stdout stays parseable.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "pagedock=debug"
    } else {
        "pagedock=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("PAGEDOCK_LOG")
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Detect Command
// =============================================================================

#[derive(Serialize)]
struct DetectReport<'a> {
    file: &'a str,
    format: Option<&'static str>,
}

fn run_detect(config: DetectConfig) -> ExitCode {
    init_logging(config.verbose);

    let caps = Capabilities::from_build();
    let file = match MappedFile::open(&config.file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let format = detect(&caps, file.filename(), file.bytes());
    let report = DetectReport {
        file: file.filename(),
        format: format.map(|f| f.name()),
    };

    match config.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        OutputFormat::Text => match report.format {
            Some(name) => println!("{}: {}", report.file, name),
            None => println!("{}: unknown", report.file),
        },
    }

    if format.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// =============================================================================
// Open Command
// =============================================================================

#[derive(Serialize)]
struct OpenReport<'a> {
    file: &'a str,
    backend: &'static str,
    size: usize,
}

fn run_open(config: OpenConfig) -> ExitCode {
    init_logging(config.verbose);

    let registry = Registry::with_compiled_backends();
    let caps = Capabilities::from_build();

    let doc = match Document::open(&registry, &caps, &config.file) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = OpenReport {
        file: doc.filename(),
        backend: doc.backend().name(),
        size: doc.len(),
    };

    match config.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        OutputFormat::Text => {
            println!("File:    {}", report.file);
            println!("Backend: {}", report.backend);
            println!("Size:    {} bytes", report.size);
        }
    }

    ExitCode::SUCCESS
}

// =============================================================================
// Backends Command
// =============================================================================

#[derive(Serialize)]
struct BackendEntry {
    name: &'static str,
    registered: bool,
}

#[derive(Serialize)]
struct BackendsReport {
    backends: Vec<BackendEntry>,
}

fn run_backends(config: BackendsConfig) -> ExitCode {
    let registry = Registry::with_compiled_backends();

    let report = BackendsReport {
        backends: DocumentFormat::ALL
            .iter()
            .map(|format| BackendEntry {
                name: format.name(),
                registered: registry.find(format.name()).is_some(),
            })
            .collect(),
    };

    match config.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
        }
        OutputFormat::Text => {
            for entry in &report.backends {
                let mark = if entry.registered { '+' } else { '-' };
                println!("{} {}", mark, entry.name);
            }
        }
    }

    ExitCode::SUCCESS
}
