//! Configuration management for pagedock.
//!
//! The CLI follows a subcommand layout:
//!
//! - `pagedock detect <FILE>` - identify a document's format without
//!   binding a backend
//! - `pagedock open <FILE>` - run the full open protocol and report the
//!   bound backend
//! - `pagedock backends` - list the compiled-in backends in registry order
//!
//! # Environment Variables
//!
//! - `PAGEDOCK_FORMAT` - default output format (`text` or `json`)
//! - `PAGEDOCK_LOG` - log filter, read by the tracing subscriber

use clap::{Args, Parser, Subcommand, ValueEnum};

// =============================================================================
// CLI Arguments
// =============================================================================

/// pagedock - open documents and dispatch them to rendering backends.
///
/// Identifies a document file by its content signature (and, for comic
/// book archives, its extension), then binds it to the first backend
/// whose init accepts it.
#[derive(Parser, Debug, Clone)]
#[command(name = "pagedock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Consume the parsed CLI into its command.
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Identify a document's format without binding a backend.
    Detect(DetectConfig),
    /// Open a document and report the backend bound to it.
    Open(OpenConfig),
    /// List the compiled-in backends in registry (fallback) order.
    Backends(BackendsConfig),
}

/// Output format for command results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// A single JSON object.
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct DetectConfig {
    /// Path or file:// URI of the document.
    pub file: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "PAGEDOCK_FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OpenConfig {
    /// Path or file:// URI of the document.
    pub file: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "PAGEDOCK_FORMAT")]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct BackendsConfig {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, env = "PAGEDOCK_FORMAT")]
    pub format: OutputFormat,
}

// =============================================================================
// Tests
// =============================================================================
