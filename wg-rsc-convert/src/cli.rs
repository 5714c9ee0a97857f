use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "wg-rsc-convert")]
#[command(about = "Generate WireGuard client installer scripts from a RouterOS peer export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    /// Enable debug logging (shows why export entries were skipped).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Write one installer script per complete peer.
    Generate(GenerateArgs),
    /// Show the parsed template, peers and rejected entries without writing anything.
    Inspect(InspectArgs),
}

#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// RouterOS export holding the peer section.
    #[arg(long, default_value = "wg.rsc")]
    pub export: PathBuf,
    /// Known-good client config providing ListenPort, DNS and the server key.
    #[arg(long, default_value = "wg.conf")]
    pub template: PathBuf,
    /// Optional settings TOML file (see settings/defaults.toml).
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Export section path holding the peers (overrides settings).
    #[arg(long)]
    pub section: Option<String>,
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Directory the scripts are written to.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Fail if any script could not be written.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
