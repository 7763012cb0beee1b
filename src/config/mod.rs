pub mod defaults;
pub mod registry_file;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "appdesc")]
#[command(about = "Inspect the application registry used by the VTY test harness")]
pub struct CliConfig {
    /// Registry TOML file; the built-in osmo-sip-connector registry
    #[arg(short, long, env = "APPDESC_REGISTRY")]
    pub registry: Option<String>,

    /// Print JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List registered applications in declaration order (full registry with --json)
    List,
    /// Show the config paths of an application
    Paths { app: String },
    /// Show the launch command of an application (primary when omitted)
    Launch { app: Option<String> },
    /// Show the primary application
    Primary,
    /// Show the command used for interactive VTY sessions
    VtyCommand,
}
