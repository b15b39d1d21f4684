//! Clap derive structures for the `tryfi` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// tryfi -- inspect and control TryFi smart collars
#[derive(Debug, Parser)]
#[command(
    name = "tryfi",
    version,
    about = "Inspect and control TryFi pet trackers from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "TRYFI_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "TRYFI_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Self::On
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show tracked pets
    #[command(alias = "pet")]
    Pets(PetsArgs),

    /// Show charging bases
    #[command(alias = "base")]
    Bases(BasesArgs),

    /// Show the logged-in account
    User,

    /// Turn a collar's LED on or off
    Led {
        /// Pet ID
        pet: String,
        state: Toggle,
    },

    /// Change a collar's LED color
    LedColor {
        /// Pet ID
        pet: String,
        /// Color code (see `pets get` for the collar's palette)
        code: i64,
    },

    /// Enable or disable lost-dog mode
    Lost {
        /// Pet ID
        pet: String,
        state: Toggle,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Pets ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PetsArgs {
    #[command(subcommand)]
    pub command: Option<PetsCommand>,
}

#[derive(Debug, Subcommand)]
pub enum PetsCommand {
    /// List tracked pets
    #[command(alias = "ls")]
    List,

    /// Show one pet in detail
    Get {
        /// Pet ID
        id: String,
    },
}

// ── Bases ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BasesArgs {
    #[command(subcommand)]
    pub command: BasesCommand,
}

#[derive(Debug, Subcommand)]
pub enum BasesCommand {
    /// List charging bases
    #[command(alias = "ls")]
    List,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Show the current configuration (passwords masked)
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
