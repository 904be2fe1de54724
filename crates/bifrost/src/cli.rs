//! Clap derive structures for the `bifrost` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept free
//! of workspace imports so `build.rs` can render man pages from it.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bifrost -- sign up for fibre internet from the command line
#[derive(Debug, Parser)]
#[command(
    name = "bifrost",
    version,
    about = "Sign up for Bifrost fibre from the command line",
    long_about = "Browse building complexes, units and packages offered by a\n\
        Bifrost signup service, and submit a signup interactively or from flags.",
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
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "BIFROST_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Signup service URL (overrides profile)
    #[arg(long, env = "BIFROST_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BIFROST_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "BIFROST_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Form layout (overrides profile)
    #[arg(long, env = "BIFROST_VARIANT", global = true)]
    pub variant: Option<VariantArg>,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Individual or company signup, several units per signup
    Company,
    /// Individual signup, one unit per signup
    Individual,
}

impl VariantArg {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Individual => "individual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ActivationArg {
    /// Connect as soon as the debit order is approved
    Asap,
    /// Connect on a chosen date (requires --date)
    Scheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SignupTypeArg {
    Individual,
    Company,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List building complexes
    Sites,

    /// List units at a building complex
    Units {
        /// Site ID (see `bifrost sites`)
        #[arg(long, short = 's')]
        site: i64,
    },

    /// List packages, optionally only those offered at a site
    #[command(alias = "pkg")]
    Packages {
        /// Site ID
        #[arg(long, short = 's')]
        site: Option<i64>,
    },

    /// Submit a signup
    Submit(Box<SubmitArgs>),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SUBMIT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Every field of the signup form. Anything left out is prompted for,
/// unless `--no-input` is given.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Individual or company signup (company layout only)
    #[arg(long)]
    pub signup_type: Option<SignupTypeArg>,

    /// Registered company name (company signups)
    #[arg(long)]
    pub company_name: Option<String>,

    /// VAT registration number (optional)
    #[arg(long)]
    pub vat_reg_no: Option<String>,

    /// Site ID
    #[arg(long, short = 's')]
    pub site: Option<i64>,

    /// Unit label; repeat for several units
    #[arg(long = "unit", short = 'u', value_name = "UNIT")]
    pub units: Vec<String>,

    /// Package name exactly as listed by `bifrost packages`
    #[arg(long)]
    pub package: Option<String>,

    /// When to activate
    #[arg(long)]
    pub activation: Option<ActivationArg>,

    /// Activation date for scheduled activation (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Free-form notes for the installer
    #[arg(long)]
    pub notes: Option<String>,

    /// Never prompt; fail if required values are missing
    #[arg(long)]
    pub no_input: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Display the current configuration
    Show,

    /// Print the configuration file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
