//! CLI argument parsing for promptc.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// promptc: compile prompt templates into final prompt strings.
///
/// Templates are plain text with `[[.Name]]` placeholders, `///` comment
/// lines, and `[[if .Category == "X"]] ... [[else]] ... [[end]]` blocks.
#[derive(Parser, Debug)]
#[command(name = "promptc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (overrides PROMPTC_CONFIG and ./promptc.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for promptc.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a template into a prompt.
    ///
    /// Strips comments, substitutes variables, resolves conditionals, and
    /// prints the result (or writes it with `--output`).
    Compile(CompileArgs),

    /// Show a template's placeholders, conditional blocks, and comments.
    Inspect(InspectArgs),

    /// Write the default essay template and a promptc.yaml.
    Init(InitArgs),

    /// List templates in the template directory.
    List(ListArgs),

    /// Assemble the chat-completion request body for a template.
    ///
    /// The compiled template becomes the system message and `user_message`
    /// from the config becomes the user message. Nothing is sent.
    Payload(PayloadArgs),
}

/// Variable sources shared by `compile` and `payload`.
#[derive(Args, Debug, Default)]
pub struct VarArgs {
    /// Bind a variable (repeatable).
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Read bindings from a file of shell-quoted KEY=VALUE lines.
    #[arg(long, value_name = "FILE")]
    pub vars_file: Option<PathBuf>,

    /// Do not bind the current time to the timestamp key.
    #[arg(long)]
    pub no_timestamp: bool,
}

/// Substitution overrides shared by `compile` and `payload`.
#[derive(Args, Debug, Default)]
pub struct SubstitutionArgs {
    /// Selector key left unsubstituted in the system prompt (overrides the config).
    #[arg(long, value_name = "KEY")]
    pub selector: Option<String>,

    /// Leave this key's placeholders unsubstituted (repeatable, adds to exempt_keys).
    #[arg(long = "exempt", value_name = "KEY")]
    pub exempt: Vec<String>,
}

/// Arguments for the `compile` command.
#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Template file or name inside the template directory (default from config).
    pub template: Option<PathBuf>,

    #[command(flatten)]
    pub vars: VarArgs,

    #[command(flatten)]
    pub substitution: SubstitutionArgs,

    /// Write the prompt to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the compile report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Fail if any placeholder is left unresolved.
    #[arg(long)]
    pub strict: bool,

    /// Generate the default template if the requested one does not exist.
    #[arg(long)]
    pub create_missing: bool,

    /// Print only the first N characters of the prompt.
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,
}

/// Arguments for the `inspect` command.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Template file or name inside the template directory (default from config).
    pub template: Option<PathBuf>,

    /// Print the outline as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Overwrite existing files.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory to search (default: template_dir from config).
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Arguments for the `payload` command.
#[derive(Parser, Debug)]
pub struct PayloadArgs {
    /// Template file or name inside the template directory (default from config).
    pub template: Option<PathBuf>,

    #[command(flatten)]
    pub vars: VarArgs,

    #[command(flatten)]
    pub substitution: SubstitutionArgs,

    /// Write the request body to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
