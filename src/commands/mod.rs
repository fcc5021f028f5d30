//! Command implementations for promptc.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, plus the helpers the commands share: building bindings
//! from `--var`/`--vars-file`, applying `--selector`/`--exempt`, and writing
//! output to a file or stdout.

mod compile;
mod init;
mod inspect;
mod list;
mod payload;


pub use init::DEFAULT_TEMPLATE;

use crate::bindings::Bindings;
use crate::cli::{Cli, Command, SubstitutionArgs, VarArgs};
use crate::context::CommandContext;
use crate::error::{PromptcError, Result};
use crate::fs::atomic_write_file;
use crate::template::{Compiler, is_identifier};
use chrono::Utc;
use std::path::Path;

/// Dispatch a command to its implementation.
///
/// Resolves the working-directory context (and with it the config) once,
/// then routes to the command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = CommandContext::resolve(cli.config.as_deref())?;
    run(&ctx, cli.command)
}

/// Run a command against an already-resolved context.
pub fn run(ctx: &CommandContext, command: Command) -> Result<()> {
    match command {
        Command::Compile(args) => compile::cmd_compile(ctx, args),
        Command::Inspect(args) => inspect::cmd_inspect(ctx, args),
        Command::Init(args) => init::cmd_init(ctx, args),
        Command::List(args) => list::cmd_list(ctx, args),
        Command::Payload(args) => payload::cmd_payload(ctx, args),
    }
}

/// Build bindings for one compilation.
///
/// Precedence, lowest first: the bindings file, then each `--var` in order,
/// then the injected timestamp (which never replaces an explicit binding).
fn build_bindings(ctx: &CommandContext, args: &VarArgs) -> Result<Bindings> {
    let mut bindings = Bindings::new();

    if let Some(file) = &args.vars_file {
        bindings.load_file(ctx.path(file))?;
    }

    for raw in &args.vars {
        bindings.apply_assignment(raw)?;
    }

    if ctx.config.inject_timestamp && !args.no_timestamp {
        bindings.inject_timestamp(
            &ctx.config.timestamp_key,
            &ctx.config.timestamp_format,
            Utc::now(),
        )?;
    }

    Ok(bindings)
}

/// The configured compiler with command-line overrides applied.
fn build_compiler(ctx: &CommandContext, args: &SubstitutionArgs) -> Result<Compiler> {
    let mut compiler = ctx.config.compiler();

    if let Some(selector) = &args.selector {
        check_key("selector", selector)?;
        compiler = compiler.with_selector(selector.as_str());
    }
    for key in &args.exempt {
        check_key("exempt key", key)?;
        compiler = compiler.with_exempt_key(key.as_str());
    }

    Ok(compiler)
}

fn check_key(what: &str, key: &str) -> Result<()> {
    if is_identifier(key) {
        return Ok(());
    }
    Err(PromptcError::UserError(format!(
        "invalid {} '{}': must be a variable name",
        what, key
    )))
}

/// Write `content` to `output` (relative to the context base) or print it.
///
/// Returns `true` when a file was written.
fn emit(ctx: &CommandContext, output: Option<&Path>, content: &str) -> Result<bool> {
    match output {
        Some(path) => {
            let mut content = content.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            atomic_write_file(ctx.path(path), &content)?;
            Ok(true)
        }
        None => {
            println!("{}", content);
            Ok(false)
        }
    }
}
