//! Implementation of the `promptc compile` command.

use super::init::create_default_template;
use super::{build_bindings, build_compiler, emit};
use crate::cli::CompileArgs;
use crate::context::CommandContext;
use crate::error::{PromptcError, Result};
use crate::events::{self, Event, EventAction};
use crate::template::{CompileReport, Compiler, Template};
use serde::Serialize;
use std::path::Path;

/// JSON shape printed by `compile --json`.
#[derive(Debug, Serialize)]
struct CompileJson<'a> {
    template: String,
    #[serde(flatten)]
    report: &'a CompileReport,
}

/// Execute the `promptc compile` command.
///
/// Unresolved placeholders whose key is exempt from substitution are
/// intentional and are not reported; any others produce a warning, or an
/// `Unresolved` error under `--strict`.
pub fn cmd_compile(ctx: &CommandContext, args: CompileArgs) -> Result<()> {
    let template = load_or_create(ctx, args.template.as_deref(), args.create_missing)?;
    let bindings = build_bindings(ctx, &args.vars)?;

    let compiler = build_compiler(ctx, &args.substitution)?;

    if bindings.is_empty() {
        eprintln!("Warning: no variables bound; placeholders are left as-is");
    }

    let report = compiler.compile_with_report(template.content(), &bindings);
    let missing = if report.is_fully_resolved() {
        Vec::new()
    } else {
        missing_placeholders(&compiler, &report)
    };

    let selector_value = bindings
        .get(&compiler.options().selector)
        .map(|v| v.to_string());
    events::record(
        ctx.events_log().as_deref(),
        Event::new(EventAction::Compile)
            .with_template(template.path())
            .with_report(&report, selector_value),
    );

    if !missing.is_empty() {
        if args.strict {
            return Err(PromptcError::Unresolved(missing));
        }
        eprintln!("Warning: unresolved placeholders: {}", missing.join(", "));
    }

    let rendered = if args.json {
        let body = CompileJson {
            template: template.path().display().to_string(),
            report: &report,
        };
        serde_json::to_string_pretty(&body).map_err(|e| {
            PromptcError::UserError(format!("failed to serialize compile report: {}", e))
        })?
    } else {
        report.output.clone()
    };

    match (args.output.as_deref(), args.preview) {
        (None, Some(limit)) if !args.json => println!("{}", preview(&report.output, limit)),
        (output, limit) => {
            if emit(ctx, output, &rendered)? {
                if let Some(path) = output {
                    println!(
                        "Wrote compiled prompt to {} ({} characters)",
                        ctx.path(path).display(),
                        report.output.chars().count()
                    );
                }
                if let Some(limit) = limit {
                    println!();
                    println!("{}", preview(&report.output, limit));
                }
            }
        }
    }

    Ok(())
}

/// Load the requested template, generating the default one if allowed.
fn load_or_create(
    ctx: &CommandContext,
    name: Option<&Path>,
    create_missing: bool,
) -> Result<Template> {
    let path = ctx.template_path(name);
    if create_missing && !path.exists() && create_default_template(&path)? {
        eprintln!(
            "Warning: template not found; created default template at {}",
            path.display()
        );
    }
    Template::load(path)
}

/// Unresolved placeholders that were not deliberately exempted.
fn missing_placeholders(compiler: &Compiler, report: &CompileReport) -> Vec<String> {
    report
        .unresolved
        .iter()
        .filter(|key| !compiler.is_exempt(key))
        .cloned()
        .collect()
}

/// The first `limit` characters of `output`, with a size note when truncated.
pub(super) fn preview(output: &str, limit: usize) -> String {
    let total = output.chars().count();
    if total <= limit {
        return output.to_string();
    }
    let head: String = output.chars().take(limit).collect();
    format!(
        "{}...\n\n(Showing first {} characters of {} total)",
        head, limit, total
    )
}
