//! Implementation of the `promptc payload` command.

use super::{build_bindings, build_compiler, emit};
use crate::bindings::Bindings;
use crate::cli::PayloadArgs;
use crate::context::CommandContext;
use crate::error::Result;
use crate::events::{self, Event, EventAction};
use crate::request::ChatRequest;
use crate::template::{Compiler, Template};
use serde_json::json;

/// Execute the `promptc payload` command.
pub fn cmd_payload(ctx: &CommandContext, args: PayloadArgs) -> Result<()> {
    let template = ctx.load_template(args.template.as_deref())?;
    let bindings = build_bindings(ctx, &args.vars)?;

    let compiler = build_compiler(ctx, &args.substitution)?;
    let request = build_request(ctx, &compiler, &template, &bindings);
    let body = request.to_json_pretty()?;

    events::record(
        ctx.events_log().as_deref(),
        Event::new(EventAction::Payload)
            .with_template(template.path())
            .with_details(json!({
                "model": request.model,
                "max_tokens": request.max_tokens,
                "bindings": bindings.len(),
                "system_chars": request.messages.first().map(|m| m.content.chars().count()),
            })),
    );

    if emit(ctx, args.output.as_deref(), &body)?
        && let Some(path) = &args.output
    {
        println!("Wrote request body to {}", ctx.path(path).display());
    }

    Ok(())
}

/// Compile the system prompt and user message into a request body.
///
/// The user message substitutes every bound key, including ones the system
/// prompt leaves exempt.
pub(super) fn build_request(
    ctx: &CommandContext,
    compiler: &Compiler,
    template: &Template,
    bindings: &Bindings,
) -> ChatRequest {
    let system_prompt = compiler.compile(template.content(), bindings);
    let user_message = compiler
        .clone()
        .substituting_all()
        .compile(&ctx.config.user_message, bindings);
    ChatRequest::new(&ctx.config, system_prompt, user_message)
}
