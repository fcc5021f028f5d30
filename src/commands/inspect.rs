//! Implementation of the `promptc inspect` command.

use crate::cli::InspectArgs;
use crate::context::CommandContext;
use crate::error::{PromptcError, Result};
use crate::template::TemplateOutline;
use serde_json::json;

/// Execute the `promptc inspect` command.
pub fn cmd_inspect(ctx: &CommandContext, args: InspectArgs) -> Result<()> {
    let template = ctx.load_template(args.template.as_deref())?;
    let outline = template.outline(&ctx.config.comment_marker);

    if args.json {
        let body = json!({
            "template": template.path().display().to_string(),
            "outline": outline,
        });
        let text = serde_json::to_string_pretty(&body).map_err(|e| {
            PromptcError::UserError(format!("failed to serialize outline: {}", e))
        })?;
        println!("{}", text);
        return Ok(());
    }

    println!("Template: {}", template.path().display());
    print!("{}", render_outline(&outline, &ctx.config.selector));
    Ok(())
}

/// Human-readable outline.
pub(super) fn render_outline(outline: &TemplateOutline, selector: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!("Comment lines: {}\n", outline.comment_lines));

    if outline.placeholders.is_empty() {
        out.push_str("Placeholders:  (none)\n");
    } else {
        out.push_str("Placeholders:\n");
        for name in &outline.placeholders {
            let note = if name == selector { "  (selector)" } else { "" };
            out.push_str(&format!("  [[.{}]]{}\n", name, note));
        }
    }

    if outline.blocks.is_empty() {
        out.push_str("Conditional blocks: (none)\n");
    } else {
        out.push_str(&format!("Conditional blocks: {}\n", outline.blocks.len()));
        for (i, block) in outline.blocks.iter().enumerate() {
            let arms: Vec<String> = block
                .literals
                .iter()
                .map(|lit| match lit {
                    Some(lit) => format!("\"{}\"", lit),
                    None => "<invalid>".to_string(),
                })
                .collect();
            let fallback = if block.has_else { " | else" } else { "" };
            out.push_str(&format!(
                "  {}. .{}: {}{}\n",
                i + 1,
                block.variable,
                arms.join(" | "),
                fallback
            ));
        }
    }

    if outline.stray_markers > 0 {
        out.push_str(&format!(
            "Stray markers: {} (removed during compilation)\n",
            outline.stray_markers
        ));
    }

    out
}
