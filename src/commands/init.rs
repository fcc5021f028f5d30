//! Implementation of the `promptc init` command.
//!
//! Writes a starter `promptc.yaml` and the default essay template into a
//! directory. Existing files are kept unless `--force` is given, so running
//! `init` twice is harmless.

use crate::cli::InitArgs;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::context::CommandContext;
use crate::error::Result;
use crate::events::{self, Event, EventAction};
use crate::fs::{WriteOutcome, write_unless_exists};
use serde_json::json;
use std::path::{Path, PathBuf};

/// The educational essay template written by `init` and `--create-missing`.
pub const DEFAULT_TEMPLATE: &str = r#"/// Template for writing educational essays
/// Variables: [[.Now]] = current timestamp, [[.Category]] = essay category, [[.Topic]] = essay topic
/// Comments starting with /// are removed during compilation

# 🎯 OBJECTIVE

Write an engaging, educational essay about [[.Topic]] in the [[.Category]] category.
The essay should be appropriate for students aged 14-18, informative yet accessible.
Current timestamp: [[.Now]]

# 📝 ESSAY REQUIREMENTS

* **Length:** 500-750 words (approximately 5-7 paragraphs)
* **Structure:** Introduction, 3-4 body paragraphs, conclusion
* **Tone:** Educational, engaging, age-appropriate
* **Citations:** Include at least 3 factual references

# 📚 CATEGORY: [[.Category]]

[[if .Category == "History"]]
Focus on:
- Cause and effect relationships
- Specific dates and key figures
- Historical significance and modern relevance
[[else if .Category == "Science"]]
Focus on:
- Fundamental concepts explained simply
- Real-world applications
- Scientific method and evidence
[[else if .Category == "Technology"]]
Focus on:
- Technical concepts in simple terms
- Benefits and challenges
- Future implications
[[else]]
Focus on:
- Comprehensive overview
- Relevant examples
- Balanced perspective
[[end]]

# OUTPUT FORMAT

Provide the essay with:
- Clear, descriptive title
- Well-structured paragraphs
- Key terms defined
- 2-3 discussion questions at the end"#;

const CONFIG_HEADER: &str = "# promptc configuration\n\
# The essay template prints the category, so the selector is substituted;\n\
# Topic travels in the user message instead.\n";

/// The configuration `init` writes.
pub(super) fn starter_config() -> Config {
    Config {
        substitute_selector: true,
        exempt_keys: vec!["Topic".to_string()],
        ..Config::default()
    }
}

/// Write the default template to `path` if it is missing.
///
/// Returns `true` if the file was created.
pub(super) fn create_default_template(path: &Path) -> Result<bool> {
    let outcome = write_unless_exists(path, DEFAULT_TEMPLATE, false)?;
    Ok(outcome == WriteOutcome::Created)
}

/// Execute the `promptc init` command.
pub fn cmd_init(ctx: &CommandContext, args: InitArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => ctx.path(dir),
        None => ctx.base.clone(),
    };

    let config_path = dir.join(CONFIG_FILE_NAME);
    let config_yaml = format!("{}{}", CONFIG_HEADER, starter_config().to_yaml()?);
    let config_outcome = write_unless_exists(&config_path, &config_yaml, args.force)?;

    // A kept config decides where the template goes.
    let config = match config_outcome {
        WriteOutcome::Kept => Config::load(&config_path)?,
        _ => starter_config(),
    };

    let template_path: PathBuf = config
        .template_dir_path(&dir)
        .join(&config.default_template);
    let template_outcome = write_unless_exists(&template_path, DEFAULT_TEMPLATE, args.force)?;

    let event = Event::new(EventAction::Init)
        .with_template(&template_path)
        .with_details(json!({
            "dir": dir.display().to_string(),
            "config": outcome_label(config_outcome),
            "template": outcome_label(template_outcome),
            "force": args.force,
        }));
    events::record(config.events_log_path(&dir).as_deref(), event);

    println!("Initialized promptc in {}", dir.display());
    println!();
    print_outcome(&config_path, config_outcome);
    print_outcome(&template_path, template_outcome);
    println!();
    println!(
        "Compile it with `promptc compile --var Category=Science --var Topic=\"Climate Change\"`."
    );

    Ok(())
}

fn outcome_label(outcome: WriteOutcome) -> &'static str {
    match outcome {
        WriteOutcome::Created => "created",
        WriteOutcome::Overwritten => "overwritten",
        WriteOutcome::Kept => "kept",
    }
}

fn print_outcome(path: &Path, outcome: WriteOutcome) {
    match outcome {
        WriteOutcome::Kept => {
            println!("  {:<12} {} (use --force to overwrite)", "exists", path.display())
        }
        other => println!("  {:<12} {}", outcome_label(other), path.display()),
    }
}
