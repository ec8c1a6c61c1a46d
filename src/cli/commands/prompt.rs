use std::io;

use crate::cli::context::{CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::clipboard::COPY_SUCCESS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "generate",
            "Validate the form and print the prompt",
            "generate",
            cmd_generate,
        ),
        CommandEntry::new(
            "copy",
            "Copy the generated prompt",
            "copy",
            cmd_copy,
        ),
        CommandEntry::new(
            "edit",
            "Discard the generated prompt and return to step 1",
            "edit",
            cmd_edit,
        ),
        CommandEntry::new(
            "record",
            "Print the applicant record behind the last prompt as JSON",
            "record",
            cmd_record,
        ),
    ]
}

fn cmd_generate(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.generate()?;
    print_output(context)
}

fn cmd_copy(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.copy(context.clipboard.as_mut())?;
    output::success(COPY_SUCCESS);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.edit();
    output::info("Back to step 1.");
    Ok(())
}

fn cmd_record(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let Some(generation) = context.session.output() else {
        output::warning("Nothing generated yet. Run `generate` first.");
        return Ok(());
    };
    let json = serde_json::to_string_pretty(&generation.record).map_err(io::Error::from)?;
    output::line(json);
    Ok(())
}

pub(super) fn print_output(context: &ShellContext) -> CommandResult {
    match context.session.output() {
        Some(generation) => {
            output::section("Generated Prompt");
            output::block(&generation.prompt);
            output::hint("Use `copy` to copy the prompt or `edit` to change answers.");
        }
        None => output::warning("Nothing generated yet. Run `generate` first."),
    }
    Ok(())
}
