use apg_domain::SourceId;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::session::MainSource;

use super::form::usage;

const USAGE: &str =
    "source <list|handbook <url>|application <url>|add <url> [label...]|edit <n> <url> [label...]|remove <n>>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "source",
        "Inspect or edit the reference sources",
        USAGE,
        cmd_source,
    )]
}

fn cmd_source(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return print_sources(context);
    };
    match action.to_ascii_lowercase().as_str() {
        "list" => print_sources(context),
        "handbook" => set_main(context, MainSource::Handbook, rest),
        "application" => set_main(context, MainSource::ApplicationPage, rest),
        "add" => add(context, rest),
        "edit" => edit(context, rest),
        "remove" => remove(context, rest),
        _ => Err(usage(USAGE)),
    }
}

pub(super) fn print_sources(context: &ShellContext) -> CommandResult {
    let sources = context.session.sources();
    output::section("Sources");
    output::line(format!(
        "  Handbook        : {} <{}>",
        sources.handbook.label,
        display_url(&sources.handbook.url)
    ));
    output::line(format!(
        "  Application page: {} <{}>",
        sources.application_page.label,
        display_url(&sources.application_page.url)
    ));
    if sources.additional.is_empty() {
        output::info("No additional sources.");
    }
    for (index, source) in sources.additional.iter().enumerate() {
        let label = if source.entry.label.trim().is_empty() {
            "(no label)"
        } else {
            source.entry.label.as_str()
        };
        output::line(format!(
            "  [{}] {} <{}>",
            index + 1,
            label,
            display_url(&source.entry.url)
        ));
    }
    Ok(())
}

fn set_main(context: &mut ShellContext, slot: MainSource, args: &[&str]) -> CommandResult {
    let [url] = args else {
        return Err(usage(USAGE));
    };
    context.session.set_main_source_url(slot, url);
    output::success("Source updated.");
    Ok(())
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((url, label)) = args.split_first() else {
        return Err(usage("source add <url> [label...]"));
    };
    context.session.add_source(&label.join(" "), url);
    let position = context.session.sources().additional.len();
    output::success(format!("Added source [{}].", position));
    if url.trim().is_empty() {
        output::hint("Sources without a URL are left out of the prompt.");
    }
    Ok(())
}

fn edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw, url, label @ ..] = args else {
        return Err(usage("source edit <n> <url> [label...]"));
    };
    let (position, id) = additional_at(context, raw)?;
    context.session.update_source(id, &label.join(" "), url);
    output::success(format!("Updated source [{}].", position));
    if url.trim().is_empty() {
        output::hint("Sources without a URL are left out of the prompt.");
    }
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage("source remove <n>"));
    };
    let (position, id) = additional_at(context, raw)?;
    context.session.remove_source(id);
    output::success(format!("Removed source [{}].", position));
    Ok(())
}

/// Resolves a 1-based position in the additional list shown by `source list`.
fn additional_at(context: &ShellContext, raw: &str) -> Result<(usize, SourceId), CommandError> {
    let position: usize = raw
        .parse()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a number", raw)))?;
    let id = position
        .checked_sub(1)
        .and_then(|index| context.session.sources().additional.get(index))
        .map(|source| source.id)
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("no additional source [{}]", position))
        })?;
    Ok((position, id))
}

fn display_url(url: &str) -> &str {
    if url.trim().is_empty() {
        "no URL"
    } else {
        url
    }
}
