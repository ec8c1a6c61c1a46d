use apg_domain::{fields_for_step, FieldKind, FieldValue, FormStep, FIELD_CATALOG};

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "show",
            "Show the fields of a step with their values",
            "show [step]",
            cmd_show,
        ),
        CommandEntry::new(
            "fields",
            "List every field name and whether it is shown",
            "fields",
            cmd_fields,
        ),
        CommandEntry::new(
            "options",
            "List the allowed values of a choice field",
            "options <field>",
            cmd_options,
        ),
        CommandEntry::new(
            "set",
            "Set a single-value field",
            "set <field> <value...>",
            cmd_set,
        ),
        CommandEntry::new(
            "select",
            "Replace the selections of a multi-select field",
            "select <field> <value> [value...]",
            cmd_select,
        ),
        CommandEntry::new(
            "toggle",
            "Check or uncheck one option of a multi-select field",
            "toggle <field> <value>",
            cmd_toggle,
        ),
        CommandEntry::new("clear", "Clear a field", "clear <field>", cmd_clear),
        CommandEntry::new("focus", "Move to a form step", "focus <1|2|3>", cmd_focus),
        CommandEntry::new(
            "reset",
            "Reset a step to its empty state",
            "reset <profile|question|sources>",
            cmd_reset,
        ),
        CommandEntry::new(
            "progress",
            "Show the step indicator",
            "progress",
            cmd_progress,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let step = match args.first() {
        Some(raw) => parse_step(raw)?,
        None => context.session.progress().current(),
    };
    if step == FormStep::Sources {
        return super::sources::print_sources(context);
    }
    if step == FormStep::Generated {
        return super::prompt::print_output(context);
    }

    output::section(step);
    let session = &context.session;
    for spec in fields_for_step(step) {
        if !session.visibility().is_visible(spec.key) {
            continue;
        }
        let marker = if session.visibility().is_required(spec.key) {
            "*"
        } else {
            " "
        };
        output::line(format!(
            "  {}{:<30} {}",
            marker,
            spec.key.name(),
            describe(session.fields().value(spec.key))
        ));
    }
    output::hint("Fields marked * are required.");
    Ok(())
}

fn cmd_fields(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Fields");
    for spec in FIELD_CATALOG {
        let shown = if context.session.visibility().is_visible(spec.key) {
            "shown"
        } else {
            "hidden"
        };
        output::line(format!(
            "  {:<30} step {}  {:<12} {:<7} {}",
            spec.key.name(),
            spec.step.number(),
            kind_label(spec.kind),
            shown,
            spec.label
        ));
    }
    Ok(())
}

fn cmd_options(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(usage("options <field>"));
    };
    let key = context.field(name)?;
    let options = key.spec().kind.options();
    if options.is_empty() {
        output::info(format!("`{}` is free text.", key));
        return Ok(());
    }
    output::section(key.spec().label);
    for option in options {
        output::line(format!("  {}", option));
    }
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((name, rest)) = args.split_first() else {
        return Err(usage("set <field> <value...>"));
    };
    let key = context.field(name)?;
    let value = rest.join(" ");
    context.session.set_value(key, &value)?;
    if value.trim().is_empty() {
        output::success(format!("Cleared `{}`.", key));
    } else {
        output::success(format!(
            "`{}` = {}",
            key,
            describe(context.session.fields().value(key))
        ));
    }
    Ok(())
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((name, values)) = args.split_first() else {
        return Err(usage("select <field> <value> [value...]"));
    };
    let key = context.field(name)?;
    context.session.set_selection(key, values)?;
    output::success(format!(
        "`{}` = {}",
        key,
        describe(context.session.fields().value(key))
    ));
    Ok(())
}

fn cmd_toggle(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, rest @ ..] = args else {
        return Err(usage("toggle <field> <value>"));
    };
    if rest.is_empty() {
        return Err(usage("toggle <field> <value>"));
    }
    let key = context.field(name)?;
    let value = rest.join(" ");
    let checked = context.session.toggle(key, &value)?;
    let verb = if checked { "Checked" } else { "Unchecked" };
    output::success(format!("{} `{}` in `{}`.", verb, value.trim(), key));
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name] = args else {
        return Err(usage("clear <field>"));
    };
    let key = context.field(name)?;
    if context.session.clear_field(key) {
        output::success(format!("Cleared `{}`.", key));
    } else {
        output::info(format!("`{}` was already empty.", key));
    }
    Ok(())
}

fn cmd_focus(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage("focus <1|2|3>"));
    };
    let step = parse_step(raw)?;
    if step == FormStep::Generated {
        return Err(CommandError::InvalidArguments(
            "step 4 is reached with `generate`".into(),
        ));
    }
    context.session.focus(step);
    cmd_show(context, &[])
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = args.first().map(|arg| arg.to_ascii_lowercase());
    match target.as_deref() {
        Some("profile") => {
            context.session.reset_profile();
            output::success("Profile cleared.");
        }
        Some("question") => {
            context.session.reset_question();
            output::success("Question cleared.");
        }
        Some("sources") => {
            context.session.reset_sources();
            output::success("Sources restored to defaults.");
        }
        _ => return Err(usage("reset <profile|question|sources>")),
    }
    Ok(())
}

fn cmd_progress(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Progress");
    for (step, state) in context.session.progress().states() {
        output::line(format!("  [{:<9}] {}", state.label(), step));
    }
    Ok(())
}

pub(super) fn parse_step(raw: &str) -> Result<FormStep, CommandError> {
    raw.parse::<u8>()
        .ok()
        .and_then(FormStep::from_number)
        .ok_or_else(|| CommandError::InvalidArguments(format!("unknown step `{}`", raw)))
}

pub(super) fn usage(text: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", text))
}

fn describe(value: FieldValue<'_>) -> String {
    match value {
        FieldValue::Text("") => "-".to_string(),
        FieldValue::Text(text) => text.to_string(),
        FieldValue::List([]) => "-".to_string(),
        FieldValue::List(items) => items.join(", "),
    }
}

fn kind_label(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Select(_) => "select",
        FieldKind::MultiSelect(_) => "multi-select",
        FieldKind::Text => "text",
        FieldKind::TextArea => "textarea",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_parse_from_numbers() {
        assert_eq!(parse_step("2").unwrap(), FormStep::Question);
        assert!(parse_step("9").is_err());
        assert!(parse_step("two").is_err());
    }

    #[test]
    fn empty_values_render_as_dash() {
        assert_eq!(describe(FieldValue::Text("")), "-");
        assert_eq!(describe(FieldValue::List(&[])), "-");
        let items = vec!["A".to_string(), "B".to_string()];
        assert_eq!(describe(FieldValue::List(&items)), "A, B");
    }
}
