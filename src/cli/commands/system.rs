use apg_storage_json::FORM_SCHEMA_VERSION;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::errors::AppError;
use crate::utils::build_info;

use super::form::usage;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new(
            "config",
            "Show settings or change the color preference",
            "config [color <on|off>]",
            cmd_config,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Admissions Prompt {}", meta.version));
    output::info(format!("  Form schema  : v{}", FORM_SCHEMA_VERSION));
    output::info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    output::info(format!(
        "  Config       : {}",
        context.config_manager.config_path().display()
    ));
    output::info(format!(
        "  Data dir     : {}",
        context.session.adapter().store().root().display()
    ));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.registry.get(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let config = &context.config;
            output::section("Settings");
            output::info(format!("  Form key     : {}", config.form_storage_key));
            output::info(format!("  Sources key  : {}", config.sources_storage_key));
            output::info(format!("  Color output : {}", on_off(config.ui_color_enabled)));
            output::info(format!(
                "  Data dir     : {}",
                context.config_manager.data_dir(config).display()
            ));
            Ok(())
        }
        [setting, value] if setting.eq_ignore_ascii_case("color") => {
            let enabled = match value.to_ascii_lowercase().as_str() {
                "on" => true,
                "off" => false,
                _ => return Err(usage("config [color <on|off>]")),
            };
            context.config.ui_color_enabled = enabled;
            context
                .config_manager
                .save(&context.config)
                .map_err(AppError::from)?;
            output::set_color_enabled(enabled);
            output::success(format!("Color output {}.", on_off(enabled)));
            Ok(())
        }
        _ => Err(usage("config [color <on|off>]")),
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
