pub mod form;
pub mod prompt;
pub mod sources;
pub mod system;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(form::definitions());
    commands.extend(sources::definitions());
    commands.extend(prompt::definitions());
    commands
}
