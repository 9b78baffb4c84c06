pub mod expense;
pub mod settings;
pub mod system;
pub mod view;

use crate::cli::registry::CommandEntry;

/// Every shell command in help order.
pub fn all_definitions() -> Vec<CommandEntry> {
    let mut entries = expense::definitions();
    entries.extend(view::definitions());
    entries.extend(settings::definitions());
    entries.extend(system::definitions());
    entries
}
