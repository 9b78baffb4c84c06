use std::{fs::File, io::BufWriter, path::PathBuf};

use tracing::info;

use expense_core::write_csv;
use expense_domain::FilterCriteria;

use crate::cli::args::apply_filter_args;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;

const DEFAULT_EXPORT_FILE: &str = "expenses.csv";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "Show expenses matching the filters", "list", cmd_list),
        CommandEntry::new(
            "filter",
            "Show or change the active filters (empty value clears a field)",
            "filter [category=..] [from=YYYY-MM-DD] [to=YYYY-MM-DD] [search=..]",
            cmd_filter,
        ),
        CommandEntry::new(
            "clear-filters",
            "Remove every active filter",
            "clear-filters",
            cmd_clear_filters,
        ),
        CommandEntry::new(
            "summary",
            "Totals, budget progress and breakdowns for the filtered expenses",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "export",
            "Write every expense to a CSV file",
            "export [path]",
            cmd_export,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.criteria.is_unrestricted() {
        output::info(format!(
            "Filters: {}",
            render::describe_filters(&context.criteria)
        ));
    }
    let view = context.view();
    let rate = context.display_rate();
    render::print_table(&view, &rate);
    render::print_status(&view, &rate, context.config.budget_limit);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        output::info(format!(
            "Filters: {}",
            render::describe_filters(&context.criteria)
        ));
        return Ok(());
    }
    context.criteria = apply_filter_args(context.criteria.clone(), args)?;
    cmd_list(context, &[])
}

fn cmd_clear_filters(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.criteria = FilterCriteria::any();
    output::success("Filters cleared.");
    context.render_status();
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.view();
    let rate = context.display_rate();
    output::section("Summary");
    output::info(format!(
        "Filters: {}",
        render::describe_filters(&context.criteria)
    ));
    render::print_status(&view, &rate, context.config.budget_limit);
    render::print_breakdowns(&view, &rate);
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [] => PathBuf::from(DEFAULT_EXPORT_FILE),
        [path] => PathBuf::from(*path),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: export [path]".into(),
            ))
        }
    };

    let file = File::create(&path)?;
    write_csv(context.store.records(), BufWriter::new(file))?;
    info!(path = %path.display(), count = context.store.len(), "ledger exported");
    output::success(format!(
        "Exported {} expense(s) to {}.",
        context.store.len(),
        path.display()
    ));
    Ok(())
}
