use tracing::debug;

use expense_core::{format_amount, CoreError};
use expense_domain::ExpenseRecord;

use crate::cli::args::{parse_amount, parse_category, parse_date, parse_patch, parse_position};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

const RECURRING_FLAGS: [&str; 2] = ["--recurring", "-r"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add <amount> <category> <date|today> [description] [--recurring]",
            cmd_add,
        ),
        CommandEntry::new(
            "delete",
            "Remove an expense by its number",
            "delete <number>",
            cmd_delete,
        ),
        CommandEntry::new(
            "edit",
            "Change fields of an expense (it moves to the end of the list)",
            "edit <number> [amount=..] [category=..] [date=..] [description=..] [recurring=true|false]",
            cmd_edit,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let recurring = args.iter().any(|arg| RECURRING_FLAGS.contains(arg));
    let fields: Vec<&str> = args
        .iter()
        .copied()
        .filter(|arg| !RECURRING_FLAGS.contains(arg))
        .collect();
    if fields.len() < 3 {
        return Err(CommandError::InvalidArguments(
            "usage: add <amount> <category> <date|today> [description] [--recurring]".into(),
        ));
    }

    let amount = parse_amount(fields[0])?;
    let category = parse_category(fields[1])?;
    let date = parse_date(fields[2], context.store.today())?;
    let record = ExpenseRecord::new(amount, category, date)
        .with_description(fields[3..].join(" "))
        .with_recurring(recurring);

    let position = context.store.add(record)?;
    debug!(position, "expense added via shell");
    output::success(format!("Added expense #{}.", position + 1));
    context.render_status();
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: delete <number>".into(),
        ));
    };
    let index = parse_position(raw)?;
    let Some(record) = context.store.get(index) else {
        return Err(CoreError::IndexOutOfRange {
            index,
            len: context.store.len(),
        }
        .into());
    };

    let prompt = format!(
        "Delete #{} {} {} on {}?",
        index + 1,
        record.category,
        format_amount(record.amount, &context.display_rate()),
        record.date
    );
    if !context.confirm(&prompt)? {
        output::info("Deletion cancelled.");
        return Ok(());
    }

    let removed = context.store.delete(index)?;
    output::success(format!(
        "Deleted {} expense from {}.",
        removed.category, removed.date
    ));
    context.render_status();
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((raw, fields)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <number> field=value ...".into(),
        ));
    };
    let index = parse_position(raw)?;
    let patch = parse_patch(fields, context.store.today())?;
    if patch.is_empty() {
        return Err(CommandError::InvalidArguments(
            "nothing to change; pass field=value pairs such as amount=250".into(),
        ));
    }

    let position = context.store.edit(index, &patch)?;
    output::success(format!("Updated expense; it is now #{}.", position + 1));
    context.render_status();
    Ok(())
}
