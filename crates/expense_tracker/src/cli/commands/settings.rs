use std::collections::BTreeSet;

use expense_core::{format_amount, rate_for};

use crate::cli::args::{parse_amount, parse_bool};
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "currency",
            "Show or select the display currency",
            "currency [CODE]",
            cmd_currency,
        ),
        CommandEntry::new(
            "budget",
            "Show or set the monthly budget limit (in INR)",
            "budget [amount]",
            cmd_budget,
        ),
        CommandEntry::new(
            "color",
            "Show or toggle coloured output",
            "color [on|off]",
            cmd_color,
        ),
        CommandEntry::new(
            "categories",
            "List suggested categories and those already in use",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_currency(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let current = context.display_rate();
            output::info(format!("Display currency: {}", current.code));
            for rate in context.currencies.rates() {
                output::info(format!("  {:<4} {}", rate.code.as_str(), rate.rate));
            }
            Ok(())
        }
        [code] => {
            let rate = rate_for(&context.currencies, code)?;
            context.config.display_currency = rate.code.as_str().to_string();
            context.save_config()?;
            output::success(format!("Amounts are now shown in {}.", rate.code));
            context.render_status();
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: currency [CODE]".into(),
        )),
    }
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::info(format!(
                "Budget limit: {}",
                format_amount(context.config.budget_limit, &context.display_rate())
            ));
            Ok(())
        }
        [raw] => {
            let limit = parse_amount(raw)?;
            context.config.set_budget_limit(limit)?;
            context.save_config()?;
            output::success(format!(
                "Budget limit set to {}.",
                format_amount(limit, &context.display_rate())
            ));
            context.render_status();
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: budget [amount]".into(),
        )),
    }
}

fn cmd_color(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let enabled = match args {
        [] => {
            let state = if context.config.ui_color_enabled { "on" } else { "off" };
            output::info(format!("Coloured output: {state}"));
            return Ok(());
        }
        [raw] => match raw.to_ascii_lowercase().as_str() {
            "on" => true,
            "off" => false,
            _ => parse_bool(raw)?,
        },
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: color [on|off]".into(),
            ))
        }
    };

    context.config.ui_color_enabled = enabled;
    context.save_config()?;
    output::set_color_enabled(enabled && context.mode == CliMode::Interactive);
    output::success(if enabled {
        "Coloured output enabled."
    } else {
        "Coloured output disabled."
    });
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Suggested categories");
    for name in &context.config.category_suggestions {
        output::info(format!("  {name}"));
    }

    let in_use: BTreeSet<&str> = context
        .store
        .records()
        .iter()
        .map(|record| record.category.as_str())
        .collect();
    output::section("In use");
    if in_use.is_empty() {
        output::info("  (none yet)");
    }
    for name in in_use {
        output::info(format!("  {name}"));
    }
    Ok(())
}
