mod common;

use std::fs;

use common::{date, open_context, run, temp_home};
use expense_core::CoreError;
use expense_tracker::cli::core::{CommandError, LoopControl};

#[test]
fn startup_rolls_recurring_expenses_into_the_current_month() {
    let home = temp_home();
    fs::create_dir_all(home.join("data")).unwrap();
    fs::write(
        home.join("data/expenses.json"),
        r#"[{"amount":500,"category":"Bills","date":"2024-02-05","description":"Rent","recurring":true},
            {"amount":40,"category":"Food","date":"2024-02-06","description":"","recurring":false}]"#,
    )
    .unwrap();

    let context = open_context(home.clone(), date(2024, 3, 15));
    let records = context.store.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].date, date(2024, 3, 15));
    assert_eq!(records[2].description, "Rent");
    assert!(records[2].recurring);

    let persisted = fs::read_to_string(home.join("data/expenses.json")).unwrap();
    assert_eq!(persisted.matches("Rent").count(), 2);
}

#[test]
fn add_edit_and_delete_use_ledger_positions() {
    let mut context = open_context(temp_home(), date(2024, 1, 31));
    run(
        &mut context,
        &[
            "add 100 Food 2024-01-01 Lunch",
            "add 40 Transport 2024-01-02 \"Bus pass\" --recurring",
            "add 15 Food 2024-01-03",
        ],
    );
    assert_eq!(context.store.len(), 3);
    assert!(context.store.records()[1].recurring);
    assert_eq!(context.store.records()[1].description, "Bus pass");

    run(&mut context, &["edit 1 amount=120 description=\"Team lunch\""]);
    let moved = &context.store.records()[2];
    assert_eq!(moved.amount, 120.0);
    assert_eq!(moved.description, "Team lunch");
    assert_eq!(context.store.records()[0].category.as_str(), "Transport");

    run(&mut context, &["filter category=Food", "delete 1"]);
    assert_eq!(context.store.len(), 2);
    assert!(context
        .store
        .records()
        .iter()
        .all(|record| record.category.as_str() == "Food"));
}

#[test]
fn rejected_input_leaves_the_ledger_untouched() {
    let mut context = open_context(temp_home(), date(2024, 1, 31));

    let future = context.process_line("add 10 Food 2024-02-01");
    assert!(matches!(
        future,
        Err(CommandError::Core(CoreError::Validation(_)))
    ));
    let negative = context.process_line("add -5 Food 2024-01-01");
    assert!(matches!(
        negative,
        Err(CommandError::Core(CoreError::Validation(_)))
    ));
    let not_a_number = context.process_line("add ten Food 2024-01-01");
    assert!(matches!(
        not_a_number,
        Err(CommandError::InvalidArguments(_))
    ));
    let missing = context.process_line("delete 4");
    assert!(matches!(
        missing,
        Err(CommandError::Core(CoreError::IndexOutOfRange { index: 3, len: 0 }))
    ));

    assert!(context.store.is_empty());
}

#[test]
fn filters_narrow_the_view_and_clear_resets_it() {
    let mut context = open_context(temp_home(), date(2024, 3, 31));
    run(
        &mut context,
        &[
            "add 100 Food 2024-01-10 Groceries",
            "add 250 Bills 2024-02-01 Internet",
            "add 60 Food 2024-03-02 \"Lunch with Sam\"",
        ],
    );

    run(&mut context, &["filter category=Food from=2024-02-01"]);
    let view = context.view();
    assert_eq!(view.positions, vec![2]);
    assert_eq!(view.total, 60.0);
    assert_eq!(context.prompt(), "expenses (filtered)> ");

    run(&mut context, &["filter category= search=GROCER from="]);
    assert_eq!(context.view().positions, vec![0]);

    run(&mut context, &["clear-filters"]);
    let view = context.view();
    assert_eq!(view.count, 3);
    assert_eq!(view.total, 410.0);
}

#[test]
fn settings_are_persisted_to_config() {
    let home = temp_home();
    let mut context = open_context(home.clone(), date(2024, 1, 31));
    run(&mut context, &["currency eur", "budget 15000"]);
    assert_eq!(context.display_rate().code.as_str(), "EUR");

    let reopened = open_context(home, date(2024, 1, 31));
    assert_eq!(reopened.config.display_currency, "EUR");
    assert_eq!(reopened.config.budget_limit, 15_000.0);
}

#[test]
fn unknown_currency_and_bad_budget_are_rejected() {
    let mut context = open_context(temp_home(), date(2024, 1, 31));
    assert!(matches!(
        context.process_line("currency JPY"),
        Err(CommandError::Core(CoreError::Validation(_)))
    ));
    assert!(matches!(
        context.process_line("budget 0"),
        Err(CommandError::Config(_))
    ));
    assert_eq!(context.config.display_currency, "INR");
    assert_eq!(context.config.budget_limit, 20_000.0);
}

#[test]
fn exit_stops_the_shell() {
    let mut context = open_context(temp_home(), date(2024, 1, 31));
    assert_eq!(context.process_line("help").unwrap(), LoopControl::Continue);
    assert_eq!(context.process_line("EXIT").unwrap(), LoopControl::Exit);
    assert!(!context.running);
}

#[test]
fn unreadable_config_falls_back_to_defaults() {
    let home = temp_home();
    fs::create_dir_all(home.join("config")).unwrap();
    fs::write(home.join("config/config.json"), "][").unwrap();

    let context = open_context(home, date(2024, 1, 31));
    assert_eq!(context.config.budget_limit, 20_000.0);
}

#[test]
fn color_toggle_is_persisted() {
    let home = temp_home();
    let mut context = open_context(home.clone(), date(2024, 1, 31));
    run(&mut context, &["color off"]);
    assert!(!context.config.ui_color_enabled);

    assert!(matches!(
        context.process_line("color purple"),
        Err(CommandError::InvalidArguments(_))
    ));

    let reopened = open_context(home, date(2024, 1, 31));
    assert!(!reopened.config.ui_color_enabled);
}

#[test]
fn amount_edits_work_on_records_with_legacy_categories() {
    let home = temp_home();
    fs::create_dir_all(home.join("data")).unwrap();
    fs::write(
        home.join("data/expenses.json"),
        r#"[{"amount":5,"category":"","date":"2024-01-02","description":"old","recurring":false}]"#,
    )
    .unwrap();

    let mut context = open_context(home, date(2024, 1, 31));
    context.process_line("edit 1 amount=7").expect("edit succeeds");
    assert_eq!(context.store.records()[0].amount, 7.0);
}
