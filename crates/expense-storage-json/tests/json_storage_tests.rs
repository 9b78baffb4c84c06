use std::fs;

use chrono::NaiveDate;
use expense_core::{FixedClock, LedgerStorage, LedgerStore};
use expense_domain::{Category, ExpensePatch, ExpenseRecord};
use expense_storage_json::JsonLedgerStorage;
use tempfile::tempdir;

fn lunch() -> ExpenseRecord {
    ExpenseRecord::new(
        100.0,
        Category::parse("Food").unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .with_description("Lunch")
}

fn clock() -> Box<FixedClock> {
    Box::new(FixedClock(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()))
}

#[test]
fn json_storage_round_trips_records() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::new(dir.path().join("data")).expect("create storage");

    assert!(storage.load_records().expect("load").is_none());

    let mut store = LedgerStore::load(Box::new(storage.clone()), clock());
    store.add(lunch()).expect("add");
    store
        .add(lunch().with_description("Second lunch").with_recurring(true))
        .expect("add");

    let reloaded = LedgerStore::load(Box::new(storage.clone()), clock());
    assert_eq!(reloaded.records(), store.records());
    assert!(storage.slot_path().exists());
    assert_eq!(
        storage
            .slot_path()
            .extension()
            .and_then(|ext| ext.to_str()),
        Some("json")
    );
}

#[test]
fn json_storage_writes_persisted_schema() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    storage.save_records(&[lunch()]).expect("save");

    let raw = fs::read_to_string(storage.slot_path()).expect("read file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(
        value,
        serde_json::json!([{
            "amount": 100.0,
            "category": "Food",
            "date": "2024-01-01",
            "description": "Lunch",
            "recurring": false
        }])
    );
    let tmp = storage.slot_path().with_extension("json.tmp");
    assert!(!tmp.exists(), "temp file should be renamed into place");
}

#[test]
fn json_storage_reads_records_written_by_other_tools() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::with_key(dir.path().to_path_buf(), "expenses")
        .expect("create storage");
    fs::write(
        storage.slot_path(),
        r#"[{"amount":250,"category":"Bills","date":"2023-12-05","description":"Internet","recurring":true}]"#,
    )
    .expect("write fixture");

    let records = storage.load_records().expect("load").expect("present");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount, 250.0);
    assert!(records[0].recurring);
}

#[test]
fn malformed_ledger_file_loads_as_empty() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(storage.slot_path(), "{not json").expect("write garbage");

    assert!(storage.load_records().is_err());
    let store = LedgerStore::load(Box::new(storage.clone()), clock());
    assert!(store.is_empty());
}

#[test]
fn records_with_bad_dates_discard_the_ledger() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(
        storage.slot_path(),
        r#"[{"amount":5,"category":"Food","date":"yesterday","description":"","recurring":false}]"#,
    )
    .expect("write fixture");

    let store = LedgerStore::load(Box::new(storage), clock());
    assert!(store.is_empty());
}

#[test]
fn separate_keys_use_separate_files() {
    let dir = tempdir().expect("tempdir");
    let personal = JsonLedgerStorage::with_key(dir.path().to_path_buf(), "personal")
        .expect("create storage");
    let travel = JsonLedgerStorage::with_key(dir.path().to_path_buf(), "travel")
        .expect("create storage");
    personal.save_records(&[lunch()]).expect("save");

    assert!(travel.load_records().expect("load").is_none());
    assert_ne!(personal.slot_path(), travel.slot_path());
}

#[test]
fn unreadable_ledger_is_reported_after_load() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    fs::write(storage.slot_path(), r#"[{"amount": 1,"#).expect("write truncated file");

    let store = LedgerStore::load(Box::new(storage), clock());
    assert!(store.is_empty());
    assert!(store.load_error().is_some());
}

#[test]
fn records_with_legacy_categories_stay_editable() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonLedgerStorage::new(dir.path().to_path_buf()).expect("create storage");
    let legacy = "x".repeat(45);
    fs::write(
        storage.slot_path(),
        format!(
            r#"[{{"amount":5,"category":"{legacy}","date":"2024-01-02","description":"","recurring":false}}]"#
        ),
    )
    .expect("write fixture");

    let mut store = LedgerStore::load(Box::new(storage), clock());
    assert!(store.load_error().is_none());
    let patch = ExpensePatch {
        amount: Some(9.0),
        ..ExpensePatch::default()
    };
    store.edit(0, &patch).expect("amount-only edit keeps the loaded category");
    assert_eq!(store.records()[0].amount, 9.0);
    assert_eq!(store.records()[0].category.as_str(), legacy);

    let relabel = ExpensePatch {
        category: Some(Category::parse("Food").unwrap()),
        amount: Some(-1.0),
        ..ExpensePatch::default()
    };
    assert!(store.edit(0, &relabel).is_err());
}
