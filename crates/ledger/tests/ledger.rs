use ledger::{Bill, BillStore, Ledger, LedgerError, Money};
use uuid::Uuid;

fn scratch_store() -> BillStore {
    let root =
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_ledgers");
    std::fs::create_dir_all(&root).unwrap();
    BillStore::new(root.join(format!("bills_{}.json", Uuid::new_v4())))
}

fn persisted(store: &BillStore) -> Vec<Bill> {
    let content = std::fs::read_to_string(store.path()).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn add_appends_and_persists() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store.clone()).unwrap();

    ledger.add("Tea", "15", "cash").unwrap();
    ledger.add("  Coffee  ", "25.5", "online").unwrap();

    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.bills()[0].name, "Tea");
    assert_eq!(ledger.bills()[1].name, "Coffee");
    assert_eq!(ledger.bills()[1].amount, Money::new(2550));

    let on_disk = persisted(&store);
    assert_eq!(on_disk.len(), 2);
    assert_eq!(on_disk[1].amount, Money::new(2550));
}

#[test]
fn add_rejects_blank_name() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store).unwrap();

    let err = ledger.add("   ", "15", "cash").unwrap_err();
    assert!(matches!(err, LedgerError::EmptyName));
    assert!(ledger.is_empty());
}

#[test]
fn add_rejects_non_positive_amounts() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store).unwrap();

    for amount in ["0", "-5", "0.00"] {
        let err = ledger.add("Tea", amount, "cash").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)), "{amount}");
    }
    assert!(ledger.is_empty());
}

#[test]
fn add_rejects_non_numeric_amounts() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store.clone()).unwrap();

    for amount in ["", "abc", "1.2.3", "12.345"] {
        let err = ledger.add("Tea", amount, "cash").unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)), "{amount}");
    }
    assert!(ledger.is_empty());
    // Nothing valid was added, so nothing was ever written.
    assert!(!store.path().exists());
}

#[test]
fn remove_drops_only_the_indexed_bill() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store.clone()).unwrap();
    ledger.add("Tea", "15", "cash").unwrap();
    ledger.add("Coffee", "25.5", "online").unwrap();
    ledger.add("Samosa", "12", "cash").unwrap();

    ledger.remove(1).unwrap();

    let names: Vec<_> = ledger.bills().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Tea", "Samosa"]);
    assert_eq!(persisted(&store).len(), 2);
}

#[test]
fn remove_out_of_range_is_a_noop() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store).unwrap();
    ledger.add("Tea", "15", "cash").unwrap();

    ledger.remove(5).unwrap();

    assert_eq!(ledger.len(), 1);
}

#[test]
fn clear_empties_ledger_and_file() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store.clone()).unwrap();
    ledger.add("Tea", "15", "cash").unwrap();
    ledger.add("Coffee", "25.5", "online").unwrap();

    ledger.clear().unwrap();

    assert!(ledger.is_empty());
    assert!(persisted(&store).is_empty());
}

#[test]
fn reload_reproduces_identical_sequence() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store.clone()).unwrap();
    ledger.add("Tea", "15", "cash").unwrap();
    ledger.add("Coffee", "25.5", "online").unwrap();
    ledger.add("Thali", "120.75", "upi").unwrap();
    let before = ledger.bills().to_vec();
    drop(ledger);

    // Simulated restart.
    let reloaded = Ledger::load(store).unwrap();
    assert_eq!(reloaded.bills(), before.as_slice());
}

#[test]
fn missing_file_loads_empty() {
    let ledger = Ledger::load(scratch_store()).unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn malformed_file_loads_empty() {
    let store = scratch_store();
    std::fs::write(store.path(), "{not json").unwrap();

    let ledger = Ledger::load(store).unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn summary_tracks_mutations() {
    let store = scratch_store();
    let mut ledger = Ledger::load(store).unwrap();
    ledger.add("Tea", "15", "cash").unwrap();
    ledger.add("Coffee", "25.5", "online").unwrap();

    let summary = ledger.summary();
    assert_eq!(summary.total.to_string(), "₹40.50");
    assert_eq!(summary.count, 2);

    ledger.remove(0).unwrap();
    let summary = ledger.summary();
    assert_eq!(summary.total.to_string(), "₹25.50");
    assert_eq!(summary.cash, Money::ZERO);
}
