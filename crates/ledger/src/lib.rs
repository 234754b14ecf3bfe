pub use bill::{Bill, CASH_MODE};
pub use error::LedgerError;
pub use money::Money;
pub use store::BillStore;
pub use summary::Summary;

mod bill;
mod error;
mod money;
mod store;
mod summary;

type ResultLedger<T> = Result<T, LedgerError>;

/// The ordered bill list plus its backing store.
///
/// Owned by the top-level application and passed by reference to the view
/// and sync code. Every mutation persists the full list before returning,
/// so the file always mirrors memory.
#[derive(Debug)]
pub struct Ledger {
    bills: Vec<Bill>,
    store: BillStore,
}

impl Ledger {
    /// Loads the ledger from `store` at startup.
    ///
    /// An absent or malformed file starts an empty ledger without
    /// surfacing an error.
    pub fn load(store: BillStore) -> ResultLedger<Self> {
        let bills = store.load()?;
        tracing::debug!(count = bills.len(), "loaded ledger");
        Ok(Self { bills, store })
    }

    /// Bills in insertion order. Index positions double as deletion keys.
    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Validates and appends a bill, then persists.
    ///
    /// `amount` is the raw user text; a blank name, non-numeric amount or
    /// amount <= 0 rejects the operation with no state change.
    pub fn add(&mut self, name: &str, amount: &str, mode: &str) -> ResultLedger<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }

        let amount: Money = amount.parse()?;
        if !amount.is_positive() {
            return Err(LedgerError::InvalidAmount(
                "amount must be greater than zero".to_string(),
            ));
        }

        self.bills
            .push(Bill::new(name.to_string(), amount, mode.to_string()));
        self.store.save(&self.bills)?;
        tracing::debug!(name, %amount, mode, "added bill");
        Ok(())
    }

    /// Removes the bill at `index` and persists.
    ///
    /// Out-of-range indices are a silent no-op. The interactive
    /// confirmation gate lives in the caller.
    pub fn remove(&mut self, index: usize) -> ResultLedger<()> {
        if index >= self.bills.len() {
            return Ok(());
        }
        let bill = self.bills.remove(index);
        self.store.save(&self.bills)?;
        tracing::debug!(name = %bill.name, index, "removed bill");
        Ok(())
    }

    /// Empties the ledger and persists the empty list.
    pub fn clear(&mut self) -> ResultLedger<()> {
        self.bills.clear();
        self.store.save(&self.bills)?;
        tracing::debug!("cleared ledger");
        Ok(())
    }

    /// Projects the derived totals for the current list.
    pub fn summary(&self) -> Summary {
        Summary::of(&self.bills)
    }
}
