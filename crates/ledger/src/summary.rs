use crate::{Bill, Money};

/// Derived totals over the current bill list.
///
/// Recomputed in full after every mutation; no incremental maintenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: Money,
    pub count: usize,
    pub cash: Money,
    pub online: Money,
}

impl Summary {
    /// Projects the totals for `bills`. `total == cash + online` holds by
    /// construction.
    #[must_use]
    pub fn of(bills: &[Bill]) -> Self {
        let mut cash = Money::ZERO;
        let mut online = Money::ZERO;

        for bill in bills {
            if bill.is_cash() {
                cash += bill.amount;
            } else {
                online += bill.amount;
            }
        }

        Self {
            total: cash + online,
            count: bills.len(),
            cash,
            online,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(name: &str, paise: i64, mode: &str) -> Bill {
        Bill {
            name: name.to_string(),
            amount: Money::new(paise),
            mode: mode.to_string(),
            time: "10:30:15 AM".to_string(),
        }
    }

    #[test]
    fn empty_ledger_projects_zeroes() {
        assert_eq!(Summary::of(&[]), Summary::default());
    }

    #[test]
    fn tea_and_coffee_scenario() {
        let bills = [bill("Tea", 1500, "cash"), bill("Coffee", 2550, "online")];
        let summary = Summary::of(&bills);

        assert_eq!(summary.total.to_string(), "₹40.50");
        assert_eq!(summary.cash.to_string(), "₹15.00");
        assert_eq!(summary.online.to_string(), "₹25.50");
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn total_is_cash_plus_online() {
        let bills = [
            bill("Samosa", 1200, "cash"),
            bill("Lassi", 4500, "online"),
            bill("Chai", 999, "cash"),
            bill("Thali", 12075, "online"),
        ];
        let summary = Summary::of(&bills);

        assert_eq!(summary.total, summary.cash + summary.online);
        assert_eq!(
            summary.total,
            bills.iter().fold(Money::ZERO, |acc, b| acc + b.amount)
        );
    }

    #[test]
    fn unknown_mode_counts_as_online() {
        let bills = [bill("Biscuits", 1000, "upi"), bill("Milk", 2000, "cash")];
        let summary = Summary::of(&bills);

        assert_eq!(summary.cash, Money::new(2000));
        assert_eq!(summary.online, Money::new(1000));
    }
}
