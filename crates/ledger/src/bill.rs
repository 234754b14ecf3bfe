use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::Money;

/// The one mode value with dedicated aggregation; everything else counts
/// as online.
pub const CASH_MODE: &str = "cash";

/// A single recorded transaction.
///
/// `time` is a human-readable wall-clock string captured at creation. It
/// is display data, not a sortable instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub name: String,
    pub amount: Money,
    pub mode: String,
    pub time: String,
}

impl Bill {
    /// Creates a bill stamped with the current local time.
    pub fn new(name: String, amount: Money, mode: String) -> Self {
        let time = Local::now().format("%I:%M:%S %p").to_string();
        Self {
            name,
            amount,
            mode,
            time,
        }
    }

    /// Mode stays free text; any value other than `"cash"` aggregates as
    /// online.
    #[must_use]
    pub fn is_cash(&self) -> bool {
        self.mode == CASH_MODE
    }
}
