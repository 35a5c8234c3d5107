//! Input and output types of a settlement computation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The largest amount in dollars a single expense may have.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// A single payment towards an event, as seen by the settlement engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// The name of the participant who paid.
    pub payer_name: String,
    /// The amount paid in dollars. Must be between zero and [MAX_AMOUNT].
    pub amount: f64,
}

impl ExpenseRecord {
    /// Create a record of `payer_name` paying `amount`.
    pub fn new(payer_name: &str, amount: f64) -> Self {
        Self {
            payer_name: payer_name.to_owned(),
            amount,
        }
    }
}

/// A payment from a debtor to a creditor that moves both balances towards zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// The participant who owes money.
    pub from: String,
    /// The participant who is owed money.
    pub to: String,
    /// The amount to pay in dollars, rounded to cents. Always positive.
    pub amount: f64,
}

/// How an event settles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// The net position of each participant in dollars, rounded to cents.
    ///
    /// Positive balances are owed money, negative balances owe money.
    /// The balances always sum to zero.
    pub balances: BTreeMap<String, f64>,
    /// The transfers, in the order they were matched, that settle every balance.
    pub settlements: Vec<Transfer>,
    /// The number of participants on the roster.
    pub total_people: usize,
    /// The sum of all expense amounts.
    pub total_expense: f64,
    /// The equal portion of the total owed by each participant, rounded to cents.
    pub share_per_person: f64,
}
