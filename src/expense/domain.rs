//! Core expense domain types.

use serde::{Deserialize, Serialize};

use crate::{Error, event::EventId, participant::ParticipantName, settlement::MAX_AMOUNT};

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// Money spent by one participant on behalf of everyone in the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The event the expense belongs to.
    pub event_id: EventId,
    /// What the money was spent on.
    pub description: String,
    /// The amount in dollars, zero or more.
    pub amount: f64,
    /// The participant who paid.
    pub paid_by: ParticipantName,
}

/// Request body for creating or replacing an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// What the money was spent on.
    pub description: String,
    /// The amount in dollars.
    pub amount: f64,
    /// The name of the participant who paid.
    pub paid_by: String,
}

/// A validated expense that has not been stored yet.
///
/// Whether the payer is on the event's roster can only be checked against
/// the database, see [create_expense](crate::expense::create_expense).
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// What the money was spent on, trimmed.
    pub description: String,
    /// The amount in dollars.
    pub amount: f64,
    /// The participant who paid.
    pub paid_by: ParticipantName,
}

impl NewExpense {
    /// Validate the fields of an expense form.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - the description is empty or only whitespace,
    /// - the amount is negative, NaN, infinite or more than [MAX_AMOUNT],
    /// - the payer's name is empty.
    pub fn new(form: &ExpenseForm) -> Result<Self, Error> {
        let description = form.description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        if !(0.0..=MAX_AMOUNT).contains(&form.amount) {
            return Err(Error::InvalidAmount(form.amount));
        }

        Ok(Self {
            description: description.to_owned(),
            amount: form.amount,
            paid_by: ParticipantName::new(&form.paid_by)?,
        })
    }
}
