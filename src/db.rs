//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error, event::create_event_table, expense::create_expense_table,
    participant::create_participant_table,
};

/// Create the tables for events, participants and expenses if they do not exist.
///
/// Foreign key enforcement is switched on for `connection` so that deleting an
/// event also deletes its participants and expenses.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // The pragma is a no-op inside a transaction, so it must come first.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_event_table(&transaction)?;
    create_participant_table(&transaction)?;
    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
