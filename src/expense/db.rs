//! Database operations for expenses.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    event::EventId,
    expense::{Expense, ExpenseId, NewExpense},
    participant::{ParticipantId, ParticipantName, get_participant_by_name},
};

const SELECT_EXPENSE: &str = "SELECT expense.id, expense.event_id, expense.description, \
    expense.amount, participant.name \
    FROM expense INNER JOIN participant ON participant.id = expense.paid_by";

/// Store an expense for `event_id` and return it with its generated ID.
///
/// # Errors
///
/// Returns [Error::UnknownPayer] if the payer is not on the event's roster.
pub fn create_expense(
    event_id: EventId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    let payer_id = get_payer_id(event_id, &expense.paid_by, connection)?;

    connection.execute(
        "INSERT INTO expense (event_id, description, amount, paid_by) VALUES (?1, ?2, ?3, ?4);",
        (event_id, &expense.description, expense.amount, payer_id),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        event_id,
        description: expense.description,
        amount: expense.amount,
        paid_by: expense.paid_by,
    })
}

/// Retrieve a single expense of an event.
pub fn get_expense(
    event_id: EventId,
    expense_id: ExpenseId,
    connection: &Connection,
) -> Result<Expense, Error> {
    connection
        .prepare(&format!(
            "{SELECT_EXPENSE} WHERE expense.id = ?1 AND expense.event_id = ?2;"
        ))?
        .query_row((expense_id, event_id), map_row)
        .map_err(|error| error.into())
}

/// Retrieve all expenses of an event in the order they were recorded.
pub fn get_expenses(event_id: EventId, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_EXPENSE} WHERE expense.event_id = ?1 ORDER BY expense.id ASC;"
        ))?
        .query_map([event_id], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Replace the details of an existing expense.
///
/// # Errors
///
/// Returns [Error::UnknownPayer] if the payer is not on the event's roster,
/// or [Error::UpdateMissingExpense] if the expense does not exist.
pub fn update_expense(
    event_id: EventId,
    expense_id: ExpenseId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    let payer_id = get_payer_id(event_id, &expense.paid_by, connection)?;

    let rows_affected = connection.execute(
        "UPDATE expense SET description = ?1, amount = ?2, paid_by = ?3
        WHERE id = ?4 AND event_id = ?5",
        (
            &expense.description,
            expense.amount,
            payer_id,
            expense_id,
            event_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(Expense {
        id: expense_id,
        event_id,
        description: expense.description,
        amount: expense.amount,
        paid_by: expense.paid_by,
    })
}

/// Delete an expense of an event. Returns an error if the expense doesn't exist.
pub fn delete_expense(
    event_id: EventId,
    expense_id: ExpenseId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM expense WHERE id = ?1 AND event_id = ?2",
        (expense_id, event_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Initialize the expense table and indexes.
///
/// The payer must be a participant, and a participant cannot be deleted
/// while an expense still refers to them.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            event_id INTEGER NOT NULL,
            description TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount >= 0),
            paid_by INTEGER NOT NULL,
            FOREIGN KEY(event_id) REFERENCES event(id) ON UPDATE CASCADE ON DELETE CASCADE,
            FOREIGN KEY(paid_by) REFERENCES participant(id)
        );

        CREATE INDEX IF NOT EXISTS idx_expense_event_id ON expense(event_id);",
    )?;

    Ok(())
}

fn get_payer_id(
    event_id: EventId,
    payer: &ParticipantName,
    connection: &Connection,
) -> Result<ParticipantId, Error> {
    match get_participant_by_name(event_id, payer, connection) {
        Ok(participant) => Ok(participant.id),
        Err(Error::NotFound) => Err(Error::UnknownPayer(payer.to_string())),
        Err(error) => Err(error),
    }
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let raw_paid_by: String = row.get(4)?;

    Ok(Expense {
        id: row.get(0)?,
        event_id: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        paid_by: ParticipantName::new_unchecked(&raw_paid_by),
    })
}
