//! Reads the roster and expenses of an event as one consistent view.

use rusqlite::Connection;

use crate::{
    Error,
    event::{EventId, get_event},
    settlement::ExpenseRecord,
};

/// Everything the settlement engine needs to know about an event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSnapshot {
    /// Participant names in the order they joined.
    pub roster: Vec<String>,
    /// Expenses in the order they were recorded.
    pub records: Vec<ExpenseRecord>,
}

/// Read the roster and expenses of an event inside a single transaction so
/// that a concurrent edit cannot produce a roster and expense list that
/// disagree.
///
/// # Errors
///
/// Returns [Error::NotFound] if the event does not exist.
pub fn get_event_snapshot(
    event_id: EventId,
    connection: &Connection,
) -> Result<EventSnapshot, Error> {
    let transaction = connection.unchecked_transaction()?;

    get_event(event_id, &transaction)?;

    let roster = transaction
        .prepare("SELECT name FROM participant WHERE event_id = :event_id ORDER BY id ASC;")?
        .query_map(&[(":event_id", &event_id)], |row| row.get(0))?
        .map(|maybe_name| maybe_name.map_err(|error| error.into()))
        .collect::<Result<Vec<String>, Error>>()?;

    let records = transaction
        .prepare(
            "SELECT participant.name, expense.amount
            FROM expense
            INNER JOIN participant ON participant.id = expense.paid_by
            WHERE expense.event_id = :event_id
            ORDER BY expense.id ASC;",
        )?
        .query_map(&[(":event_id", &event_id)], |row| {
            Ok(ExpenseRecord {
                payer_name: row.get(0)?,
                amount: row.get(1)?,
            })
        })?
        .map(|maybe_record| maybe_record.map_err(|error| error.into()))
        .collect::<Result<Vec<ExpenseRecord>, Error>>()?;

    transaction.commit()?;

    Ok(EventSnapshot { roster, records })
}

#[cfg(test)]
mod event_snapshot_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        event::{EventName, create_event},
        expense::{NewExpense, create_expense},
        participant::{ParticipantName, create_participant},
        settlement::ExpenseRecord,
    };

    use super::{EventSnapshot, get_event_snapshot};

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        connection
    }

    #[test]
    fn snapshot_of_missing_event_is_not_found() {
        let connection = get_test_db_connection();

        assert_eq!(get_event_snapshot(42, &connection), Err(Error::NotFound));
    }

    #[test]
    fn snapshot_of_new_event_is_empty() {
        let connection = get_test_db_connection();
        let event = create_event(EventName::new_unchecked("Dinner"), &connection).unwrap();

        assert_eq!(
            get_event_snapshot(event.id, &connection),
            Ok(EventSnapshot {
                roster: vec![],
                records: vec![],
            })
        );
    }

    #[test]
    fn snapshot_lists_roster_and_records_in_insertion_order() {
        let connection = get_test_db_connection();
        let event = create_event(EventName::new_unchecked("Dinner"), &connection).unwrap();
        let other_event = create_event(EventName::new_unchecked("Lunch"), &connection).unwrap();
        for name in ["Carol", "Alice", "Bob"] {
            create_participant(event.id, ParticipantName::new_unchecked(name), &connection)
                .unwrap();
        }
        create_participant(
            other_event.id,
            ParticipantName::new_unchecked("Dave"),
            &connection,
        )
        .unwrap();
        for (description, amount, paid_by) in [("Taxi", 12.5, "Bob"), ("Pizza", 30.0, "Carol")] {
            create_expense(
                event.id,
                NewExpense {
                    description: description.to_owned(),
                    amount,
                    paid_by: ParticipantName::new_unchecked(paid_by),
                },
                &connection,
            )
            .unwrap();
        }

        let snapshot = get_event_snapshot(event.id, &connection).unwrap();

        assert_eq!(snapshot.roster, vec!["Carol", "Alice", "Bob"]);
        assert_eq!(
            snapshot.records,
            vec![
                ExpenseRecord::new("Bob", 12.5),
                ExpenseRecord::new("Carol", 30.0)
            ]
        );
    }
}
