//! Database operations for participants.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    event::EventId,
    participant::{Participant, ParticipantId, ParticipantName},
};

/// Add a participant to the roster of `event_id`.
///
/// # Errors
///
/// Returns [Error::DuplicateParticipant] if the event already has a
/// participant with the same name.
pub fn create_participant(
    event_id: EventId,
    name: ParticipantName,
    connection: &Connection,
) -> Result<Participant, Error> {
    connection
        .execute(
            "INSERT INTO participant (event_id, name) VALUES (?1, ?2);",
            (event_id, name.as_ref()),
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 2067 =>
            {
                Error::DuplicateParticipant(name.to_string())
            }
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Participant { id, event_id, name })
}

/// Retrieve the roster of an event in the order participants were added.
pub fn get_participants(
    event_id: EventId,
    connection: &Connection,
) -> Result<Vec<Participant>, Error> {
    connection
        .prepare("SELECT id, event_id, name FROM participant WHERE event_id = ?1 ORDER BY id ASC;")?
        .query_map([event_id], map_row)?
        .map(|maybe_participant| maybe_participant.map_err(|error| error.into()))
        .collect()
}

/// Find the participant of `event_id` called `name`.
pub fn get_participant_by_name(
    event_id: EventId,
    name: &ParticipantName,
    connection: &Connection,
) -> Result<Participant, Error> {
    connection
        .prepare("SELECT id, event_id, name FROM participant WHERE event_id = ?1 AND name = ?2;")?
        .query_row((event_id, name.as_ref()), map_row)
        .map_err(|error| error.into())
}

/// Remove a participant from the roster of `event_id`.
///
/// # Errors
///
/// Returns [Error::DeleteMissingParticipant] if the participant is not on the
/// roster, or [Error::ParticipantHasExpenses] if they paid for an expense.
pub fn delete_participant(
    event_id: EventId,
    participant_id: ParticipantId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "DELETE FROM participant WHERE id = ?1 AND event_id = ?2",
            (participant_id, event_id),
        )
        .map_err(|error| match error {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::ParticipantHasExpenses
            }
            error => error.into(),
        })?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingParticipant);
    }

    Ok(())
}

/// Initialize the participant table and indexes.
pub fn create_participant_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS participant (
            id INTEGER PRIMARY KEY,
            event_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            UNIQUE(event_id, name),
            FOREIGN KEY(event_id) REFERENCES event(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_participant_event_id ON participant(event_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Participant, rusqlite::Error> {
    let id = row.get(0)?;
    let event_id = row.get(1)?;
    let raw_name: String = row.get(2)?;
    let name = ParticipantName::new_unchecked(&raw_name);

    Ok(Participant { id, event_id, name })
}

#[cfg(test)]
mod participant_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        event::{EventId, EventName, create_event},
        participant::{
            ParticipantName, create_participant, delete_participant, get_participant_by_name,
            get_participants,
        },
    };

    fn get_test_db_connection() -> (Connection, EventId) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");
        let event = create_event(EventName::new_unchecked("Dinner"), &connection)
            .expect("Could not create test event");

        (connection, event.id)
    }

    #[test]
    fn create_participant_succeeds() {
        let (connection, event_id) = get_test_db_connection();
        let name = ParticipantName::new("Alice").unwrap();

        let participant = create_participant(event_id, name.clone(), &connection)
            .expect("Could not create participant");

        assert!(participant.id > 0);
        assert_eq!(participant.event_id, event_id);
        assert_eq!(participant.name, name);
    }

    #[test]
    fn create_participant_fails_on_duplicate_name() {
        let (connection, event_id) = get_test_db_connection();
        create_participant(event_id, ParticipantName::new_unchecked("Alice"), &connection)
            .unwrap();

        let result =
            create_participant(event_id, ParticipantName::new_unchecked("Alice"), &connection);

        assert_eq!(result, Err(Error::DuplicateParticipant("Alice".to_owned())));
    }

    #[test]
    fn same_name_can_join_different_events() {
        let (connection, event_id) = get_test_db_connection();
        let other_event = create_event(EventName::new_unchecked("Lunch"), &connection).unwrap();
        create_participant(event_id, ParticipantName::new_unchecked("Alice"), &connection)
            .unwrap();

        let result = create_participant(
            other_event.id,
            ParticipantName::new_unchecked("Alice"),
            &connection,
        );

        assert!(result.is_ok(), "got {result:?}");
    }

    #[test]
    fn get_participants_keeps_insertion_order() {
        let (connection, event_id) = get_test_db_connection();
        let carol =
            create_participant(event_id, ParticipantName::new_unchecked("Carol"), &connection)
                .unwrap();
        let alice =
            create_participant(event_id, ParticipantName::new_unchecked("Alice"), &connection)
                .unwrap();

        let roster = get_participants(event_id, &connection).unwrap();

        assert_eq!(roster, vec![carol, alice]);
    }

    #[test]
    fn get_participant_by_name_only_searches_the_event() {
        let (connection, event_id) = get_test_db_connection();
        let other_event = create_event(EventName::new_unchecked("Lunch"), &connection).unwrap();
        create_participant(
            other_event.id,
            ParticipantName::new_unchecked("Bob"),
            &connection,
        )
        .unwrap();

        let result =
            get_participant_by_name(event_id, &ParticipantName::new_unchecked("Bob"), &connection);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn delete_participant_succeeds() {
        let (connection, event_id) = get_test_db_connection();
        let participant =
            create_participant(event_id, ParticipantName::new_unchecked("Bob"), &connection)
                .unwrap();

        let result = delete_participant(event_id, participant.id, &connection);

        assert_eq!(result, Ok(()));
        assert_eq!(get_participants(event_id, &connection), Ok(vec![]));
    }

    #[test]
    fn delete_participant_with_invalid_id_returns_error() {
        let (connection, event_id) = get_test_db_connection();

        let result = delete_participant(event_id, 999999, &connection);

        assert_eq!(result, Err(Error::DeleteMissingParticipant));
    }

    #[test]
    fn participants_are_deleted_with_their_event() {
        let (connection, event_id) = get_test_db_connection();
        create_participant(event_id, ParticipantName::new_unchecked("Bob"), &connection).unwrap();

        crate::event::delete_event(event_id, &connection).unwrap();

        assert_eq!(get_participants(event_id, &connection), Ok(vec![]));
    }
}
