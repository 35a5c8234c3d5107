//! Database operations for events.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    event::{Event, EventId, EventName},
};

/// Create an event and return it with its generated ID.
pub fn create_event(name: EventName, connection: &Connection) -> Result<Event, Error> {
    connection.execute("INSERT INTO event (name) VALUES (?1);", (name.as_ref(),))?;

    let id = connection.last_insert_rowid();

    Ok(Event { id, name })
}

/// Retrieve a single event by ID.
pub fn get_event(event_id: EventId, connection: &Connection) -> Result<Event, Error> {
    connection
        .prepare("SELECT id, name FROM event WHERE id = :id;")?
        .query_row(&[(":id", &event_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all events, oldest first.
pub fn get_all_events(connection: &Connection) -> Result<Vec<Event>, Error> {
    connection
        .prepare("SELECT id, name FROM event ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_event| maybe_event.map_err(|error| error.into()))
        .collect()
}

/// Delete an event along with its participants and expenses.
///
/// Returns an error if the event doesn't exist.
pub fn delete_event(event_id: EventId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM event WHERE id = ?1", [event_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingEvent);
    }

    Ok(())
}

/// Initialize the event table.
pub fn create_event_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS event (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Event, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;
    let name = EventName::new_unchecked(&raw_name);

    Ok(Event { id, name })
}

#[cfg(test)]
mod event_name_tests {
    use crate::{Error, event::EventName};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(EventName::new(""), Err(Error::EmptyEventName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        assert_eq!(EventName::new("\n\t \r"), Err(Error::EmptyEventName));
    }

    #[test]
    fn new_trims_whitespace() {
        assert_eq!(
            EventName::new("  Ski trip "),
            Ok(EventName::new_unchecked("Ski trip"))
        );
    }
}
