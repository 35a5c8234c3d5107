//! JSON endpoints for managing an event's roster.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    event::{EventId, get_event},
    extractors::extract_json,
    participant::{
        Participant, ParticipantForm, ParticipantId, ParticipantName, create_participant,
        delete_participant, get_participants,
    },
};

/// The state needed for the participant endpoints.
#[derive(Debug, Clone)]
pub struct ParticipantState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ParticipantState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Add a participant to an event, responds with the participant and 201 Created.
pub async fn create_participant_endpoint(
    State(state): State<ParticipantState>,
    Path(event_id): Path<EventId>,
    form: Result<Json<ParticipantForm>, JsonRejection>,
) -> Result<Response, Error> {
    let form = extract_json(form)?;
    let name = ParticipantName::new(&form.name)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_event(event_id, &connection)?;
    let participant = create_participant(event_id, name, &connection)?;

    Ok((StatusCode::CREATED, Json(participant)).into_response())
}

/// List the roster of an event.
pub async fn get_participants_endpoint(
    State(state): State<ParticipantState>,
    Path(event_id): Path<EventId>,
) -> Result<Json<Vec<Participant>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_event(event_id, &connection)?;

    get_participants(event_id, &connection)
        .inspect_err(|error| {
            tracing::error!("Failed to retrieve participants of event {event_id}: {error}")
        })
        .map(Json)
}

/// Remove a participant from an event.
///
/// Participants who paid for an expense cannot be removed until the expense is deleted.
pub async fn delete_participant_endpoint(
    State(state): State<ParticipantState>,
    Path((event_id, participant_id)): Path<(EventId, ParticipantId)>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_participant(event_id, participant_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod participant_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        event::Event,
        participant::Participant,
        test_utils::get_test_server,
    };

    async fn create_test_event(server: &TestServer) -> Event {
        server
            .post(endpoints::EVENTS)
            .json(&json!({ "name": "Dinner" }))
            .await
            .json::<Event>()
    }

    #[tokio::test]
    async fn add_participant_responds_with_participant() {
        let server = get_test_server();
        let event = create_test_event(&server).await;

        let response = server
            .post(&format_endpoint(endpoints::PARTICIPANTS, &[event.id]))
            .json(&json!({ "name": "Alice" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let participant = response.json::<Participant>();
        assert_eq!(participant.event_id, event.id);
        assert_eq!(participant.name.as_ref(), "Alice");
    }

    #[tokio::test]
    async fn add_participant_to_missing_event_is_not_found() {
        let server = get_test_server();

        server
            .post(&format_endpoint(endpoints::PARTICIPANTS, &[404]))
            .json(&json!({ "name": "Alice" }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn add_duplicate_participant_is_conflict() {
        let server = get_test_server();
        let event = create_test_event(&server).await;
        let participants_endpoint = format_endpoint(endpoints::PARTICIPANTS, &[event.id]);
        server
            .post(&participants_endpoint)
            .json(&json!({ "name": "Alice" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(&participants_endpoint)
            .json(&json!({ "name": "Alice " }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body = response.json::<Value>();
        assert_eq!(
            body["error"],
            "the participant \"Alice\" already exists in this event"
        );
    }

    #[tokio::test]
    async fn list_participants_returns_roster() {
        let server = get_test_server();
        let event = create_test_event(&server).await;
        let participants_endpoint = format_endpoint(endpoints::PARTICIPANTS, &[event.id]);
        for name in ["Alice", "Bob"] {
            server
                .post(&participants_endpoint)
                .json(&json!({ "name": name }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let roster = server
            .get(&participants_endpoint)
            .await
            .json::<Vec<Participant>>();

        let names: Vec<&str> = roster.iter().map(|p| p.name.as_ref()).collect();
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[tokio::test]
    async fn participant_who_paid_cannot_be_removed() {
        let server = get_test_server();
        let event = create_test_event(&server).await;
        let participant = server
            .post(&format_endpoint(endpoints::PARTICIPANTS, &[event.id]))
            .json(&json!({ "name": "Alice" }))
            .await
            .json::<Participant>();
        server
            .post(&format_endpoint(endpoints::EXPENSES, &[event.id]))
            .json(&json!({ "description": "Pizza", "amount": 30.0, "paid_by": "Alice" }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .delete(&format_endpoint(
                endpoints::PARTICIPANT,
                &[event.id, participant.id],
            ))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn remove_participant_succeeds() {
        let server = get_test_server();
        let event = create_test_event(&server).await;
        let participant = server
            .post(&format_endpoint(endpoints::PARTICIPANTS, &[event.id]))
            .json(&json!({ "name": "Alice" }))
            .await
            .json::<Participant>();
        let participant_endpoint =
            format_endpoint(endpoints::PARTICIPANT, &[event.id, participant.id]);

        server
            .delete(&participant_endpoint)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .delete(&participant_endpoint)
            .await
            .assert_status_not_found();
    }
}
