//! JSON endpoints for creating, listing, fetching and deleting events.

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
    event::{
        Event, EventForm, EventId, EventName, create_event, delete_event, get_all_events,
        get_event,
    },
    extractors::extract_json,
};

/// The state needed for the event endpoints.
#[derive(Debug, Clone)]
pub struct EventState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EventState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle event creation, responds with the new event and 201 Created.
pub async fn create_event_endpoint(
    State(state): State<EventState>,
    form: Result<Json<EventForm>, JsonRejection>,
) -> Result<Response, Error> {
    let form = extract_json(form)?;
    let name = EventName::new(&form.name)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let event = create_event(name, &connection)
        .inspect_err(|error| tracing::error!("Could not create event with {form:?}: {error}"))?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

/// List all events, oldest first.
pub async fn get_events_endpoint(
    State(state): State<EventState>,
) -> Result<Json<Vec<Event>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_all_events(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve events: {error}"))
        .map(Json)
}

/// Get a single event, responds with 404 if it does not exist.
pub async fn get_event_endpoint(
    State(state): State<EventState>,
    Path(event_id): Path<EventId>,
) -> Result<Json<Event>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_event(event_id, &connection).map(Json)
}

/// Delete an event and everything recorded against it.
pub async fn delete_event_endpoint(
    State(state): State<EventState>,
    Path(event_id): Path<EventId>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_event(event_id, &connection)?;
    tracing::info!("Deleted event {event_id}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod event_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        event::{Event, EventName},
        test_utils::get_test_server,
    };

    #[tokio::test]
    async fn create_event_responds_with_created_event() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EVENTS)
            .json(&json!({ "name": " Ski trip " }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let event = response.json::<Event>();
        assert!(event.id > 0);
        assert_eq!(event.name, EventName::new_unchecked("Ski trip"));
    }

    #[tokio::test]
    async fn create_event_with_malformed_body_is_json_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EVENTS)
            .json(&json!({ "name": 42 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn create_event_with_empty_name_is_bad_request() {
        let server = get_test_server();

        let response = server
            .post(endpoints::EVENTS)
            .json(&json!({ "name": "   " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "Event name cannot be empty");
    }

    #[tokio::test]
    async fn list_events_returns_created_events() {
        let server = get_test_server();
        for name in ["Dinner", "Road trip"] {
            server
                .post(endpoints::EVENTS)
                .json(&json!({ "name": name }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let events = server.get(endpoints::EVENTS).await.json::<Vec<Event>>();

        let names: Vec<&str> = events.iter().map(|event| event.name.as_ref()).collect();
        assert_eq!(names, vec!["Dinner", "Road trip"]);
    }

    #[tokio::test]
    async fn get_missing_event_is_not_found() {
        let server = get_test_server();

        server
            .get(&format_endpoint(endpoints::EVENT, &[42]))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_event_removes_it() {
        let server = get_test_server();
        let event = server
            .post(endpoints::EVENTS)
            .json(&json!({ "name": "Dinner" }))
            .await
            .json::<Event>();
        let event_endpoint = format_endpoint(endpoints::EVENT, &[event.id]);

        server
            .delete(&event_endpoint)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server.get(&event_endpoint).await.assert_status_not_found();
        server.delete(&event_endpoint).await.assert_status_not_found();
    }
}
