//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    event::{
        create_event_endpoint, delete_event_endpoint, get_event_endpoint, get_events_endpoint,
    },
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint,
        get_expenses_endpoint, update_expense_endpoint,
    },
    participant::{
        create_participant_endpoint, delete_participant_endpoint, get_participants_endpoint,
    },
    settlement::get_settlement_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EVENTS,
            get(get_events_endpoint).post(create_event_endpoint),
        )
        .route(
            endpoints::EVENT,
            get(get_event_endpoint).delete(delete_event_endpoint),
        )
        .route(
            endpoints::PARTICIPANTS,
            get(get_participants_endpoint).post(create_participant_endpoint),
        )
        .route(endpoints::PARTICIPANT, delete(delete_participant_endpoint))
        .route(
            endpoints::EXPENSES,
            get(get_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint)
                .put(update_expense_endpoint)
                .delete(delete_expense_endpoint),
        )
        .route(endpoints::SETTLEMENT, get(get_settlement_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "the requested route does not exist" })),
    )
        .into_response()
}

#[cfg(test)]
mod router_tests {
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::get_test_server,
    };

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/teapots").await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": "the requested route does not exist" })
        );
    }

    #[tokio::test]
    async fn wrong_method_is_not_allowed() {
        let server = get_test_server();

        server
            .put(&format_endpoint(endpoints::SETTLEMENT, &[1]))
            .await
            .assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
