//! JSON endpoints for recording and editing the expenses of an event.

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
    expense::{
        Expense, ExpenseForm, ExpenseId, NewExpense, create_expense, delete_expense, get_expense,
        get_expenses, update_expense,
    },
    extractors::extract_json,
};

/// The state needed for the expense endpoints.
#[derive(Debug, Clone)]
pub struct ExpenseState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Record an expense, responds with the expense and 201 Created.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(event_id): Path<EventId>,
    form: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<Response, Error> {
    let form = extract_json(form)?;
    let new_expense = NewExpense::new(&form)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_event(event_id, &connection)?;
    let expense = create_expense(event_id, new_expense, &connection)?;

    Ok((StatusCode::CREATED, Json(expense)).into_response())
}

/// List the expenses of an event.
pub async fn get_expenses_endpoint(
    State(state): State<ExpenseState>,
    Path(event_id): Path<EventId>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_event(event_id, &connection)?;

    get_expenses(event_id, &connection)
        .inspect_err(|error| {
            tracing::error!("Failed to retrieve expenses of event {event_id}: {error}")
        })
        .map(Json)
}

/// Get a single expense of an event.
pub async fn get_expense_endpoint(
    State(state): State<ExpenseState>,
    Path((event_id, expense_id)): Path<(EventId, ExpenseId)>,
) -> Result<Json<Expense>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_expense(event_id, expense_id, &connection).map(Json)
}

/// Replace the details of an expense, responds with the updated expense.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseState>,
    Path((event_id, expense_id)): Path<(EventId, ExpenseId)>,
    form: Result<Json<ExpenseForm>, JsonRejection>,
) -> Result<Json<Expense>, Error> {
    let form = extract_json(form)?;
    let new_expense = NewExpense::new(&form)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_event(event_id, &connection)?;

    update_expense(event_id, expense_id, new_expense, &connection).map(Json)
}

/// Delete an expense of an event.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    Path((event_id, expense_id)): Path<(EventId, ExpenseId)>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_expense(event_id, expense_id, &connection)?;

    Ok(StatusCode::NO_CONTENT)
}
