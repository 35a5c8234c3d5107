//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The input to a settlement computation violated one of its
    /// preconditions, e.g. an empty roster or a negative amount, or a request
    /// body could not be parsed, e.g. a string where a number was expected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request body could not be read from the connection.
    #[error("could not read the request body")]
    UnreadableBody,

    /// An empty string was used to create an event name.
    #[error("Event name cannot be empty")]
    EmptyEventName,

    /// An empty string was used to create a participant name.
    #[error("Participant name cannot be empty")]
    EmptyParticipantName,

    /// An empty string was used as an expense description.
    #[error("Expense description cannot be empty")]
    EmptyDescription,

    /// An expense amount was negative, NaN, infinite or above
    /// [MAX_AMOUNT](crate::settlement::MAX_AMOUNT).
    #[error("amounts must be a number from 0 to {max}", max = crate::settlement::MAX_AMOUNT)]
    InvalidAmount(f64),

    /// The payer of an expense is not on the event's roster.
    #[error("\"{0}\" is not a participant of this event")]
    UnknownPayer(String),

    /// The participant name is already on the event's roster.
    #[error("the participant \"{0}\" already exists in this event")]
    DuplicateParticipant(String),

    /// Tried to remove a participant who paid for at least one expense.
    ///
    /// The expenses have to be deleted or reassigned first, otherwise the
    /// event would no longer settle.
    #[error("the participant has paid for expenses and cannot be removed")]
    ParticipantHasExpenses,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete an event that does not exist
    #[error("tried to delete an event that is not in the database")]
    DeleteMissingEvent,

    /// Tried to delete a participant that does not exist
    #[error("tried to delete a participant that is not in the database")]
    DeleteMissingParticipant,

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidInput(_)
            | Error::EmptyEventName
            | Error::EmptyParticipantName
            | Error::EmptyDescription
            | Error::InvalidAmount(_)
            | Error::UnknownPayer(_)
            | Error::UnreadableBody => StatusCode::BAD_REQUEST,
            Error::DuplicateParticipant(_) | Error::ParticipantHasExpenses => StatusCode::CONFLICT,
            Error::NotFound
            | Error::DeleteMissingEvent
            | Error::DeleteMissingParticipant
            | Error::UpdateMissingExpense
            | Error::DeleteMissingExpense => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
