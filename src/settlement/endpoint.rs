//! The JSON endpoint that settles an event.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    event::EventId,
    settlement::{Settlement, compute_settlement, get_event_snapshot},
};

/// The state needed for the settlement endpoint.
#[derive(Debug, Clone)]
pub struct SettlementState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SettlementState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Compute the balances of an event and the transfers that settle them.
///
/// Responds with 400 Bad Request if the event has no participants.
pub async fn get_settlement_endpoint(
    State(state): State<SettlementState>,
    Path(event_id): Path<EventId>,
) -> Result<Json<Settlement>, Error> {
    let snapshot = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_event_snapshot(event_id, &connection)?
    };

    compute_settlement(&snapshot.roster, &snapshot.records)
        .inspect_err(|error| tracing::info!("Could not settle event {event_id}: {error}"))
        .map(Json)
}
