#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{AppState, build_router};

/// Create a test server backed by a fresh in-memory database.
pub(crate) fn get_test_server() -> TestServer {
    let connection = Connection::open_in_memory().expect("Could not open in-memory database.");
    let state = AppState::new(connection).expect("Could not create app state.");

    TestServer::try_new(build_router(state)).expect("Could not create test server.")
}
