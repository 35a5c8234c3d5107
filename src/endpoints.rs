//! The API endpoints URIs.
//!
//! Endpoints that take parameters, e.g., '/api/events/{event_id}', are filled in
//! with `format_endpoint` in tests.

/// The route to list and create events.
pub const EVENTS: &str = "/api/events";
/// The route to access a single event.
pub const EVENT: &str = "/api/events/{event_id}";
/// The route to list and add the participants of an event.
pub const PARTICIPANTS: &str = "/api/events/{event_id}/participants";
/// The route to remove a participant from an event.
pub const PARTICIPANT: &str = "/api/events/{event_id}/participants/{participant_id}";
/// The route to list and record the expenses of an event.
pub const EXPENSES: &str = "/api/events/{event_id}/expenses";
/// The route to access a single expense of an event.
pub const EXPENSE: &str = "/api/events/{event_id}/expenses/{expense_id}";
/// The route to settle an event.
pub const SETTLEMENT: &str = "/api/events/{event_id}/settlement";

/// Replace the parameters in `endpoint_path` with `ids`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/events/{event_id}', '{event_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters.
///
/// Parameters without a matching ID are left as is, and extra IDs are ignored.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, ids: &[i64]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut remaining = endpoint_path;
    let mut ids = ids.iter();

    while let Some(param_start) = remaining.find('{') {
        let Some(param_length) = remaining[param_start..].find('}') else {
            break;
        };
        let param_end = param_start + param_length + 1;

        formatted.push_str(&remaining[..param_start]);

        match ids.next() {
            Some(id) => formatted.push_str(&id.to_string()),
            None => formatted.push_str(&remaining[param_start..param_end]),
        }

        remaining = &remaining[param_end..];
    }

    formatted.push_str(remaining);
    formatted
}
