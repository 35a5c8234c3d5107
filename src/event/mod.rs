//! Events group a roster of participants and the expenses they share.

mod db;
mod domain;
mod endpoints;

pub use db::{create_event, create_event_table, delete_event, get_all_events, get_event};
pub use domain::{Event, EventForm, EventId, EventName};
pub use endpoints::{
    create_event_endpoint, delete_event_endpoint, get_event_endpoint, get_events_endpoint,
};
