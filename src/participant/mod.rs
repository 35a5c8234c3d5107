//! Participants make up the roster of an event.

mod db;
mod domain;
mod endpoints;

pub use db::{
    create_participant, create_participant_table, delete_participant, get_participant_by_name,
    get_participants,
};
pub use domain::{Participant, ParticipantForm, ParticipantId, ParticipantName};
pub use endpoints::{
    create_participant_endpoint, delete_participant_endpoint, get_participants_endpoint,
};
