//! Core participant domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, event::EventId};

/// A validated, non-empty participant name.
///
/// Names identify participants within an event, so two participants of the
/// same event cannot share a name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Create a participant name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyParticipantName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyParticipantName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a participant name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ParticipantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ParticipantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a participant.
pub type ParticipantId = i64;

/// A person on an event's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Participant {
    /// The ID of the participant.
    pub id: ParticipantId,
    /// The event whose roster the participant is on.
    pub event_id: EventId,
    /// The participant's name, unique within the event.
    pub name: ParticipantName,
}

/// Request body for adding a participant to an event.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParticipantForm {
    /// The name of the new participant.
    pub name: String,
}
