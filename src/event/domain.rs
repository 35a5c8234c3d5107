//! Core event domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A validated, non-empty event name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct EventName(String);

impl EventName {
    /// Create an event name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyEventName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyEventName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create an event name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for EventName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::new(s)
    }
}

impl Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for an event.
pub type EventId = i64;

/// An occasion whose costs are split between its participants, e.g. 'Ski trip'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Event {
    /// The ID of the event.
    pub id: EventId,
    /// The name of the event.
    pub name: EventName,
}

/// Request body for creating an event.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventForm {
    /// The name of the new event.
    pub name: String,
}
