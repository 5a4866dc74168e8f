//! Registration request entity - the admin approval queue

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Approval state of a registration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Registration request entity
///
/// Created on registration, resolved exactly once by an admin, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub status: RequestStatus,
}

impl RegistrationRequest {
    /// Create a pending request timestamped now
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        Self {
            id,
            username,
            email,
            timestamp: Utc::now(),
            status: RequestStatus::Pending,
        }
    }

    /// Check if this request is still awaiting a decision
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Transition pending -> approved
    pub fn approve(&mut self) -> Result<(), DomainError> {
        self.transition(RequestStatus::Approved)
    }

    /// Transition pending -> rejected
    pub fn reject(&mut self) -> Result<(), DomainError> {
        self.transition(RequestStatus::Rejected)
    }

    fn transition(&mut self, next: RequestStatus) -> Result<(), DomainError> {
        if !self.is_pending() {
            return Err(DomainError::RequestAlreadyResolved(self.id));
        }
        self.status = next;
        Ok(())
    }
}
