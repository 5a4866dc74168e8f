//! Typed store for the `registration_requests` collection

use std::sync::Arc;
use tracing::instrument;

use modchat_core::entities::{RegistrationRequest, RequestStatus};
use modchat_core::gateway::{Collection, Gateway, Subscription, WriteOutcome};
use modchat_core::value_objects::Snowflake;

use super::{decode, decode_all, encode, StoreResult};

/// Registration request documents, keyed by request id
///
/// Resolved requests stay in the collection as the audit trail of past
/// decisions; only their status changes.
#[derive(Clone)]
pub struct RegistrationStore {
    gateway: Arc<dyn Gateway>,
}

impl RegistrationStore {
    /// Create a new RegistrationStore
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Insert or replace a request document
    #[instrument(skip(self, request), fields(request_id = %request.id, status = %request.status))]
    pub async fn save(&self, request: &RegistrationRequest) -> StoreResult<WriteOutcome> {
        let value = encode(request)?;
        Ok(self
            .gateway
            .put(Collection::RegistrationRequests, &request.id.to_string(), value)
            .await?)
    }

    /// Find a request by id
    pub async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<RegistrationRequest>> {
        match self
            .gateway
            .get(Collection::RegistrationRequests, &id.to_string())
            .await?
        {
            Some(value) => Ok(Some(decode(value)?)),
            None => Ok(None),
        }
    }

    /// All request documents
    pub async fn list(&self) -> StoreResult<Vec<RegistrationRequest>> {
        decode_all(self.gateway.list(Collection::RegistrationRequests).await?)
    }

    /// Unresolved requests, oldest first
    pub async fn pending(&self) -> StoreResult<Vec<RegistrationRequest>> {
        let mut pending: Vec<RegistrationRequest> = self
            .list()
            .await?
            .into_iter()
            .filter(RegistrationRequest::is_pending)
            .collect();
        pending.sort_by_key(|r| (r.timestamp, r.id));
        Ok(pending)
    }

    /// The request, pending or approved, currently holding this username
    ///
    /// Rejected requests do not reserve the name, so a rejected applicant can
    /// register again.
    pub async fn holder_of_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<RegistrationRequest>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|r| r.status != RequestStatus::Rejected && r.username == username))
    }

    /// The request, pending or approved, currently holding this email
    pub async fn holder_of_email(&self, email: &str) -> StoreResult<Option<RegistrationRequest>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|r| r.status != RequestStatus::Rejected && r.email == email))
    }

    /// The approved request for this username, if any
    pub async fn approved_for_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<RegistrationRequest>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|r| r.status == RequestStatus::Approved && r.username == username))
    }

    /// The pending request for this username, if any
    pub async fn pending_for_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<RegistrationRequest>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|r| r.is_pending() && r.username == username))
    }

    /// Subscribe to request document changes
    pub fn watch(&self) -> Subscription {
        self.gateway.subscribe(Collection::RegistrationRequests)
    }
}
