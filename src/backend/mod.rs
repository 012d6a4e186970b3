//! Backend service interfaces.
//!
//! The marketplace backend (document store, profile directory) is an
//! external managed service consumed strictly read-only. This module defines
//! the traits the rest of the application depends on; callers receive them
//! as explicit parameters rather than ambient shared state.

use crate::models::{ContractorProfile, Engagement, EngagementStatus, FlyerCard, ProfileSummary};
use async_trait::async_trait;
use thiserror::Error;

pub mod http;

pub use http::{HttpBackend, HttpBackendConfig};

/// Errors surfaced by backend lookups.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The backend could not be reached.
    #[error("cannot connect to backend at {url}")]
    Connect { url: String },

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded.
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// Any other transport failure.
    #[error("request failed: {0}")]
    Transport(String),
}

/// Convenience alias for backend call results.
pub type BackendResult<T> = Result<T, BackendError>;

/// Filter for the engagement query.
#[derive(Debug, Clone)]
pub struct EngagementFilter {
    /// The contractor whose engagements are requested.
    pub contractor_id: String,
    /// Only engagements in this status are returned.
    pub status: EngagementStatus,
}

impl EngagementFilter {
    /// Completed engagements for the given contractor.
    pub fn completed_for(contractor_id: &str) -> Self {
        Self {
            contractor_id: contractor_id.to_string(),
            status: EngagementStatus::Completed,
        }
    }
}

/// Read access to engagement documents.
#[async_trait]
pub trait EngagementStore: Send + Sync {
    /// Query engagements matching the filter.
    async fn query_engagements(&self, filter: &EngagementFilter) -> BackendResult<Vec<Engagement>>;
}

/// Identifier lookup of counterparty display profiles.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Resolve a counterparty's display profile.
    ///
    /// Returns `Ok(None)` when no profile exists for the identifier.
    async fn get_profile(&self, id: &str) -> BackendResult<Option<ProfileSummary>>;
}

/// Read access to contractor profiles and their flyers.
#[async_trait]
pub trait ContractorStore: Send + Sync {
    /// Fetch a contractor's own profile.
    ///
    /// Returns `Ok(None)` when no profile exists for the identifier.
    async fn get_contractor(&self, id: &str) -> BackendResult<Option<ContractorProfile>>;

    /// List the flyers a contractor has posted.
    async fn list_flyers(&self, contractor_id: &str) -> BackendResult<Vec<FlyerCard>>;
}
