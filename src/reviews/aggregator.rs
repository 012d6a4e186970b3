//! Review aggregation over the backend read interfaces.
//!
//! Given a contractor identifier, queries completed engagements, drops
//! entries without free-text feedback, resolves each counterparty's display
//! profile concurrently, and joins on all lookups before delivering the
//! final list.

use crate::backend::{EngagementFilter, EngagementStore, ProfileDirectory};
use crate::models::{Engagement, ReviewRecord};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Assembles a contractor's review list from the backend.
///
/// Holds its backend dependencies explicitly; construct one per screen or
/// command invocation. All operations are read-only.
pub struct ReviewAggregator {
    store: Arc<dyn EngagementStore>,
    directory: Arc<dyn ProfileDirectory>,
}

impl ReviewAggregator {
    /// Create an aggregator over the given backend interfaces.
    pub fn new(store: Arc<dyn EngagementStore>, directory: Arc<dyn ProfileDirectory>) -> Self {
        Self { store, directory }
    }

    /// Aggregate display-ready reviews for the given contractor.
    ///
    /// Queries completed engagements for the contractor, skips those without
    /// feedback text, and resolves every reviewer profile concurrently. The
    /// returned list follows engagement query order and is only delivered
    /// once every profile lookup has completed.
    ///
    /// Failure of the engagement query is logged and yields an empty list;
    /// failure of an individual profile lookup falls back to the anonymous
    /// reviewer and never aborts the aggregation.
    pub async fn aggregate(&self, contractor_id: &str) -> Vec<ReviewRecord> {
        let filter = EngagementFilter::completed_for(contractor_id);

        let engagements = match self.store.query_engagements(&filter).await {
            Ok(engagements) => engagements,
            Err(e) => {
                warn!("Failed to fetch engagements for {}: {}", contractor_id, e);
                return Vec::new();
            }
        };

        debug!(
            "Fetched {} completed engagements for {}",
            engagements.len(),
            contractor_id
        );

        let lookups = engagements
            .into_iter()
            .filter(Engagement::has_feedback)
            .map(|engagement| self.resolve(engagement));

        let reviews = join_all(lookups).await;
        debug!("Aggregated {} reviews for {}", reviews.len(), contractor_id);

        reviews
    }

    /// Resolve one engagement into a review, swallowing lookup failures.
    async fn resolve(&self, engagement: Engagement) -> ReviewRecord {
        let profile = match self.directory.get_profile(&engagement.homeowner_id).await {
            Ok(profile) => profile,
            Err(e) => {
                debug!(
                    "Profile lookup failed for {}: {}",
                    engagement.homeowner_id, e
                );
                None
            }
        };

        ReviewRecord::from_engagement(engagement, profile)
    }
}
