//! Subject profile and flyer loading.
//!
//! The subject's own profile is required for a report; flyers are
//! best-effort decoration.

use crate::backend::ContractorStore;
use crate::models::{ContractorProfile, FlyerCard};
use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, warn};

/// Fetch the subject contractor's profile.
///
/// Unlike review aggregation, absence of the subject profile is a hard
/// error: without it there is nothing to report on.
pub async fn load_contractor(
    store: &dyn ContractorStore,
    contractor_id: &str,
) -> Result<ContractorProfile> {
    let profile = store
        .get_contractor(contractor_id)
        .await
        .with_context(|| format!("Failed to fetch contractor {}", contractor_id))?
        .ok_or_else(|| anyhow!("Contractor profile not found: {}", contractor_id))?;

    info!("Loaded profile for {} ({})", profile.name, contractor_id);
    Ok(profile)
}

/// Fetch the contractor's posted flyers.
///
/// Best-effort: a failed fetch logs a warning and yields an empty list,
/// so the flyer section simply renders empty.
pub async fn load_flyers(store: &dyn ContractorStore, contractor_id: &str) -> Vec<FlyerCard> {
    match store.list_flyers(contractor_id).await {
        Ok(flyers) => {
            debug!("Fetched {} flyers for {}", flyers.len(), contractor_id);
            flyers
        }
        Err(e) => {
            warn!("Failed to fetch flyers for {}: {}", contractor_id, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, BackendResult};
    use async_trait::async_trait;

    struct MockStore {
        contractor: Option<ContractorProfile>,
        flyers: Vec<FlyerCard>,
        fail: bool,
    }

    impl MockStore {
        fn empty() -> Self {
            Self {
                contractor: None,
                flyers: Vec::new(),
                fail: false,
            }
        }

        fn with_contractor(name: &str) -> Self {
            Self {
                contractor: Some(ContractorProfile {
                    id: "c1".to_string(),
                    name: name.to_string(),
                    role: "contractor".to_string(),
                    city: "Camarillo".to_string(),
                    bio: "Experienced contractor.".to_string(),
                    rating: 4.5,
                    image_url: None,
                }),
                flyers: Vec::new(),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl ContractorStore for MockStore {
        async fn get_contractor(&self, _id: &str) -> BackendResult<Option<ContractorProfile>> {
            if self.fail {
                return Err(BackendError::Timeout { seconds: 30 });
            }
            Ok(self.contractor.clone())
        }

        async fn list_flyers(&self, _contractor_id: &str) -> BackendResult<Vec<FlyerCard>> {
            if self.fail {
                return Err(BackendError::Timeout { seconds: 30 });
            }
            Ok(self.flyers.clone())
        }
    }

    #[tokio::test]
    async fn test_load_contractor_found() {
        let store = MockStore::with_contractor("John Doe");
        let profile = load_contractor(&store, "c1").await.unwrap();
        assert_eq!(profile.name, "John Doe");
    }

    #[tokio::test]
    async fn test_load_contractor_missing_is_error() {
        let store = MockStore::empty();
        let result = load_contractor(&store, "c1").await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_load_contractor_backend_failure_is_error() {
        let mut store = MockStore::with_contractor("John Doe");
        store.fail = true;
        assert!(load_contractor(&store, "c1").await.is_err());
    }

    #[tokio::test]
    async fn test_load_flyers_failure_yields_empty() {
        let mut store = MockStore::with_contractor("John Doe");
        store.fail = true;
        let flyers = load_flyers(&store, "c1").await;
        assert!(flyers.is_empty());
    }

    #[tokio::test]
    async fn test_load_flyers_passes_through() {
        let mut store = MockStore::with_contractor("John Doe");
        store.flyers.push(FlyerCard {
            contractor_name: "John Doe".to_string(),
            city: "Camarillo".to_string(),
            email: "johndoe@example.com".to_string(),
            skills: vec!["Renovation".to_string()],
            image_url: None,
        });

        let flyers = load_flyers(&store, "c1").await;
        assert_eq!(flyers.len(), 1);
        assert_eq!(flyers[0].contractor_name, "John Doe");
    }
}
