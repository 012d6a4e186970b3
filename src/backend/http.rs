//! HTTP implementation of the backend interfaces.
//!
//! Talks to the marketplace backend's REST surface. Document field names
//! follow the backend's camelCase storage schema.

use crate::backend::{
    BackendError, BackendResult, ContractorStore, EngagementFilter, EngagementStore,
    ProfileDirectory,
};
use crate::models::{ContractorProfile, Engagement, FlyerCard, ProfileSummary};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP backend client.
#[derive(Debug, Clone)]
pub struct HttpBackendConfig {
    /// Base URL of the backend, e.g. `http://localhost:8080`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for HttpBackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Client for the marketplace backend REST API.
pub struct HttpBackend {
    config: HttpBackendConfig,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a client with the given configuration.
    pub fn new(config: HttpBackendConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn map_send_error(&self, e: reqwest::Error) -> BackendError {
        if e.is_timeout() {
            BackendError::Timeout {
                seconds: self.config.timeout_seconds,
            }
        } else if e.is_connect() {
            BackendError::Connect {
                url: self.config.base_url.clone(),
            }
        } else {
            BackendError::Transport(e.to_string())
        }
    }

    /// Send a GET request and decode the JSON body.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> BackendResult<T> {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }

    /// Send a GET request for a single document; 404 maps to `Ok(None)`.
    async fn fetch_optional_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> BackendResult<Option<T>> {
        let response = request.send().await.map_err(|e| self.map_send_error(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Engagement document as stored by the backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EngagementDoc {
    id: String,
    contractor_id: String,
    #[serde(default)]
    homeowner_id: Option<String>,
    #[serde(default)]
    review: Option<String>,
    #[serde(default)]
    job_rating: Option<f64>,
}

impl From<EngagementDoc> for Engagement {
    fn from(doc: EngagementDoc) -> Self {
        Self {
            id: doc.id,
            contractor_id: doc.contractor_id,
            homeowner_id: doc.homeowner_id.unwrap_or_else(|| "Unknown".to_string()),
            feedback_text: doc.review.unwrap_or_default(),
            rating: doc.job_rating.unwrap_or(0.0),
        }
    }
}

/// Homeowner display profile document.
#[derive(Debug, Deserialize)]
struct ProfileDoc {
    #[serde(rename = "homeownerName")]
    homeowner_name: String,
    #[serde(default, rename = "imageURL")]
    image_url: Option<String>,
}

impl From<ProfileDoc> for ProfileSummary {
    fn from(doc: ProfileDoc) -> Self {
        Self {
            display_name: doc.homeowner_name,
            image_url: doc.image_url,
        }
    }
}

/// Contractor user document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContractorDoc {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default, rename = "profilePictureURL")]
    profile_picture_url: Option<String>,
}

impl From<ContractorDoc> for ContractorProfile {
    fn from(doc: ContractorDoc) -> Self {
        Self {
            id: doc.id,
            name: doc.name.unwrap_or_else(|| "Unknown".to_string()),
            role: doc.role.unwrap_or_else(|| "Contractor".to_string()),
            city: doc.city.unwrap_or_else(|| "Unknown".to_string()),
            bio: doc.bio.unwrap_or_else(|| "No bio available.".to_string()),
            rating: doc.rating.unwrap_or(0.0),
            image_url: doc.profile_picture_url,
        }
    }
}

/// Flyer document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlyerDoc {
    contractor_name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default, rename = "imageURL")]
    image_url: Option<String>,
}

impl From<FlyerDoc> for FlyerCard {
    fn from(doc: FlyerDoc) -> Self {
        Self {
            contractor_name: doc.contractor_name,
            city: doc.city,
            email: doc.email,
            skills: doc.skills,
            image_url: doc.image_url,
        }
    }
}

#[async_trait]
impl EngagementStore for HttpBackend {
    async fn query_engagements(&self, filter: &EngagementFilter) -> BackendResult<Vec<Engagement>> {
        let url = self.url("/v1/engagements");
        debug!(
            "Querying engagements for {} with status {}",
            filter.contractor_id, filter.status
        );

        let request = self.http_client.get(&url).query(&[
            ("contractor", filter.contractor_id.as_str()),
            ("status", filter.status.as_str()),
        ]);

        let docs: Vec<EngagementDoc> = self.fetch_json(request).await?;
        Ok(docs.into_iter().map(Engagement::from).collect())
    }
}

#[async_trait]
impl ProfileDirectory for HttpBackend {
    async fn get_profile(&self, id: &str) -> BackendResult<Option<ProfileSummary>> {
        let url = self.url(&format!("/v1/profiles/{}", id));
        debug!("Resolving profile {}", id);

        let doc: Option<ProfileDoc> = self
            .fetch_optional_json(self.http_client.get(&url))
            .await?;
        Ok(doc.map(ProfileSummary::from))
    }
}

#[async_trait]
impl ContractorStore for HttpBackend {
    async fn get_contractor(&self, id: &str) -> BackendResult<Option<ContractorProfile>> {
        let url = self.url(&format!("/v1/contractors/{}", id));
        debug!("Fetching contractor {}", id);

        let doc: Option<ContractorDoc> = self
            .fetch_optional_json(self.http_client.get(&url))
            .await?;
        Ok(doc.map(ContractorProfile::from))
    }

    async fn list_flyers(&self, contractor_id: &str) -> BackendResult<Vec<FlyerCard>> {
        let url = self.url(&format!("/v1/contractors/{}/flyers", contractor_id));
        debug!("Fetching flyers for {}", contractor_id);

        let docs: Vec<FlyerDoc> = self.fetch_json(self.http_client.get(&url)).await?;
        Ok(docs.into_iter().map(FlyerCard::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let backend = HttpBackend::new(HttpBackendConfig {
            base_url: "http://localhost:8080/".to_string(),
            timeout_seconds: 30,
        });
        assert_eq!(
            backend.url("/v1/profiles/h1"),
            "http://localhost:8080/v1/profiles/h1"
        );
    }

    #[test]
    fn test_engagement_doc_defaults() {
        let json = r#"{"id": "e1", "contractorId": "c1"}"#;
        let doc: EngagementDoc = serde_json::from_str(json).unwrap();
        let engagement = Engagement::from(doc);

        assert_eq!(engagement.homeowner_id, "Unknown");
        assert_eq!(engagement.feedback_text, "");
        assert_eq!(engagement.rating, 0.0);
        assert!(!engagement.has_feedback());
    }

    #[test]
    fn test_engagement_doc_full() {
        let json = r#"{
            "id": "e1",
            "contractorId": "c1",
            "homeownerId": "h1",
            "review": "Great work",
            "jobRating": 4.5
        }"#;
        let doc: EngagementDoc = serde_json::from_str(json).unwrap();
        let engagement = Engagement::from(doc);

        assert_eq!(engagement.homeowner_id, "h1");
        assert_eq!(engagement.feedback_text, "Great work");
        assert_eq!(engagement.rating, 4.5);
    }

    #[test]
    fn test_profile_doc_decoding() {
        let json = r#"{"homeownerName": "Jane Doe", "imageURL": "https://example.com/j.jpg"}"#;
        let doc: ProfileDoc = serde_json::from_str(json).unwrap();
        let profile = ProfileSummary::from(doc);

        assert_eq!(profile.display_name, "Jane Doe");
        assert_eq!(profile.image_url.as_deref(), Some("https://example.com/j.jpg"));
    }

    #[test]
    fn test_profile_doc_without_image() {
        let json = r#"{"homeownerName": "Jane Doe"}"#;
        let doc: ProfileDoc = serde_json::from_str(json).unwrap();
        let profile = ProfileSummary::from(doc);

        assert!(profile.image_url.is_none());
    }

    #[test]
    fn test_contractor_doc_defaults() {
        let json = r#"{"id": "c1"}"#;
        let doc: ContractorDoc = serde_json::from_str(json).unwrap();
        let profile = ContractorProfile::from(doc);

        assert_eq!(profile.name, "Unknown");
        assert_eq!(profile.role, "Contractor");
        assert_eq!(profile.city, "Unknown");
        assert_eq!(profile.bio, "No bio available.");
        assert_eq!(profile.rating, 0.0);
        assert!(profile.image_url.is_none());
    }

    #[test]
    fn test_contractor_doc_full() {
        let json = r#"{
            "id": "c1",
            "name": "John Doe",
            "role": "contractor",
            "city": "Camarillo",
            "bio": "Experienced contractor.",
            "rating": 4.5,
            "profilePictureURL": "https://example.com/c.jpg"
        }"#;
        let doc: ContractorDoc = serde_json::from_str(json).unwrap();
        let profile = ContractorProfile::from(doc);

        assert_eq!(profile.name, "John Doe");
        assert_eq!(profile.headline(), "Contractor | Camarillo");
        assert_eq!(profile.image_url.as_deref(), Some("https://example.com/c.jpg"));
    }

    #[test]
    fn test_flyer_doc_decoding() {
        let json = r#"{
            "contractorName": "John Doe",
            "city": "Camarillo",
            "email": "johndoe@example.com",
            "skills": ["Renovation", "Painting"],
            "imageURL": "https://example.com/f.jpg"
        }"#;
        let doc: FlyerDoc = serde_json::from_str(json).unwrap();
        let flyer = FlyerCard::from(doc);

        assert_eq!(flyer.contractor_name, "John Doe");
        assert_eq!(flyer.skills_line(), "Renovation, Painting");
    }
}
