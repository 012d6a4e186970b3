//! Data models for the profile report generator.
//!
//! This module contains the core data structures used throughout the
//! application for representing engagements, reviews, and reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name substituted when a reviewer's profile cannot be resolved.
pub const FALLBACK_REVIEWER_NAME: &str = "Anonymous";

/// Lifecycle status of an engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementStatus {
    /// Posted but not yet accepted by the contractor.
    Pending,
    /// Accepted and in progress.
    Accepted,
    /// Work finished; the engagement may carry feedback.
    Completed,
    /// Declined by either party.
    Declined,
}

impl EngagementStatus {
    /// Returns the wire representation used in backend query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngagementStatus::Pending => "pending",
            EngagementStatus::Accepted => "accepted",
            EngagementStatus::Completed => "completed",
            EngagementStatus::Declined => "declined",
        }
    }
}

impl fmt::Display for EngagementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A work arrangement between a contractor (the subject) and a homeowner
/// (the counterparty), as returned by the engagement query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Engagement {
    /// Backend document identifier.
    pub id: String,
    /// The contractor this engagement belongs to.
    pub contractor_id: String,
    /// The homeowner on the other side of the engagement.
    pub homeowner_id: String,
    /// Free-text feedback left by the homeowner. May be empty.
    pub feedback_text: String,
    /// Numeric rating left by the homeowner.
    pub rating: f64,
}

impl Engagement {
    /// Whether the engagement carries free-text feedback.
    pub fn has_feedback(&self) -> bool {
        !self.feedback_text.is_empty()
    }
}

/// Display profile for a counterparty, resolved by identifier lookup.
///
/// Fetched fresh per aggregation call; never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Name shown next to the review.
    pub display_name: String,
    /// Profile image reference, when one is set.
    pub image_url: Option<String>,
}

/// A single customer review, ready for display.
///
/// Immutable once constructed: the rating is clamped to [0, 5] and the body
/// text is non-empty by construction (engagements without feedback are
/// excluded upstream).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Identifier of the source engagement document.
    pub id: String,
    /// The contractor being reviewed.
    pub contractor_id: String,
    /// Resolved reviewer display name, or [`FALLBACK_REVIEWER_NAME`].
    pub reviewer_name: String,
    /// Rating in [0, 5].
    pub rating: f64,
    /// Review body text.
    pub text: String,
    /// Reviewer profile image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_image_url: Option<String>,
}

impl ReviewRecord {
    /// Build a review from an engagement and its resolved counterparty
    /// profile. A missing profile falls back to [`FALLBACK_REVIEWER_NAME`]
    /// and no image.
    pub fn from_engagement(engagement: Engagement, profile: Option<ProfileSummary>) -> Self {
        let (reviewer_name, reviewer_image_url) = match profile {
            Some(profile) => (profile.display_name, profile.image_url),
            None => (FALLBACK_REVIEWER_NAME.to_string(), None),
        };

        Self {
            id: engagement.id,
            contractor_id: engagement.contractor_id,
            reviewer_name,
            rating: engagement.rating.clamp(0.0, 5.0),
            text: engagement.feedback_text,
            reviewer_image_url,
        }
    }

    /// Number of filled stars in a five-star row (truncated, 0-5).
    pub fn filled_stars(&self) -> usize {
        self.rating as usize
    }
}

/// The subject contractor's own profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractorProfile {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role label (e.g. "contractor").
    pub role: String,
    /// Service city.
    pub city: String,
    /// Biography text.
    pub bio: String,
    /// Overall rating stored on the profile document.
    pub rating: f64,
    /// Profile image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ContractorProfile {
    /// The "Role | City" line shown under the profile name.
    pub fn headline(&self) -> String {
        format!("{} | {}", capitalize(&self.role), self.city)
    }
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// A flyer posted by the contractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlyerCard {
    /// Name shown on the flyer.
    pub contractor_name: String,
    /// Service area.
    pub city: String,
    /// Contact email.
    pub email: String,
    /// Advertised skills.
    pub skills: Vec<String>,
    /// Flyer image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FlyerCard {
    /// Comma-separated skills line.
    pub fn skills_line(&self) -> String {
        self.skills.join(", ")
    }
}

/// Summary of aggregated review ratings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Total number of reviews.
    pub total: usize,
    /// Mean rating across all reviews, 0.0 when there are none.
    pub average: f64,
    /// Number of five-star reviews.
    pub five_star: usize,
    /// Number of four-star reviews.
    pub four_star: usize,
    /// Number of three-star reviews.
    pub three_star: usize,
    /// Number of two-star reviews.
    pub two_star: usize,
    /// Number of one-star reviews.
    pub one_star: usize,
    /// Number of reviews below one star.
    pub zero_star: usize,
}

impl RatingSummary {
    /// Creates a summary from a list of reviews.
    pub fn from_reviews(reviews: &[ReviewRecord]) -> Self {
        let mut summary = Self {
            total: reviews.len(),
            ..Self::default()
        };

        let mut rating_sum = 0.0;
        for review in reviews {
            rating_sum += review.rating;
            match review.filled_stars() {
                5 => summary.five_star += 1,
                4 => summary.four_star += 1,
                3 => summary.three_star += 1,
                2 => summary.two_star += 1,
                1 => summary.one_star += 1,
                _ => summary.zero_star += 1,
            }
        }

        if !reviews.is_empty() {
            summary.average = rating_sum / reviews.len() as f64;
        }

        summary
    }
}

/// Metadata about the profile report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Identifier of the contractor the report covers.
    pub contractor_id: String,
    /// Backend the data was fetched from.
    pub backend_url: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Number of reviews in the report.
    pub reviews_total: usize,
    /// Number of flyers in the report.
    pub flyers_total: usize,
    /// Time taken to assemble the report, in seconds.
    pub duration_seconds: f64,
}

/// The complete contractor profile report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    /// Metadata about the report.
    pub metadata: ReportMetadata,
    /// The subject contractor's profile.
    pub contractor: ContractorProfile,
    /// Rating statistics computed from the aggregated reviews.
    pub rating: RatingSummary,
    /// Aggregated reviews, in engagement query order.
    pub reviews: Vec<ReviewRecord>,
    /// The contractor's posted flyers.
    pub flyers: Vec<FlyerCard>,
}
