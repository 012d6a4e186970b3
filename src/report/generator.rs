//! Markdown and JSON report generation.
//!
//! Renders a [`ProfileReport`] into the final artifact: a Markdown profile
//! page (review rows, rating table, flyers) or a pretty-printed JSON dump.

use crate::models::{
    ContractorProfile, FlyerCard, ProfileReport, RatingSummary, ReportMetadata, ReviewRecord,
};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &ProfileReport) -> String {
    let mut output = String::new();

    output.push_str("# Contractor Profile\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_profile_section(&report.contractor));
    output.push_str(&generate_rating_section(&report.rating));
    output.push_str(&generate_reviews_section(&report.reviews));
    output.push_str(&generate_flyers_section(&report.flyers));
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &ProfileReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render a five-star row, e.g. `★★★★☆`.
fn star_row(filled: usize) -> String {
    let filled = filled.min(5);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Contractor:** `{}`\n", metadata.contractor_id));
    section.push_str(&format!("- **Backend:** {}\n", metadata.backend_url));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Reviews:** {}\n", metadata.reviews_total));
    if metadata.flyers_total > 0 {
        section.push_str(&format!("- **Flyers:** {}\n", metadata.flyers_total));
    }
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the profile header section.
fn generate_profile_section(contractor: &ContractorProfile) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", contractor.name));
    section.push_str(&format!("{}\n\n", contractor.headline()));
    section.push_str(&format!(
        "**Rating:** {} ({:.1})\n\n",
        star_row(contractor.rating as usize),
        contractor.rating
    ));

    if let Some(ref image_url) = contractor.image_url {
        section.push_str(&format!("![Profile photo]({})\n\n", image_url));
    }

    section.push_str(&format!("{}\n\n", contractor.bio));

    section
}

/// Generate the rating summary table.
fn generate_rating_section(rating: &RatingSummary) -> String {
    if rating.total == 0 {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Rating Summary\n\n");
    section.push_str(&format!(
        "**{:.1} average across {} reviews**\n\n",
        rating.average, rating.total
    ));
    section.push_str("| Stars | Count |\n");
    section.push_str("|:---|:---:|\n");

    let rows = [
        (5, rating.five_star),
        (4, rating.four_star),
        (3, rating.three_star),
        (2, rating.two_star),
        (1, rating.one_star),
        (0, rating.zero_star),
    ];
    for (stars, count) in rows {
        if stars == 0 && count == 0 {
            continue;
        }
        section.push_str(&format!("| {} | {} |\n", star_row(stars), count));
    }
    section.push('\n');

    section
}

/// Generate the reviews section.
fn generate_reviews_section(reviews: &[ReviewRecord]) -> String {
    let mut section = String::new();

    section.push_str("## Reviews\n\n");

    if reviews.is_empty() {
        section.push_str("No reviews yet.\n\n");
        return section;
    }

    for review in reviews {
        section.push_str(&format!(
            "### {} — {}\n\n",
            review.reviewer_name,
            star_row(review.filled_stars())
        ));

        if let Some(ref image_url) = review.reviewer_image_url {
            section.push_str(&format!("![Reviewer photo]({})\n\n", image_url));
        }

        section.push_str(&format!("> {}\n\n", review.text.replace('\n', "\n> ")));
    }

    section
}

/// Generate the flyers table.
fn generate_flyers_section(flyers: &[FlyerCard]) -> String {
    if flyers.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Flyers\n\n");
    section.push_str("| Contractor | City | Contact | Skills |\n");
    section.push_str("|:---|:---|:---|:---|\n");

    for flyer in flyers {
        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            flyer.contractor_name,
            flyer.city,
            flyer.email,
            flyer.skills_line()
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Generated by CrewFolio v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_report(reviews: Vec<ReviewRecord>, flyers: Vec<FlyerCard>) -> ProfileReport {
        let rating = RatingSummary::from_reviews(&reviews);
        ProfileReport {
            metadata: ReportMetadata {
                contractor_id: "c1".to_string(),
                backend_url: "http://localhost:8080".to_string(),
                generated_at: Utc::now(),
                reviews_total: reviews.len(),
                flyers_total: flyers.len(),
                duration_seconds: 0.4,
            },
            contractor: ContractorProfile {
                id: "c1".to_string(),
                name: "John Doe".to_string(),
                role: "contractor".to_string(),
                city: "Camarillo".to_string(),
                bio: "Experienced contractor.".to_string(),
                rating: 4.5,
                image_url: None,
            },
            rating,
            reviews,
            flyers,
        }
    }

    fn make_review(name: &str, rating: f64, text: &str) -> ReviewRecord {
        ReviewRecord {
            id: "e1".to_string(),
            contractor_id: "c1".to_string(),
            reviewer_name: name.to_string(),
            rating,
            text: text.to_string(),
            reviewer_image_url: None,
        }
    }

    #[test]
    fn test_star_row() {
        assert_eq!(star_row(0), "☆☆☆☆☆");
        assert_eq!(star_row(3), "★★★☆☆");
        assert_eq!(star_row(5), "★★★★★");
        assert_eq!(star_row(9), "★★★★★");
    }

    #[test]
    fn test_markdown_report_with_reviews() {
        let report = make_report(
            vec![make_review("Jane Doe", 5.0, "Great work")],
            Vec::new(),
        );

        let output = generate_markdown_report(&report);
        assert!(output.contains("# Contractor Profile"));
        assert!(output.contains("## John Doe"));
        assert!(output.contains("Contractor | Camarillo"));
        assert!(output.contains("### Jane Doe — ★★★★★"));
        assert!(output.contains("> Great work"));
        assert!(!output.contains("No reviews yet."));
    }

    #[test]
    fn test_markdown_report_without_reviews() {
        let report = make_report(Vec::new(), Vec::new());

        let output = generate_markdown_report(&report);
        assert!(output.contains("No reviews yet."));
        assert!(!output.contains("## Rating Summary"));
        assert!(!output.contains("## Flyers"));
    }

    #[test]
    fn test_markdown_report_includes_flyers() {
        let report = make_report(
            Vec::new(),
            vec![FlyerCard {
                contractor_name: "John Doe".to_string(),
                city: "Camarillo".to_string(),
                email: "johndoe@example.com".to_string(),
                skills: vec!["Renovation".to_string(), "Painting".to_string()],
                image_url: None,
            }],
        );

        let output = generate_markdown_report(&report);
        assert!(output.contains("## Flyers"));
        assert!(output.contains("| John Doe | Camarillo | johndoe@example.com | Renovation, Painting |"));
    }

    #[test]
    fn test_markdown_report_reviewer_image() {
        let mut review = make_review("Jane Doe", 4.0, "Solid job");
        review.reviewer_image_url = Some("https://example.com/j.jpg".to_string());
        let report = make_report(vec![review], Vec::new());

        let output = generate_markdown_report(&report);
        assert!(output.contains("![Reviewer photo](https://example.com/j.jpg)"));
    }

    #[test]
    fn test_multiline_review_quoted() {
        let report = make_report(
            vec![make_review("Jane Doe", 4.0, "Line one\nLine two")],
            Vec::new(),
        );

        let output = generate_markdown_report(&report);
        assert!(output.contains("> Line one\n> Line two"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = make_report(
            vec![make_review("Jane Doe", 5.0, "Great work")],
            Vec::new(),
        );

        let json = generate_json_report(&report).unwrap();
        let parsed: ProfileReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.reviews.len(), 1);
        assert_eq!(parsed.contractor.name, "John Doe");
    }
}
