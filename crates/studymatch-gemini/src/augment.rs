// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gemini-backed implementation of [`MatchAugmentor`].
//!
//! Every method is infallible: any provider failure, parse failure, or
//! missing API key degrades to a deterministic fallback so the matching
//! pipeline never observes an AI error.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use studymatch_config::GeminiConfig;
use studymatch_core::traits::MatchAugmentor;
use studymatch_core::types::{AiSuggestion, Profile, StudyStyle};
use studymatch_core::StudyMatchError;

use crate::client::GeminiClient;
use crate::types::MatchPayload;

/// Reasoning text attached to fallback suggestions.
const FALLBACK_REASONING: &str =
    "Basic compatibility calculated based on shared interests and study preferences.";

/// Returned when study recommendations cannot be generated.
const RECOMMENDATIONS_UNAVAILABLE: &str =
    "Unable to generate personalized recommendations at this time. Please try again later.";

/// Neutral score when a compatibility probe yields no usable number.
const NEUTRAL_SCORE: f64 = 0.5;

/// AI augmentor backed by the Gemini generateContent API.
///
/// Built without a client when no API key is configured, in which case
/// every call takes the fallback path immediately.
pub struct GeminiAugmentor {
    client: Option<GeminiClient>,
}

impl GeminiAugmentor {
    /// Build from configuration. A missing or empty API key disables the
    /// remote path rather than failing.
    pub fn new(config: &GeminiConfig) -> Result<Self, StudyMatchError> {
        let client = match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => Some(GeminiClient::new(
                key.to_string(),
                config.api_url.clone(),
                Duration::from_secs(config.timeout_secs),
            )?),
            _ => {
                debug!("no Gemini API key configured, augmentor runs in fallback mode");
                None
            }
        };
        Ok(Self { client })
    }

    #[cfg(test)]
    pub(crate) fn with_client(client: Option<GeminiClient>) -> Self {
        Self { client }
    }

    async fn generate(&self, prompt: &str) -> Result<String, StudyMatchError> {
        match &self.client {
            Some(client) => client.generate(prompt).await,
            None => Err(StudyMatchError::Provider {
                message: "Gemini API key not configured".to_string(),
                source: None,
            }),
        }
    }
}

#[async_trait]
impl MatchAugmentor for GeminiAugmentor {
    async fn suggest_match(&self, user: &Profile, candidate: &Profile) -> AiSuggestion {
        let prompt = build_matching_prompt(user, candidate);
        match self.generate(&prompt).await {
            Ok(text) => match parse_match_payload(&text) {
                Some(payload) => {
                    let mut suggestion = AiSuggestion::new(
                        user.id,
                        candidate.id,
                        payload.compatibility_score.clamp(0.0, 1.0),
                        payload.reasoning,
                    );
                    suggestion.shared_interests =
                        payload.shared_interests.map(|v| v.to_string());
                    suggestion
                }
                None => {
                    warn!(candidate = %candidate.id, "unparseable match response, using fallback");
                    fallback_suggestion(user, candidate)
                }
            },
            Err(e) => {
                warn!(candidate = %candidate.id, error = %e, "match suggestion failed, using fallback");
                fallback_suggestion(user, candidate)
            }
        }
    }

    async fn study_recommendations(&self, user: &Profile, slots: &[String]) -> String {
        let prompt = build_recommendation_prompt(user, slots);
        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(user = %user.id, error = %e, "study recommendations failed");
                RECOMMENDATIONS_UNAVAILABLE.to_string()
            }
        }
    }

    async fn compatibility_score(&self, a: &Profile, b: &Profile) -> f64 {
        let prompt = build_compatibility_prompt(a, b);
        match self.generate(&prompt).await {
            Ok(text) => parse_bare_score(&text),
            Err(e) => {
                warn!(error = %e, "compatibility probe failed, using neutral score");
                NEUTRAL_SCORE
            }
        }
    }
}

fn render_set(set: &BTreeSet<String>) -> String {
    if set.is_empty() {
        "none".to_string()
    } else {
        set.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn render_style(style: Option<StudyStyle>) -> String {
    style.map_or_else(|| "unspecified".to_string(), |s| s.to_string())
}

fn render_optional(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("unspecified")
}

fn profile_block(label: &str, profile: &Profile) -> String {
    format!(
        "{label}:\n\
         - Name: {}\n\
         - Major: {}\n\
         - Year: {}\n\
         - Classes: {}\n\
         - Study Style: {}\n\
         - Goals: {}\n\
         - Availability: {}",
        profile.display_name,
        render_optional(&profile.major),
        render_optional(&profile.study_year),
        render_set(&profile.classes),
        render_style(profile.study_style),
        render_set(&profile.goals),
        profile.availability.summary(),
    )
}

fn build_matching_prompt(user: &Profile, candidate: &Profile) -> String {
    format!(
        "Analyze the compatibility between two students for study partnerships.\n\n\
         {}\n\n{}\n\n\
         Please provide a compatibility score (0.0 to 1.0) and a brief explanation \
         of why they would be good study partners. Focus on shared classes, \
         complementary study styles, and schedule compatibility.\n\n\
         Format your response as JSON:\n\
         {{\n  \"compatibilityScore\": 0.0-1.0,\n  \"reasoning\": \"explanation\",\n  \
         \"sharedInterests\": [\"shared classes or interests\"]\n}}",
        profile_block("Student 1", user),
        profile_block("Student 2", candidate),
    )
}

fn build_recommendation_prompt(user: &Profile, slots: &[String]) -> String {
    format!(
        "Generate personalized study recommendations for a student.\n\n\
         Student Profile:\n\
         - Major: {}\n\
         - Year: {}\n\
         - Classes: {}\n\
         - Study Style: {}\n\
         - Goals: {}\n\
         - Available Time Slots: {}\n\n\
         Please provide specific, actionable study recommendations including:\n\
         1. Optimal study schedule based on their available time\n\
         2. Study techniques that match their learning style\n\
         3. Subject prioritization based on their classes\n\
         4. Collaboration opportunities\n\n\
         Keep the response concise and practical.",
        render_optional(&user.major),
        render_optional(&user.study_year),
        render_set(&user.classes),
        render_style(user.study_style),
        render_set(&user.goals),
        if slots.is_empty() { "none".to_string() } else { slots.join("; ") },
    )
}

fn build_compatibility_prompt(a: &Profile, b: &Profile) -> String {
    format!(
        "Rate the study compatibility between these two students on a scale of 0.0 to 1.0.\n\n\
         Student 1: Major={}, Year={}, Style={}, Goals={}, Classes={}\n\
         Student 2: Major={}, Year={}, Style={}, Goals={}, Classes={}\n\n\
         Consider shared classes, complementary skills, and study style compatibility. \
         Respond with only the numerical score (e.g., 0.85).",
        render_optional(&a.major),
        render_optional(&a.study_year),
        render_style(a.study_style),
        render_set(&a.goals),
        render_set(&a.classes),
        render_optional(&b.major),
        render_optional(&b.study_year),
        render_style(b.study_style),
        render_set(&b.goals),
        render_set(&b.classes),
    )
}

/// Pull the match JSON out of the generated text.
///
/// Models often wrap the object in prose or a code fence, so this takes
/// the substring from the first `{` to the last `}` before parsing.
fn parse_match_payload(text: &str) -> Option<MatchPayload> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

/// Scan whitespace-separated tokens for the first float in [0.0, 1.0].
/// Anything else yields the neutral score.
fn parse_bare_score(text: &str) -> f64 {
    for token in text.split_whitespace() {
        if let Ok(score) = token.trim().parse::<f64>()
            && (0.0..=1.0).contains(&score)
        {
            return score;
        }
    }
    NEUTRAL_SCORE
}

/// Deterministic local suggestion used whenever the remote path fails.
///
/// Up to 0.4 for shared classes (saturating at three), 0.3 for an
/// identical declared study style, plus a 0.1 base.
pub fn fallback_suggestion(user: &Profile, candidate: &Profile) -> AiSuggestion {
    let shared = user.shared_classes(candidate).len() as f64;
    let mut score = 0.1;
    if shared > 0.0 {
        score += 0.4 * (shared / 3.0).min(1.0);
    }
    if let (Some(a), Some(b)) = (user.study_style, candidate.study_style)
        && a == b
    {
        score += 0.3;
    }
    AiSuggestion::new(
        user.id,
        candidate.id,
        score.min(1.0),
        FALLBACK_REASONING.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use studymatch_core::types::{UserId, WeeklyAvailability};
    use uuid::Uuid;

    fn profile(n: u128, classes: &[&str], style: Option<StudyStyle>) -> Profile {
        Profile {
            id: UserId(Uuid::from_u128(n)),
            display_name: format!("Student {n}"),
            major: Some("CS".to_string()),
            study_year: Some("JUNIOR".to_string()),
            classes: classes.iter().map(|s| s.to_string()).collect(),
            goals: ["ACE_FINAL"].iter().map(|s| s.to_string()).collect(),
            study_style: style,
            location: None,
            availability: WeeklyAvailability::default(),
            prefers_groups: false,
            profile_completed: true,
        }
    }

    #[test]
    fn payload_extraction_skips_surrounding_prose() {
        let text = "Here is my analysis:\n```json\n{\"compatibilityScore\": 0.9, \
                    \"reasoning\": \"great fit\"}\n```\nHope that helps!";
        let payload = parse_match_payload(text).unwrap();
        assert_eq!(payload.compatibility_score, 0.9);
        assert_eq!(payload.reasoning, "great fit");
    }

    #[test]
    fn payload_extraction_rejects_garbage() {
        assert!(parse_match_payload("no json here").is_none());
        assert!(parse_match_payload("{not valid}").is_none());
    }

    #[test]
    fn bare_score_finds_first_valid_float() {
        assert_eq!(parse_bare_score("0.85"), 0.85);
        assert_eq!(parse_bare_score("I'd say 0.7 overall."), 0.7);
        assert_eq!(parse_bare_score("score: 3.5 out of 5"), NEUTRAL_SCORE);
        assert_eq!(parse_bare_score("no number"), NEUTRAL_SCORE);
    }

    #[test]
    fn fallback_scores_shared_classes_and_style() {
        let a = profile(1, &["CS101", "MATH301", "PHYS201"], Some(StudyStyle::Quiet));
        let b = profile(2, &["CS101", "MATH301", "PHYS201"], Some(StudyStyle::Quiet));
        // Three shared classes saturate the 0.4 term, styles match.
        let s = fallback_suggestion(&a, &b);
        assert!((s.compatibility_score - 0.8).abs() < 1e-9);
        assert_eq!(s.reasoning, FALLBACK_REASONING);

        // No overlap, no styles: base only.
        let c = profile(3, &["BIO100"], None);
        let d = profile(4, &["HIST210"], None);
        let s = fallback_suggestion(&c, &d);
        assert!((s.compatibility_score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn fallback_partial_overlap() {
        let a = profile(1, &["CS101", "MATH301"], Some(StudyStyle::Quiet));
        let b = profile(2, &["MATH301"], Some(StudyStyle::Collaborative));
        // One shared class of three: 0.4/3 + 0.1 base, styles differ.
        let s = fallback_suggestion(&a, &b);
        assert!((s.compatibility_score - (0.1 + 0.4 / 3.0)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn missing_api_key_uses_fallbacks() {
        let augmentor = GeminiAugmentor::with_client(None);
        let a = profile(1, &["CS101"], Some(StudyStyle::Quiet));
        let b = profile(2, &["CS101"], Some(StudyStyle::Quiet));

        let suggestion = augmentor.suggest_match(&a, &b).await;
        assert_eq!(suggestion.reasoning, FALLBACK_REASONING);

        let recs = augmentor.study_recommendations(&a, &[]).await;
        assert_eq!(recs, RECOMMENDATIONS_UNAVAILABLE);

        let score = augmentor.compatibility_score(&a, &b).await;
        assert_eq!(score, NEUTRAL_SCORE);
    }

    #[tokio::test]
    async fn remote_suggestion_clamps_score() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{
                "text": "{\"compatibilityScore\": 1.7, \"reasoning\": \"over-eager\"}"
            }]}}]
        });
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = GeminiClient::new(
            "key".into(),
            "https://unused.invalid".into(),
            Duration::from_secs(6),
        )
        .unwrap()
        .with_base_url(server.uri());
        let augmentor = GeminiAugmentor::with_client(Some(client));

        let a = profile(1, &["CS101"], None);
        let b = profile(2, &["CS101"], None);
        let suggestion = augmentor.suggest_match(&a, &b).await;
        assert_eq!(suggestion.compatibility_score, 1.0);
        assert_eq!(suggestion.reasoning, "over-eager");
    }
}
