// SPDX-FileCopyrightText: 2026 StudyMatch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock AI augmentor for deterministic testing.
//!
//! `MockAugmentor` implements `MatchAugmentor` with pre-configured
//! responses, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use studymatch_core::traits::MatchAugmentor;
use studymatch_core::types::{AiSuggestion, Profile};
use studymatch_gemini::fallback_suggestion;

/// Scripted suggestion output: a score in [0.0, 1.0] and reasoning text.
#[derive(Debug, Clone)]
pub struct ScriptedSuggestion {
    pub score: f64,
    pub reasoning: String,
}

/// A mock augmentor that returns pre-configured responses.
///
/// Responses are popped from FIFO queues. When a queue is empty the
/// deterministic fallback (or a fixed default) is returned instead. An
/// optional delay simulates a slow provider for timeout tests.
pub struct MockAugmentor {
    suggestions: Arc<Mutex<VecDeque<ScriptedSuggestion>>>,
    recommendations: Arc<Mutex<VecDeque<String>>>,
    scores: Arc<Mutex<VecDeque<f64>>>,
    delay: Option<Duration>,
}

impl MockAugmentor {
    /// Create a new mock augmentor with empty response queues.
    pub fn new() -> Self {
        Self {
            suggestions: Arc::new(Mutex::new(VecDeque::new())),
            recommendations: Arc::new(Mutex::new(VecDeque::new())),
            scores: Arc::new(Mutex::new(VecDeque::new())),
            delay: None,
        }
    }

    /// Delay every call by `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a scripted suggestion.
    pub async fn add_suggestion(&self, score: f64, reasoning: impl Into<String>) {
        self.suggestions.lock().await.push_back(ScriptedSuggestion {
            score,
            reasoning: reasoning.into(),
        });
    }

    /// Queue a study-recommendation response.
    pub async fn add_recommendation(&self, text: impl Into<String>) {
        self.recommendations.lock().await.push_back(text.into());
    }

    /// Queue a bare compatibility score.
    pub async fn add_score(&self, score: f64) {
        self.scores.lock().await.push_back(score);
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MockAugmentor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MatchAugmentor for MockAugmentor {
    async fn suggest_match(&self, user: &Profile, candidate: &Profile) -> AiSuggestion {
        self.pause().await;
        match self.suggestions.lock().await.pop_front() {
            Some(scripted) => {
                AiSuggestion::new(user.id, candidate.id, scripted.score, scripted.reasoning)
            }
            None => fallback_suggestion(user, candidate),
        }
    }

    async fn study_recommendations(&self, _user: &Profile, _slots: &[String]) -> String {
        self.pause().await;
        self.recommendations
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock recommendations".to_string())
    }

    async fn compatibility_score(&self, _a: &Profile, _b: &Profile) -> f64 {
        self.pause().await;
        self.scores.lock().await.pop_front().unwrap_or(0.5)
    }
}
