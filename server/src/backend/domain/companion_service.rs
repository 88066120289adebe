//! AI companion text: journaling prompts, affirmations and mood quotes.
//!
//! Every call goes to the completion client first. Any failure there (no API
//! key, network error, non-2xx, empty completion) is logged and answered with
//! a canned fallback, so callers always receive text.

use shared::{GeneratedBy, GeneratedText, Mood};
use std::sync::Arc;
use tracing::{info, warn};

use crate::backend::clients::{CompletionClient, CompletionRequest};
use crate::backend::domain::fallbacks::{
    pick, quotes_for, FALLBACK_AFFIRMATIONS, FALLBACK_PROMPTS,
};

const MAX_TOPIC_CHARS: usize = 200;
const MAX_NAME_CHARS: usize = 40;

const PROMPT_SYSTEM: &str = "You are a gentle journaling companion. Reply with exactly one \
open-ended journaling prompt of at most 30 words. No preamble, no quotes.";

const AFFIRMATION_SYSTEM: &str = "You are a warm, supportive wellness companion. Reply with \
exactly one short first-person affirmation of at most 25 words. No preamble.";

const QUOTE_SYSTEM: &str = "You share short, uplifting quotes from well-known people. Reply \
with one quote in the form \"quote\" - Author. No commentary.";

/// Trim free text and cap its length; blank input becomes `None`
fn clean_input(value: Option<&str>, max_chars: usize) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.chars().take(max_chars).collect())
}

fn mood_phrase(mood: Mood) -> String {
    format!("{} ({} out of 5)", mood.label().to_lowercase(), mood.level())
}

pub fn build_prompt_request(mood: Option<Mood>, topic: Option<&str>) -> CompletionRequest {
    let mut user = String::from("Write a journaling prompt");
    if let Some(mood) = mood {
        user.push_str(&format!(" for someone whose mood today is {}", mood_phrase(mood)));
    }
    user.push('.');
    if let Some(topic) = clean_input(topic, MAX_TOPIC_CHARS) {
        user.push_str(&format!(" Focus it on this topic: {}.", topic));
    }

    CompletionRequest {
        system: PROMPT_SYSTEM.to_string(),
        user,
        max_tokens: 80,
        temperature: 0.9,
    }
}

pub fn build_affirmation_request(mood: Option<Mood>, name: Option<&str>) -> CompletionRequest {
    let mut user = String::from("Write an affirmation");
    if let Some(mood) = mood {
        user.push_str(&format!(" for someone feeling {}", mood_phrase(mood)));
    }
    user.push('.');
    if let Some(name) = clean_input(name, MAX_NAME_CHARS) {
        user.push_str(&format!(" Their name is {}.", name));
    }

    CompletionRequest {
        system: AFFIRMATION_SYSTEM.to_string(),
        user,
        max_tokens: 60,
        temperature: 0.8,
    }
}

pub fn build_mood_quote_request(mood: Mood) -> CompletionRequest {
    CompletionRequest {
        system: QUOTE_SYSTEM.to_string(),
        user: format!(
            "Share one quote that would resonate with someone feeling {} today.",
            mood_phrase(mood)
        ),
        max_tokens: 80,
        temperature: 0.7,
    }
}

/// Service producing companion text with canned fallbacks
#[derive(Clone)]
pub struct CompanionService {
    client: Arc<dyn CompletionClient>,
}

impl CompanionService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    async fn complete_or(&self, kind: &str, request: CompletionRequest, fallback: &'static str) -> GeneratedText {
        match self.client.complete(&request).await {
            Ok(text) => {
                info!("Generated {} via completion API", kind);
                GeneratedText {
                    text,
                    generated_by: GeneratedBy::Openai,
                }
            }
            Err(e) => {
                warn!("Completion failed for {}, using fallback: {:#}", kind, e);
                GeneratedText {
                    text: fallback.to_string(),
                    generated_by: GeneratedBy::Fallback,
                }
            }
        }
    }

    pub async fn generate_prompt(&self, mood: Option<Mood>, topic: Option<&str>) -> GeneratedText {
        let request = build_prompt_request(mood, topic);
        self.complete_or("prompt", request, pick(FALLBACK_PROMPTS)).await
    }

    pub async fn generate_affirmation(&self, mood: Option<Mood>, name: Option<&str>) -> GeneratedText {
        let request = build_affirmation_request(mood, name);
        self.complete_or("affirmation", request, pick(FALLBACK_AFFIRMATIONS))
            .await
    }

    pub async fn generate_mood_quote(&self, mood: Mood) -> GeneratedText {
        let request = build_mood_quote_request(mood);
        self.complete_or("mood quote", request, pick(quotes_for(mood)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    struct RecordingClient {
        reply: String,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(self.reply.clone())
        }
    }

    fn recording(reply: &str) -> Arc<RecordingClient> {
        Arc::new(RecordingClient {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_failures_fall_back_to_canned_text() {
        let service = CompanionService::new(Arc::new(FailingClient));

        let prompt = service.generate_prompt(None, None).await;
        assert_eq!(prompt.generated_by, GeneratedBy::Fallback);
        assert!(FALLBACK_PROMPTS.contains(&prompt.text.as_str()));

        let affirmation = service.generate_affirmation(Some(Mood::Bad), Some("Ari")).await;
        assert_eq!(affirmation.generated_by, GeneratedBy::Fallback);
        assert!(FALLBACK_AFFIRMATIONS.contains(&affirmation.text.as_str()));

        let quote = service.generate_mood_quote(Mood::Awful).await;
        assert_eq!(quote.generated_by, GeneratedBy::Fallback);
        assert!(quotes_for(Mood::Awful).contains(&quote.text.as_str()));
    }

    #[tokio::test]
    async fn test_success_returns_completion_text() {
        let client = recording("What made you smile today?");
        let service = CompanionService::new(client.clone());

        let prompt = service.generate_prompt(Some(Mood::Great), Some("  gratitude ")).await;
        assert_eq!(prompt.generated_by, GeneratedBy::Openai);
        assert_eq!(prompt.text, "What made you smile today?");

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].user.contains("great (5 out of 5)"));
        assert!(seen[0].user.contains("topic: gratitude."));
    }

    #[test]
    fn test_request_builders_skip_blank_inputs() {
        let request = build_prompt_request(None, Some("   "));
        assert_eq!(request.user, "Write a journaling prompt.");

        let request = build_affirmation_request(None, Some(""));
        assert_eq!(request.user, "Write an affirmation.");
    }

    #[test]
    fn test_long_name_is_truncated() {
        let name = "n".repeat(100);
        let request = build_affirmation_request(Some(Mood::Okay), Some(&name));
        assert!(request.user.contains(&"n".repeat(MAX_NAME_CHARS)));
        assert!(!request.user.contains(&"n".repeat(MAX_NAME_CHARS + 1)));
    }

    #[test]
    fn test_mood_quote_request_mentions_mood() {
        let request = build_mood_quote_request(Mood::Bad);
        assert!(request.user.contains("bad (2 out of 5)"));
        assert_eq!(request.system, QUOTE_SYSTEM);
    }
}
