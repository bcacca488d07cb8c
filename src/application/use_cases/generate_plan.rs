use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::application::ChatClient;
use crate::domain::{ChatMessage, DomainError};

/// Returned in place of a plan when the service answers without any content.
pub const NO_PLAN_PLACEHOLDER: &str = "No plan generated.";

pub const PLAN_FAILURE_MESSAGE: &str =
    "Failed to generate travel plan. Please check your API configuration and try again.";

const SYSTEM_PROMPT: &str = "\
You are an expert travel assistant AI.
When given a destination, provide a comprehensive and personalized travel plan that includes:
1. Best time to visit
2. Top 3-5 attractions
3. Recommended 3-day itinerary
4. Local cuisine highlights
5. Budget and cost estimates
6. Travel tips and cultural insights

Format the response in a clear, easy-to-read manner. Be specific and actionable.";

/// Build the fixed two-message prompt: system instructions, then the user request.
pub fn build_prompt(destination: &str) -> [ChatMessage; 2] {
    [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Create a detailed travel plan for a trip to {destination}.\n\
             Include practical information, must-visit locations, and insider tips."
        )),
    ]
}

pub struct GeneratePlanUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl GeneratePlanUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    /// Generate a free-text travel plan for `destination`.
    ///
    /// Returns the assistant's text, or [`NO_PLAN_PLACEHOLDER`] when the
    /// service produced none. Every upstream failure is logged and reported
    /// as a single client error carrying [`PLAN_FAILURE_MESSAGE`].
    pub async fn generate_plan(&self, destination: &str) -> Result<String, DomainError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(DomainError::invalid_input("destination must not be empty"));
        }

        info!("Generating travel plan for: {}", destination);
        let start_time = Instant::now();

        let messages = build_prompt(destination);
        let content = self.chat_client.complete(&messages).await.map_err(|e| {
            error!("Chat completion failed ({}): {}", e.kind(), e);
            DomainError::client(e.kind(), PLAN_FAILURE_MESSAGE)
        })?;

        let plan = match content {
            Some(text) if !text.is_empty() => text,
            _ => NO_PLAN_PLACEHOLDER.to_string(),
        };

        info!(
            "Travel plan ready ({} chars) in {:.2}s",
            plan.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::{FailureKind, Role, UpstreamError};

    struct ScriptedChat {
        reply: Mutex<Option<Result<Option<String>, UpstreamError>>>,
        seen: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedChat {
        fn new(reply: Result<Option<String>, UpstreamError>) -> Self {
            Self {
                reply: Mutex::new(Some(reply)),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedChat {
        async fn complete(
            &self,
            messages: &[ChatMessage],
        ) -> Result<Option<String>, UpstreamError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.reply
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Ok(None))
        }
    }

    #[test]
    fn prompt_is_system_then_user() {
        let [system, user] = build_prompt("Paris");
        assert_eq!(system.role(), Role::System);
        assert!(system.content().contains("Top 3-5 attractions"));
        assert!(system.content().contains("Recommended 3-day itinerary"));
        assert_eq!(user.role(), Role::User);
        assert!(user.content().contains("trip to Paris."));
        assert!(user.content().contains("insider tips"));
    }

    #[tokio::test]
    async fn returns_plan_text() {
        let chat = Arc::new(ScriptedChat::new(Ok(Some("Day 1: Louvre".to_string()))));
        let use_case = GeneratePlanUseCase::new(chat.clone());

        let plan = use_case.generate_plan("Paris").await.unwrap();

        assert_eq!(plan, "Day 1: Louvre");
        let seen = chat.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].len(), 2);
    }

    #[tokio::test]
    async fn missing_or_empty_content_becomes_placeholder() {
        for reply in [None, Some(String::new())] {
            let use_case = GeneratePlanUseCase::new(Arc::new(ScriptedChat::new(Ok(reply))));
            let plan = use_case.generate_plan("Oslo").await.unwrap();
            assert_eq!(plan, NO_PLAN_PLACEHOLDER);
        }
    }

    #[tokio::test]
    async fn upstream_failures_are_wrapped_with_fixed_message() {
        let use_case = GeneratePlanUseCase::new(Arc::new(ScriptedChat::new(Err(
            UpstreamError::status(503, "Groq API error: Service Unavailable"),
        ))));

        let err = use_case.generate_plan("Lima").await.unwrap_err();

        assert_eq!(err.to_string(), PLAN_FAILURE_MESSAGE);
        assert_eq!(err.kind(), Some(FailureKind::UpstreamStatus));
    }

    #[tokio::test]
    async fn blank_destination_never_reaches_the_client() {
        let chat = Arc::new(ScriptedChat::new(Ok(Some("unused".to_string()))));
        let use_case = GeneratePlanUseCase::new(chat.clone());

        let err = use_case.generate_plan("   ").await.unwrap_err();

        assert!(err.is_invalid_input());
        assert!(chat.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn destination_is_trimmed_before_prompting() {
        let chat = Arc::new(ScriptedChat::new(Ok(Some("plan".to_string()))));
        let use_case = GeneratePlanUseCase::new(chat.clone());

        use_case.generate_plan("  Kyoto \n").await.unwrap();

        let seen = chat.seen.lock().unwrap();
        assert!(seen[0][1].content().contains("a trip to Kyoto.\n"));
    }
}
