use tracing::error;

use crate::application::GeneratePlanUseCase;
use crate::domain::DomainError;

/// Shown to the user whenever plan generation fails for any reason.
pub const PLAN_FALLBACK_MESSAGE: &str = "Sorry, I could not generate a travel plan at this moment.";

/// State behind the planner screen: the destination being typed, the last
/// plan shown, and whether a request is in flight.
///
/// A request is started with [`PlannerForm::begin`] and completed with
/// [`PlannerForm::finish`]; `is_loading` is true exactly in between.
#[derive(Debug, Clone, Default)]
pub struct PlannerForm {
    destination: String,
    plan: Option<String>,
    loading: bool,
}

impl PlannerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
    }

    pub fn push_char(&mut self, c: char) {
        self.destination.push(c);
    }

    pub fn pop_char(&mut self) {
        self.destination.pop();
    }

    pub fn clear_destination(&mut self) {
        self.destination.clear();
    }

    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The "generate" action is available only with a destination and no
    /// request already running.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.destination.trim().is_empty()
    }

    /// Mark a request as started and return the destination to plan for.
    /// Returns `None` (and changes nothing) when the action is unavailable.
    pub fn begin(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.loading = true;
        Some(self.destination.trim().to_string())
    }

    /// Apply the outcome of the request started by [`Self::begin`].
    pub fn finish(&mut self, outcome: Result<String, DomainError>) {
        self.plan = Some(match outcome {
            Ok(plan) => plan,
            Err(e) => {
                error!("Failed to generate travel plan: {}", e);
                PLAN_FALLBACK_MESSAGE.to_string()
            }
        });
        self.loading = false;
    }

    /// Run one full request against `use_case`. Returns whether a request
    /// was made.
    pub async fn submit(&mut self, use_case: &GeneratePlanUseCase) -> bool {
        let Some(destination) = self.begin() else {
            return false;
        };
        let outcome = use_case.generate_plan(&destination).await;
        self.finish(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailureKind;

    #[test]
    fn empty_destination_cannot_begin() {
        let mut form = PlannerForm::new();
        assert!(!form.can_submit());
        assert!(form.begin().is_none());
        assert!(!form.is_loading());

        form.set_destination("  ");
        assert!(form.begin().is_none());
        assert!(!form.is_loading());
    }

    #[test]
    fn begin_sets_loading_and_blocks_resubmission() {
        let mut form = PlannerForm::new();
        form.set_destination(" Tokyo ");

        assert_eq!(form.begin().as_deref(), Some("Tokyo"));
        assert!(form.is_loading());
        assert!(!form.can_submit());
        assert!(form.begin().is_none());
    }

    #[test]
    fn failure_shows_fallback_and_clears_loading() {
        let mut form = PlannerForm::new();
        form.set_destination("Tokyo");
        form.begin();

        form.finish(Err(DomainError::client(
            FailureKind::Transport,
            "Failed to generate travel plan. Please check your API configuration and try again.",
        )));

        assert!(!form.is_loading());
        assert_eq!(form.plan(), Some(PLAN_FALLBACK_MESSAGE));
    }

    #[test]
    fn success_replaces_previous_plan() {
        let mut form = PlannerForm::new();
        form.set_destination("Rome");
        form.begin();
        form.finish(Ok("first".to_string()));
        form.begin();
        form.finish(Ok("second".to_string()));

        assert_eq!(form.plan(), Some("second"));
    }

    #[test]
    fn editing_helpers() {
        let mut form = PlannerForm::new();
        for c in "Nice!".chars() {
            form.push_char(c);
        }
        form.pop_char();
        assert_eq!(form.destination(), "Nice");
        form.clear_destination();
        assert_eq!(form.destination(), "");
    }
}
