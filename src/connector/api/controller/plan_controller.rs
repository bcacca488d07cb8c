use anyhow::Result;

use crate::connector::tui::PlannerForm;
use crate::DomainError;

use super::super::Container;

pub struct PlanController<'a> {
    container: &'a Container,
}

impl<'a> PlanController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Generate a plan the same way the interactive form does: failures
    /// print the fallback message instead of an error.
    pub async fn plan(&self, destination: String) -> Result<String> {
        let mut form = PlannerForm::new();
        form.set_destination(destination);

        let use_case = self.container.plan_use_case();
        if !form.submit(&use_case).await {
            return Err(DomainError::invalid_input("destination must not be empty").into());
        }

        Ok(form.plan().unwrap_or_default().to_string())
    }
}
