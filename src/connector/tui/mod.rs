//! Interactive planner screen.
//!
//! The event loop redraws after every key press and whenever a pending plan
//! request completes. Requests run on a spawned task so the screen keeps
//! showing the busy state while the completion endpoint works.

mod form;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::application::{GeneratePlanUseCase, PLAN_FAILURE_MESSAGE};
use crate::domain::{DomainError, FailureKind};

pub use form::*;
pub use ui::{button_label, draw};

type PlanOutcome = Result<String, DomainError>;

enum Step {
    Input(Option<std::io::Result<Event>>),
    PlanReady(PlanOutcome),
}

/// Run the planner until the user quits. Restores the terminal on exit.
pub async fn run(use_case: Arc<GeneratePlanUseCase>) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = App::new(use_case).run(&mut terminal).await;
    ratatui::restore();
    result
}

struct App {
    form: PlannerForm,
    use_case: Arc<GeneratePlanUseCase>,
    pending: Option<oneshot::Receiver<PlanOutcome>>,
    scroll: u16,
    exit: bool,
}

impl App {
    fn new(use_case: Arc<GeneratePlanUseCase>) -> Self {
        Self {
            form: PlannerForm::new(),
            use_case,
            pending: None,
            scroll: 0,
            exit: false,
        }
    }

    async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();

        while !self.exit {
            terminal.draw(|frame| draw(frame, &self.form, self.scroll))?;

            let step = tokio::select! {
                event = events.next() => Step::Input(event),
                outcome = wait_for_plan(&mut self.pending) => Step::PlanReady(outcome),
            };

            match step {
                Step::Input(Some(Ok(Event::Key(key)))) if key.kind == KeyEventKind::Press => {
                    self.handle_key(key)
                }
                Step::Input(Some(Ok(_))) => {}
                Step::Input(Some(Err(e))) => return Err(e.into()),
                Step::Input(None) => self.exit = true,
                Step::PlanReady(outcome) => {
                    self.pending = None;
                    self.scroll = 0;
                    self.form.finish(outcome);
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exit = true
            }
            KeyCode::Enter => self.start_request(),
            KeyCode::Backspace => self.form.pop_char(),
            KeyCode::Char(c) => self.form.push_char(c),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
    }

    fn start_request(&mut self) {
        let Some(destination) = self.form.begin() else {
            debug!("Generate ignored: no destination or request already running");
            return;
        };

        let (tx, rx) = oneshot::channel();
        let use_case = self.use_case.clone();
        tokio::spawn(async move {
            let outcome = use_case.generate_plan(&destination).await;
            if tx.send(outcome).is_err() {
                warn!("Planner closed before the plan for {} arrived", destination);
            }
        });
        self.pending = Some(rx);
    }
}

/// Resolve with the pending request's outcome, or never when nothing is pending.
async fn wait_for_plan(pending: &mut Option<oneshot::Receiver<PlanOutcome>>) -> PlanOutcome {
    match pending.as_mut() {
        Some(rx) => rx.await.unwrap_or_else(|_| {
            Err(DomainError::client(
                FailureKind::Transport,
                PLAN_FAILURE_MESSAGE,
            ))
        }),
        None => std::future::pending().await,
    }
}
