//! The interaction shell: one text input, one trigger, one output area.

use std::io::{self, Write};

use application::stylist_service::StylistService;
use colored::Colorize;
use domain::models::Query;
use domain::ports::{ChatModel, EmbeddingProvider, VectorIndex};
use tracing::warn;

pub const TITLE: &str = "Fashion AI Chatbot";
pub const INTRO: &str =
    "Ask for fashion recommendations and let the AI stylist help you find the perfect items!";
pub const INPUT_PROMPT: &str = "What are you looking for?";
pub const INPUT_PLACEHOLDER: &str = "e.g., comfortable black shirts";
pub const PROGRESS: &str = "Fetching recommendations...";
pub const RESULT_HEADING: &str = "Your Personal Stylist Recommends:";
pub const FAILURE_PREFIX: &str = "Sorry, we couldn't fetch recommendations right now: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Idle,
    Processing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// Input was rejected before any backend call.
    ValidationError(String),
    Recommendation(String),
    /// A backend call failed; the message is safe to show.
    Failure(String),
}

impl ShellOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Recommendation(_))
    }
}

pub struct InteractionShell<E, V, C> {
    service: StylistService<E, V, C>,
    state: ShellState,
}

impl<E, V, C> InteractionShell<E, V, C>
where
    E: EmbeddingProvider,
    V: VectorIndex,
    C: ChatModel,
{
    pub fn new(service: StylistService<E, V, C>) -> Self {
        Self {
            service,
            state: ShellState::Idle,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Handles one trigger press. Always ends back in `Idle`.
    pub async fn submit(&mut self, input: &str) -> ShellOutcome {
        let query = match Query::parse(input) {
            Ok(query) => query,
            Err(err) => return ShellOutcome::ValidationError(err.to_string()),
        };

        self.state = ShellState::Processing;
        let outcome = match self.service.recommend(&query).await {
            Ok(response) => ShellOutcome::Recommendation(response.into_string()),
            Err(err) => {
                warn!(error = %err, "recommendation failed");
                ShellOutcome::Failure(format!("{FAILURE_PREFIX}{err}"))
            }
        };
        self.state = ShellState::Idle;
        outcome
    }

    /// Submits `input` and renders the outcome. Results go to `out`,
    /// progress and errors to `err`.
    pub async fn run_once<W, X>(&mut self, input: &str, out: &mut W, err: &mut X) -> io::Result<ShellOutcome>
    where
        W: Write,
        X: Write,
    {
        if !input.trim().is_empty() {
            writeln!(err, "{}", PROGRESS.dimmed())?;
        }
        let outcome = self.submit(input).await;
        render(&outcome, out, err)?;
        Ok(outcome)
    }
}

pub fn render_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", TITLE.bold().magenta())?;
    writeln!(out, "{INTRO}")?;
    writeln!(out)
}

pub fn render<W: Write, X: Write>(outcome: &ShellOutcome, out: &mut W, err: &mut X) -> io::Result<()> {
    match outcome {
        ShellOutcome::Recommendation(text) => {
            writeln!(out, "\n{}", RESULT_HEADING.bold().green())?;
            writeln!(out, "{text}")
        }
        ShellOutcome::ValidationError(message) | ShellOutcome::Failure(message) => {
            writeln!(err, "{}", message.red())
        }
    }
}
