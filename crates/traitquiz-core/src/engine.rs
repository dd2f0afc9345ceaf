//! The trait assessment engine.
//!
//! Owns a shared, read-only [`Catalog`] and drives [`Session`]s through
//! draw, answer, and evaluation. The engine itself holds no per-session
//! state, so one engine can serve any number of sessions.

use std::sync::Arc;

use anyhow::Result;

use crate::builtin::builtin_catalog;
use crate::error::SessionError;
use crate::model::Catalog;
use crate::report::{CatalogSummary, FeedbackEntry, FeedbackReport};
use crate::session::{Session, SessionSelection};

/// The central assessment engine.
#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    catalog: Arc<Catalog>,
}

impl AssessmentEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self::from_shared(Arc::new(catalog))
    }

    pub fn from_shared(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// An engine over the embedded entrepreneurial trait catalog.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(builtin_catalog()?))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Trait names in catalog order.
    pub fn list_traits(&self) -> Vec<&str> {
        self.catalog.trait_names()
    }

    /// The session's selection, drawing one on first access.
    pub fn selection<'s>(&self, session: &'s mut Session) -> &'s SessionSelection {
        session.ensure_selection(&self.catalog)
    }

    /// Discard the session's selection and answers and draw a new selection.
    pub fn randomize<'s>(&self, session: &'s mut Session) -> &'s SessionSelection {
        tracing::debug!(session = %session.id(), "redrawing selection");
        let selection = session.redraw(&self.catalog);
        tracing::debug!(picks = ?selection.picks(), "selection drawn");
        selection
    }

    /// Record `option` as the answer to selection entry `index`.
    ///
    /// The option must be one of that scenario's options. On error the
    /// session is left unchanged.
    pub fn record_answer(
        &self,
        session: &mut Session,
        index: usize,
        option: &str,
    ) -> Result<(), SessionError> {
        let session_id = session.id();
        let selection = session.ensure_selection(&self.catalog);
        let len = selection.len();

        let Some(scenario) = selection.get(index) else {
            tracing::warn!(session = %session_id, index, len, "answer index out of range");
            return Err(SessionError::IndexOutOfRange { index, len });
        };

        if scenario.question.position_of(option).is_none() {
            tracing::warn!(session = %session_id, index, option, "rejected answer");
            return Err(SessionError::InvalidOption {
                index,
                option: option.to_string(),
            });
        }

        tracing::debug!(session = %session_id, index, option, "answer recorded");
        session.answers_mut().insert(index, option.to_string());
        Ok(())
    }

    /// Reduce a fully answered session to per-trait feedback.
    ///
    /// Returns `MissingAnswers` with every unanswered index if the session
    /// is incomplete; no partial report is produced.
    pub fn evaluate(&self, session: &mut Session) -> Result<FeedbackReport, SessionError> {
        let selection = session.ensure_selection(&self.catalog).clone();
        let answers = session.answers();

        let missing = answers.missing(selection.len());
        if !missing.is_empty() {
            return Err(SessionError::MissingAnswers(missing));
        }

        let entries = selection
            .iter()
            .map(|s| -> Result<FeedbackEntry, SessionError> {
                let answer = answers.get(s.index).unwrap_or_default();
                let (position, feedback) =
                    s.question
                        .respond(answer)
                        .ok_or_else(|| SessionError::InvalidOption {
                            index: s.index,
                            option: answer.to_string(),
                        })?;
                Ok(FeedbackEntry {
                    trait_name: s.trait_name.to_string(),
                    prompt: s.question.prompt().to_string(),
                    answer: answer.to_string(),
                    position,
                    feedback: feedback.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let catalog = selection.catalog();
        tracing::info!(
            session = %session.id(),
            catalog = %catalog.info().id,
            scenarios = entries.len(),
            "session evaluated"
        );

        Ok(FeedbackReport {
            session_id: session.id(),
            created_at: session.created_at(),
            seed: session.seed(),
            catalog: CatalogSummary {
                id: catalog.info().id.clone(),
                name: catalog.info().name.clone(),
                trait_count: catalog.trait_count(),
            },
            entries,
        })
    }
}
