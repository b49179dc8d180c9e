//! Screen state for the calculator
//!
//! A [`Session`] owns everything that changes between button presses: the
//! latest result, the validation message and the history. Each [`Session::submit`]
//! either fully succeeds or leaves the previous state untouched apart from
//! the message.

use crate::calculator::evaluate;
use crate::error::ParseError;
use crate::gauge::GaugeTransition;
use crate::history::History;
use crate::models::{BmiOutcome, BmiRecord, SexAdjustment};
use tracing::{info, warn};

/// What the result box currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView<'a> {
    /// Nothing computed yet
    Placeholder,
    /// A validation message replaces the result
    Error(&'a str),
    Result(&'a BmiOutcome),
}

#[derive(Debug, Default)]
pub struct Session {
    history: History,
    last_outcome: Option<BmiOutcome>,
    error: Option<String>,
    /// Marker position currently shown on the gauge
    marker: f64,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Handle one computation request
    ///
    /// On success the outcome is stored, a record appended and the gauge
    /// transition from the previous marker position returned. On failure the
    /// message is set and nothing else changes.
    pub fn submit(
        &mut self,
        weight_text: &str,
        height_text: &str,
        sex: SexAdjustment,
    ) -> Result<(&BmiRecord, GaugeTransition), ParseError> {
        self.error = None;

        let outcome = match evaluate(weight_text, height_text, sex) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, weight = weight_text, height = height_text, "rejected input");
                self.error = Some(err.user_message().to_string());
                return Err(err);
            }
        };

        let transition = GaugeTransition::new(self.marker, outcome.gauge_position);
        self.marker = outcome.gauge_position;

        info!(bmi = %outcome.bmi_display, category = %outcome.category, "BMI computed");

        let record = self.history.record(weight_text, height_text, sex, &outcome);
        self.last_outcome = Some(outcome);

        Ok((record, transition))
    }

    pub fn view(&self) -> ResultView<'_> {
        match (&self.error, &self.last_outcome) {
            (Some(message), _) => ResultView::Error(message),
            (None, Some(outcome)) => ResultView::Result(outcome),
            (None, None) => ResultView::Placeholder,
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn last_outcome(&self) -> Option<&BmiOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn marker(&self) -> f64 {
        self.marker
    }
}
