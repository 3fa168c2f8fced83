//! Page flow for one user: Home → Predict → Result → Analysis.
//!
//! The session owns the form being edited and at most one assessment. Each
//! submission is stamped with a generation number; a reply whose generation
//! is no longer pending (the user navigated away, or the session was reset)
//! is discarded instead of overwriting what is on screen.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::advice::{Guidance, guidance};
use crate::analysis::{DerivedAnalysis, analyze};
use crate::backend::Oracle;
use crate::domain::{DomainSchema, RawForm, Sample, default_form};
use crate::error::{CkdError, PredictionError, Result};
use crate::model::{PatientRecord, PredictionVerdict};
use crate::predictor::Predictor;
use crate::validation::{BoundsPolicy, validate_form};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Predict,
    Result,
    Analysis,
}

/// A record together with the verdict obtained for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub record: PatientRecord,
    pub verdict: PredictionVerdict,
    pub received_at: DateTime<Utc>,
}

/// A validated record that has been handed to the predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    generation: u64,
    record: PatientRecord,
}

impl Submission {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }
}

/// What happened to a prediction reply.
#[derive(Debug, PartialEq)]
pub enum Completion {
    /// The verdict is now the current assessment
    Applied,
    /// The prediction failed; the session shows the generic message
    Failed(PredictionError),
    /// The submission was superseded; nothing changed
    Stale,
}

pub struct Session {
    page: Page,
    form: RawForm,
    policy: BoundsPolicy,
    schema: DomainSchema,
    generation: u64,
    pending: Option<u64>,
    error: Option<String>,
    assessment: Option<Assessment>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(BoundsPolicy::default())
    }
}

impl Session {
    pub fn new(policy: BoundsPolicy) -> Self {
        Self {
            page: Page::Home,
            form: default_form(),
            policy,
            schema: DomainSchema::standard(),
            generation: 0,
            pending: None,
            error: None,
            assessment: None,
        }
    }

    /// The page to render. Result and Analysis fall back to Home when no
    /// assessment is held.
    pub fn page(&self) -> Page {
        match self.page {
            Page::Result | Page::Analysis if self.assessment.is_none() => Page::Home,
            page => page,
        }
    }

    pub fn navigate(&mut self, page: Page) {
        let from = self.page();
        if from == page {
            return;
        }
        if from == Page::Predict {
            self.error = None;
            if let Some(generation) = self.pending.take() {
                warn!(generation, "Left the predict page with a prediction in flight");
            }
        }
        if page == Page::Predict {
            self.form = default_form();
        }
        debug!(from = ?from, to = ?page, "Navigating");
        self.page = page;
    }

    /// Return to the form for another prediction.
    pub fn new_prediction(&mut self) {
        self.navigate(Page::Predict);
    }

    pub fn form(&self) -> &RawForm {
        &self.form
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.form.insert(key.into(), value.into());
    }

    /// Replace the form with a canned sample.
    pub fn load_sample(&mut self, sample: Sample) {
        debug!(sample = sample.label(), "Loading sample into form");
        self.form = sample.to_form();
    }

    /// True while a submission awaits its reply; the submit control should be disabled.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Message for the last failed submission, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    pub fn guidance(&self) -> Option<Guidance> {
        self.assessment
            .as_ref()
            .map(|a| guidance(a.verdict.outcome()))
    }

    /// Analysis of the current assessment, recomputed on each call.
    pub fn analysis(&self) -> Option<DerivedAnalysis> {
        self.assessment
            .as_ref()
            .map(|a| analyze(&a.record, &a.verdict, &self.schema))
    }

    /// Validate the form and mark a prediction as in flight.
    ///
    /// Fails with [`CkdError::SubmissionPending`] while another submission is
    /// outstanding, and with [`CkdError::Validation`] before anything is sent.
    pub fn begin_submission(&mut self) -> Result<Submission> {
        if self.pending.is_some() {
            return Err(CkdError::SubmissionPending);
        }

        let record = validate_form(&self.form, &self.schema, self.policy).inspect_err(|e| {
            self.error = Some(e.to_string());
        })?;

        self.generation += 1;
        self.pending = Some(self.generation);
        self.error = None;
        if self.page != Page::Predict {
            self.page = Page::Predict;
        }
        info!(generation = self.generation, "Submission started");

        Ok(Submission {
            generation: self.generation,
            record,
        })
    }

    /// Apply the reply for `submission`, unless it has been superseded.
    pub fn complete_submission(
        &mut self,
        submission: Submission,
        result: std::result::Result<PredictionVerdict, PredictionError>,
    ) -> Completion {
        if self.pending != Some(submission.generation) {
            warn!(
                generation = submission.generation,
                pending = ?self.pending,
                "Discarding stale prediction reply"
            );
            return Completion::Stale;
        }
        self.pending = None;

        match result {
            Ok(verdict) => {
                info!(generation = submission.generation, outcome = %verdict.outcome(), "Prediction applied");
                self.assessment = Some(Assessment {
                    record: submission.record,
                    verdict,
                    received_at: Utc::now(),
                });
                self.page = Page::Result;
                Completion::Applied
            }
            Err(e) => {
                warn!(generation = submission.generation, error = %e, "Prediction failed");
                self.error = Some(e.user_message().to_string());
                Completion::Failed(e)
            }
        }
    }

    /// Validate, predict and apply in one step.
    ///
    /// The returned error carries the underlying cause and is meant for logs.
    /// Show users [`Session::error`] instead: after a failed prediction it
    /// holds only [`PREDICTION_FAILED_MESSAGE`](crate::PREDICTION_FAILED_MESSAGE),
    /// and after a validation failure it names the offending field.
    pub async fn submit<O: Oracle>(&mut self, predictor: &Predictor<O>) -> Result<PredictionVerdict> {
        let submission = self.begin_submission()?;
        let result = predictor.predict(submission.record()).await;
        match self.complete_submission(submission, result) {
            Completion::Applied => self
                .assessment
                .as_ref()
                .map(|a| a.verdict)
                .ok_or(CkdError::Prediction(PredictionError::EmptyResponse)),
            Completion::Failed(e) => Err(e.into()),
            Completion::Stale => Err(PredictionError::Cancelled.into()),
        }
    }
}
