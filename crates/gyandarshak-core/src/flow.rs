//! Test-attempt flow.
//!
//! Drives one student through an online test:
//!
//! ```text
//! Listing -> Answering -> Submitting -> Result -> Listing
//!                 ^            |
//!                 +-- failure -+
//! ```
//!
//! Answers live only in the flow. The test duration is display metadata;
//! nothing here submits on a deadline.
//!
//! Submission is split into [`TestFlow::begin_submit`] and
//! [`TestFlow::complete_submit`] so an event-driven front end can keep the
//! `Submitting` state on screen while the request is outstanding.
//! [`TestFlow::submit`] runs both around a single API call.

use tracing::{debug, warn};

use crate::answers::AnswerSheet;
use crate::assessment::{AnswerIn, OptionLetter, StartedAttempt, SubmitResult, Test};
use crate::error::{ApiError, FlowError};
use crate::traits::{CounsellingApi, Credential};

/// Which screen the flow is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Listing,
    Answering,
    Submitting,
    Result,
}

/// An attempt being answered.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAttempt {
    attempt_id: i64,
    test: Test,
    answers: AnswerSheet,
    in_flight: bool,
}

impl OpenAttempt {
    pub fn attempt_id(&self) -> i64 {
        self.attempt_id
    }

    pub fn test(&self) -> &Test {
        &self.test
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }
}

/// A submission handed out by [`TestFlow::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmit {
    pub attempt_id: i64,
    pub answers: Vec<AnswerIn>,
}

/// Scored attempt shown after a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptOutcome {
    pub test_title: String,
    pub result: SubmitResult,
}

#[derive(Debug, Clone, PartialEq)]
enum Screen {
    Listing,
    Attempt(OpenAttempt),
    Result(AttemptOutcome),
}

/// State of the online-test screen.
#[derive(Debug, Clone, PartialEq)]
pub struct TestFlow {
    screen: Screen,
    message: Option<String>,
}

impl Default for TestFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFlow {
    pub fn new() -> Self {
        Self {
            screen: Screen::Listing,
            message: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.screen {
            Screen::Listing => Phase::Listing,
            Screen::Attempt(open) if open.in_flight => Phase::Submitting,
            Screen::Attempt(_) => Phase::Answering,
            Screen::Result(_) => Phase::Result,
        }
    }

    /// Last error message, verbatim as reported.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The open attempt, while answering or submitting.
    pub fn attempt(&self) -> Option<&OpenAttempt> {
        match &self.screen {
            Screen::Attempt(open) => Some(open),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&AttemptOutcome> {
        match &self.screen {
            Screen::Result(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Open an attempt that was already started on the server.
    pub fn open(&mut self, started: StartedAttempt) -> Result<(), FlowError> {
        if !matches!(self.screen, Screen::Listing) {
            warn!(attempt_id = started.attempt_id, "attempt opened while another is open");
            return Err(FlowError::AttemptOpen);
        }
        debug!(
            attempt_id = started.attempt_id,
            test_id = started.test.id,
            questions = started.test.questions.len(),
            "attempt opened"
        );
        self.message = None;
        self.screen = Screen::Attempt(OpenAttempt {
            attempt_id: started.attempt_id,
            test: started.test,
            answers: AnswerSheet::new(),
            in_flight: false,
        });
        Ok(())
    }

    /// Start `test_id` on the server and open the returned attempt.
    ///
    /// On failure the flow stays on the listing and keeps the message.
    pub async fn start(
        &mut self,
        api: &dyn CounsellingApi,
        credential: &Credential,
        test_id: i64,
    ) -> Result<(), FlowError> {
        if !matches!(self.screen, Screen::Listing) {
            return Err(FlowError::AttemptOpen);
        }
        self.message = None;
        match api.start_test(credential, test_id).await {
            Ok(started) => self.open(started),
            Err(e) => {
                debug!(test_id, error = %e, "start failed");
                self.message = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Record or overwrite the option chosen for a question.
    pub fn select_option(
        &mut self,
        question_id: i64,
        option: OptionLetter,
    ) -> Result<Option<OptionLetter>, FlowError> {
        let open = self.open_attempt_mut()?;
        Ok(open.answers.select(question_id, option))
    }

    /// Remove the choice for a question, leaving it unanswered.
    pub fn clear_option(&mut self, question_id: i64) -> Result<Option<OptionLetter>, FlowError> {
        let open = self.open_attempt_mut()?;
        Ok(open.answers.clear_question(question_id))
    }

    /// Enter `Submitting` and hand out the answers to send.
    ///
    /// Fails with [`FlowError::SubmitInFlight`] while a previous submission
    /// is outstanding, so no second request is produced.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, FlowError> {
        let open = self.open_attempt_mut()?;
        let pending = PendingSubmit {
            attempt_id: open.attempt_id,
            answers: open.answers.to_submission(&open.test),
        };
        open.in_flight = true;
        self.message = None;
        debug!(
            attempt_id = pending.attempt_id,
            answered = pending.answers.len(),
            "submitting"
        );
        Ok(pending)
    }

    /// Settle the outstanding submission.
    ///
    /// Success moves to `Result` and drops the answers. Failure returns to
    /// `Answering` with the answers intact and the message kept.
    pub fn complete_submit(
        &mut self,
        outcome: Result<SubmitResult, ApiError>,
    ) -> Result<(), FlowError> {
        let Screen::Attempt(open) = &mut self.screen else {
            return Err(FlowError::NotSubmitting);
        };
        if !open.in_flight {
            return Err(FlowError::NotSubmitting);
        }
        open.in_flight = false;

        match outcome {
            Ok(result) => {
                debug!(attempt_id = open.attempt_id, %result, "attempt scored");
                let test_title = open.test.title.clone();
                self.screen = Screen::Result(AttemptOutcome { test_title, result });
                Ok(())
            }
            Err(e) => {
                debug!(attempt_id = open.attempt_id, error = %e, "submit failed");
                self.message = Some(e.user_message());
                Err(e.into())
            }
        }
    }

    /// Submit the current answers in one request.
    pub async fn submit(
        &mut self,
        api: &dyn CounsellingApi,
        credential: &Credential,
    ) -> Result<(), FlowError> {
        let pending = self.begin_submit()?;
        let outcome = api
            .submit_attempt(credential, pending.attempt_id, &pending.answers)
            .await;
        self.complete_submit(outcome)
    }

    /// Drop the open attempt and its answers without telling the server.
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        let open = self.open_attempt_mut()?;
        debug!(attempt_id = open.attempt_id, "attempt cancelled");
        self.screen = Screen::Listing;
        self.message = None;
        Ok(())
    }

    /// Leave the result screen.
    pub fn exit_result(&mut self) -> Result<(), FlowError> {
        if !matches!(self.screen, Screen::Result(_)) {
            return Err(FlowError::NoResult);
        }
        self.screen = Screen::Listing;
        self.message = None;
        Ok(())
    }

    fn open_attempt_mut(&mut self) -> Result<&mut OpenAttempt, FlowError> {
        match &mut self.screen {
            Screen::Attempt(open) if open.in_flight => {
                warn!(attempt_id = open.attempt_id, "rejected while submitting");
                Err(FlowError::SubmitInFlight)
            }
            Screen::Attempt(open) => Ok(open),
            _ => Err(FlowError::NotAnswering),
        }
    }
}
