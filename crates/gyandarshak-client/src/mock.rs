//! In-memory API for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use gyandarshak_core::assessment::{AnswerIn, Attempt, StartedAttempt, SubmitResult, Test};
use gyandarshak_core::model::{
    AccessToken, AskResponse, College, CollegeFilter, Exam, ExamFilter, Profile, ProfileUpdate,
    Registration, Role, Scholarship, ScholarshipFilter, SessionRequest, SessionRequestDraft,
    StudentProfile, User,
};
use gyandarshak_core::{ApiError, CounsellingApi, Credential};

/// A mock counselling API for exercising the flow and the CLI logic without
/// a server.
///
/// Submissions answer from a queue of canned outcomes; with an empty queue
/// they score zero.
pub struct MockApi {
    tests: Vec<Test>,
    colleges: Vec<College>,
    token: String,
    submit_outcomes: Mutex<VecDeque<Result<SubmitResult, ApiError>>>,
    next_attempt_id: AtomicI64,
    start_calls: AtomicU32,
    submit_calls: AtomicU32,
    last_submission: Mutex<Option<Vec<AnswerIn>>>,
    history: Mutex<Vec<Attempt>>,
}

impl MockApi {
    /// Create a mock serving `tests` and accepting the bearer token `token`.
    pub fn new(token: &str, tests: Vec<Test>) -> Self {
        Self {
            tests,
            colleges: Vec::new(),
            token: token.to_string(),
            submit_outcomes: Mutex::new(VecDeque::new()),
            next_attempt_id: AtomicI64::new(1),
            start_calls: AtomicU32::new(0),
            submit_calls: AtomicU32::new(0),
            last_submission: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn with_colleges(mut self, colleges: Vec<College>) -> Self {
        self.colleges = colleges;
        self
    }

    /// Queue the outcome of the next submission.
    pub fn push_submit_outcome(&self, outcome: Result<SubmitResult, ApiError>) {
        self.submit_outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn start_calls(&self) -> u32 {
        self.start_calls.load(Ordering::Relaxed)
    }

    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::Relaxed)
    }

    /// Answers of the most recent submission.
    pub fn last_submission(&self) -> Option<Vec<AnswerIn>> {
        self.last_submission.lock().unwrap().clone()
    }

    fn check(&self, credential: &Credential) -> Result<(), ApiError> {
        if credential.token() == self.token {
            Ok(())
        } else {
            Err(ApiError::Unauthorized("Could not validate credentials".into()))
        }
    }

    fn user(&self) -> User {
        User {
            id: 1,
            full_name: "Mock Student".into(),
            email: "student@example.com".into(),
            phone: None,
            role: Role::Student,
        }
    }
}

#[async_trait]
impl CounsellingApi for MockApi {
    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        Ok(User {
            full_name: registration.full_name.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            ..self.user()
        })
    }

    async fn login(&self, _email: &str, password: &str) -> Result<AccessToken, ApiError> {
        if password.is_empty() {
            return Err(ApiError::Unauthorized("Incorrect email or password".into()));
        }
        Ok(AccessToken {
            access_token: self.token.clone(),
            token_type: "bearer".into(),
        })
    }

    async fn profile(&self, credential: &Credential) -> Result<Profile, ApiError> {
        self.check(credential)?;
        let user = self.user();
        Ok(Profile {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            profile: Some(StudentProfile {
                id: 1,
                ..Default::default()
            }),
        })
    }

    async fn update_profile(
        &self,
        credential: &Credential,
        update: &ProfileUpdate,
    ) -> Result<Profile, ApiError> {
        let mut profile = self.profile(credential).await?;
        if let Some(name) = &update.full_name {
            profile.full_name = name.clone();
        }
        if let Some(details) = profile.profile.as_mut() {
            details.state = update.state.clone().or(details.state.take());
            details.district = update.district.clone().or(details.district.take());
            details.class_level = update.class_level.clone().or(details.class_level.take());
            details.stream_interest = update
                .stream_interest
                .clone()
                .or(details.stream_interest.take());
            details.target_field = update.target_field.clone().or(details.target_field.take());
        }
        Ok(profile)
    }

    async fn colleges(&self, _filter: &CollegeFilter) -> Result<Vec<College>, ApiError> {
        Ok(self.colleges.clone())
    }

    async fn exams(&self, _filter: &ExamFilter) -> Result<Vec<Exam>, ApiError> {
        Ok(Vec::new())
    }

    async fn scholarships(
        &self,
        _filter: &ScholarshipFilter,
    ) -> Result<Vec<Scholarship>, ApiError> {
        Ok(Vec::new())
    }

    async fn request_session(
        &self,
        credential: &Credential,
        draft: &SessionRequestDraft,
    ) -> Result<SessionRequest, ApiError> {
        self.check(credential)?;
        Ok(SessionRequest {
            id: 1,
            preferred_date: draft.preferred_date,
            preferred_time: draft.preferred_time.clone(),
            mode: draft.mode.clone(),
            note: draft.note.clone(),
            status: "pending".into(),
            created_at: Utc::now().naive_utc(),
        })
    }

    async fn my_sessions(&self, credential: &Credential) -> Result<Vec<SessionRequest>, ApiError> {
        self.check(credential)?;
        Ok(Vec::new())
    }

    async fn ask(&self, _question: &str) -> Result<AskResponse, ApiError> {
        Ok(AskResponse {
            answer: "This is a mock answer.".into(),
        })
    }

    async fn tests(&self, credential: &Credential) -> Result<Vec<Test>, ApiError> {
        self.check(credential)?;
        Ok(self.tests.clone())
    }

    async fn start_test(
        &self,
        credential: &Credential,
        test_id: i64,
    ) -> Result<StartedAttempt, ApiError> {
        self.start_calls.fetch_add(1, Ordering::Relaxed);
        self.check(credential)?;
        let test = self
            .tests
            .iter()
            .find(|t| t.id == test_id)
            .cloned()
            .ok_or_else(|| ApiError::Rejected {
                status: 404,
                message: "Test not found".into(),
            })?;
        let attempt_id = self.next_attempt_id.fetch_add(1, Ordering::Relaxed);
        self.history.lock().unwrap().push(Attempt {
            attempt_id,
            test_id,
            test_title: test.title.clone(),
            score: None,
            total_marks: test.total_marks,
            started_at: Utc::now().naive_utc(),
            finished_at: None,
        });
        Ok(StartedAttempt { attempt_id, test })
    }

    async fn submit_attempt(
        &self,
        credential: &Credential,
        attempt_id: i64,
        answers: &[AnswerIn],
    ) -> Result<SubmitResult, ApiError> {
        self.submit_calls.fetch_add(1, Ordering::Relaxed);
        self.check(credential)?;
        *self.last_submission.lock().unwrap() = Some(answers.to_vec());

        let mut history = self.history.lock().unwrap();
        let Some(attempt) = history.iter_mut().find(|a| a.attempt_id == attempt_id) else {
            return Err(ApiError::Rejected {
                status: 404,
                message: "Attempt not found".into(),
            });
        };

        let queued = self.submit_outcomes.lock().unwrap().pop_front();
        let outcome = queued.unwrap_or(Ok(SubmitResult {
            attempt_id,
            score: 0,
            total_marks: attempt.total_marks,
        }));
        if let Ok(result) = &outcome {
            attempt.score = Some(result.score);
            attempt.finished_at = Some(Utc::now().naive_utc());
        }
        outcome
    }

    async fn my_attempts(&self, credential: &Credential) -> Result<Vec<Attempt>, ApiError> {
        self.check(credential)?;
        let mut attempts = self.history.lock().unwrap().clone();
        attempts.reverse();
        Ok(attempts)
    }
}
