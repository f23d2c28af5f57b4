//! The counselling API seam.
//!
//! `CounsellingApi` is implemented by the HTTP client and by the in-memory
//! mock in `gyandarshak-client`. Authorized calls take the [`Credential`]
//! explicitly instead of reading it from shared state.

use std::fmt;

use async_trait::async_trait;

use crate::assessment::{AnswerIn, Attempt, StartedAttempt, SubmitResult, Test};
use crate::error::ApiError;
use crate::model::{
    AccessToken, AskResponse, College, CollegeFilter, Exam, ExamFilter, Profile, ProfileUpdate,
    Registration, Scholarship, ScholarshipFilter, SessionRequest, SessionRequestDraft, User,
};

/// Bearer credential for authorized calls.
///
/// Custom Debug impl masks the token to keep it out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl From<AccessToken> for Credential {
    fn from(token: AccessToken) -> Self {
        Credential::bearer(token.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential").field("token", &"***").finish()
    }
}

/// Client-side view of the counselling platform's HTTP API.
#[async_trait]
pub trait CounsellingApi: Send + Sync {
    // -- accounts ---------------------------------------------------------

    async fn register(&self, registration: &Registration) -> Result<User, ApiError>;

    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError>;

    async fn profile(&self, credential: &Credential) -> Result<Profile, ApiError>;

    async fn update_profile(
        &self,
        credential: &Credential,
        update: &ProfileUpdate,
    ) -> Result<Profile, ApiError>;

    // -- catalog ----------------------------------------------------------

    async fn colleges(&self, filter: &CollegeFilter) -> Result<Vec<College>, ApiError>;

    async fn exams(&self, filter: &ExamFilter) -> Result<Vec<Exam>, ApiError>;

    async fn scholarships(&self, filter: &ScholarshipFilter)
        -> Result<Vec<Scholarship>, ApiError>;

    // -- counselling sessions ---------------------------------------------

    async fn request_session(
        &self,
        credential: &Credential,
        draft: &SessionRequestDraft,
    ) -> Result<SessionRequest, ApiError>;

    async fn my_sessions(&self, credential: &Credential) -> Result<Vec<SessionRequest>, ApiError>;

    /// Ask the counselling assistant a free-form question.
    async fn ask(&self, question: &str) -> Result<AskResponse, ApiError>;

    // -- online tests -----------------------------------------------------

    async fn tests(&self, credential: &Credential) -> Result<Vec<Test>, ApiError>;

    /// Open a new attempt. The returned test carries no correct answers.
    async fn start_test(
        &self,
        credential: &Credential,
        test_id: i64,
    ) -> Result<StartedAttempt, ApiError>;

    /// Submit the full answer set of an attempt in one request.
    async fn submit_attempt(
        &self,
        credential: &Credential,
        attempt_id: i64,
        answers: &[AnswerIn],
    ) -> Result<SubmitResult, ApiError>;

    async fn my_attempts(&self, credential: &Credential) -> Result<Vec<Attempt>, ApiError>;
}
