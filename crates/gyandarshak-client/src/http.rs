//! HTTP implementation of [`CounsellingApi`].

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use gyandarshak_core::assessment::{AnswerIn, Attempt, StartedAttempt, SubmitResult, Test};
use gyandarshak_core::model::{
    AccessToken, AskResponse, College, CollegeFilter, Exam, ExamFilter, Profile, ProfileUpdate,
    Registration, Scholarship, ScholarshipFilter, SessionRequest, SessionRequestDraft, User,
};
use gyandarshak_core::{ApiError, CounsellingApi, Credential};

use crate::config::ClientConfig;
use crate::error::{from_status, from_transport};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Counselling API client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    answers: &'a [AnswerIn],
}

#[derive(Serialize)]
struct AskBody<'a> {
    question: &'a str,
}

impl HttpClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs,
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> anyhow::Result<Self> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{path}", self.base_url))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{path}", self.base_url))
    }

    fn patch(&self, path: &str) -> RequestBuilder {
        self.client.patch(format!("{}{path}", self.base_url))
    }

    /// Send a request and decode a JSON body, or map the failure.
    ///
    /// `fallback` is shown when the server gives no message of its own.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| from_transport(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %body, "request rejected");
            return Err(from_status(status.as_u16(), &body, fallback));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn authorized(request: RequestBuilder, credential: &Credential) -> RequestBuilder {
    request.header(AUTHORIZATION, credential.header_value())
}

#[async_trait]
impl CounsellingApi for HttpClient {
    #[instrument(skip_all, fields(email = %registration.email))]
    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        self.send(
            self.post("/auth/register").json(registration),
            "Could not register. Please try again.",
        )
        .await
    }

    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError> {
        let form = [
            ("username", email),
            ("password", password),
            ("grant_type", "password"),
        ];
        self.send(
            self.post("/auth/login").form(&form),
            "Login failed. Please check your details and try again.",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn profile(&self, credential: &Credential) -> Result<Profile, ApiError> {
        self.send(
            authorized(self.get("/students/me"), credential),
            "Failed to load profile",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn update_profile(
        &self,
        credential: &Credential,
        update: &ProfileUpdate,
    ) -> Result<Profile, ApiError> {
        self.send(
            authorized(self.patch("/students/me"), credential).json(update),
            "Could not update profile",
        )
        .await
    }

    #[instrument(skip(self))]
    async fn colleges(&self, filter: &CollegeFilter) -> Result<Vec<College>, ApiError> {
        self.send(
            self.get("/colleges").query(&filter.query_pairs()),
            "Failed to load colleges",
        )
        .await
    }

    #[instrument(skip(self))]
    async fn exams(&self, filter: &ExamFilter) -> Result<Vec<Exam>, ApiError> {
        self.send(
            self.get("/exams").query(&filter.query_pairs()),
            "Failed to load exams",
        )
        .await
    }

    #[instrument(skip(self))]
    async fn scholarships(
        &self,
        filter: &ScholarshipFilter,
    ) -> Result<Vec<Scholarship>, ApiError> {
        self.send(
            self.get("/scholarships").query(&filter.query_pairs()),
            "Failed to load scholarships",
        )
        .await
    }

    #[instrument(skip(self, credential))]
    async fn request_session(
        &self,
        credential: &Credential,
        draft: &SessionRequestDraft,
    ) -> Result<SessionRequest, ApiError> {
        self.send(
            authorized(self.post("/sessions"), credential).json(draft),
            "Could not send request",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn my_sessions(&self, credential: &Credential) -> Result<Vec<SessionRequest>, ApiError> {
        self.send(
            authorized(self.get("/sessions/mine"), credential),
            "Failed to load your requests",
        )
        .await
    }

    #[instrument(skip(self))]
    async fn ask(&self, question: &str) -> Result<AskResponse, ApiError> {
        self.send(
            self.post("/ai/ask").json(&AskBody { question }),
            "Error contacting assistant",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn tests(&self, credential: &Credential) -> Result<Vec<Test>, ApiError> {
        self.send(
            authorized(self.get("/tests"), credential),
            "Failed to load tests",
        )
        .await
    }

    #[instrument(skip(self, credential))]
    async fn start_test(
        &self,
        credential: &Credential,
        test_id: i64,
    ) -> Result<StartedAttempt, ApiError> {
        self.send(
            authorized(self.post(&format!("/tests/{test_id}/start")), credential)
                .json(&serde_json::json!({})),
            "Could not start test",
        )
        .await
    }

    #[instrument(skip(self, credential, answers), fields(answered = answers.len()))]
    async fn submit_attempt(
        &self,
        credential: &Credential,
        attempt_id: i64,
        answers: &[AnswerIn],
    ) -> Result<SubmitResult, ApiError> {
        self.send(
            authorized(
                self.post(&format!("/tests/attempts/{attempt_id}/submit")),
                credential,
            )
            .json(&SubmitBody { answers }),
            "Error submitting test",
        )
        .await
    }

    #[instrument(skip_all)]
    async fn my_attempts(&self, credential: &Credential) -> Result<Vec<Attempt>, ApiError> {
        self.send(
            authorized(self.get("/tests/my-attempts"), credential),
            "Failed to load history",
        )
        .await
    }
}
