//! Catalog and account types.
//!
//! These mirror the server's response schemas for colleges, exams,
//! scholarships, the student profile, and counselling session requests.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Student => write!(f, "student"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// New account details sent to the register call.
///
/// Custom Debug impl masks the password.
#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"***")
            .finish()
    }
}

impl Registration {
    /// Form problems to fix before sending. Empty when the form is valid.
    pub fn problems(&self) -> Vec<&'static str> {
        let mut problems = Vec::new();
        if self.full_name.trim().is_empty() {
            problems.push("Full name is required.");
        }
        let email = self.email.trim();
        if email.is_empty() {
            problems.push("Email is required.");
        } else if !looks_like_email(email) {
            problems.push("Enter a valid email address.");
        }
        if self.password.chars().count() < 6 {
            problems.push("Password should be at least 6 characters.");
        }
        problems
    }
}

/// `local@domain.tld` with no whitespace.
pub fn looks_like_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !s.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
}

/// Bearer token returned by the login call.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Counselling-relevant details of a student.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: i64,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub class_level: Option<String>,
    #[serde(default)]
    pub stream_interest: Option<String>,
    #[serde(default)]
    pub target_field: Option<String>,
}

/// The signed-in user together with their student profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub profile: Option<StudentProfile>,
}

/// Partial profile update. Unset fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_interest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_field: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ProfileUpdate::default()
    }
}

/// A course offered by a college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub duration_years: Option<f64>,
    #[serde(default)]
    pub approx_fee_total: Option<f64>,
    #[serde(default)]
    pub stream: Option<String>,
    #[serde(default)]
    pub entrance_exam: Option<String>,
    #[serde(default)]
    pub discount_available: Option<bool>,
    #[serde(default)]
    pub discount_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct College {
    pub id: i64,
    pub name: String,
    pub state: String,
    pub city: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub is_partner: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// A dated event of an entrance exam (registration, exam day, result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamDate {
    pub id: i64,
    pub year: i32,
    pub event_type: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub stream: Option<String>,
    #[serde(default)]
    pub official_website: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    #[serde(default)]
    pub description_hi: Option<String>,
    #[serde(default)]
    pub dates: Vec<ExamDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scholarship {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub provider_type: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub min_class_or_course: Option<String>,
    #[serde(default)]
    pub eligibility_summary_en: Option<String>,
    #[serde(default)]
    pub eligibility_summary_hi: Option<String>,
    #[serde(default)]
    pub amount_description: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub last_date: Option<NaiveDate>,
}

/// Query parameters of the college listing. Matching is done by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollegeFilter {
    pub state: Option<String>,
    pub city: Option<String>,
    pub stream: Option<String>,
}

impl CollegeFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        query_pairs([
            ("state", self.state.as_deref()),
            ("city", self.city.as_deref()),
            ("stream", self.stream.as_deref()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamFilter {
    pub year: Option<i32>,
    pub stream: Option<String>,
    pub level: Option<String>,
}

impl ExamFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let year = self.year.map(|y| y.to_string());
        query_pairs([
            ("year", year.as_deref()),
            ("stream", self.stream.as_deref()),
            ("level", self.level.as_deref()),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScholarshipFilter {
    pub level: Option<String>,
    pub state: Option<String>,
    pub provider_type: Option<String>,
}

impl ScholarshipFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        query_pairs([
            ("level", self.level.as_deref()),
            ("state", self.state.as_deref()),
            ("provider_type", self.provider_type.as_deref()),
        ])
    }
}

/// Keep only the parameters that carry a non-blank value.
fn query_pairs<const N: usize>(
    fields: [(&'static str, Option<&str>); N],
) -> Vec<(&'static str, String)> {
    fields
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value?.trim();
            (!value.is_empty()).then(|| (key, value.to_string()))
        })
        .collect()
}

/// A counselling session request as sent by the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequestDraft {
    pub preferred_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A stored counselling session request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub id: i64,
    pub preferred_date: NaiveDate,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Answer from the counselling assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}
