//! Online test types: tests, questions, attempts, and submission payloads.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One of the four answer options of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    /// All options in display order.
    pub const ALL: [OptionLetter; 4] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
    ];

    fn index(self) -> usize {
        match self {
            OptionLetter::A => 0,
            OptionLetter::B => 1,
            OptionLetter::C => 2,
            OptionLetter::D => 3,
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionLetter::A => write!(f, "A"),
            OptionLetter::B => write!(f, "B"),
            OptionLetter::C => write!(f, "C"),
            OptionLetter::D => write!(f, "D"),
        }
    }
}

impl FromStr for OptionLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(OptionLetter::A),
            "B" => Ok(OptionLetter::B),
            "C" => Ok(OptionLetter::C),
            "D" => Ok(OptionLetter::D),
            other => Err(format!("unknown option: {other}")),
        }
    }
}

/// A multiple-choice question as shown during an attempt.
///
/// The server's `option_a`..`option_d` fields are folded into a lookup keyed
/// by [`OptionLetter`]. Any correct-answer field in the payload is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QuestionWire", into = "QuestionWire")]
pub struct Question {
    pub id: i64,
    pub text: String,
    options: [String; 4],
    pub marks: u32,
}

impl Question {
    pub fn new(id: i64, text: impl Into<String>, options: [String; 4], marks: u32) -> Self {
        Self {
            id,
            text: text.into(),
            options,
            marks,
        }
    }

    /// Text of a single option.
    pub fn option(&self, letter: OptionLetter) -> &str {
        &self.options[letter.index()]
    }

    /// Options in A..D order.
    pub fn options(&self) -> impl Iterator<Item = (OptionLetter, &str)> {
        OptionLetter::ALL
            .into_iter()
            .map(move |letter| (letter, self.option(letter)))
    }
}

#[derive(Serialize, Deserialize)]
struct QuestionWire {
    id: i64,
    text: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    #[serde(default = "default_marks")]
    marks: u32,
}

fn default_marks() -> u32 {
    1
}

impl From<QuestionWire> for Question {
    fn from(w: QuestionWire) -> Self {
        Question {
            id: w.id,
            text: w.text,
            options: [w.option_a, w.option_b, w.option_c, w.option_d],
            marks: w.marks,
        }
    }
}

impl From<Question> for QuestionWire {
    fn from(q: Question) -> Self {
        let [option_a, option_b, option_c, option_d] = q.options;
        QuestionWire {
            id: q.id,
            text: q.text,
            option_a,
            option_b,
            option_c,
            option_d,
            marks: q.marks,
        }
    }
}

/// A named set of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Shown to the student; not enforced by the client.
    pub duration_minutes: u32,
    pub total_marks: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub questions: Vec<Question>,
}

fn default_true() -> bool {
    true
}

/// Response of the start call: a fresh attempt and the test to answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedAttempt {
    pub attempt_id: i64,
    pub test: Test,
}

/// A past or running attempt as listed in the student's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub attempt_id: i64,
    pub test_id: i64,
    pub test_title: String,
    /// `None` until the server has scored the attempt.
    #[serde(default)]
    pub score: Option<u32>,
    pub total_marks: u32,
    pub started_at: NaiveDateTime,
    #[serde(default)]
    pub finished_at: Option<NaiveDateTime>,
}

impl Attempt {
    /// "3/5" once scored, "Not evaluated" before.
    pub fn score_label(&self) -> String {
        match self.score {
            Some(score) => format!("{score}/{}", self.total_marks),
            None => "Not evaluated".to_string(),
        }
    }
}

/// One answered question in a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerIn {
    pub question_id: i64,
    pub selected_option: OptionLetter,
}

/// Body of the submit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub answers: Vec<AnswerIn>,
}

/// Score returned by the submit call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    #[serde(default)]
    pub attempt_id: i64,
    pub score: u32,
    pub total_marks: u32,
}

impl fmt::Display for SubmitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.score, self.total_marks)
    }
}
