//! The `tests` commands: listing, history, and taking a test.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gyandarshak_core::assessment::{Attempt, OptionLetter, SubmitResult, Test};
use gyandarshak_core::flow::TestFlow;
use gyandarshak_core::{CounsellingApi, Credential, FlowError};

use super::{api_error, or_dash, Context};

/// How an interactive attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptEnd {
    Scored(SubmitResult),
    Cancelled,
}

pub async fn list(config_path: Option<PathBuf>) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let credential = ctx.config.require_credential()?;
    let tests = ctx.api.tests(&credential).await.map_err(api_error)?;

    if tests.is_empty() {
        println!("No tests available yet.");
    } else {
        println!("{}", test_table(&tests));
        println!("Start one with: gyandarshak tests take <ID>");
    }
    Ok(())
}

pub async fn history(config_path: Option<PathBuf>) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let credential = ctx.config.require_credential()?;
    let attempts = ctx.api.my_attempts(&credential).await.map_err(api_error)?;

    if attempts.is_empty() {
        println!("No attempts yet.");
    } else {
        println!("{}", history_table(&attempts));
    }
    Ok(())
}

pub async fn take(config_path: Option<PathBuf>, test_id: i64) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let credential = ctx.config.require_credential()?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    run_attempt(&ctx.api, &credential, test_id, &mut input, &mut output).await?;
    Ok(())
}

/// Start `test_id`, collect answers line by line from `input`, and submit.
///
/// A blank line skips a question. Input ending before a submit cancels the
/// attempt; nothing is sent in that case.
pub async fn run_attempt<R: BufRead, W: Write>(
    api: &dyn CounsellingApi,
    credential: &Credential,
    test_id: i64,
    input: &mut R,
    out: &mut W,
) -> Result<AttemptEnd> {
    let mut flow = TestFlow::new();
    if flow.start(api, credential, test_id).await.is_err() {
        anyhow::bail!("{}", flow.message().unwrap_or("Could not start test"));
    }
    let Some(test) = flow.attempt().map(|open| open.test().clone()) else {
        anyhow::bail!("Could not start test");
    };

    writeln!(out, "{}", test.title)?;
    if let Some(description) = test.description.as_deref().filter(|d| !d.trim().is_empty()) {
        writeln!(out, "{description}")?;
    }
    writeln!(
        out,
        "Duration: {} minutes (not enforced) • Total marks: {}",
        test.duration_minutes, test.total_marks
    )?;
    writeln!(
        out,
        "{} questions. Enter A-D for each, or leave blank to skip.",
        test.questions.len()
    )?;

    let mut input_ended = answer_questions(&mut flow, &test, input, out)?;

    loop {
        if input_ended {
            flow.cancel()?;
            writeln!(
                out,
                "\nInput ended before submitting. Attempt cancelled; no answers were sent."
            )?;
            return Ok(AttemptEnd::Cancelled);
        }

        let answered = flow.attempt().map_or(0, |open| open.answers().len());
        let unanswered = unanswered_labels(&flow, &test);
        if !unanswered.is_empty() {
            write!(out, "\nUnanswered: {}", unanswered.join(", "))?;
        }
        write!(
            out,
            "\nAnswered {answered} of {}. [s]ubmit, [r]eview answers, or [c]ancel: ",
            test.questions.len()
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            input_ended = true;
            continue;
        }

        match line.trim().to_lowercase().as_str() {
            "s" | "submit" => {
                writeln!(out, "Submitting...")?;
                match flow.submit(api, credential).await {
                    Ok(()) => {
                        let Some(outcome) = flow.outcome().cloned() else {
                            anyhow::bail!("submission finished without a result");
                        };
                        writeln!(out, "\n{} – Result", outcome.test_title)?;
                        writeln!(out, "Score: {}", outcome.result)?;
                        writeln!(out, "See all attempts with: gyandarshak tests history")?;
                        flow.exit_result()?;
                        return Ok(AttemptEnd::Scored(outcome.result));
                    }
                    Err(FlowError::Api(_)) => {
                        let message = flow.message().unwrap_or("Error submitting test");
                        writeln!(out, "Error: {message}")?;
                        writeln!(out, "Your answers are kept. You can submit again or cancel.")?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            "r" | "review" => {
                input_ended = answer_questions(&mut flow, &test, input, out)?;
            }
            "c" | "cancel" => {
                flow.cancel()?;
                writeln!(out, "Attempt cancelled. No answers were sent.")?;
                return Ok(AttemptEnd::Cancelled);
            }
            _ => writeln!(out, "Please enter s, r or c.")?,
        }
    }
}

/// Ask every question once. Returns `true` if the input ran out.
fn answer_questions<R: BufRead, W: Write>(
    flow: &mut TestFlow,
    test: &Test,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    for (idx, question) in test.questions.iter().enumerate() {
        let marks = if question.marks == 1 { "mark" } else { "marks" };
        writeln!(
            out,
            "\nQ{}. {} ({} {marks})",
            idx + 1,
            question.text,
            question.marks
        )?;
        for (letter, text) in question.options() {
            writeln!(out, "  {letter}. {text}")?;
        }

        loop {
            let current = flow
                .attempt()
                .and_then(|open| open.answers().get(question.id));
            match current {
                Some(chosen) => write!(out, "Answer [A-D, blank keeps {chosen}, - clears]: ")?,
                None => write!(out, "Answer [A-D, blank to skip]: ")?,
            }
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(true);
            }
            let line = line.trim();
            if line.is_empty() {
                break;
            }
            if line == "-" {
                flow.clear_option(question.id)?;
                break;
            }
            match line.parse::<OptionLetter>() {
                Ok(letter) => {
                    flow.select_option(question.id, letter)?;
                    break;
                }
                Err(_) => writeln!(out, "Please enter A, B, C or D.")?,
            }
        }
    }
    Ok(false)
}

/// `Q<n>` labels of the questions still without an answer.
fn unanswered_labels(flow: &TestFlow, test: &Test) -> Vec<String> {
    let Some(open) = flow.attempt() else {
        return Vec::new();
    };
    let missing = open.answers().unanswered(test);
    test.questions
        .iter()
        .enumerate()
        .filter(|(_, q)| missing.contains(&q.id))
        .map(|(idx, _)| format!("Q{}", idx + 1))
        .collect()
}

fn test_table(tests: &[Test]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Duration", "Marks", "Description"]);

    for test in tests {
        table.add_row(vec![
            Cell::new(test.id),
            Cell::new(&test.title),
            Cell::new(format!("{} min", test.duration_minutes)),
            Cell::new(test.total_marks),
            Cell::new(or_dash(test.description.as_deref())),
        ]);
    }
    table
}

fn history_table(attempts: &[Attempt]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Test", "Score", "Started", "Finished"]);

    for attempt in attempts {
        let finished = attempt
            .finished_at
            .map(|t| t.format("%d %b %Y %H:%M").to_string())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&attempt.test_title),
            Cell::new(attempt.score_label()),
            Cell::new(attempt.started_at.format("%d %b %Y %H:%M")),
            Cell::new(or_dash(Some(finished.as_str()))),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyandarshak_client::MockApi;
    use gyandarshak_core::assessment::{AnswerIn, Question};
    use gyandarshak_core::ApiError;
    use std::io::Cursor;

    const TOKEN: &str = "tok";

    fn sample_test() -> Test {
        Test {
            id: 1,
            title: "Career aptitude".into(),
            description: Some("Ten minute warm-up".into()),
            duration_minutes: 10,
            total_marks: 3,
            is_active: true,
            questions: (1..=3)
                .map(|id| {
                    Question::new(
                        id,
                        format!("Question {id}"),
                        ["p".into(), "q".into(), "r".into(), "s".into()],
                        1,
                    )
                })
                .collect(),
        }
    }

    async fn run(api: &MockApi, script: &str) -> (Result<AttemptEnd>, String) {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let res = run_attempt(api, &Credential::bearer(TOKEN), 1, &mut input, &mut out).await;
        (res, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn answers_skip_and_submit() {
        let api = MockApi::new(TOKEN, vec![sample_test()]);
        api.push_submit_outcome(Ok(SubmitResult {
            attempt_id: 1,
            score: 2,
            total_marks: 3,
        }));

        let (res, out) = run(&api, "a\n\nx\nc\ns\n").await;
        assert_eq!(
            res.unwrap(),
            AttemptEnd::Scored(SubmitResult {
                attempt_id: 1,
                score: 2,
                total_marks: 3
            })
        );
        assert!(out.contains("Please enter A, B, C or D."));
        assert!(out.contains("Score: 2 / 3"));
        assert!(out.contains("(not enforced)"));
        assert_eq!(
            api.last_submission().unwrap(),
            vec![
                AnswerIn {
                    question_id: 1,
                    selected_option: OptionLetter::A
                },
                AnswerIn {
                    question_id: 3,
                    selected_option: OptionLetter::C
                },
            ]
        );
    }

    #[tokio::test]
    async fn failed_submit_can_be_retried() {
        let api = MockApi::new(TOKEN, vec![sample_test()]);
        api.push_submit_outcome(Err(ApiError::Rejected {
            status: 400,
            message: "Attempt already submitted".into(),
        }));

        let (res, out) = run(&api, "b\nb\nb\ns\ns\n").await;
        assert!(matches!(res.unwrap(), AttemptEnd::Scored(_)));
        assert!(out.contains("Error: Attempt already submitted"));
        assert_eq!(api.submit_calls(), 2);
        assert_eq!(api.last_submission().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn cancel_sends_nothing() {
        let api = MockApi::new(TOKEN, vec![sample_test()]);
        let (res, out) = run(&api, "a\nb\nc\nc\n").await;
        assert_eq!(res.unwrap(), AttemptEnd::Cancelled);
        assert!(out.contains("No answers were sent"));
        assert_eq!(api.submit_calls(), 0);
    }

    #[tokio::test]
    async fn input_end_cancels() {
        let api = MockApi::new(TOKEN, vec![sample_test()]);
        let (res, _) = run(&api, "a\n").await;
        assert_eq!(res.unwrap(), AttemptEnd::Cancelled);
        assert_eq!(api.submit_calls(), 0);
    }

    #[tokio::test]
    async fn review_overwrites_previous_choice() {
        let api = MockApi::new(TOKEN, vec![sample_test()]);
        let (res, out) = run(&api, "a\nb\nc\nr\nd\n\n\ns\n").await;
        assert!(matches!(res.unwrap(), AttemptEnd::Scored(_)));
        assert!(out.contains("blank keeps A"));
        let sent = api.last_submission().unwrap();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].selected_option, OptionLetter::D);
        assert_eq!(sent[1].selected_option, OptionLetter::B);
    }

    #[tokio::test]
    async fn unanswered_questions_are_listed_before_submit() {
        let api = MockApi::new(TOKEN, vec![sample_test()]);
        let (res, out) = run(&api, "\nb\n\ns\n").await;
        assert!(matches!(res.unwrap(), AttemptEnd::Scored(_)));
        assert!(out.contains("Unanswered: Q1, Q3"));
        assert_eq!(api.last_submission().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn dash_clears_a_choice_on_review() {
        let api = MockApi::new(TOKEN, vec![sample_test()]);
        let (res, out) = run(&api, "a\nb\nc\nr\n-\n\n\ns\n").await;
        assert!(matches!(res.unwrap(), AttemptEnd::Scored(_)));
        assert!(out.contains("Unanswered: Q1"));
        assert_eq!(
            api.last_submission().unwrap(),
            vec![
                AnswerIn {
                    question_id: 2,
                    selected_option: OptionLetter::B
                },
                AnswerIn {
                    question_id: 3,
                    selected_option: OptionLetter::C
                },
            ]
        );
    }

    #[tokio::test]
    async fn unknown_test_reports_server_message() {
        let api = MockApi::new(TOKEN, vec![]);
        let (res, _) = run(&api, "").await;
        assert_eq!(res.unwrap_err().to_string(), "Test not found");
    }

    #[test]
    fn history_shows_unscored_attempts() {
        let attempt = Attempt {
            attempt_id: 1,
            test_id: 1,
            test_title: "Career aptitude".into(),
            score: None,
            total_marks: 3,
            started_at: chrono::NaiveDate::from_ymd_opt(2026, 1, 5)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            finished_at: None,
        };
        let rendered = history_table(&[attempt]).to_string();
        assert!(rendered.contains("Not evaluated"));
        assert!(rendered.contains("05 Jan 2026 10:00"));
    }
}
