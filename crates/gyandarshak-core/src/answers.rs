//! Client-local answer sheet for an open attempt.

use std::collections::HashMap;

use crate::assessment::{AnswerIn, OptionLetter, Test};

/// Chosen option per question id.
///
/// Holds at most one selection per question. Unanswered questions have no
/// entry and are left out of the submission; they are never defaulted to an
/// option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selections: HashMap<i64, OptionLetter>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the option for a question. Returns the previous one.
    pub fn select(&mut self, question_id: i64, option: OptionLetter) -> Option<OptionLetter> {
        self.selections.insert(question_id, option)
    }

    /// Drop the selection for a question.
    pub fn clear_question(&mut self, question_id: i64) -> Option<OptionLetter> {
        self.selections.remove(&question_id)
    }

    pub fn get(&self, question_id: i64) -> Option<OptionLetter> {
        self.selections.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Answers to send for `test`, in question order.
    ///
    /// Selections for ids that are not part of the test are skipped.
    pub fn to_submission(&self, test: &Test) -> Vec<AnswerIn> {
        test.questions
            .iter()
            .filter_map(|q| {
                self.get(q.id).map(|selected_option| AnswerIn {
                    question_id: q.id,
                    selected_option,
                })
            })
            .collect()
    }

    /// Ids of the questions of `test` that have no selection yet.
    pub fn unanswered(&self, test: &Test) -> Vec<i64> {
        test.questions
            .iter()
            .map(|q| q.id)
            .filter(|id| !self.selections.contains_key(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Question;

    fn test_with(ids: &[i64]) -> Test {
        Test {
            id: 1,
            title: "Aptitude".into(),
            description: None,
            duration_minutes: 30,
            total_marks: ids.len() as u32,
            is_active: true,
            questions: ids
                .iter()
                .map(|&id| {
                    Question::new(
                        id,
                        format!("Q{id}"),
                        ["a".into(), "b".into(), "c".into(), "d".into()],
                        1,
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn reselect_keeps_latest_only() {
        let mut sheet = AnswerSheet::new();
        assert_eq!(sheet.select(10, OptionLetter::A), None);
        assert_eq!(sheet.select(10, OptionLetter::C), Some(OptionLetter::A));
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get(10), Some(OptionLetter::C));
    }

    #[test]
    fn submission_follows_question_order() {
        let test = test_with(&[3, 1, 2]);
        let mut sheet = AnswerSheet::new();
        sheet.select(2, OptionLetter::B);
        sheet.select(3, OptionLetter::D);
        sheet.select(1, OptionLetter::A);
        let ids: Vec<_> = sheet.to_submission(&test).iter().map(|a| a.question_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn submission_omits_unanswered_and_unknown() {
        let test = test_with(&[1, 2, 3]);
        let mut sheet = AnswerSheet::new();
        sheet.select(2, OptionLetter::B);
        sheet.select(99, OptionLetter::A);
        let submission = sheet.to_submission(&test);
        assert_eq!(
            submission,
            vec![AnswerIn {
                question_id: 2,
                selected_option: OptionLetter::B
            }]
        );
        assert_eq!(sheet.unanswered(&test), vec![1, 3]);
    }

    #[test]
    fn clear_question_removes_selection() {
        let mut sheet = AnswerSheet::new();
        sheet.select(5, OptionLetter::D);
        assert_eq!(sheet.clear_question(5), Some(OptionLetter::D));
        assert!(sheet.is_empty());
    }
}
