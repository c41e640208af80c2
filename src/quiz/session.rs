use std::collections::HashSet;

use super::generator::{QuestionGenerator, Result};
use super::models::Question;

/// Identifies one generation request. Only the newest ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Current practice batch and which answers are showing.
///
/// Each request replaces the batch wholesale; a failed or empty request
/// leaves exactly the fallback question.
#[derive(Debug, Default)]
pub struct QuizSession {
    questions: Vec<Question>,
    revealed: HashSet<i64>,
    loading: bool,
    latest: u64,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_revealed(&self, id: i64) -> bool {
        self.revealed.contains(&id)
    }

    /// Show or hide the answer for one question; returns the new state
    pub fn toggle_reveal(&mut self, id: i64) -> bool {
        if self.revealed.remove(&id) {
            false
        } else {
            self.revealed.insert(id);
            true
        }
    }

    /// Start a request. Clears the revealed set and supersedes any request
    /// still in flight.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.latest += 1;
        self.loading = true;
        self.revealed.clear();
        RequestTicket(self.latest)
    }

    /// Apply a finished request. Results for superseded tickets are dropped
    /// and `false` is returned.
    pub fn complete(&mut self, ticket: RequestTicket, result: Result<Vec<Question>>) -> bool {
        if ticket.0 != self.latest {
            log::debug!(
                "Discarding stale question batch {} (latest is {})",
                ticket.0,
                self.latest
            );
            return false;
        }

        self.questions = match result {
            Ok(batch) if !batch.is_empty() => batch,
            Ok(_) => {
                log::error!("Failed to generate questions: empty batch");
                vec![Question::fallback()]
            }
            Err(e) => {
                log::error!("Failed to generate questions: {}", e);
                vec![Question::fallback()]
            }
        };
        self.revealed.clear();
        self.loading = false;
        true
    }

    /// Run one request to completion against `generator`
    pub async fn generate(&mut self, generator: &dyn QuestionGenerator) {
        let ticket = self.begin_request();
        let result = generator.generate().await;
        self.complete(ticket, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::generator::QuizError;
    use crate::quiz::models::QuestionType;
    use async_trait::async_trait;

    struct FixedGenerator(fn() -> Result<Vec<Question>>);

    #[async_trait]
    impl QuestionGenerator for FixedGenerator {
        async fn generate(&self) -> Result<Vec<Question>> {
            (self.0)()
        }
    }

    fn question(id: i64, kind: QuestionType) -> Question {
        Question {
            id,
            kind,
            question: format!("question {}", id),
            code_context: None,
            answer: format!("answer {}", id),
            explanation: String::new(),
        }
    }

    fn batch() -> Result<Vec<Question>> {
        Ok(vec![
            question(10, QuestionType::ErrorSpotting),
            question(11, QuestionType::FillBlank),
            question(12, QuestionType::Concept),
        ])
    }

    #[tokio::test]
    async fn test_success_replaces_batch() {
        let mut session = QuizSession::new();
        session.generate(&FixedGenerator(batch)).await;
        assert_eq!(session.questions().len(), 3);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_malformed_response_falls_back() {
        let mut session = QuizSession::new();
        let malformed = FixedGenerator(|| Err(QuizError::Malformed("expected a sequence".into())));
        session.generate(&malformed).await;

        assert_eq!(session.questions().len(), 1);
        assert_eq!(session.questions()[0].kind, QuestionType::ErrorSpotting);
        assert_eq!(session.questions()[0], Question::fallback());
    }

    #[tokio::test]
    async fn test_empty_batch_falls_back() {
        let mut session = QuizSession::new();
        session.generate(&FixedGenerator(|| Ok(Vec::new()))).await;
        assert_eq!(session.questions(), &[Question::fallback()]);
    }

    #[tokio::test]
    async fn test_regenerate_replaces_without_merge() {
        let mut session = QuizSession::new();
        session.generate(&FixedGenerator(batch)).await;
        session.generate(&FixedGenerator(|| Err(QuizError::EmptyResponse))).await;
        assert_eq!(session.questions().len(), 1);
        session.generate(&FixedGenerator(batch)).await;
        assert_eq!(session.questions().len(), 3);
    }

    #[test]
    fn test_reveal_is_per_question_and_resets() {
        let mut session = QuizSession::new();
        let ticket = session.begin_request();
        session.complete(ticket, batch());

        assert!(session.toggle_reveal(10));
        assert!(session.toggle_reveal(12));
        assert!(session.is_revealed(10));
        assert!(!session.is_revealed(11));
        assert!(!session.toggle_reveal(10));
        assert!(!session.is_revealed(10));
        assert!(session.is_revealed(12));

        session.begin_request();
        assert!(!session.is_revealed(12));
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut session = QuizSession::new();
        let first = session.begin_request();
        let second = session.begin_request();

        assert!(session.complete(second, batch()));
        assert_eq!(session.questions().len(), 3);

        // The older request resolves late and must not overwrite newer state
        assert!(!session.complete(first, Err(QuizError::EmptyResponse)));
        assert_eq!(session.questions().len(), 3);
        assert!(!session.is_loading());
    }

    #[test]
    fn test_loading_until_latest_completes() {
        let mut session = QuizSession::new();
        let first = session.begin_request();
        let second = session.begin_request();
        assert!(!session.complete(first, batch()));
        assert!(session.is_loading());
        assert!(session.complete(second, batch()));
        assert!(!session.is_loading());
        assert!(second.seq() > first.seq());
    }
}
