//! AI-generated practice questions
//!
//! This module provides:
//! - Question models matching the generator's JSON shape
//! - The `QuestionGenerator` trait and its Gemini HTTP implementation
//! - `QuizSession`: current batch, revealed answers, fallback on failure
//! - Background tasks that supersede and discard stale requests

pub mod generator;
pub mod models;
pub mod session;
pub mod task;

pub use generator::{parse_questions, GeminiGenerator, QuestionGenerator, QuizError};
pub use models::{Question, QuestionType};
pub use session::{QuizSession, RequestTicket};
pub use task::{GenerationTask, QuizRunner};
