//! Question set and exam paper
//!
//! The built-in question list plus loading an alternative list from a
//! JSON file (an array of strings).

use crate::{ExamError, Result, EXAM_DURATION_SECS};
use std::fs;
use std::path::Path;

/// Questions shipped with the application
pub const BUILTIN_QUESTIONS: [&str; 5] = [
    "What is the capital of France?",
    "Which planet is closest to the Sun?",
    "What is the largest ocean on Earth?",
    "Who wrote Romeo and Juliet?",
    "What is the chemical symbol for Gold?",
];

/// Ordered, non-empty list of question texts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<String>,
}

impl QuestionSet {
    /// Build a question set, rejecting empty lists and blank questions
    pub fn new(questions: Vec<String>) -> Result<Self> {
        if questions.is_empty() {
            return Err(ExamError::QuestionSetError(
                "Question set must contain at least one question".to_string(),
            ));
        }

        if let Some(pos) = questions.iter().position(|q| q.trim().is_empty()) {
            return Err(ExamError::QuestionSetError(format!(
                "Question {} is blank",
                pos + 1
            )));
        }

        Ok(Self { questions })
    }

    /// The five built-in questions
    pub fn builtin() -> Self {
        Self {
            questions: BUILTIN_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }

    /// Load a question set from a JSON array of strings
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ExamError::QuestionSetError(format!(
                "Failed to read questions file {}: {}",
                path.display(),
                e
            ))
        })?;

        let questions: Vec<String> = serde_json::from_str(&content)?;
        Self::new(questions)
    }

    /// Number of questions (N)
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the set has no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question text at a 1-based index
    pub fn get(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.questions.get(i))
            .map(String::as_str)
    }
}

impl Default for QuestionSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Fixed inputs of one exam attempt: the questions and the time allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamPaper {
    pub questions: QuestionSet,
    pub duration_secs: u32,
}

impl ExamPaper {
    pub fn new(questions: QuestionSet, duration_secs: u32) -> Self {
        Self {
            questions,
            duration_secs,
        }
    }

    /// Number of questions
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

impl Default for ExamPaper {
    fn default() -> Self {
        Self::new(QuestionSet::builtin(), EXAM_DURATION_SECS)
    }
}
