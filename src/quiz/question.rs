//! Question bank
//!
//! Immutable, validated set of multiple-choice questions. Content is either
//! the compiled-in bank or a JSON list of `{text, answers, correctIndex}`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{QuizError, Result};

/// Minimum number of answers a question must offer
pub const MIN_ANSWERS: usize = 2;

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    text: String,
    answers: Vec<String>,
    #[serde(rename = "correctIndex")]
    correct_index: usize,
}

impl Question {
    /// Create a validated question
    pub fn new<S: Into<String>>(text: S, answers: Vec<String>, correct_index: usize) -> Result<Self> {
        let question = Self {
            text: text.into(),
            answers,
            correct_index,
        };
        question.validate()?;
        Ok(question)
    }

    fn validate(&self) -> Result<()> {
        if self.answers.len() < MIN_ANSWERS {
            return Err(QuizError::InvalidContent(format!(
                "question \"{}\" has {} answers (min: {})",
                self.text,
                self.answers.len(),
                MIN_ANSWERS
            )));
        }
        if self.correct_index >= self.answers.len() {
            return Err(QuizError::InvalidContent(format!(
                "question \"{}\" has correctIndex {} but only {} answers",
                self.text,
                self.correct_index,
                self.answers.len()
            )));
        }
        Ok(())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

/// Ordered, non-empty question sequence fixed for a process run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting empty content and invalid questions
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        if questions.is_empty() {
            return Err(QuizError::InvalidContent(
                "question bank is empty".to_string(),
            ));
        }
        // Deserialized questions bypass Question::new
        for question in &questions {
            question.validate()?;
        }
        Ok(Self { questions })
    }

    /// Parse a JSON list of `{text, answers, correctIndex}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// Load a bank from a JSON question file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to read question file {}: {}",
                path.display(),
                e
            ))
        })?;
        let bank = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), questions = bank.len(), "loaded question file");
        Ok(bank)
    }

    /// The compiled-in wizarding-world trivia bank
    pub fn builtin() -> Self {
        let raw: [(&str, [&str; 3], usize); 10] = [
            ("What is the name of Harry Potter's owl?", ["Hedwig", "Crookshanks", "Scabbers"], 0),
            ("Which spell opens doors?", ["Alohomora", "Expelliarmus", "Lumos"], 0),
            (
                "Who is headmaster of Hogwarts at the beginning?",
                ["Severus Snape", "Albus Dumbledore", "Minerva McGonagall"],
                1,
            ),
            (
                "What is Voldemort's real name?",
                ["Tom Riddle", "Gellert Grindelwald", "Lucius Malfoy"],
                0,
            ),
            ("Which house does Harry Potter belong to?", ["Slytherin", "Ravenclaw", "Gryffindor"], 2),
            ("What is Hagrid's first name?", ["Rubeus", "Horace", "Argus"], 0),
            ("Which animal is on the Hufflepuff crest?", ["Eagle", "Badger", "Lion"], 1),
            (
                "What is the name of Harry's red-haired best friend?",
                ["Ron Weasley", "Neville Longbottom", "Draco Malfoy"],
                0,
            ),
            (
                "Which wizard is known as 'the Dark Lord'?",
                ["Voldemort", "Albus Dumbledore", "Sirius Black"],
                0,
            ),
            ("What is the magical sport Harry plays?", ["Quidditch", "Wizard Chess", "Dueling"], 0),
        ];

        let questions = raw
            .iter()
            .map(|(text, answers, correct_index)| Question {
                text: (*text).to_string(),
                answers: answers.iter().map(|a| (*a).to_string()).collect(),
                correct_index: *correct_index,
            })
            .collect();
        Self { questions }
    }

    /// All questions in presentation order
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
