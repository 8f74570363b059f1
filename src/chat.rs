// Terminal quiz: greets, asks each question in turn and collects the answers.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::info;

use crate::error::KaiError;
use crate::models::AnswerSet;
use crate::prompts::{INITIAL_BOT_MESSAGE, QUESTIONS};

/// Answers collected so far, one per question in order.
#[derive(Debug, Default)]
pub struct QuizSession {
    answers: Vec<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next unanswered question, or `None` once all are answered.
    pub fn current_question(&self) -> Option<&'static str> {
        QUESTIONS.get(self.answers.len()).copied()
    }

    /// 1-based number of the current question.
    pub fn position(&self) -> usize {
        self.answers.len() + 1
    }

    pub fn record_answer(&mut self, answer: impl Into<String>) -> Result<(), KaiError> {
        if self.is_complete() {
            return Err(KaiError::InvalidAnswerCount {
                expected: QUESTIONS.len(),
                actual: self.answers.len() + 1,
            });
        }
        self.answers.push(answer.into());
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == QUESTIONS.len()
    }

    pub fn finish(self) -> Result<AnswerSet, KaiError> {
        AnswerSet::new(self.answers)
    }
}

/// Runs the quiz over any line-based input. Returns `None` if input ends early.
pub fn run_quiz<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<Option<AnswerSet>> {
    info!("Starting quiz session...");
    writeln!(output, "Kai: {}", INITIAL_BOT_MESSAGE)?;

    let mut session = QuizSession::new();
    while let Some(question) = session.current_question() {
        writeln!(output, "\n[{}/{}] Kai: {}", session.position(), QUESTIONS.len(), question)?;
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "\nSession ended before the last question.")?;
            return Ok(None);
        }
        session.record_answer(line.trim_end_matches(['\r', '\n']))?;
    }

    writeln!(output, "\nKai: That's all 24. Give me a sec to read the room...")?;
    Ok(Some(session.finish()?))
}
