pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{GradeBand, SubmitOutcome, TakeProgress, TakenQuiz, TakenQuizEntry, TakenQuizRecord};
