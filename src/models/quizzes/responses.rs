use serde::Serialize;
use ts_rs::TS;

use super::entities::{QuestionSummary, Quiz, QuizListItem};
use crate::models::subjects::Subject;
use crate::models::taking::TakenQuizRecord;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListResponse {
    pub items: Vec<QuizListItem>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizDetailResponse {
    pub quiz: Quiz,
    pub subject: Subject,
    pub questions: Vec<QuestionSummary>,
}

// 测验结果；没有人完成时 average_score 为 null
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizResultsResponse {
    pub quiz: Quiz,
    pub taken_quizzes: Vec<TakenQuizRecord>,
    pub total_taken_quizzes: i64,
    pub average_score: Option<f64>,
}
