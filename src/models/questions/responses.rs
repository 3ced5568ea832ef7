use serde::Serialize;
use ts_rs::TS;

use super::entities::{Answer, Question};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionDetailResponse {
    pub question: Question,
    pub answers: Vec<Answer>,
}
