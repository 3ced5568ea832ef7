use serde::Serialize;
use ts_rs::TS;

use super::entities::{GradeBand, TakenQuizEntry};
use crate::models::subjects::Subject;

// 学生可参加的测验
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct AvailableQuizItem {
    pub id: i64,
    pub name: String,
    pub subject: Subject,
    pub questions_count: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct AvailableQuizListResponse {
    pub items: Vec<AvailableQuizItem>,
}

// 学生已完成的测验
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct TakenQuizItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub entry: TakenQuizEntry,
    pub grade: GradeBand,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct TakenQuizListResponse {
    pub items: Vec<TakenQuizItem>,
}

// 作答时展示的选项，不包含正确标记
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct AnswerOption {
    pub id: i64,
    pub text: String,
}

// 当前待答题目
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct TakeStateResponse {
    pub quiz_id: i64,
    pub quiz_name: String,
    pub question_id: i64,
    pub question_text: String,
    pub answers: Vec<AnswerOption>,
    pub answered: u64,
    pub total: u64,
    pub progress: u32,
}

// completed 为 false 时带 progress，为 true 时带 score
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct SubmitAnswerResponse {
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
