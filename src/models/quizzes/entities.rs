use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::subjects::Subject;

// 测验
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct Quiz {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub subject_id: i64,
    pub room_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 教师测验列表项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuizListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub quiz: Quiz,
    pub subject: Subject,
    pub questions_count: i64,
    pub taken_count: i64,
}

// 题目摘要（测验详情中使用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct QuestionSummary {
    pub id: i64,
    pub text: String,
    pub answers_count: i64,
}
