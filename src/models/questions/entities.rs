use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 题目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 选项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// 经过校验的选项变更，由存储层在一个事务内应用
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerChanges {
    pub updates: Vec<(i64, String, bool)>,
    pub creates: Vec<(String, bool)>,
    pub deletes: Vec<i64>,
}
