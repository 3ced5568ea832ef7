use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct CreateQuestionRequest {
    pub text: String,
}

// 选项表单项：有 id 则更新或删除该选项，无 id 则新建
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct AnswerFormEntry {
    pub id: Option<i64>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub delete: bool,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct UpdateQuestionRequest {
    pub text: String,
    pub answers: Vec<AnswerFormEntry>,
}
