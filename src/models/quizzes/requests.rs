use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct CreateQuizRequest {
    pub name: String,
    pub subject_id: i64,
    pub room_id: Option<i64>,
}

// 所有字段可选；clear_room 为 true 时解除聊天室关联
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct UpdateQuizRequest {
    pub name: Option<String>,
    pub subject_id: Option<i64>,
    pub room_id: Option<i64>,
    #[serde(default)]
    pub clear_room: bool,
}

// 导出参数 ?format=xlsx|csv
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "../frontend/src/types/generated/quiz.ts")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}
