use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 小组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub quiz_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct TeamListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub team: Team,
    pub quiz_name: String,
    pub students_count: i64,
}
