use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/team.ts")]
pub struct CreateTeamRequest {
    pub name: String,
    pub quiz_id: i64,
    pub student_ids: Vec<i64>,
}
