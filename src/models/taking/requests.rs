use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct SubmitAnswerRequest {
    pub answer_id: i64,
}
