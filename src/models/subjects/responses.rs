use super::entities::Subject;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectListResponse {
    pub items: Vec<Subject>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct InterestsResponse {
    pub subjects: Vec<Subject>,
}
