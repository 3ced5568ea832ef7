use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_SUBJECT_COLOR: &str = "#007bff";

// 学科
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
    /// 十六进制颜色，前端用于渲染学科标签
    pub color: String,
}
