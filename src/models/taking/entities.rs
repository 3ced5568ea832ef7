use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::subjects::Subject;
use crate::models::users::UserSummary;

// 完成记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct TakenQuiz {
    pub id: i64,
    pub student_id: i64,
    pub quiz_id: i64,
    pub team_id: Option<i64>,
    pub score: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 教师查看的完成记录，附带学生与小组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct TakenQuizRecord {
    #[serde(flatten)]
    #[ts(flatten)]
    pub taken: TakenQuiz,
    pub student: UserSummary,
    pub team_name: Option<String>,
}

// 学生的完成记录，附带测验名和学科
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub struct TakenQuizEntry {
    #[serde(flatten)]
    #[ts(flatten)]
    pub taken: TakenQuiz,
    pub quiz_name: String,
    pub subject: Subject,
}

// 0..10 分制的成绩等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/taking.ts")]
pub enum GradeBand {
    Excellent,
    Good,
    Satisfactory,
    Unsatisfactory,
}

impl GradeBand {
    pub const ALL: [GradeBand; 4] = [
        GradeBand::Excellent,
        GradeBand::Good,
        GradeBand::Satisfactory,
        GradeBand::Unsatisfactory,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GradeBand::Excellent => "Excellent",
            GradeBand::Good => "Good",
            GradeBand::Satisfactory => "Satisfactory",
            GradeBand::Unsatisfactory => "Unsatisfactory",
        }
    }
}

/// 学生在某个测验中的答题进度
#[derive(Debug, Clone)]
pub struct TakeProgress {
    /// 第一道未答题目，全部答完时为 None
    pub question: Option<crate::models::questions::Question>,
    pub answers: Vec<crate::models::questions::Answer>,
    pub answered: u64,
    pub total: u64,
}

/// 提交一个答案后的结果
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// 还有未答题目
    InProgress { answered: u64, total: u64 },
    /// 最后一题已答，已写入完成记录
    Completed(TakenQuiz),
}
