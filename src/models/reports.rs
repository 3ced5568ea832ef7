//! 报表导出使用的数据行

/// 测验结果表的一行（一次完成记录）
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResultRow {
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub student_name: String,
    pub quiz_name: String,
    pub taken_at: chrono::DateTime<chrono::Utc>,
    pub score: f64,
}

/// 学生单次测验结果
#[derive(Debug, Clone, PartialEq)]
pub struct StudentResultReport {
    pub username: String,
    pub team_name: Option<String>,
    pub team_members: Vec<String>,
    pub score: f64,
    pub rows: Vec<StudentAnswerRow>,
}

/// 学生作答明细
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAnswerRow {
    pub question: String,
    pub answer: String,
    pub is_correct: bool,
}
