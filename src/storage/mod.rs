use crate::models::{
    PaginatedResponse, PaginationQuery,
    questions::{Answer, AnswerChanges, Question},
    quizzes::{
        Quiz,
        entities::{QuestionSummary, QuizListItem},
        requests::{CreateQuizRequest, UpdateQuizRequest},
    },
    reports::{QuizResultRow, StudentResultReport},
    rooms::{MessageItem, Room},
    subjects::Subject,
    taking::{SubmitOutcome, TakeProgress, TakenQuiz, TakenQuizEntry, TakenQuizRecord, responses::AvailableQuizItem},
    teams::{Team, entities::TeamListItem},
    users::{User, UserSummary, requests::NewUser},
};

use crate::errors::Result;
use std::sync::Arc;

pub mod sea_orm_storage;

pub use sea_orm_storage::SeaOrmStorage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 在一个事务内创建学生及其兴趣学科
    async fn create_student(&self, user: NewUser, interests: &[i64]) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 学科与兴趣方法
    // 按名称排序列出学科
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>>;
    async fn create_subject(&self, name: &str, color: &str) -> Result<Subject>;
    // 统计给定 id 中实际存在的学科数量
    async fn count_subjects_in(&self, ids: &[i64]) -> Result<u64>;
    async fn list_student_interests(&self, student_id: i64) -> Result<Vec<Subject>>;
    // 替换学生的兴趣学科
    async fn set_student_interests(
        &self,
        student_id: i64,
        subject_ids: &[i64],
    ) -> Result<Vec<Subject>>;

    /// 测验管理方法
    async fn create_quiz(&self, owner_id: i64, quiz: CreateQuizRequest) -> Result<Quiz>;
    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<Quiz>>;
    // owner_id 为 None 时列出全部测验
    async fn list_quizzes(&self, owner_id: Option<i64>) -> Result<Vec<QuizListItem>>;
    async fn update_quiz(&self, quiz_id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>>;
    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool>;
    // 测验的题目及选项数量
    async fn list_question_summaries(&self, quiz_id: i64) -> Result<Vec<QuestionSummary>>;
    // 测验的完成记录，按完成时间倒序
    async fn list_quiz_results(&self, quiz_id: i64) -> Result<Vec<TakenQuizRecord>>;

    /// 题目与选项方法
    async fn create_question(&self, quiz_id: i64, text: &str) -> Result<Question>;
    async fn get_question(&self, quiz_id: i64, question_id: i64) -> Result<Option<Question>>;
    async fn list_answers(&self, question_id: i64) -> Result<Vec<Answer>>;
    // 在一个事务内保存题干和选项变更
    async fn save_question_formset(
        &self,
        question_id: i64,
        text: &str,
        changes: AnswerChanges,
    ) -> Result<(Question, Vec<Answer>)>;
    async fn delete_question(&self, question_id: i64) -> Result<bool>;

    /// 小组方法
    // owner_id 为 None 时列出全部小组
    async fn list_teams(&self, owner_id: Option<i64>) -> Result<Vec<TeamListItem>>;
    // 在一个事务内创建小组及成员
    async fn create_team(&self, name: &str, quiz_id: i64, student_ids: &[i64]) -> Result<Team>;
    async fn get_team_by_id(&self, team_id: i64) -> Result<Option<Team>>;
    async fn list_team_members(&self, team_id: i64) -> Result<Vec<UserSummary>>;
    async fn delete_team(&self, team_id: i64) -> Result<bool>;

    /// 学生答题方法
    // 兴趣学科内、未完成且至少有一道题的测验
    async fn list_available_quizzes(&self, student_id: i64) -> Result<Vec<AvailableQuizItem>>;
    async fn list_taken_quizzes(&self, student_id: i64) -> Result<Vec<TakenQuizEntry>>;
    async fn get_taken_quiz(&self, student_id: i64, quiz_id: i64) -> Result<Option<TakenQuiz>>;
    // 第一道未答题目（按 id）及其选项（按文本排序）
    async fn get_take_progress(&self, student_id: i64, quiz_id: i64) -> Result<TakeProgress>;
    // 记录答案；答完最后一题时在同一事务内写入完成记录
    async fn submit_answer(
        &self,
        student_id: i64,
        quiz_id: i64,
        answer_id: i64,
    ) -> Result<SubmitOutcome>;

    /// 报表方法
    async fn list_quiz_result_rows(&self, quiz_id: i64) -> Result<Vec<QuizResultRow>>;
    async fn get_student_result_report(
        &self,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<Option<StudentResultReport>>;

    /// 聊天室方法
    async fn list_rooms(&self) -> Result<Vec<Room>>;
    async fn get_room_by_id(&self, room_id: i64) -> Result<Option<Room>>;
    async fn get_room_by_name(&self, name: &str) -> Result<Option<Room>>;
    async fn create_room(&self, name: &str) -> Result<Room>;
    // 分页列出消息，按创建时间升序
    async fn list_messages_page(
        &self,
        room_id: i64,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<MessageItem>>;
    async fn list_messages(&self, room_id: i64) -> Result<Vec<MessageItem>>;
    async fn create_message(&self, room_id: i64, user_id: i64, content: &str)
    -> Result<MessageItem>;
}

/// 根据配置创建存储后端
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
