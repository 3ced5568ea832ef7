//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod questions;
mod quizzes;
mod reports;
mod rooms;
mod subjects;
mod taking;
mod teams;
mod users;

use crate::config::AppConfig;
use crate::errors::{ClassroomError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// 写入失败：唯一约束冲突视为并发重复提交，返回 Conflict
pub(crate) fn write_error(err: DbErr, context: &str, conflict: &str) -> ClassroomError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ClassroomError::conflict(conflict),
        _ => ClassroomError::database_operation(format!("{context}: {err}")),
    }
}

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 根据全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);
        Ok(storage)
    }

    /// 在已有连接上运行迁移并创建存储实例
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite 数据库（单连接，连接关闭即丢弃数据）
    pub async fn new_in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(opt).await.map_err(|e| {
            ClassroomError::database_connection(format!("无法创建内存数据库: {e}"))
        })?;

        Self::from_connection(db).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassroomError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassroomError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
    taking::{
        SubmitOutcome, TakeProgress, TakenQuiz, TakenQuizEntry, TakenQuizRecord,
        responses::AvailableQuizItem,
    },
    teams::{Team, entities::TeamListItem},
    users::{User, UserSummary, requests::NewUser},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: NewUser) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn create_student(&self, user: NewUser, interests: &[i64]) -> Result<User> {
        self.create_student_impl(user, interests).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学科模块
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_name(&self, name: &str) -> Result<Option<Subject>> {
        self.get_subject_by_name_impl(name).await
    }

    async fn create_subject(&self, name: &str, color: &str) -> Result<Subject> {
        self.create_subject_impl(name, color).await
    }

    async fn count_subjects_in(&self, ids: &[i64]) -> Result<u64> {
        self.count_subjects_in_impl(ids).await
    }

    async fn list_student_interests(&self, student_id: i64) -> Result<Vec<Subject>> {
        self.list_student_interests_impl(student_id).await
    }

    async fn set_student_interests(
        &self,
        student_id: i64,
        subject_ids: &[i64],
    ) -> Result<Vec<Subject>> {
        self.set_student_interests_impl(student_id, subject_ids)
            .await
    }

    // 测验模块
    async fn create_quiz(&self, owner_id: i64, quiz: CreateQuizRequest) -> Result<Quiz> {
        self.create_quiz_impl(owner_id, quiz).await
    }

    async fn get_quiz_by_id(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        self.get_quiz_by_id_impl(quiz_id).await
    }

    async fn list_quizzes(&self, owner_id: Option<i64>) -> Result<Vec<QuizListItem>> {
        self.list_quizzes_impl(owner_id).await
    }

    async fn update_quiz(&self, quiz_id: i64, update: UpdateQuizRequest) -> Result<Option<Quiz>> {
        self.update_quiz_impl(quiz_id, update).await
    }

    async fn delete_quiz(&self, quiz_id: i64) -> Result<bool> {
        self.delete_quiz_impl(quiz_id).await
    }

    async fn list_question_summaries(&self, quiz_id: i64) -> Result<Vec<QuestionSummary>> {
        self.list_question_summaries_impl(quiz_id).await
    }

    async fn list_quiz_results(&self, quiz_id: i64) -> Result<Vec<TakenQuizRecord>> {
        self.list_quiz_results_impl(quiz_id).await
    }

    // 题目模块
    async fn create_question(&self, quiz_id: i64, text: &str) -> Result<Question> {
        self.create_question_impl(quiz_id, text).await
    }

    async fn get_question(&self, quiz_id: i64, question_id: i64) -> Result<Option<Question>> {
        self.get_question_impl(quiz_id, question_id).await
    }

    async fn list_answers(&self, question_id: i64) -> Result<Vec<Answer>> {
        self.list_answers_impl(question_id).await
    }

    async fn save_question_formset(
        &self,
        question_id: i64,
        text: &str,
        changes: AnswerChanges,
    ) -> Result<(Question, Vec<Answer>)> {
        self.save_question_formset_impl(question_id, text, changes)
            .await
    }

    async fn delete_question(&self, question_id: i64) -> Result<bool> {
        self.delete_question_impl(question_id).await
    }

    // 小组模块
    async fn list_teams(&self, owner_id: Option<i64>) -> Result<Vec<TeamListItem>> {
        self.list_teams_impl(owner_id).await
    }

    async fn create_team(&self, name: &str, quiz_id: i64, student_ids: &[i64]) -> Result<Team> {
        self.create_team_impl(name, quiz_id, student_ids).await
    }

    async fn get_team_by_id(&self, team_id: i64) -> Result<Option<Team>> {
        self.get_team_by_id_impl(team_id).await
    }

    async fn list_team_members(&self, team_id: i64) -> Result<Vec<UserSummary>> {
        self.list_team_members_impl(team_id).await
    }

    async fn delete_team(&self, team_id: i64) -> Result<bool> {
        self.delete_team_impl(team_id).await
    }

    // 答题模块
    async fn list_available_quizzes(&self, student_id: i64) -> Result<Vec<AvailableQuizItem>> {
        self.list_available_quizzes_impl(student_id).await
    }

    async fn list_taken_quizzes(&self, student_id: i64) -> Result<Vec<TakenQuizEntry>> {
        self.list_taken_quizzes_impl(student_id).await
    }

    async fn get_taken_quiz(&self, student_id: i64, quiz_id: i64) -> Result<Option<TakenQuiz>> {
        self.get_taken_quiz_impl(student_id, quiz_id).await
    }

    async fn get_take_progress(&self, student_id: i64, quiz_id: i64) -> Result<TakeProgress> {
        self.get_take_progress_impl(student_id, quiz_id).await
    }

    async fn submit_answer(
        &self,
        student_id: i64,
        quiz_id: i64,
        answer_id: i64,
    ) -> Result<SubmitOutcome> {
        self.submit_answer_impl(student_id, quiz_id, answer_id)
            .await
    }

    // 报表模块
    async fn list_quiz_result_rows(&self, quiz_id: i64) -> Result<Vec<QuizResultRow>> {
        self.list_quiz_result_rows_impl(quiz_id).await
    }

    async fn get_student_result_report(
        &self,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<Option<StudentResultReport>> {
        self.get_student_result_report_impl(student_id, quiz_id)
            .await
    }

    // 聊天室模块
    async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.list_rooms_impl().await
    }

    async fn get_room_by_id(&self, room_id: i64) -> Result<Option<Room>> {
        self.get_room_by_id_impl(room_id).await
    }

    async fn get_room_by_name(&self, name: &str) -> Result<Option<Room>> {
        self.get_room_by_name_impl(name).await
    }

    async fn create_room(&self, name: &str) -> Result<Room> {
        self.create_room_impl(name).await
    }

    async fn list_messages_page(
        &self,
        room_id: i64,
        query: PaginationQuery,
    ) -> Result<PaginatedResponse<MessageItem>> {
        self.list_messages_page_impl(room_id, query).await
    }

    async fn list_messages(&self, room_id: i64) -> Result<Vec<MessageItem>> {
        self.list_messages_impl(room_id).await
    }

    async fn create_message(
        &self,
        room_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<MessageItem> {
        self.create_message_impl(room_id, user_id, content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_unique_violation_maps_to_conflict() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .db
            .execute_unprepared("CREATE TABLE picks (student INTEGER, question INTEGER, UNIQUE (student, question))")
            .await
            .unwrap();
        storage
            .db
            .execute_unprepared("INSERT INTO picks VALUES (1, 1)")
            .await
            .unwrap();

        let err = storage
            .db
            .execute_unprepared("INSERT INTO picks VALUES (1, 1)")
            .await
            .unwrap_err();
        let mapped = write_error(err, "保存答案失败", "quiz already taken");
        assert!(matches!(mapped, ClassroomError::Conflict(ref m) if m == "quiz already taken"));

        let err = storage
            .db
            .execute_unprepared("INSERT INTO missing_table VALUES (1)")
            .await
            .unwrap_err();
        assert_eq!(write_error(err, "保存答案失败", "x").code(), "E004");
    }
}
