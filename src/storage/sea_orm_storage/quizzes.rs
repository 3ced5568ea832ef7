//! 测验存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::taken_quizzes::{Column as TakenColumn, Entity as TakenQuizzes};
use crate::entity::teams::{Column as TeamColumn, Entity as Teams};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    quizzes::{
        Quiz,
        entities::{QuestionSummary, QuizListItem},
        requests::{CreateQuizRequest, UpdateQuizRequest},
    },
    subjects::Subject,
    taking::TakenQuizRecord,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建测验
    pub async fn create_quiz_impl(&self, owner_id: i64, req: CreateQuizRequest) -> Result<Quiz> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            owner_id: Set(owner_id),
            name: Set(req.name),
            subject_id: Set(req.subject_id),
            room_id: Set(req.room_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建测验失败: {e}")))?;

        Ok(result.into_quiz())
    }

    /// 通过 ID 获取测验
    pub async fn get_quiz_by_id_impl(&self, quiz_id: i64) -> Result<Option<Quiz>> {
        let result = Quizzes::find_by_id(quiz_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    /// 列出测验（按名称），附带学科、题目数和完成数
    pub async fn list_quizzes_impl(&self, owner_id: Option<i64>) -> Result<Vec<QuizListItem>> {
        let mut select = Quizzes::find();
        if let Some(owner_id) = owner_id {
            select = select.filter(Column::OwnerId.eq(owner_id));
        }

        let quizzes = select
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询测验列表失败: {e}")))?;

        let quiz_ids: Vec<i64> = quizzes.iter().map(|q| q.id).collect();
        let subject_ids: Vec<i64> = quizzes.iter().map(|q| q.subject_id).collect();

        let subjects = self.subjects_by_ids(&subject_ids).await?;
        let question_counts = self.question_counts(&quiz_ids).await?;
        let taken_counts = self.taken_counts(&quiz_ids).await?;

        Ok(quizzes
            .into_iter()
            .filter_map(|m| {
                let subject = subjects.get(&m.subject_id)?.clone();
                let questions_count = question_counts.get(&m.id).copied().unwrap_or(0);
                let taken_count = taken_counts.get(&m.id).copied().unwrap_or(0);
                Some(QuizListItem {
                    quiz: m.into_quiz(),
                    subject,
                    questions_count,
                    taken_count,
                })
            })
            .collect())
    }

    /// 更新测验
    pub async fn update_quiz_impl(
        &self,
        quiz_id: i64,
        update: UpdateQuizRequest,
    ) -> Result<Option<Quiz>> {
        let Some(existing) = Quizzes::find_by_id(quiz_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询测验失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if update.clear_room {
            model.room_id = Set(None);
        } else if let Some(room_id) = update.room_id {
            model.room_id = Set(Some(room_id));
        }
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("更新测验失败: {e}")))?;

        Ok(Some(result.into_quiz()))
    }

    /// 删除测验（题目、选项、小组和完成记录级联删除）
    pub async fn delete_quiz_impl(&self, quiz_id: i64) -> Result<bool> {
        let result = Quizzes::delete_by_id(quiz_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 测验的题目列表（按 id），附带选项数
    pub async fn list_question_summaries_impl(&self, quiz_id: i64) -> Result<Vec<QuestionSummary>> {
        let questions = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询题目列表失败: {e}")))?;

        let question_ids: Vec<i64> = questions.iter().map(|q| q.id).collect();
        let answer_counts: HashMap<i64, i64> = if question_ids.is_empty() {
            HashMap::new()
        } else {
            Answers::find()
                .select_only()
                .column(AnswerColumn::QuestionId)
                .column_as(AnswerColumn::Id.count(), "count")
                .filter(AnswerColumn::QuestionId.is_in(question_ids))
                .group_by(AnswerColumn::QuestionId)
                .into_tuple::<(i64, i64)>()
                .all(&self.db)
                .await
                .map_err(|e| ClassroomError::database_operation(format!("统计选项数量失败: {e}")))?
                .into_iter()
                .collect()
        };

        Ok(questions
            .into_iter()
            .map(|q| QuestionSummary {
                answers_count: answer_counts.get(&q.id).copied().unwrap_or(0),
                id: q.id,
                text: q.text,
            })
            .collect())
    }

    /// 测验的完成记录，按完成时间倒序
    pub async fn list_quiz_results_impl(&self, quiz_id: i64) -> Result<Vec<TakenQuizRecord>> {
        let taken = TakenQuizzes::find()
            .filter(TakenColumn::QuizId.eq(quiz_id))
            .order_by_desc(TakenColumn::CreatedAt)
            .order_by_desc(TakenColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询完成记录失败: {e}")))?;

        let student_ids: Vec<i64> = taken.iter().map(|t| t.student_id).collect();
        let team_ids: Vec<i64> = taken.iter().filter_map(|t| t.team_id).collect();

        let students: HashMap<i64, _> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            Users::find()
                .filter(UserColumn::Id.is_in(student_ids))
                .all(&self.db)
                .await
                .map_err(|e| ClassroomError::database_operation(format!("查询学生失败: {e}")))?
                .into_iter()
                .map(|u| (u.id, u.into_summary()))
                .collect()
        };
        let team_names = self.team_names_by_ids(&team_ids).await?;

        Ok(taken
            .into_iter()
            .filter_map(|t| {
                let student = students.get(&t.student_id)?.clone();
                let team_name = t.team_id.and_then(|id| team_names.get(&id).cloned());
                Some(TakenQuizRecord {
                    taken: t.into_taken_quiz(),
                    student,
                    team_name,
                })
            })
            .collect())
    }

    /// 按 id 批量加载学科
    pub(super) async fn subjects_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Subject>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let subjects = Subjects::find()
            .filter(SubjectColumn::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学科失败: {e}")))?;

        Ok(subjects
            .into_iter()
            .map(|s| (s.id, s.into_subject()))
            .collect())
    }

    /// 按 id 批量加载小组名称
    pub(super) async fn team_names_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let teams = Teams::find()
            .filter(TeamColumn::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询小组失败: {e}")))?;

        Ok(teams.into_iter().map(|t| (t.id, t.name)).collect())
    }

    /// 每个测验的题目数
    pub(super) async fn question_counts(&self, quiz_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        if quiz_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let counts = Questions::find()
            .select_only()
            .column(QuestionColumn::QuizId)
            .column_as(QuestionColumn::Id.count(), "count")
            .filter(QuestionColumn::QuizId.is_in(quiz_ids.iter().copied()))
            .group_by(QuestionColumn::QuizId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("统计题目数量失败: {e}")))?;

        Ok(counts.into_iter().collect())
    }

    /// 每个测验的完成次数
    pub(super) async fn taken_counts(&self, quiz_ids: &[i64]) -> Result<HashMap<i64, i64>> {
        if quiz_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let counts = TakenQuizzes::find()
            .select_only()
            .column(TakenColumn::QuizId)
            .column_as(TakenColumn::Id.count(), "count")
            .filter(TakenColumn::QuizId.is_in(quiz_ids.iter().copied()))
            .group_by(TakenColumn::QuizId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("统计完成次数失败: {e}")))?;

        Ok(counts.into_iter().collect())
    }
}
