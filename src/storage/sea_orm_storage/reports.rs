//! 报表数据查询

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::quizzes::Entity as Quizzes;
use crate::entity::student_answers::{Column as StudentAnswerColumn, Entity as StudentAnswers};
use crate::entity::taken_quizzes::{Column, Entity as TakenQuizzes};
use crate::entity::teams::Entity as Teams;
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::reports::{QuizResultRow, StudentAnswerRow, StudentResultReport};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 测验结果表的数据行，按完成时间倒序
    pub async fn list_quiz_result_rows_impl(&self, quiz_id: i64) -> Result<Vec<QuizResultRow>> {
        let Some(quiz) = Quizzes::find_by_id(quiz_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询测验失败: {e}")))?
        else {
            return Ok(Vec::new());
        };

        let taken = TakenQuizzes::find()
            .filter(Column::QuizId.eq(quiz_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询完成记录失败: {e}")))?;

        if taken.is_empty() {
            return Ok(Vec::new());
        }

        let students: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(taken.iter().map(|t| t.student_id)))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学生失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.display_label()))
            .collect();
        let team_ids: Vec<i64> = taken.iter().filter_map(|t| t.team_id).collect();
        let team_names = self.team_names_by_ids(&team_ids).await?;

        Ok(taken
            .into_iter()
            .map(|t| QuizResultRow {
                team_id: t.team_id,
                team_name: t.team_id.and_then(|id| team_names.get(&id).cloned()),
                student_name: students.get(&t.student_id).cloned().unwrap_or_default(),
                quiz_name: quiz.name.clone(),
                taken_at: crate::entity::to_datetime(t.created_at),
                score: t.score,
            })
            .collect())
    }

    /// 学生某次完成测验的作答明细；未完成时返回 None
    pub async fn get_student_result_report_impl(
        &self,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<Option<StudentResultReport>> {
        let Some(taken) = TakenQuizzes::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::QuizId.eq(quiz_id))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询完成记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let Some(student) = Users::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        // 小组名称与成员
        let (team_name, team_members) = match taken.team_id {
            Some(team_id) => {
                let team = Teams::find_by_id(team_id)
                    .one(&self.db)
                    .await
                    .map_err(|e| ClassroomError::database_operation(format!("查询小组失败: {e}")))?;
                // 只列出以该小组身份完成本测验的学生
                let member_ids: Vec<i64> = TakenQuizzes::find()
                    .filter(Column::QuizId.eq(quiz_id))
                    .filter(Column::TeamId.eq(team_id))
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        ClassroomError::database_operation(format!("查询小组成员失败: {e}"))
                    })?
                    .into_iter()
                    .map(|t| t.student_id)
                    .collect();
                let members = Users::find()
                    .filter(UserColumn::Id.is_in(member_ids))
                    .order_by_asc(UserColumn::Username)
                    .all(&self.db)
                    .await
                    .map_err(|e| {
                        ClassroomError::database_operation(format!("查询小组成员失败: {e}"))
                    })?
                    .iter()
                    .map(|u| u.display_label())
                    .collect();
                (team.map(|t| t.name), members)
            }
            None => (None, Vec::new()),
        };

        // 作答明细，按题目顺序
        let questions = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询题目失败: {e}")))?;

        let chosen: HashMap<i64, i64> = StudentAnswers::find()
            .filter(StudentAnswerColumn::StudentId.eq(student_id))
            .filter(StudentAnswerColumn::QuestionId.is_in(questions.iter().map(|q| q.id)))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询作答记录失败: {e}")))?
            .into_iter()
            .map(|a| (a.question_id, a.answer_id))
            .collect();

        let answers: HashMap<i64, _> = Answers::find()
            .filter(AnswerColumn::Id.is_in(chosen.values().copied()))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询选项失败: {e}")))?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let rows = questions
            .into_iter()
            .filter_map(|q| {
                let answer = answers.get(chosen.get(&q.id)?)?;
                Some(StudentAnswerRow {
                    question: q.text,
                    answer: answer.text.clone(),
                    is_correct: answer.is_correct,
                })
            })
            .collect();

        Ok(Some(StudentResultReport {
            username: student.username,
            team_name,
            team_members,
            score: taken.score,
            rows,
        }))
    }
}
