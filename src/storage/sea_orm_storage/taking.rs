//! 学生答题存储操作

use std::collections::HashSet;

use super::{SeaOrmStorage, write_error};
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::quizzes::{Column as QuizColumn, Entity as Quizzes};
use crate::entity::student_answers::{
    ActiveModel as StudentAnswerActiveModel, Column as StudentAnswerColumn, Entity as StudentAnswers,
};
use crate::entity::student_interests::{Column as InterestColumn, Entity as StudentInterests};
use crate::entity::taken_quizzes::{ActiveModel, Column, Entity as TakenQuizzes};
use crate::errors::{ClassroomError, Result};
use crate::models::taking::{
    SubmitOutcome, TakeProgress, TakenQuiz, TakenQuizEntry, responses::AvailableQuizItem,
};
use crate::services::students::progress;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 兴趣学科内、未完成且至少有一道题的测验，按名称排序
    pub async fn list_available_quizzes_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<AvailableQuizItem>> {
        let interest_ids: Vec<i64> = StudentInterests::find()
            .filter(InterestColumn::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询兴趣学科失败: {e}")))?
            .into_iter()
            .map(|m| m.subject_id)
            .collect();

        if interest_ids.is_empty() {
            return Ok(Vec::new());
        }

        let taken_ids: Vec<i64> = TakenQuizzes::find()
            .filter(Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询完成记录失败: {e}")))?
            .into_iter()
            .map(|t| t.quiz_id)
            .collect();

        let mut select = Quizzes::find().filter(QuizColumn::SubjectId.is_in(interest_ids));
        if !taken_ids.is_empty() {
            select = select.filter(QuizColumn::Id.is_not_in(taken_ids));
        }

        let quizzes = select
            .order_by_asc(QuizColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询测验列表失败: {e}")))?;

        let quiz_ids: Vec<i64> = quizzes.iter().map(|q| q.id).collect();
        let subject_ids: Vec<i64> = quizzes.iter().map(|q| q.subject_id).collect();
        let question_counts = self.question_counts(&quiz_ids).await?;
        let subjects = self.subjects_by_ids(&subject_ids).await?;

        Ok(quizzes
            .into_iter()
            .filter_map(|q| {
                let questions_count = question_counts.get(&q.id).copied().unwrap_or(0);
                if questions_count == 0 {
                    return None;
                }
                Some(AvailableQuizItem {
                    subject: subjects.get(&q.subject_id)?.clone(),
                    id: q.id,
                    name: q.name,
                    questions_count,
                })
            })
            .collect())
    }

    /// 学生已完成的测验，按测验名称排序
    pub async fn list_taken_quizzes_impl(&self, student_id: i64) -> Result<Vec<TakenQuizEntry>> {
        let taken = TakenQuizzes::find()
            .filter(Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询完成记录失败: {e}")))?;

        if taken.is_empty() {
            return Ok(Vec::new());
        }

        let quizzes: std::collections::HashMap<i64, _> = Quizzes::find()
            .filter(QuizColumn::Id.is_in(taken.iter().map(|t| t.quiz_id)))
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询测验失败: {e}")))?
            .into_iter()
            .map(|q| (q.id, q))
            .collect();
        let subject_ids: Vec<i64> = quizzes.values().map(|q| q.subject_id).collect();
        let subjects = self.subjects_by_ids(&subject_ids).await?;

        let mut entries: Vec<TakenQuizEntry> = taken
            .into_iter()
            .filter_map(|t| {
                let quiz = quizzes.get(&t.quiz_id)?;
                Some(TakenQuizEntry {
                    quiz_name: quiz.name.clone(),
                    subject: subjects.get(&quiz.subject_id)?.clone(),
                    taken: t.into_taken_quiz(),
                })
            })
            .collect();
        entries.sort_by(|a, b| a.quiz_name.cmp(&b.quiz_name));

        Ok(entries)
    }

    pub async fn get_taken_quiz_impl(
        &self,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<Option<TakenQuiz>> {
        Self::find_taken_quiz(&self.db, student_id, quiz_id).await
    }

    pub async fn get_take_progress_impl(
        &self,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<TakeProgress> {
        Self::load_take_progress(&self.db, student_id, quiz_id).await
    }

    /// 记录一个答案；最后一题答完时在同一事务内计算分数并写入完成记录
    pub async fn submit_answer_impl(
        &self,
        student_id: i64,
        quiz_id: i64,
        answer_id: i64,
    ) -> Result<SubmitOutcome> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("开启事务失败: {e}")))?;

        if Self::find_taken_quiz(&txn, student_id, quiz_id).await?.is_some() {
            return Err(ClassroomError::conflict("quiz already taken"));
        }

        let state = Self::load_take_progress(&txn, student_id, quiz_id).await?;
        if state.total == 0 {
            return Err(ClassroomError::not_found("Quiz has no questions"));
        }
        let Some(question) = state.question else {
            return Err(ClassroomError::conflict("quiz already taken"));
        };

        if !state.answers.iter().any(|a| a.id == answer_id) {
            return Err(ClassroomError::validation(
                "Answer does not belong to the current question",
            ));
        }

        StudentAnswerActiveModel {
            student_id: Set(student_id),
            question_id: Set(question.id),
            answer_id: Set(answer_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| write_error(e, "保存答案失败", "quiz already taken"))?;

        let answered = state.answered + 1;
        if answered < state.total {
            txn.commit()
                .await
                .map_err(|e| ClassroomError::database_operation(format!("提交事务失败: {e}")))?;
            return Ok(SubmitOutcome::InProgress {
                answered,
                total: state.total,
            });
        }

        let correct = Self::count_correct_answers(&txn, student_id, quiz_id).await?;
        let team_id = Self::find_student_team(&txn, student_id, quiz_id).await?;

        let taken = ActiveModel {
            student_id: Set(student_id),
            quiz_id: Set(quiz_id),
            team_id: Set(team_id),
            score: Set(progress::quiz_score(correct, state.total)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| write_error(e, "保存完成记录失败", "quiz already taken"))?;

        txn.commit()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(SubmitOutcome::Completed(taken.into_taken_quiz()))
    }

    async fn find_taken_quiz<C: ConnectionTrait>(
        conn: &C,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<Option<TakenQuiz>> {
        let result = TakenQuizzes::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::QuizId.eq(quiz_id))
            .one(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询完成记录失败: {e}")))?;

        Ok(result.map(|m| m.into_taken_quiz()))
    }

    /// 题目按 id 排序，第一道未作答的即为当前题目
    async fn load_take_progress<C: ConnectionTrait>(
        conn: &C,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<TakeProgress> {
        let questions = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .order_by_asc(QuestionColumn::Id)
            .all(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询题目失败: {e}")))?;

        let total = questions.len() as u64;
        if questions.is_empty() {
            return Ok(TakeProgress {
                question: None,
                answers: Vec::new(),
                answered: 0,
                total,
            });
        }

        let answered_ids: HashSet<i64> = StudentAnswers::find()
            .filter(StudentAnswerColumn::StudentId.eq(student_id))
            .filter(StudentAnswerColumn::QuestionId.is_in(questions.iter().map(|q| q.id)))
            .all(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询作答记录失败: {e}")))?
            .into_iter()
            .map(|a| a.question_id)
            .collect();

        let answered = answered_ids.len() as u64;
        let Some(question) = questions
            .into_iter()
            .find(|q| !answered_ids.contains(&q.id))
        else {
            return Ok(TakeProgress {
                question: None,
                answers: Vec::new(),
                answered,
                total,
            });
        };

        let answers = Answers::find()
            .filter(AnswerColumn::QuestionId.eq(question.id))
            .order_by_asc(AnswerColumn::Text)
            .order_by_asc(AnswerColumn::Id)
            .all(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询选项失败: {e}")))?;

        Ok(TakeProgress {
            question: Some(question.into_question()),
            answers: answers.into_iter().map(|a| a.into_answer()).collect(),
            answered,
            total,
        })
    }

    /// 学生在某个测验中选对的题目数
    async fn count_correct_answers<C: ConnectionTrait>(
        conn: &C,
        student_id: i64,
        quiz_id: i64,
    ) -> Result<u64> {
        let question_ids: Vec<i64> = Questions::find()
            .filter(QuestionColumn::QuizId.eq(quiz_id))
            .all(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询题目失败: {e}")))?
            .into_iter()
            .map(|q| q.id)
            .collect();

        let chosen: Vec<i64> = StudentAnswers::find()
            .filter(StudentAnswerColumn::StudentId.eq(student_id))
            .filter(StudentAnswerColumn::QuestionId.is_in(question_ids))
            .all(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询作答记录失败: {e}")))?
            .into_iter()
            .map(|a| a.answer_id)
            .collect();

        if chosen.is_empty() {
            return Ok(0);
        }

        Answers::find()
            .filter(AnswerColumn::Id.is_in(chosen))
            .filter(AnswerColumn::IsCorrect.eq(true))
            .count(conn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("统计正确答案失败: {e}")))
    }
}
