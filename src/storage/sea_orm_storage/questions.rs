//! 题目与选项存储操作

use super::SeaOrmStorage;
use crate::entity::answers::{ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as Answers};
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{ClassroomError, Result};
use crate::models::questions::{Answer, AnswerChanges, Question};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建题目
    pub async fn create_question_impl(&self, quiz_id: i64, text: &str) -> Result<Question> {
        let model = ActiveModel {
            quiz_id: Set(quiz_id),
            text: Set(text.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 获取属于指定测验的题目
    pub async fn get_question_impl(&self, quiz_id: i64, question_id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(question_id)
            .filter(Column::QuizId.eq(quiz_id))
            .one(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 题目的选项，按 id 排序
    pub async fn list_answers_impl(&self, question_id: i64) -> Result<Vec<Answer>> {
        let answers = Answers::find()
            .filter(AnswerColumn::QuestionId.eq(question_id))
            .order_by_asc(AnswerColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("查询选项失败: {e}")))?;

        Ok(answers.into_iter().map(|m| m.into_answer()).collect())
    }

    /// 在一个事务内保存题干与选项变更
    pub async fn save_question_formset_impl(
        &self,
        question_id: i64,
        text: &str,
        changes: AnswerChanges,
    ) -> Result<(Question, Vec<Answer>)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("开启事务失败: {e}")))?;

        let question = ActiveModel {
            id: Set(question_id),
            text: Set(text.to_string()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| ClassroomError::database_operation(format!("更新题目失败: {e}")))?;

        if !changes.deletes.is_empty() {
            Answers::delete_many()
                .filter(AnswerColumn::QuestionId.eq(question_id))
                .filter(AnswerColumn::Id.is_in(changes.deletes))
                .exec(&txn)
                .await
                .map_err(|e| ClassroomError::database_operation(format!("删除选项失败: {e}")))?;
        }

        for (answer_id, answer_text, is_correct) in changes.updates {
            Answers::update_many()
                .col_expr(AnswerColumn::Text, Expr::value(answer_text))
                .col_expr(AnswerColumn::IsCorrect, Expr::value(is_correct))
                .filter(AnswerColumn::Id.eq(answer_id))
                .filter(AnswerColumn::QuestionId.eq(question_id))
                .exec(&txn)
                .await
                .map_err(|e| ClassroomError::database_operation(format!("更新选项失败: {e}")))?;
        }

        for (answer_text, is_correct) in changes.creates {
            AnswerActiveModel {
                question_id: Set(question_id),
                text: Set(answer_text),
                is_correct: Set(is_correct),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("创建选项失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| ClassroomError::database_operation(format!("提交事务失败: {e}")))?;

        let answers = self.list_answers_impl(question_id).await?;
        Ok((question.into_question(), answers))
    }

    /// 删除题目（选项级联删除）
    pub async fn delete_question_impl(&self, question_id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
